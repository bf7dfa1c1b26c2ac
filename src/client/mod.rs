//! Dashboard-side engine: sign-in, filtered listing, selection, deletes and
//! uploads against the gateway. Single-threaded; time comes from a `Clock`.

pub mod api;
pub mod clock;
pub mod debounce;
pub mod error;
pub mod filters;
pub mod manager;
pub mod selection;
pub mod session;
pub mod status;
pub mod upload;

#[cfg(test)]
pub(crate) mod fake;

pub use api::{FilesApi, HttpFilesApi};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ClientError, Field, ValidationError};
pub use filters::{DateRange, FetchKey, FileFilters, ListQuery, ProviderFilter, SortOrder};
pub use manager::{FetchState, FetchTicket, FileManager, UploadCallback};
pub use selection::Selection;
pub use session::{AuthState, Session};
pub use status::{AfterReset, MutationPhase, StatusIndicator};
pub use upload::{UploadFile, UploadForm, ValidatedUpload};
