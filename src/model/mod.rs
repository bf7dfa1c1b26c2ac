mod auth_model;
mod file_model;

pub use auth_model::{ErrorBody, LoginRequest, SuccessResponse};
pub use file_model::{format_bytes, FetchFilesResponse, FileRecord, FilesPayload, Provider, PROVIDERS};
