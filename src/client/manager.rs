use std::time::{Duration, Instant};

use super::api::FilesApi;
use super::clock::Clock;
use super::error::ClientError;
use super::filters::{DateRange, FetchKey, FileFilters, ListQuery, ProviderFilter, SortOrder};
use super::selection::Selection;
use super::status::{AfterReset, StatusIndicator};
use super::upload::UploadForm;
use crate::constants::{ERROR_DISPLAY, FILTER_DEBOUNCE, SUCCESS_DISPLAY};
use crate::model::FileRecord;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Fetching,
    Ready,
    Errored(String),
}

/// One issued listing request. Only the most recently issued ticket may
/// update the listing.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    seq: u64,
    key: FetchKey,
    query: ListQuery,
}

impl FetchTicket {
    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn key(&self) -> &FetchKey {
        &self.key
    }
}

/// Runs after a successful upload instead of the default invalidation.
pub type UploadCallback<A, C> = Box<dyn FnOnce(&mut FileManager<A, C>)>;

/// Filter, listing, selection and mutation state behind the dashboard.
pub struct FileManager<A, C> {
    api: A,
    clock: C,
    filters: FileFilters,
    files: Vec<FileRecord>,
    selection: Selection,
    fetch_state: FetchState,
    last_key: Option<FetchKey>,
    issued: u64,
    stale: bool,
    revalidate: bool,
    delete_status: StatusIndicator,
    upload_status: StatusIndicator,
    upload_open: bool,
    signed_out: bool,
}

impl<A: FilesApi, C: Clock> FileManager<A, C> {
    pub fn new(api: A, clock: C) -> Self {
        Self::with_debounce(api, clock, FILTER_DEBOUNCE)
    }

    pub fn with_debounce(api: A, clock: C, debounce: Duration) -> Self {
        Self {
            api,
            clock,
            filters: FileFilters::new(debounce),
            files: Vec::new(),
            selection: Selection::default(),
            fetch_state: FetchState::Idle,
            last_key: None,
            issued: 0,
            // nothing fetched yet
            stale: true,
            revalidate: false,
            delete_status: StatusIndicator::default(),
            upload_status: StatusIndicator::default(),
            upload_open: false,
            signed_out: false,
        }
    }

    pub fn set_filter_name(&mut self, value: impl Into<String>) {
        let now = self.clock.now();
        self.filters.set_name(value, now);
    }

    pub fn set_filter_path(&mut self, value: impl Into<String>) {
        let now = self.clock.now();
        self.filters.set_path(value, now);
    }

    pub fn set_filter_mimetype(&mut self, value: impl Into<String>) {
        let now = self.clock.now();
        self.filters.set_mimetype(value, now);
    }

    pub fn set_filter_size_min(&mut self, value: impl Into<String>) {
        let now = self.clock.now();
        self.filters.set_size_min(value, now);
    }

    pub fn set_filter_size_max(&mut self, value: impl Into<String>) {
        let now = self.clock.now();
        self.filters.set_size_max(value, now);
    }

    pub fn set_filter_provider(&mut self, provider: ProviderFilter) {
        self.filters.set_provider(provider);
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.filters.set_order(order);
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.filters.set_date_range(range);
    }

    /// Advances debounce windows and status resets to the current time and
    /// reports whether a listing fetch is due.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        self.filters.poll(now);

        if let Some(AfterReset::ClearSelectionAndRefresh) = self.delete_status.tick(now) {
            self.selection.clear();
            self.trigger_revalidation();
        }
        self.upload_status.tick(now);

        self.fetch_due()
    }

    pub fn fetch_due(&self) -> bool {
        if self.signed_out {
            return false;
        }
        self.stale || self.last_key.as_ref() != Some(&self.filters.key())
    }

    /// Earliest moment `poll` has something to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.filters.next_deadline(),
            self.delete_status.next_deadline(),
            self.upload_status.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Commits pending filter input right away, as when the view goes away.
    pub fn unmount(&mut self) {
        self.filters.flush();
    }

    /// Marks the listing stale without touching the upstream cache.
    pub fn refresh(&mut self) {
        self.stale = true;
    }

    /// Marks the listing stale and asks the upstream to bypass its cache on
    /// the next fetch.
    pub fn trigger_revalidation(&mut self) {
        self.revalidate = true;
        self.stale = true;
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        let key = self.filters.key();
        let mut query = ListQuery::from_key(&key);
        if self.revalidate {
            query.revalidate = true;
            self.revalidate = false;
        }

        self.issued += 1;
        self.last_key = Some(key.clone());
        self.stale = false;
        self.fetch_state = FetchState::Fetching;

        FetchTicket {
            seq: self.issued,
            key,
            query,
        }
    }

    /// Applies a listing result. Results of superseded tickets are dropped
    /// and `Ok(false)` is returned. A failure keeps the previous listing.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<FileRecord>, ClientError>,
    ) -> Result<bool, ClientError> {
        if ticket.seq != self.issued {
            log::debug!("## Dropping stale listing #{} (latest #{})", ticket.seq, self.issued);
            return Ok(false);
        }

        match result {
            Ok(files) => {
                self.files = files;
                self.selection.retain_listed(&self.files);
                self.fetch_state = FetchState::Ready;
                Ok(true)
            }
            Err(e) => {
                if e.is_unauthorized() {
                    self.signed_out = true;
                }
                log::error!("Error loading files: {}", e);
                self.fetch_state = FetchState::Errored(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn fetch(&mut self) -> Result<(), ClientError> {
        let ticket = self.begin_fetch();
        let result = self.api.list(ticket.query()).await;
        self.apply_fetch(ticket, result).map(|_| ())
    }

    /// `poll`, then fetch if due. Returns whether a fetch ran.
    pub async fn sync(&mut self) -> Result<bool, ClientError> {
        if !self.poll() {
            return Ok(false);
        }
        self.fetch().await?;
        Ok(true)
    }

    /// Only ids present in the current listing can be selected.
    pub fn toggle_select(&mut self, id: &str) {
        if self.selection.contains(id) || self.files.iter().any(|f| f.id == id) {
            self.selection.toggle(id);
        }
    }

    pub fn toggle_select_all(&mut self) {
        self.selection.toggle_all(&self.files);
    }

    /// Deletes `id`, or the whole selection when `None`. Returns how many
    /// ids were sent.
    pub async fn delete(&mut self, id: Option<&str>) -> Result<usize, ClientError> {
        let ids = match id {
            Some(id) => vec![id.to_string()],
            None => self.selection.ids(),
        };
        if ids.is_empty() {
            return Ok(0);
        }

        // a reset cut short still owes its clear-and-refresh
        if let Some(AfterReset::ClearSelectionAndRefresh) = self.delete_status.start(ids.len()) {
            self.selection.clear();
            self.trigger_revalidation();
        }
        let result = self.api.delete(&ids).await;
        let now = self.clock.now();

        match result {
            Ok(()) => {
                log::info!("## Deleted {} file(s)", ids.len());
                self.delete_status
                    .succeed(now, SUCCESS_DISPLAY, AfterReset::ClearSelectionAndRefresh);
                Ok(ids.len())
            }
            Err(e) => {
                if e.is_unauthorized() {
                    self.signed_out = true;
                }
                log::error!("Delete failed: {}", e);
                self.delete_status.fail(e.to_string(), now, ERROR_DISPLAY);
                Err(e)
            }
        }
    }

    /// Validates and uploads `form`. On success the upload dialog closes at
    /// once, then `on_success` runs, or the listing is refreshed if none.
    pub async fn upload(
        &mut self,
        form: UploadForm,
        on_success: Option<UploadCallback<A, C>>,
    ) -> Result<(), ClientError> {
        let upload = form.validate()?;

        self.upload_status.start(upload.files.len());
        let result = self.api.upload(&upload).await;
        let now = self.clock.now();

        match result {
            Ok(()) => {
                self.upload_open = false;
                self.upload_status.succeed(now, SUCCESS_DISPLAY, AfterReset::Nothing);
                match on_success {
                    Some(callback) => callback(self),
                    None => self.refresh(),
                }
                Ok(())
            }
            Err(e) => {
                if e.is_unauthorized() {
                    self.signed_out = true;
                }
                log::error!("Upload failed: {}", e);
                self.upload_status.fail(e.to_string(), now, ERROR_DISPLAY);
                Err(e)
            }
        }
    }

    pub fn open_upload(&mut self) {
        self.upload_open = true;
    }

    pub fn close_upload(&mut self) {
        self.upload_open = false;
    }

    pub fn upload_open(&self) -> bool {
        self.upload_open
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn filters(&self) -> &FileFilters {
        &self.filters
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch_state
    }

    pub fn is_loading(&self) -> bool {
        self.fetch_state == FetchState::Fetching
    }

    pub fn delete_status(&self) -> &StatusIndicator {
        &self.delete_status
    }

    pub fn upload_status(&self) -> &StatusIndicator {
        &self.upload_status
    }

    pub fn revalidate_pending(&self) -> bool {
        self.revalidate
    }

    /// Set once any call came back unauthorized; the session is gone.
    pub fn signed_out(&self) -> bool {
        self.signed_out
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}
