use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use super::api::FilesApi;
use super::error::ClientError;
use super::filters::ListQuery;
use super::upload::ValidatedUpload;
use crate::model::{FileRecord, Provider};

pub fn file(id: &str, size: u64) -> FileRecord {
    let created = Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap();
    FileRecord {
        id: id.to_string(),
        name: format!("{}.bin", id),
        path: "/".to_string(),
        size,
        mimetype: "application/octet-stream".to_string(),
        provider: Provider::GoogleCloudStorage,
        url: format!("https://cdn.example.com/{}", id),
        created_at: created,
        updated_at: created,
    }
}

/// In-memory `FilesApi` that records every call.
#[derive(Default)]
pub struct FakeApi {
    pub valid_key: String,
    pub files: RefCell<Vec<FileRecord>>,
    pub fail_next: RefCell<Option<ClientError>>,
    pub logins: RefCell<Vec<String>>,
    pub logouts: Cell<usize>,
    pub lists: RefCell<Vec<ListQuery>>,
    pub deletes: RefCell<Vec<Vec<String>>>,
    pub uploads: RefCell<Vec<ValidatedUpload>>,
}

impl FakeApi {
    pub fn with_files(files: Vec<FileRecord>) -> Self {
        Self {
            files: RefCell::new(files),
            ..Self::default()
        }
    }

    pub fn fail_next(&self, error: ClientError) {
        *self.fail_next.borrow_mut() = Some(error);
    }

    fn take_failure(&self) -> Result<(), ClientError> {
        match self.fail_next.borrow_mut().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl FilesApi for FakeApi {
    async fn login(&self, api_key: &str) -> Result<(), ClientError> {
        self.logins.borrow_mut().push(api_key.to_string());
        if api_key == self.valid_key {
            Ok(())
        } else {
            Err(ClientError::Unauthorized)
        }
    }

    async fn logout(&self) -> Result<(), ClientError> {
        self.logouts.set(self.logouts.get() + 1);
        Ok(())
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<FileRecord>, ClientError> {
        self.lists.borrow_mut().push(query.clone());
        self.take_failure()?;

        Ok(self
            .files
            .borrow()
            .iter()
            .filter(|f| query.size_from.map_or(true, |min| f.size >= min))
            .filter(|f| query.size_to.map_or(true, |max| f.size <= max))
            .cloned()
            .collect())
    }

    async fn delete(&self, ids: &[String]) -> Result<(), ClientError> {
        self.deletes.borrow_mut().push(ids.to_vec());
        self.take_failure()?;
        self.files.borrow_mut().retain(|f| !ids.contains(&f.id));
        Ok(())
    }

    async fn upload(&self, upload: &ValidatedUpload) -> Result<(), ClientError> {
        self.uploads.borrow_mut().push(upload.clone());
        self.take_failure()?;
        let mut files = self.files.borrow_mut();
        for (i, uploaded) in upload.files.iter().enumerate() {
            let mut record = file(&format!("up-{}", i), uploaded.content.len() as u64);
            record.name = uploaded.name.clone();
            files.push(record);
        }
        Ok(())
    }
}
