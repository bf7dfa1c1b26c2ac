use super::error::{Field, ValidationError};
use crate::constants::{
    DEFAULT_UPLOAD_PATH, MESSAGE_FILE_REQUIRED, MESSAGE_INVALID_PROVIDER, MESSAGE_PATH_REQUIRED,
};
use crate::model::{Provider, PROVIDERS};
use crate::utils::detect_mime_type;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content: Vec<u8>,
    pub content_type: Option<String>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn mime_type(&self) -> String {
        self.content_type
            .clone()
            .unwrap_or_else(|| detect_mime_type(&self.name, &self.content))
    }
}

/// Upload dialog contents before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    pub provider: String,
    pub path: String,
    pub files: Vec<UploadFile>,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self {
            provider: PROVIDERS[0].as_str().to_string(),
            path: DEFAULT_UPLOAD_PATH.to_string(),
            files: Vec::new(),
        }
    }
}

/// An upload that passed validation; only these reach the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUpload {
    pub provider: Provider,
    pub path: String,
    pub files: Vec<UploadFile>,
}

impl UploadForm {
    pub fn with_file(mut self, file: UploadFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn validate(self) -> Result<ValidatedUpload, ValidationError> {
        if self.files.is_empty() {
            return Err(ValidationError::new(Field::Files, MESSAGE_FILE_REQUIRED));
        }
        if self.path.is_empty() {
            return Err(ValidationError::new(Field::Path, MESSAGE_PATH_REQUIRED));
        }

        let provider = Provider::from(self.provider);
        if !provider.is_supported() {
            return Err(ValidationError::new(Field::Provider, MESSAGE_INVALID_PROVIDER));
        }

        Ok(ValidatedUpload {
            provider,
            path: self.path,
            files: self.files,
        })
    }
}
