use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage backend a file lives on. Unknown values are kept verbatim so a
/// newer upstream never breaks listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Provider {
    GoogleCloudStorage,
    ImageKit,
    Other(String),
}

/// Providers the upload form accepts.
pub const PROVIDERS: [Provider; 2] = [Provider::GoogleCloudStorage, Provider::ImageKit];

impl Provider {
    pub fn as_str(&self) -> &str {
        match self {
            Provider::GoogleCloudStorage => "google-cloud-storage",
            Provider::ImageKit => "imagekit",
            Provider::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Provider::GoogleCloudStorage => "Google Cloud",
            Provider::ImageKit => "ImageKit",
            Provider::Other(raw) => raw,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Provider::Other(_))
    }
}

impl From<String> for Provider {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "google-cloud-storage" => Provider::GoogleCloudStorage,
            "imagekit" => Provider::ImageKit,
            _ => Provider::Other(raw),
        }
    }
}

impl From<&str> for Provider {
    fn from(raw: &str) -> Self {
        Provider::from(raw.to_string())
    }
}

impl From<Provider> for String {
    fn from(provider: Provider) -> Self {
        match provider {
            Provider::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    pub path: String,
    pub size: u64, // in bytes
    pub mimetype: String,
    pub provider: Provider,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FileRecord {
    /// Size with binary units, e.g. `1.5 KB`.
    pub fn human_size(&self) -> String {
        format_bytes(self.size)
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exp = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);

    let rendered = format!("{:.2}", value);
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", rendered, UNITS[exp])
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FilesPayload {
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

/// Listing envelope returned by `GET /files`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FetchFilesResponse {
    #[serde(default)]
    pub data: FilesPayload,
}
