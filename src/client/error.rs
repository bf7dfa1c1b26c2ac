use std::fmt;

use thiserror::Error;

/// Form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ApiKey,
    Provider,
    Path,
    Files,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::ApiKey => "apiKey",
            Field::Provider => "provider",
            Field::Path => "path",
            Field::Files => "files",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Rejected before any request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The credential is missing, invalid or expired.
    #[error("Unauthorized")]
    Unauthorized,

    /// The gateway is missing required settings.
    #[error("{0}")]
    Configuration(String),

    /// The filestore service could not be reached.
    #[error("{0}")]
    Unavailable(String),

    /// Any other non-success status, relayed as is.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => ClientError::Unauthorized,
            500 => ClientError::Configuration(message),
            502 => ClientError::Unavailable(message),
            _ => ClientError::Status { status, message },
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Unavailable(e.to_string())
        }
    }
}
