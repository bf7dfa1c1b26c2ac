use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::constants::{
    MESSAGE_API_KEY_REQUIRED, MESSAGE_CREDENTIAL_MISSING, MESSAGE_INVALID_API_KEY,
    MESSAGE_PROXY_FAILED, MESSAGE_SERVER_CONFIG_ERROR, MESSAGE_TARGET_URL_MISSING,
    MESSAGE_VALIDATION_FAILED,
};
use crate::model::ErrorBody;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{}", MESSAGE_API_KEY_REQUIRED)]
    MissingApiKey,

    #[error("{}", MESSAGE_INVALID_API_KEY)]
    InvalidApiKey,

    #[error("{}", MESSAGE_SERVER_CONFIG_ERROR)]
    Configuration,

    #[error("{}", MESSAGE_VALIDATION_FAILED)]
    Validation(#[source] reqwest::Error),

    #[error("{}", MESSAGE_TARGET_URL_MISSING)]
    MissingUpstream,

    #[error("{}", MESSAGE_CREDENTIAL_MISSING)]
    MissingCredential,

    #[error("{}", MESSAGE_PROXY_FAILED)]
    Upstream(#[source] reqwest::Error),
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MissingApiKey => StatusCode::BAD_REQUEST,
            GatewayError::InvalidApiKey | GatewayError::MissingCredential => StatusCode::UNAUTHORIZED,
            GatewayError::Configuration | GatewayError::MissingUpstream => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::Validation(_) | GatewayError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            GatewayError::Upstream(e) => Some(e.to_string()),
            _ => None,
        };

        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
            message,
        })
    }
}
