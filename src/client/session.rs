use super::api::FilesApi;
use super::error::{ClientError, Field, ValidationError};
use crate::constants::MESSAGE_API_KEY_REQUIRED;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticating,
    Authenticated,
}

/// Login form state. The key itself is handed to the gateway and never kept.
pub struct Session<A> {
    api: A,
    state: AuthState,
}

impl<A: FilesApi> Session<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: AuthState::Unauthenticated,
        }
    }

    pub async fn login(&mut self, api_key: &str) -> Result<(), ClientError> {
        if api_key.trim().is_empty() {
            return Err(ValidationError::new(Field::ApiKey, MESSAGE_API_KEY_REQUIRED).into());
        }

        self.state = AuthState::Authenticating;
        match self.api.login(api_key).await {
            Ok(()) => {
                self.state = AuthState::Authenticated;
                Ok(())
            }
            Err(e) => {
                log::warn!("Invalid API Key or server error: {}", e);
                self.state = AuthState::Unauthenticated;
                Err(e)
            }
        }
    }

    pub async fn logout(&mut self) -> Result<(), ClientError> {
        self.state = AuthState::Unauthenticated;
        self.api.logout().await
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == AuthState::Authenticated
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}
