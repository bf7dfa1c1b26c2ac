use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{redirect::Policy, Client, Response, StatusCode};
use serde_json::json;

use super::error::ClientError;
use super::filters::ListQuery;
use super::upload::ValidatedUpload;
use crate::constants::{DASHBOARD_PATH, FILES_PROXY_PATH, LOGIN_PATH, LOGOUT_PATH, MESSAGE_UNKNOWN_ERROR};
use crate::model::{ErrorBody, FetchFilesResponse, FileRecord};

/// Calls the dashboard makes against the gateway.
#[async_trait(?Send)]
pub trait FilesApi {
    async fn login(&self, api_key: &str) -> Result<(), ClientError>;

    async fn logout(&self) -> Result<(), ClientError>;

    async fn list(&self, query: &ListQuery) -> Result<Vec<FileRecord>, ClientError>;

    async fn delete(&self, ids: &[String]) -> Result<(), ClientError>;

    async fn upload(&self, upload: &ValidatedUpload) -> Result<(), ClientError>;
}

/// `FilesApi` over HTTP. The session cookie lives in the client's cookie
/// jar and is never readable from here; clones share the jar.
#[derive(Debug, Clone)]
pub struct HttpFilesApi {
    client: Client,
    base_url: String,
}

impl HttpFilesApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Whether navigating to the dashboard would render it rather than
    /// bounce back to the entry page.
    pub async fn dashboard_accessible(&self) -> Result<bool, ClientError> {
        let response = self.client.get(self.build_url(DASHBOARD_PATH)).send().await?;
        Ok(response.status().is_success())
    }

    /// Maps error statuses. A 401 also drops the session cookie first so the
    /// caller never stays in a half-signed-in state.
    async fn check(&self, response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            if let Err(e) = self.logout().await {
                log::error!("Logout failed: {}", e);
            }
            return Err(ClientError::Unauthorized);
        }

        Err(ClientError::from_status(status.as_u16(), error_message(response).await))
    }
}

async fn error_message(response: Response) -> String {
    let fallback = response
        .status()
        .canonical_reason()
        .unwrap_or(MESSAGE_UNKNOWN_ERROR)
        .to_string();

    match response.json::<ErrorBody>().await {
        Ok(body) => body.message.unwrap_or(body.error),
        Err(_) => fallback,
    }
}

#[async_trait(?Send)]
impl FilesApi for HttpFilesApi {
    async fn login(&self, api_key: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.build_url(LOGIN_PATH))
            .json(&json!({ "apiKey": api_key }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(ClientError::from_status(status.as_u16(), error_message(response).await))
    }

    async fn logout(&self) -> Result<(), ClientError> {
        self.client.post(self.build_url(LOGOUT_PATH)).send().await?;
        Ok(())
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<FileRecord>, ClientError> {
        let response = self
            .client
            .get(self.build_url(FILES_PROXY_PATH))
            .query(&query.pairs())
            .send()
            .await?;

        let body: FetchFilesResponse = self.check(response).await?.json().await?;
        Ok(body.data.files)
    }

    async fn delete(&self, ids: &[String]) -> Result<(), ClientError> {
        let params: Vec<(&str, &str)> = ids.iter().map(|id| ("id", id.as_str())).collect();
        let response = self
            .client
            .delete(self.build_url(FILES_PROXY_PATH))
            .query(&params)
            .send()
            .await?;

        self.check(response).await?;
        Ok(())
    }

    async fn upload(&self, upload: &ValidatedUpload) -> Result<(), ClientError> {
        let mut form = Form::new();
        for file in &upload.files {
            let part = Part::bytes(file.content.clone())
                .file_name(file.name.clone())
                .mime_str(&file.mime_type())?;
            form = form.part("files", part);
        }
        let form = form
            .text("provider", upload.provider.to_string())
            .text("path", upload.path.clone());

        let response = self
            .client
            .post(self.build_url(FILES_PROXY_PATH))
            .multipart(form)
            .send()
            .await?;

        self.check(response).await?;
        Ok(())
    }
}
