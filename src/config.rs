use std::env;

use crate::constants::{
    DEFAULT_BIND_ADDR, DEFAULT_STATIC_DIR, ENV_ALLOWED_ORIGINS, ENV_APP_ENV, ENV_BIND_ADDR,
    ENV_SERVICE_API_KEY, ENV_STATIC_DIR, ENV_UPSTREAM_URL, PRODUCTION,
};

/// Settings resolved once at startup and handed to the gateway state.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub bind_addr: String,
    /// Base URL of the upstream filestore service, without trailing slash.
    pub upstream_url: Option<String>,
    /// Credential used when a request carries no cookie.
    pub service_api_key: Option<String>,
    pub production: bool,
    pub static_dir: String,
    /// Extra origins allowed to call the API with credentials.
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let config = Self {
            bind_addr: env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            upstream_url: non_empty_var(ENV_UPSTREAM_URL)
                .map(|url| url.trim_end_matches('/').to_string()),
            service_api_key: non_empty_var(ENV_SERVICE_API_KEY),
            production: env::var(ENV_APP_ENV).map(|v| v == PRODUCTION).unwrap_or(false),
            static_dir: env::var(ENV_STATIC_DIR).unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string()),
            allowed_origins: non_empty_var(ENV_ALLOWED_ORIGINS)
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
        };

        if config.upstream_url.is_none() {
            log::warn!("{} is not set, file requests will fail", ENV_UPSTREAM_URL);
        }
        if config.service_api_key.is_none() {
            log::warn!("{} is not set, requests without a session cookie will fail", ENV_SERVICE_API_KEY);
        }

        config
    }

    pub fn with_upstream(mut self, url: impl Into<String>) -> Self {
        self.upstream_url = Some(url.into().trim_end_matches('/').to_string());
        self
    }

    pub fn with_service_api_key(mut self, key: impl Into<String>) -> Self {
        self.service_api_key = Some(key.into());
        self
    }

    pub fn with_static_dir(mut self, dir: impl Into<String>) -> Self {
        self.static_dir = dir.into();
        self
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/').to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(" https://a.example.com/, ,http://localhost:3000"),
            vec!["https://a.example.com", "http://localhost:3000"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_builders_trim_upstream() {
        let config = Config::default()
            .with_upstream("http://filestore.local/")
            .with_service_api_key("k");
        assert_eq!(config.upstream_url.as_deref(), Some("http://filestore.local"));
        assert_eq!(config.service_api_key.as_deref(), Some("k"));
        assert!(!config.production);
    }
}
