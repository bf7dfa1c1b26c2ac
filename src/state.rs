use reqwest::{redirect::Policy, Client};

use crate::config::Config;

/// Shared by every worker; immutable after startup.
pub struct AppState {
    pub config: Config,
    pub http: Client,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        // Upstream redirects are relayed to the caller, not followed.
        let http = Client::builder().redirect(Policy::none()).build()?;
        Ok(Self { config, http })
    }
}
