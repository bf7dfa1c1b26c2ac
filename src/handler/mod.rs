mod auth_handler;
mod page_handler;
mod proxy_handler;

pub use auth_handler::AuthHandler;
pub use page_handler::PageHandler;
pub use proxy_handler::{resolve_credential, upstream_url, ProxyHandler};
