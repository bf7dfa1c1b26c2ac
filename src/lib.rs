pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod guard;
pub mod handler;
pub mod model;
pub mod state;
pub mod utils;

#[cfg(test)]
mod tests;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::web;

use config::Config;
use constants::{
    CORS_MAX_AGE_SECS, DASHBOARD_PATH, FILES_PROXY_PATH, LOGIN_PATH, LOGOUT_PATH, ROOT_PATH,
};
use guard::RouteGuard;
use handler::{AuthHandler, PageHandler, ProxyHandler};

/// Every gateway route. Expects `web::Data<AppState>` on the app.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route(LOGIN_PATH, web::post().to(AuthHandler::login))
        .route(LOGOUT_PATH, web::post().to(AuthHandler::logout))
        .route(FILES_PROXY_PATH, web::route().to(ProxyHandler::forward))
        .route(
            &format!("{}/{{tail:.*}}", FILES_PROXY_PATH),
            web::route().to(ProxyHandler::forward),
        )
        .service(
            web::scope(DASHBOARD_PATH)
                .wrap(RouteGuard)
                .route("", web::get().to(PageHandler::dashboard))
                .route("/{tail:.*}", web::get().to(PageHandler::dashboard)),
        )
        .route(ROOT_PATH, web::get().to(PageHandler::index));
}

/// Credentialed CORS for the dashboard's own host plus `allowed_origins`.
pub fn cors(config: &Config) -> Cors {
    let allowed = config.allowed_origins.clone();

    Cors::default()
        .allowed_origin_fn(move |origin, req| {
            let host = req.headers().get(header::HOST).and_then(|h| h.to_str().ok());
            origin
                .to_str()
                .map(|origin| origin_allowed(origin, host, &allowed))
                .unwrap_or(false)
        })
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(CORS_MAX_AGE_SECS)
}

fn origin_allowed(origin: &str, host: Option<&str>, allowed: &[String]) -> bool {
    let origin = origin.trim_end_matches('/');
    if allowed.iter().any(|a| a == origin) {
        return true;
    }

    let origin_host = origin.split_once("://").map(|(_, rest)| rest);
    matches!((origin_host, host), (Some(o), Some(h)) if o.eq_ignore_ascii_case(h))
}
