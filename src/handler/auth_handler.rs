// src/handler/auth_handler.rs

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::{web, HttpResponse};

use crate::constants::{
    API_KEY_COOKIE, API_KEY_COOKIE_MAX_AGE_DAYS, API_KEY_HEADER, ROOT_PATH, UPSTREAM_FILES_SEGMENT,
};
use crate::error::GatewayError;
use crate::model::{LoginRequest, SuccessResponse};
use crate::state::AppState;

pub struct AuthHandler;

impl AuthHandler {
    /// Validates the submitted key with one minimal listing call and, if the
    /// upstream accepts it, stores it in an http-only cookie.
    pub async fn login(
        body: web::Bytes,
        state: web::Data<AppState>,
    ) -> Result<HttpResponse, GatewayError> {
        let api_key = serde_json::from_slice::<LoginRequest>(&body)
            .ok()
            .and_then(|req| req.api_key)
            .filter(|key| !key.is_empty())
            .ok_or(GatewayError::MissingApiKey)?;

        let upstream = state
            .config
            .upstream_url
            .as_deref()
            .ok_or(GatewayError::Configuration)?;

        let check = state
            .http
            .get(format!("{}/{}", upstream, UPSTREAM_FILES_SEGMENT))
            .query(&[("limit", "1")])
            .header(API_KEY_HEADER, api_key.as_str())
            .send()
            .await
            .map_err(|e| {
                log::error!("Validation error: {}", e);
                GatewayError::Validation(e)
            })?;

        if !check.status().is_success() {
            log::info!("## Login rejected, upstream answered {}", check.status());
            return Err(GatewayError::InvalidApiKey);
        }

        let cookie = Cookie::build(API_KEY_COOKIE, api_key)
            .http_only(true)
            .secure(state.config.production)
            .same_site(SameSite::Strict)
            .path(ROOT_PATH)
            .max_age(Duration::days(API_KEY_COOKIE_MAX_AGE_DAYS))
            .finish();

        Ok(HttpResponse::Ok().cookie(cookie).json(SuccessResponse::ok()))
    }

    pub async fn logout() -> HttpResponse {
        let mut cookie = Cookie::build(API_KEY_COOKIE, "").path(ROOT_PATH).finish();
        cookie.make_removal();

        HttpResponse::Ok().cookie(cookie).json(SuccessResponse::ok())
    }
}
