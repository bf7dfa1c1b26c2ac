// src/handler/proxy_handler.rs

use std::io;

use actix_web::body::SizedStream;
use actix_web::http::header::{HeaderName, ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_LENGTH};
use actix_web::http::Method;
use actix_web::web::{self, Bytes};
use actix_web::{HttpRequest, HttpResponse};
use futures::channel::mpsc;
use futures::{SinkExt, StreamExt};
use reqwest::header::{HeaderMap, HeaderValue};

use crate::constants::{
    API_KEY_COOKIE, API_KEY_HEADER, FILES_PROXY_PATH, HOP_BY_HOP_HEADERS,
    PROXY_BODY_CHANNEL_CAPACITY, UPSTREAM_FILES_SEGMENT,
};
use crate::error::GatewayError;
use crate::state::AppState;

pub struct ProxyHandler;

impl ProxyHandler {
    /// Relays any request under `/api/files` to `{upstream}/files`, injecting
    /// the credential and streaming both bodies through.
    pub async fn forward(
        req: HttpRequest,
        payload: web::Payload,
        state: web::Data<AppState>,
    ) -> Result<HttpResponse, GatewayError> {
        let upstream = state
            .config
            .upstream_url
            .as_deref()
            .ok_or(GatewayError::MissingUpstream)?;

        let api_key = resolve_credential(&req, state.config.service_api_key.as_deref())
            .ok_or(GatewayError::MissingCredential)?;
        let api_key = HeaderValue::from_str(&api_key).map_err(|_| GatewayError::MissingCredential)?;

        let url = upstream_url(upstream, req.path(), req.query_string());
        let method = req.method().clone();
        let with_body = carries_body(&method);

        let mut headers = forwarded_request_headers(&req, with_body);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);

        let mut outbound = state.http.request(method.clone(), &url).headers(headers);
        if with_body {
            outbound = outbound.body(stream_body(payload));
        }

        let res = outbound.send().await.map_err(|e| {
            log::error!("Proxy error: {} {}: {}", method, url, e);
            GatewayError::Upstream(e)
        })?;

        log::info!("## Proxy {} {} -> {}", method, req.path(), res.status());

        let mut builder = HttpResponse::build(res.status());
        for (name, value) in res.headers() {
            if name == CONTENT_ENCODING || name == CONTENT_LENGTH || is_hop_by_hop(name) {
                continue;
            }
            builder.append_header((name.clone(), value.clone()));
        }

        let content_length = res.content_length();
        let body = res.bytes_stream();
        Ok(match content_length {
            Some(len) => builder.body(SizedStream::new(len, body)),
            None => builder.streaming(body),
        })
    }
}

/// Session cookie first, then the service-wide key.
pub fn resolve_credential(req: &HttpRequest, service_api_key: Option<&str>) -> Option<String> {
    req.cookie(API_KEY_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|key| !key.is_empty())
        .or_else(|| service_api_key.map(str::to_string))
}

pub fn upstream_url(base: &str, path: &str, query: &str) -> String {
    let sub = path
        .strip_prefix(FILES_PROXY_PATH)
        .unwrap_or_default()
        .trim_matches('/');

    let mut url = format!("{}/{}", base.trim_end_matches('/'), UPSTREAM_FILES_SEGMENT);
    if !sub.is_empty() {
        url.push('/');
        url.push_str(sub);
    }
    if !query.is_empty() {
        url.push('?');
        url.push_str(query);
    }
    url
}

fn carries_body(method: &Method) -> bool {
    ![Method::GET, Method::HEAD, Method::DELETE, Method::OPTIONS].contains(method)
}

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP_HEADERS.contains(&name.as_str())
}

fn forwarded_request_headers(req: &HttpRequest, with_body: bool) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in req.headers().iter() {
        // the client negotiates its own encoding and decodes before relaying
        if name == ACCEPT_ENCODING || is_hop_by_hop(name) {
            continue;
        }
        if name == CONTENT_LENGTH && !with_body {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}

/// Moves the inbound payload into a pump task. The payload is consumed once
/// and at most `PROXY_BODY_CHANNEL_CAPACITY` chunks are in flight.
fn stream_body(mut payload: web::Payload) -> reqwest::Body {
    let (mut tx, rx) = mpsc::channel::<Result<Bytes, io::Error>>(PROXY_BODY_CHANNEL_CAPACITY);

    actix_rt::spawn(async move {
        while let Some(chunk) = payload.next().await {
            let chunk = chunk.map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()));
            let failed = chunk.is_err();
            if tx.send(chunk).await.is_err() || failed {
                break;
            }
        }
    });

    reqwest::Body::wrap_stream(rx)
}
