use std::future::{ready, Ready};

use actix_service::{Service, Transform};
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, ServiceRequest, ServiceResponse},
    http::header,
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;

use crate::constants::{API_KEY_COOKIE, ROOT_PATH};

/// Redirects navigation without a session cookie back to the entry page.
///
/// Only the cookie's presence is checked. A bogus value gets through here and
/// is rejected later by the upstream through the proxy.
pub struct RouteGuard;

impl<S, B> Transform<S, ServiceRequest> for RouteGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RouteGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RouteGuardMiddleware { service }))
    }
}

pub struct RouteGuardMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RouteGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if req.cookie(API_KEY_COOKIE).is_none() {
            log::info!("## No session cookie for {}, redirecting", req.path());
            let (request, _payload) = req.into_parts();
            let response = HttpResponse::TemporaryRedirect()
                .insert_header((header::LOCATION, ROOT_PATH))
                .finish()
                .map_into_right_body();
            return Box::pin(async move { Ok(ServiceResponse::new(request, response)) });
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
