//! Authentication middleware
//!
//! Verifies the bearer credential once per request and attaches the resolved
//! [`AuthContext`] to the request extensions; every protected handler reads
//! that context instead of repeating the lookup. Rejections happen here,
//! before any handler code runs.

use crate::auth::AuthContext;
use crate::server::middleware::helpers::{extract_bearer_token, is_public_route};
use crate::server::state::AppState;
use crate::utils::error::HubError;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::debug;

/// Auth middleware for Actix-web
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

/// Service implementation for auth middleware
pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        if is_public_route(req.path()) {
            return Box::pin(async move { service.call(req).await });
        }

        let token = extract_bearer_token(req.headers());

        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| {
                    actix_web::Error::from(HubError::internal("Missing application state"))
                })?;

            // Missing and malformed credentials are indistinguishable from
            // invalid ones
            let token = token.ok_or_else(|| actix_web::Error::from(HubError::Unauthenticated))?;

            let ctx = state
                .auth
                .authenticate(&token)
                .await
                .map_err(actix_web::Error::from)?;

            debug!("Request authenticated as {}", ctx.user.email);
            req.extensions_mut().insert(ctx);

            service.call(req).await
        })
    }
}

impl FromRequest for AuthContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let ctx = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| actix_web::Error::from(HubError::Unauthenticated));
        ready(ctx)
    }
}
