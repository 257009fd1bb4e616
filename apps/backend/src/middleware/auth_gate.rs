//! Token gate for protected routes.
//!
//! Reads the `x-auth-token` header, verifies it, and stores the resulting
//! `AuthenticatedUser` in request extensions before calling the wrapped
//! service. Rejections are rendered here as problem details, so the handler
//! never runs for an unauthenticated request.
//!
//! The gate only checks the token. It never looks the subject up in the
//! credential store.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::gate::{authenticate_header, AUTH_TOKEN_HEADER};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;

pub struct AuthGate;

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware { service }))
    }
}

pub struct AuthGateMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
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
        let Some(app_state) = req.app_data::<web::Data<AppState>>().cloned() else {
            return Box::pin(async move {
                let err = AppError::internal(
                    ErrorCode::Internal,
                    "AppState not available to auth gate",
                );
                Ok(req.error_response(err).map_into_right_body())
            });
        };

        let raw_header = req.headers().get(AUTH_TOKEN_HEADER).map(|v| v.as_bytes());

        match authenticate_header(raw_header, &app_state.security) {
            Ok(user) => {
                req.extensions_mut().insert(user);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            // Rendered inside the future so the response picks up the
            // request's trace id.
            Err(auth_err) => Box::pin(async move {
                let err = AppError::from(auth_err);
                Ok(req.error_response(err).map_into_right_body())
            }),
        }
    }
}
