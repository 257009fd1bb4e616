use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::auth::claims::AuthenticatedUser;

/// Emits one `request_completed` event per request, leveled by status class.
///
/// Requests that passed the auth gate also carry the caller's `user_id`.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

struct Completion {
    method: String,
    path: String,
    status: StatusCode,
    duration_us: u64,
    trace_id: String,
    user_id: String,
}

impl Completion {
    fn emit(&self) {
        let status_code = self.status.as_u16();
        let (method, path, trace_id, user_id) = (
            self.method.as_str(),
            self.path.as_str(),
            self.trace_id.as_str(),
            self.user_id.as_str(),
        );
        let duration_us = self.duration_us;

        if self.status.is_server_error() {
            error!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, trace_id = %trace_id, user_id = %user_id, message = "request_completed");
        } else if self.status.is_client_error() {
            warn!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, trace_id = %trace_id, user_id = %user_id, message = "request_completed");
        } else {
            info!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, trace_id = %trace_id, user_id = %user_id, message = "request_completed");
        }
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, trace_id, user_id) = match &result {
                Ok(res) => {
                    let extensions = res.request().extensions();
                    (
                        res.status(),
                        extensions.get::<String>().cloned(),
                        extensions
                            .get::<AuthenticatedUser>()
                            .map(|user| user.user_id.to_string()),
                    )
                }
                Err(err) => (err.as_response_error().status_code(), None, None),
            };

            Completion {
                method,
                path,
                status,
                duration_us: start.elapsed().as_micros() as u64,
                trace_id: trace_id.unwrap_or_else(|| "unknown".to_string()),
                user_id: user_id.unwrap_or_else(|| "-".to_string()),
            }
            .emit();

            result
        })
    }
}
