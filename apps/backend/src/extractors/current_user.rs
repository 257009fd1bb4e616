use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::auth::claims::AuthenticatedUser;
use crate::error::AppError;

/// The caller of a protected route.
///
/// Read from the `AuthenticatedUser` that `AuthGate` stored in request
/// extensions. On a route without the gate this fails as "no token", so a
/// missing `.wrap(AuthGate)` can never expose a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .extensions()
            .get::<AuthenticatedUser>()
            .map(|u| CurrentUser { id: u.user_id })
            .ok_or_else(AppError::unauthorized_no_token);
        ready(user)
    }
}
