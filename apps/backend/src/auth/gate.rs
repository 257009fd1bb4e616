//! Request authentication decision, independent of the HTTP framework.

use thiserror::Error;
use tracing::debug;

use super::claims::AuthenticatedUser;
use super::jwt::verify_subject;
use crate::state::security_config::SecurityConfig;

/// Header carrying the access token on protected routes.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Why a request was refused at the gate.
///
/// Verification failures all collapse into `TokenInvalid` so callers cannot
/// tell an expired token from a forged one.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("no token provided")]
    NoTokenProvided,
    #[error("token is not valid")]
    TokenInvalid,
}

/// Decide whether a request carrying `raw_token` may proceed.
///
/// `None`, empty and whitespace-only values count as no token. Never consults
/// the credential store.
pub fn authenticate_request(
    raw_token: Option<&str>,
    security: &SecurityConfig,
) -> Result<AuthenticatedUser, AuthError> {
    let token = match raw_token.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Err(AuthError::NoTokenProvided),
    };

    match verify_subject(token, security) {
        Ok(user_id) => Ok(AuthenticatedUser { user_id }),
        Err(reason) => {
            debug!(reason = %reason, "rejected access token");
            Err(AuthError::TokenInvalid)
        }
    }
}

/// Same as [`authenticate_request`] over the raw header bytes.
///
/// A header that is present but not valid UTF-8 is a token that cannot be
/// decoded, so it is rejected as `TokenInvalid` rather than treated as absent.
pub fn authenticate_header(
    raw_header: Option<&[u8]>,
    security: &SecurityConfig,
) -> Result<AuthenticatedUser, AuthError> {
    match raw_header.map(std::str::from_utf8) {
        None => authenticate_request(None, security),
        Some(Ok(token)) => authenticate_request(Some(token), security),
        Some(Err(_)) => {
            debug!("rejected access token: header is not valid UTF-8");
            Err(AuthError::TokenInvalid)
        }
    }
}
