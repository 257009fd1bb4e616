#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;
pub mod utils;
pub mod validation;

// Re-exports for public API
pub use auth::claims::AuthenticatedUser;
pub use auth::gate::{authenticate_header, authenticate_request, AuthError, AUTH_TOKEN_HEADER};
pub use auth::jwt::{mint_access_token, verify_access_token, verify_subject, Claims, TokenError};
pub use auth::password::{hash_password, verify_password, PasswordError};
pub use config::AppConfig;
pub use error::AppError;
pub use extractors::{CurrentUser, ValidatedJson};
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use middleware::{AuthGate, RequestTrace, StructuredLogger, TraceSpan};
pub use repos::users::{Identity, NewIdentity, UserRepo};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
