//! Process configuration read from the environment at startup.

use std::env;
use std::time::Duration;

use crate::error::AppError;
use crate::state::security_config::{SecurityConfig, DEFAULT_TOKEN_TTL, MAX_TOKEN_TTL};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub security: SecurityConfig,
    /// Explicit CORS origins; empty means the localhost fallback
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Read configuration from process environment variables:
    /// - `BACKEND_HOST` (default `0.0.0.0`)
    /// - `BACKEND_PORT` (default `5000`)
    /// - `BACKEND_JWT_SECRET` (required)
    /// - `DATABASE_URL` (required)
    /// - `TOKEN_TTL_SECS` (default 600000)
    /// - `CORS_ALLOWED_ORIGINS` (comma-separated, optional)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`AppConfig::from_env`] but over an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let must_var = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| {
                    AppError::config(format!("Required environment variable '{name}' is not set"))
                })
        };

        let host = lookup("BACKEND_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("BACKEND_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            None => 5000,
        };

        let token_ttl = match lookup("TOKEN_TTL_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 && secs <= MAX_TOKEN_TTL.as_secs() => {
                    Duration::from_secs(secs)
                }
                _ => {
                    return Err(AppError::config(format!(
                        "TOKEN_TTL_SECS must be between 1 and {} seconds, got '{raw}'",
                        MAX_TOKEN_TTL.as_secs()
                    )))
                }
            },
            None => DEFAULT_TOKEN_TTL,
        };

        let jwt_secret = must_var("BACKEND_JWT_SECRET")?;
        let database_url = must_var("DATABASE_URL")?;

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            database_url,
            security: SecurityConfig::new(jwt_secret.into_bytes()).with_token_ttl(token_ttl),
            cors_allowed_origins,
        })
    }
}

/// Parse and lightly validate a comma-separated origin list (string-level only).
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect()
}
