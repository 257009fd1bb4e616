use std::fmt;
use std::time::Duration;

use jsonwebtoken::Algorithm;

/// Lifetime of an issued access token: 10,000 minutes.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(600_000);

/// Longest TTL accepted from configuration: ten years.
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);

/// Signing configuration for access tokens.
///
/// Built once at startup and shared read-only by every request.
#[derive(Clone)]
pub struct SecurityConfig {
    /// HMAC secret used to sign and verify tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm (HS256)
    pub algorithm: Algorithm,
    /// How long an issued token stays valid
    pub token_ttl: Duration,
}

impl SecurityConfig {
    /// Create a SecurityConfig with the given secret and the default TTL
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
