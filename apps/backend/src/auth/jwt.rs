use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::state::security_config::SecurityConfig;

/// Claims included in our backend-issued access tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Identity id of the token holder
    pub sub: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature does not match")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("token is malformed")]
    Malformed,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Mint a HS256 access token for `subject`, valid for `security.token_ttl`
/// starting at `now`.
pub fn mint_access_token(
    subject: Uuid,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, TokenError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| TokenError::Signing("clock is before the unix epoch".to_string()))?
        .as_secs();
    let iat = i64::try_from(iat)
        .map_err(|_| TokenError::Signing("issue time out of range".to_string()))?;
    let exp = i64::try_from(security.token_ttl.as_secs())
        .ok()
        .and_then(|ttl| iat.checked_add(ttl))
        .ok_or_else(|| TokenError::Signing("token ttl out of range".to_string()))?;

    let claims = Claims {
        sub: subject.to_string(),
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Verify a token's signature and expiry and return its claims.
///
/// Expired means strictly past `exp`; no leeway is granted.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(security.algorithm);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "iat", "sub"]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })
}

/// Verify a token and return the identity id it was issued for.
pub fn verify_subject(token: &str, security: &SecurityConfig) -> Result<Uuid, TokenError> {
    let claims = verify_access_token(token, security)?;
    Uuid::parse_str(&claims.sub).map_err(|_| TokenError::Malformed)
}
