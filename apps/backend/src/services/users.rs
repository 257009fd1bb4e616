//! Registration, login and current-identity lookups.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::jwt::mint_access_token;
use crate::auth::password::{hash_password, verify_password, PasswordError};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::repos::users::{Identity, NewIdentity, UserRepo};
use crate::state::security_config::SecurityConfig;
use crate::utils::avatar::gravatar_url;
use crate::validation::{normalize_email, FieldChecks};

/// Shortest password accepted at registration, in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Well-formed argon2id hash that matches no password. Unknown emails are
/// verified against it so both login failures cost one full verify.
const UNKNOWN_USER_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub token: String,
}

/// Public projection of an identity. Never carries the password hash.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

impl From<Identity> for UserView {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            name: identity.name,
            email: identity.email,
            avatar: identity.avatar_url,
            date: identity.created_at,
        }
    }
}

pub fn validate_registration(req: &RegisterRequest) -> Result<(), AppError> {
    FieldChecks::new()
        .required("name", &req.name, "Name is required")
        .email("email", &req.email, "Please include a valid email")
        .min_chars(
            "password",
            &req.password,
            MIN_PASSWORD_CHARS,
            "Please enter a password with 6 or more characters",
        )
        .finish()
}

pub fn validate_login(req: &LoginRequest) -> Result<(), AppError> {
    FieldChecks::new()
        .email("email", &req.email, "Please include a valid email")
        .required("password", &req.password, "Password is required")
        .finish()
}

/// Register a new identity and return a token for it.
///
/// Any failure other than invalid input or a taken email surfaces as an
/// opaque 500.
pub async fn register(
    users: &dyn UserRepo,
    security: &SecurityConfig,
    req: RegisterRequest,
) -> Result<TokenResponse, AppError> {
    validate_registration(&req)?;

    let email = normalize_email(&req.email);

    if users.find_by_email(&email).await?.is_some() {
        debug!(email = %Redacted(&email), "registration rejected: email taken");
        return Err(AppError::duplicate_user());
    }

    let avatar_url = gravatar_url(&email);
    let password_hash = hash_blocking(req.password).await?;

    // A concurrent registration can still win here; the unique index turns
    // that into Conflict(UniqueEmail), which maps to the duplicate-user error.
    let identity = users
        .insert(NewIdentity {
            name: req.name.trim().to_string(),
            email,
            password_hash,
            avatar_url,
        })
        .await?;

    let token = issue_token(identity.id, security)?;

    info!(
        user_id = %identity.id,
        email = %Redacted(&identity.email),
        "user registered"
    );

    Ok(TokenResponse { token })
}

/// Exchange email and password for a token.
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(
    users: &dyn UserRepo,
    security: &SecurityConfig,
    req: LoginRequest,
) -> Result<TokenResponse, AppError> {
    validate_login(&req)?;

    let email = normalize_email(&req.email);

    let Some(identity) = users.find_by_email(&email).await? else {
        verify_blocking(req.password, UNKNOWN_USER_HASH.to_string()).await?;
        debug!(email = %Redacted(&email), "login rejected: unknown email");
        return Err(AppError::invalid_credentials());
    };

    if !verify_blocking(req.password, identity.password_hash.clone()).await? {
        debug!(user_id = %identity.id, "login rejected: wrong password");
        return Err(AppError::invalid_credentials());
    }

    let token = issue_token(identity.id, security)?;
    info!(user_id = %identity.id, "user logged in");

    Ok(TokenResponse { token })
}

/// Identity behind an authenticated request; 404 once it no longer exists.
pub async fn current_user(users: &dyn UserRepo, user_id: Uuid) -> Result<UserView, AppError> {
    users
        .find_by_id(user_id)
        .await?
        .map(UserView::from)
        .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "User not found"))
}

fn issue_token(user_id: Uuid, security: &SecurityConfig) -> Result<String, AppError> {
    mint_access_token(user_id, SystemTime::now(), security)
        .map_err(|e| AppError::internal(ErrorCode::Internal, format!("token issue failed: {e}")))
}

async fn hash_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::internal(ErrorCode::Internal, format!("hash task failed: {e}")))?
        .map_err(password_error)
}

async fn verify_blocking(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::internal(ErrorCode::Internal, format!("verify task failed: {e}")))?
        .map_err(password_error)
}

fn password_error(e: PasswordError) -> AppError {
    AppError::internal(ErrorCode::Internal, e.to_string())
}
