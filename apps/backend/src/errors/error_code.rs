//! Error codes for the devconnect API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// No `x-auth-token` header on a protected route
    NoTokenProvided,
    /// Token failed verification (signature, expiry or shape)
    TokenInvalid,
    /// Caller is authenticated but does not own the resource
    NotOwner,
    /// Login with an unknown email or a wrong password
    InvalidCredentials,

    // Request Validation
    /// One or more request fields failed validation
    ValidationError,
    /// Request body could not be read or parsed
    BadRequest,

    // Business rules
    /// Registration with an email that is already taken
    UserAlreadyExists,
    /// Caller has no profile yet
    NoProfile,

    // Resource Not Found
    UserNotFound,
    ProfileNotFound,
    PostNotFound,
    CommentNotFound,
    NotFound,

    // Conflicts
    /// Generic conflict (fallback for unmatched unique violations)
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// Canonical string for this code, exactly as it appears in responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoTokenProvided => "NO_TOKEN_PROVIDED",
            Self::TokenInvalid => "TOKEN_INVALID",
            Self::NotOwner => "NOT_OWNER",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::NoProfile => "NO_PROFILE",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::PostNotFound => "POST_NOT_FOUND",
            Self::CommentNotFound => "COMMENT_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
