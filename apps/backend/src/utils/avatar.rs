//! Gravatar URLs derived from an email address.

use sha2::{Digest, Sha256};

/// Size, rating and fallback image requested from gravatar.
const GRAVATAR_QUERY: &str = "s=200&r=pg&d=mm";

/// Build the avatar URL for `email`.
///
/// The email is trimmed and lowercased before hashing, so differently cased
/// spellings of one address share an avatar.
///
/// # Example
/// ```
/// use devconnect::utils::avatar::gravatar_url;
///
/// let a = gravatar_url("Jane@Example.com ");
/// let b = gravatar_url("jane@example.com");
/// assert_eq!(a, b);
/// assert!(a.starts_with("https://www.gravatar.com/avatar/"));
/// ```
pub fn gravatar_url(email: &str) -> String {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    format!("https://www.gravatar.com/avatar/{digest:x}?{GRAVATAR_QUERY}")
}
