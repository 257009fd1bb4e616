//! Test helpers for generating unique test data
//!
//! ULID-based values keep tests isolated from each other even when they
//! share a database.

use ulid::Ulid;

/// Generate a unique email address in the format `{prefix}-{ulid}@example.test`
///
/// The ULID is lowercased so the value survives email normalization unchanged.
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email1 = unique_email("test");
/// let email2 = unique_email("test");
/// assert_ne!(email1, email2);
/// assert!(email1.ends_with("@example.test"));
/// assert!(email1.starts_with("test-"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!(
        "{}-{}@example.test",
        prefix,
        Ulid::new().to_string().to_lowercase()
    )
}
