use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Email pattern: standard-looking addresses
fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
    });
    &EMAIL_REGEX
}

/// Bearer-ish material: JWTs (three dot-separated base64url segments) and
/// long base64/hex runs such as password hashes
fn token_regex() -> &'static Regex {
    static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}|[A-Za-z0-9+/_-]{24,}={0,2}")
            .unwrap()
    });
    &TOKEN_REGEX
}

/// Redacts sensitive information from a string.
///
/// - Emails keep the first character of the local part and the full domain.
/// - Tokens (JWTs, long opaque runs) become `[REDACTED_TOKEN]`.
///
/// Emails are processed first so their domains are never mistaken for tokens.
pub fn redact(input: &str) -> String {
    let email_redacted = email_regex().replace_all(input, |caps: &regex::Captures| {
        let full_match = &caps[0];
        match full_match.split_once('@') {
            Some((local, domain)) => match local.chars().next() {
                Some(first) => format!("{first}***@{domain}"),
                None => format!("@{domain}"),
            },
            None => full_match.to_string(),
        }
    });

    token_regex()
        .replace_all(&email_redacted, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Display wrapper that redacts on format, for use in `tracing` fields:
/// `info!(email = %Redacted(&email), "...")`.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
