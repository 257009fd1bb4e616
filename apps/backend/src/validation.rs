//! Request field rules shared by the handlers.
//!
//! Checks accumulate into one list so a caller sees every failing field at
//! once, rendered as `errors: [{param, msg}]` in the problem details body.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::{AppError, FieldError};

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
            .unwrap()
    });
    &EMAIL_REGEX
}

/// Normalize an email for storage and lookup: trimmed, NFKC, lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().nfkc().collect::<String>().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    email.len() <= 254 && email_regex().is_match(email)
}

/// Accumulates field failures for one request body.
#[derive(Debug, Default)]
pub struct FieldChecks {
    errors: Vec<FieldError>,
}

impl FieldChecks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails when `value` is empty after trimming.
    pub fn required(mut self, param: &str, value: &str, msg: &str) -> Self {
        if value.trim().is_empty() {
            self.errors.push(FieldError::new(param, msg));
        }
        self
    }

    pub fn email(mut self, param: &str, value: &str, msg: &str) -> Self {
        if !is_valid_email(value) {
            self.errors.push(FieldError::new(param, msg));
        }
        self
    }

    /// Fails when `value` has fewer than `min` characters.
    pub fn min_chars(mut self, param: &str, value: &str, min: usize, msg: &str) -> Self {
        if value.chars().count() < min {
            self.errors.push(FieldError::new(param, msg));
        }
        self
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// `Ok(())` when every check passed, otherwise a validation `AppError`.
    pub fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::invalid(self.errors))
        }
    }
}
