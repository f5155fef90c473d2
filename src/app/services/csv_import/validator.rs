//! Record validation rules
//!
//! Errors exclude a record from the import; warnings are advisory and never
//! affect validity. Validation is pure: the record is only read.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::app::models::{CanonicalField, UserRecord, ValidationOutcome};
use crate::constants::{EMAIL_PATTERN, USERNAME_PATTERN, messages};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(EMAIL_PATTERN).unwrap());

static USERNAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(USERNAME_PATTERN).unwrap());

/// Check whether an address matches the accepted email shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check whether a username uses only allowed characters
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

/// Validate one parsed record
pub fn validate_record(record: &UserRecord, row_number: usize) -> ValidationOutcome {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    match record.non_blank(CanonicalField::Username) {
        None => errors.push(messages::USERNAME_REQUIRED.to_string()),
        Some(username) if !is_valid_username(username) => {
            errors.push(messages::USERNAME_INVALID_CHARACTERS.to_string())
        }
        Some(_) => {}
    }

    if let Some(email) = record.non_blank(CanonicalField::Email) {
        if !is_valid_email(email) {
            errors.push(messages::INVALID_EMAIL.to_string());
        }
    }

    if record.is_blank(CanonicalField::FirstName) {
        warnings.push(messages::FIRST_NAME_MISSING.to_string());
    }
    if record.is_blank(CanonicalField::LastName) {
        warnings.push(messages::LAST_NAME_MISSING.to_string());
    }
    if record.is_blank(CanonicalField::Email) {
        warnings.push(messages::EMAIL_MISSING.to_string());
    }

    trace!(
        "Validated row {}: {} errors, {} warnings",
        row_number,
        errors.len(),
        warnings.len()
    );

    ValidationOutcome::new(errors, warnings)
}
