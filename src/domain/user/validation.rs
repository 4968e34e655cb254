//! Creation-time validation for user input

use serde::Serialize;
use validator::ValidateEmail;

pub const MIN_PASSWORD_LENGTH: usize = 6;

const NAME_REQUIRED: &str = "name is required";
const EMAIL_INVALID: &str = "must be a valid email";
const PASSWORD_TOO_SHORT: &str = "must be at least 6 characters";

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: &'static str,
}

impl Violation {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Validate the fields of a user about to be created.
///
/// Every rule is checked; violations come back in field order
/// (name, email, password).
pub fn validate_new_user(name: &str, email: &str, password: &str) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();

    if name.trim().is_empty() {
        violations.push(Violation::new("name", NAME_REQUIRED));
    }

    if !email.validate_email() || !has_public_domain(email) {
        violations.push(Violation::new("email", EMAIL_INVALID));
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        violations.push(Violation::new("password", PASSWORD_TOO_SHORT));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// The domain must be a dotted host name ending in a non-empty label.
/// IP literals and single-label hosts such as `localhost` are rejected.
fn has_public_domain(email: &str) -> bool {
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };

    if domain.starts_with('[') || !domain.contains('.') {
        return false;
    }

    domain.rsplit('.').next().is_some_and(|tld| !tld.is_empty())
}
