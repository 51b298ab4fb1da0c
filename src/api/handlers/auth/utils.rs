//! Small helpers for auth input validation.

use regex::Regex;

use super::error::AuthError;
use super::types::{LoginRequest, RegisterRequest};

/// Basic email format check. Case is preserved; emails are compared exactly.
pub(super) fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

/// Trim surrounding whitespace and reject empty or malformed fields.
pub(super) fn validate_register(mut request: RegisterRequest) -> Result<RegisterRequest, AuthError> {
    request.email = request.email.trim().to_string();
    request.name = request.name.trim().to_string();

    if !valid_email(&request.email) {
        return Err(AuthError::BadRequest("Invalid email"));
    }
    if request.password.is_empty() {
        return Err(AuthError::BadRequest("Invalid password"));
    }
    if request.name.is_empty() {
        return Err(AuthError::BadRequest("Invalid name"));
    }

    Ok(request)
}

/// Login only trims the email; anything else is left to the credential check.
pub(super) fn validate_login(mut request: LoginRequest) -> Result<LoginRequest, AuthError> {
    request.email = request.email.trim().to_string();

    if request.email.is_empty() || request.password.is_empty() {
        return Err(AuthError::BadRequest("Missing email or password"));
    }

    Ok(request)
}
