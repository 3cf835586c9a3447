// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Form field validation.
//!
//! Registration only requires the fields to be present. Anything else the
//! client submits is stored as given.

use thiserror::Error;

use crate::error::AppError;

/// Possible validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate an email address; it is stored exactly as given
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    if email.trim().is_empty() {
        return Err(ValidationError::InvalidEmail(
            "Email cannot be empty".to_string(),
        ));
    }

    Ok(email)
}

/// Validate a submitted password; whitespace is a legitimate password
pub fn validate_password(password: &str) -> ValidationResult<&str> {
    if password.is_empty() {
        return Err(ValidationError::InvalidPassword(
            "Password cannot be empty".to_string(),
        ));
    }

    Ok(password)
}

/// Validate a display name
pub fn validate_name(name: &str) -> ValidationResult<&str> {
    if name.trim().is_empty() {
        return Err(ValidationError::InvalidName(
            "Name cannot be empty".to_string(),
        ));
    }

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("admin@localhost").is_ok());
        assert!(validate_email("not-an-email").is_ok());
        assert!(validate_email(&format!("{}@x.com", "a".repeat(200))).is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
    }

    #[test]
    fn test_email_case_is_kept() {
        assert_eq!(validate_email("A@X.com"), Ok("A@X.com"));
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("pw").is_ok());
        assert!(validate_password(" ").is_ok());
        assert!(validate_password(&"x".repeat(4096)).is_ok());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("A").is_ok());
        assert!(validate_name(&"n".repeat(5000)).is_ok());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_into_app_error() {
        let err: AppError = ValidationError::InvalidName("Name cannot be empty".to_string()).into();
        assert!(matches!(err, AppError::InvalidInput(msg) if msg.contains("Name cannot be empty")));
    }
}
