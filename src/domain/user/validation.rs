//! User validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("user id must be a positive integer")]
    ZeroId,

    #[error("username is required")]
    EmptyUsername,

    #[error("username exceeds maximum length of {0} characters")]
    UsernameTooLong(usize),

    #[error("username contains invalid character: '{0}'")]
    InvalidUsernameCharacter(char),

    #[error("password is required")]
    EmptyPassword,

    #[error("password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),

    #[error("email exceeds maximum length of {0} characters")]
    EmailTooLong(usize),

    #[error("email is not a valid address")]
    InvalidEmail,
}

const MAX_USERNAME_LENGTH: usize = 50;
const MAX_PASSWORD_LENGTH: usize = 128;
const MAX_EMAIL_LENGTH: usize = 254;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("email pattern is valid"));

/// Validate a username
///
/// Rules:
/// - Cannot be empty
/// - Maximum 50 characters
/// - No whitespace or control characters
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }

    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    if let Some(c) = username.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Err(UserValidationError::InvalidUsernameCharacter(c));
    }

    Ok(())
}

/// Validate a password
///
/// Only presence and an upper bound are enforced; strength policy is left
/// to the caller.
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.is_empty() {
        return Err(UserValidationError::EmptyPassword);
    }

    if password.chars().count() > MAX_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(UserValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    if !EMAIL_PATTERN.is_match(email) {
        return Err(UserValidationError::InvalidEmail);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("user_name").is_ok());
        assert!(validate_username("a").is_ok());
        assert!(validate_username("user.name-1").is_ok());
    }

    #[test]
    fn test_empty_username() {
        assert_eq!(
            validate_username(""),
            Err(UserValidationError::EmptyUsername)
        );
    }

    #[test]
    fn test_username_too_long() {
        let long_username = "a".repeat(51);
        assert_eq!(
            validate_username(&long_username),
            Err(UserValidationError::UsernameTooLong(50))
        );
    }

    #[test]
    fn test_username_with_whitespace() {
        assert_eq!(
            validate_username("user name"),
            Err(UserValidationError::InvalidUsernameCharacter(' '))
        );
    }

    #[test]
    fn test_valid_passwords() {
        assert!(validate_password("pw").is_ok());
        assert!(validate_password("P@ssw0rd!").is_ok());
    }

    #[test]
    fn test_empty_password() {
        assert_eq!(validate_password(""), Err(UserValidationError::EmptyPassword));
    }

    #[test]
    fn test_password_too_long() {
        let long_password = "a".repeat(129);
        assert_eq!(
            validate_password(&long_password),
            Err(UserValidationError::PasswordTooLong(128))
        );
    }

    #[test]
    fn test_email_validation() {
        assert!(validate_email("a@x.com").is_ok());
        assert_eq!(validate_email("not-an-email"), Err(UserValidationError::InvalidEmail));
        assert_eq!(validate_email("a@b@c"), Err(UserValidationError::InvalidEmail));
        assert_eq!(validate_email(""), Err(UserValidationError::InvalidEmail));
    }
}
