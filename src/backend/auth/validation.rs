/**
 * Registration Input Validation
 *
 * Checks run in a fixed order and the first failing rule wins, so a client
 * always sees exactly one message.
 *
 * Password rules, checked in this order:
 * 1. at least 8 characters
 * 2. at least one ASCII digit
 * 3. at least one ASCII uppercase letter
 * 4. at least one character from [`SPECIAL_CHARACTERS`]
 */

use thiserror::Error;

/// Characters accepted by the special-character rule
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()-_=+[]{};:'\",.<>/?\\|`~";

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A rejected registration field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Username is required.")]
    UsernameMissing,

    #[error("Email address is invalid.")]
    EmailInvalid,

    #[error("Password is too short.")]
    PasswordTooShort,

    #[error("Password should contain at least one number.")]
    PasswordMissingDigit,

    #[error("Password should contain at least one uppercase letter.")]
    PasswordMissingUppercase,

    #[error("Password should contain at least one special character.")]
    PasswordMissingSpecialChar,
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::UsernameMissing);
    }
    Ok(())
}

/// Accepts `local@domain.tld`: exactly one `@`, a non-empty local part and a
/// domain with an inner dot. Whitespace anywhere is rejected.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::EmailInvalid);
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ValidationError::EmailInvalid);
    };
    if local.is_empty() {
        return Err(ValidationError::EmailInvalid);
    }
    match domain.find('.') {
        Some(dot) if dot > 0 && !domain.ends_with('.') => Ok(()),
        _ => Err(ValidationError::EmailInvalid),
    }
}

/// Apply the password rules in order, returning the first violation
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PasswordMissingDigit);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::PasswordMissingUppercase);
    }
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        return Err(ValidationError::PasswordMissingSpecialChar);
    }
    Ok(())
}
