//! Password Policy
//!
//! Client-side password format rules applied before credentials leave the
//! device. A password is accepted when it:
//! - is at least [`MIN_PASSWORD_LENGTH`] characters long
//! - contains a lowercase letter, an uppercase letter and a digit
//! - contains a symbol from [`ALLOWED_SYMBOLS`]
//! - contains nothing outside ASCII letters, digits and those symbols
//!
//! This is a format check only. Credential verification belongs to the
//! hosted identity platform.

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// The only symbols a password may contain
pub const ALLOWED_SYMBOLS: &str = "@$!%*?&";

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password contains a character outside the allowed classes
    #[error("Password may only contain letters, digits and {}", ALLOWED_SYMBOLS)]
    InvalidCharacter,

    #[error("Password must contain a lowercase letter")]
    MissingLowercase,

    #[error("Password must contain an uppercase letter")]
    MissingUppercase,

    #[error("Password must contain a digit")]
    MissingDigit,

    #[error("Password must contain one of {}", ALLOWED_SYMBOLS)]
    MissingSymbol,
}

// ============================================================================
// Policy checks
// ============================================================================

fn is_allowed_symbol(ch: char) -> bool {
    ALLOWED_SYMBOLS.contains(ch)
}

/// Check a password against the policy, reporting the first rule it breaks
pub fn check_password_policy(password: &str) -> Result<(), PasswordPolicyError> {
    if password
        .chars()
        .any(|ch| !(ch.is_ascii_alphanumeric() || is_allowed_symbol(ch)))
    {
        return Err(PasswordPolicyError::InvalidCharacter);
    }

    // All remaining characters are ASCII, so bytes == characters
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(PasswordPolicyError::TooShort {
            min: MIN_PASSWORD_LENGTH,
            actual: password.len(),
        });
    }

    if !password.chars().any(|ch| ch.is_ascii_lowercase()) {
        return Err(PasswordPolicyError::MissingLowercase);
    }
    if !password.chars().any(|ch| ch.is_ascii_uppercase()) {
        return Err(PasswordPolicyError::MissingUppercase);
    }
    if !password.chars().any(|ch| ch.is_ascii_digit()) {
        return Err(PasswordPolicyError::MissingDigit);
    }
    if !password.chars().any(is_allowed_symbol) {
        return Err(PasswordPolicyError::MissingSymbol);
    }

    Ok(())
}

/// `true` iff the password satisfies every policy rule
pub fn validate_password(password: &str) -> bool {
    check_password_policy(password).is_ok()
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Holds a password between the sign-in form and the authenticator call.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("Abcdef1!".to_string());
/// assert!(password.check_policy().is_ok());
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap raw user input; validation is a separate step
    pub fn new(raw: String) -> Self {
        Self(raw)
    }

    /// Check the wrapped password against the policy
    pub fn check_policy(&self) -> Result<(), PasswordPolicyError> {
        check_password_policy(&self.0)
    }

    /// Borrow the secret for handing to the authenticator
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for ClearTextPassword {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("Abcdef1!"));
        assert!(validate_password("MySecure$Pass2024&"));
    }

    #[test]
    fn test_missing_classes() {
        assert!(!validate_password("abcdef12"));
        assert_eq!(
            check_password_policy("abcdef12"),
            Err(PasswordPolicyError::MissingUppercase)
        );
        assert_eq!(
            check_password_policy("ABCDEF1!"),
            Err(PasswordPolicyError::MissingLowercase)
        );
        assert_eq!(
            check_password_policy("Abcdefg!"),
            Err(PasswordPolicyError::MissingDigit)
        );
        assert_eq!(
            check_password_policy("Abcdefg1"),
            Err(PasswordPolicyError::MissingSymbol)
        );
    }

    #[test]
    fn test_disallowed_symbol_rejected() {
        assert!(!validate_password("Ab1!Ab1!#"));
        assert_eq!(
            check_password_policy("Ab1!Ab1!#"),
            Err(PasswordPolicyError::InvalidCharacter)
        );
    }

    #[test]
    fn test_whitespace_and_unicode_rejected() {
        assert!(!validate_password("Abc def1!"));
        assert!(!validate_password("Abcdéf1!"));
        assert!(!validate_password("Abcdef1!\n"));
    }

    #[test]
    fn test_password_too_short() {
        assert_eq!(
            check_password_policy("Ab1!"),
            Err(PasswordPolicyError::TooShort { min: 8, actual: 4 })
        );
        assert!(!validate_password(""));
        assert!(validate_password("Abcde1!?"));
        assert!(!validate_password("Abcd1!?"));
    }

    #[test]
    fn test_clear_text_password_policy() {
        let password = ClearTextPassword::new("Abcdef1!".to_string());
        assert!(password.check_policy().is_ok());
        assert_eq!(password.expose(), "Abcdef1!");

        let weak = ClearTextPassword::from("abcdef12".to_string());
        assert!(weak.check_policy().is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new("secret".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));
    }
}
