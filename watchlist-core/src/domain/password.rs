use secrecy::{ExposeSecret, Secret};

use super::FieldError;

/// Minimum length gate for signing in.
pub const SIGN_IN_MIN_LENGTH: usize = 6;
/// Minimum length for a new account password.
pub const SIGN_UP_MIN_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordPolicy {
    /// Required and at least six characters.
    SignIn,
    /// Required, at least eight characters, and mixed case plus a digit.
    SignUp,
}

impl PasswordPolicy {
    pub fn min_length(&self) -> usize {
        match self {
            PasswordPolicy::SignIn => SIGN_IN_MIN_LENGTH,
            PasswordPolicy::SignUp => SIGN_UP_MIN_LENGTH,
        }
    }

    /// Returns the first rule the password breaks, if any.
    pub fn check(&self, password: &str) -> Result<(), FieldError> {
        // Only the empty string counts as missing; whitespace is a valid password character.
        if password.is_empty() {
            return Err(FieldError::PasswordRequired);
        }

        let min = self.min_length();
        if password.chars().count() < min {
            return Err(FieldError::PasswordTooShort { min });
        }

        if *self == PasswordPolicy::SignUp && !has_required_character_classes(password) {
            return Err(FieldError::PasswordWeak);
        }

        Ok(())
    }
}

fn has_required_character_classes(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn parse(s: Secret<String>, policy: PasswordPolicy) -> Result<Self, FieldError> {
        policy.check(s.expose_secret())?;
        Ok(Self(s))
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
