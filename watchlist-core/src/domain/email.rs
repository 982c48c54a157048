use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern must compile");
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Deserialize, Serialize)]
pub struct Email(String);

impl Email {
    /// Parse an address of the shape `local@domain.tld`.
    ///
    /// This is the loose client-side check used by the sign-in and sign-up forms,
    /// deliverability is the auth provider's concern.
    pub fn parse(address: &str) -> Result<Self, EmailError> {
        if address.trim().is_empty() {
            return Err(EmailError::Empty);
        }
        if !EMAIL_PATTERN.is_match(address) {
            return Err(EmailError::InvalidEmail);
        }

        Ok(Email(address.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email is required")]
    Empty,
    #[error("Invalid email")]
    InvalidEmail,
}
