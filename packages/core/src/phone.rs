//! Phone number value object with E.164 validation

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhoneNumberError {
    #[error("Phone number must start with +")]
    MissingPlus,
    #[error("Phone number must contain only digits after +")]
    NonDigit,
    #[error("Country code cannot start with 0")]
    LeadingZero,
    #[error("Phone number must have 7-15 digits")]
    Length,
}

/// A validated phone number in E.164 format (e.g., +15551234567)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber {
    value: String,
}

impl PhoneNumber {
    /// Parse a phone number, normalizing common separators.
    ///
    /// E.164: a leading `+`, a country code that does not start with 0, and
    /// 7 to 15 digits in total.
    pub fn parse(number: &str) -> Result<Self, PhoneNumberError> {
        let value = number.trim().replace([' ', '-', '(', ')', '.'], "");

        let digits = value
            .strip_prefix('+')
            .ok_or(PhoneNumberError::MissingPlus)?;

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneNumberError::NonDigit);
        }

        if digits.starts_with('0') {
            return Err(PhoneNumberError::LeadingZero);
        }

        if digits.len() < 7 || digits.len() > 15 {
            return Err(PhoneNumberError::Length);
        }

        Ok(Self { value })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(number: PhoneNumber) -> Self {
        number.value
    }
}
