//! Validated text newtypes for payee records
//!
//! These newtypes ensure that text fields are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for person names
const MAX_NAME_LENGTH: usize = 200;

/// Maximum length for address and locality fields
const MAX_ADDRESS_LENGTH: usize = 300;

fn validated_text(raw: String, what: &str, max: usize) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{} cannot be empty", what)));
    }
    if trimmed.chars().count() > max {
        return Err(DomainError::validation(format!(
            "{} cannot exceed {} characters",
            what, max
        )));
    }
    Ok(trimmed.to_string())
}

// ============================================================================
// PersonName
// ============================================================================

/// A validated first or last name (non-empty, <=200 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Create a new validated name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name is empty after trimming
    /// or exceeds 200 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        validated_text(name.into(), "Name", MAX_NAME_LENGTH).map(Self)
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PersonName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PersonName> for String {
    fn from(name: PersonName) -> String {
        name.0
    }
}

// ============================================================================
// AddressText
// ============================================================================

/// A required address component: street line, city or postal code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AddressText(String);

impl AddressText {
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        validated_text(text.into(), "Address field", MAX_ADDRESS_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AddressText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AddressText {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<AddressText> for String {
    fn from(text: AddressText) -> String {
        text.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_name_is_trimmed() {
        let name = PersonName::new("  Ada ").unwrap();
        assert_eq!(name.as_str(), "Ada");
    }

    #[test]
    fn person_name_rejects_blank() {
        assert!(PersonName::new("   ").is_err());
    }

    #[test]
    fn person_name_rejects_too_long() {
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        let err = PersonName::new(long).unwrap_err();
        assert!(err.to_string().contains("200"));
    }

    #[test]
    fn address_text_counts_characters_not_bytes() {
        let text = "é".repeat(MAX_ADDRESS_LENGTH);
        assert!(AddressText::new(text).is_ok());
    }

    #[test]
    fn deserialization_validates() {
        let result: Result<PersonName, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
