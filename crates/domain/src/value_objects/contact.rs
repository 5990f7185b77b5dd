//! Payee contact details: e-mail address and E.164 phone number.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// RFC 5321 path limit
const MAX_EMAIL_LENGTH: usize = 254;

/// E.164 allows at most 15 digits after the `+`
const MAX_E164_DIGITS: usize = 15;

// ============================================================================
// EmailAddress
// ============================================================================

/// A syntactically valid e-mail address. The domain part is lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(email: impl Into<String>) -> Result<Self, DomainError> {
        let email = email.into();
        let email = email.trim();
        let invalid = || DomainError::validation(format!("'{}' is not a valid email address", email));

        if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
            return Err(invalid());
        }
        if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(invalid());
        }

        let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.contains('@') {
            return Err(invalid());
        }
        if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
            return Err(invalid());
        }

        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 {
            return Err(invalid());
        }
        let label_ok = |label: &&str| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        };
        if !labels.iter().all(label_ok) {
            return Err(invalid());
        }

        Ok(Self(format!("{}@{}", local, domain.to_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> String {
        email.0
    }
}

// ============================================================================
// PhoneNumber
// ============================================================================

/// A phone number in E.164 format: `+`, a non-zero digit, then 1..=14 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(number: impl Into<String>) -> Result<Self, DomainError> {
        let number = number.into();
        let number = number.trim();

        let digits = number
            .strip_prefix('+')
            .ok_or_else(Self::format_error)?;
        let valid = digits.len() >= 2
            && digits.len() <= MAX_E164_DIGITS
            && digits.chars().all(|c| c.is_ascii_digit())
            && !digits.starts_with('0');
        if !valid {
            return Err(Self::format_error());
        }

        Ok(Self(number.to_string()))
    }

    fn format_error() -> DomainError {
        DomainError::validation("Phone number must be in E.164 format")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> String {
        phone.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_common_addresses() {
        assert!(EmailAddress::new("jane.doe@example.com").is_ok());
        assert!(EmailAddress::new("billing+q1@sub.example.co.uk").is_ok());
    }

    #[test]
    fn email_lowercases_domain_only() {
        let email = EmailAddress::new("Jane@Example.COM").unwrap();
        assert_eq!(email.as_str(), "Jane@example.com");
    }

    #[test]
    fn email_rejects_malformed() {
        for bad in [
            "",
            "plainaddress",
            "@example.com",
            "jane@",
            "jane@localhost",
            "jane@@example.com",
            "ja ne@example.com",
            "jane@example..com",
            "jane@-example.com",
            ".jane@example.com",
        ] {
            assert!(EmailAddress::new(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn phone_accepts_e164() {
        assert!(PhoneNumber::new("+14155552671").is_ok());
        assert!(PhoneNumber::new("+44").is_ok());
        assert!(PhoneNumber::new("+123456789012345").is_ok());
    }

    #[test]
    fn phone_rejects_non_e164() {
        for bad in ["4155552671", "+0123", "+1", "+1234567890123456", "+1 415 555", "+1-415"] {
            let err = PhoneNumber::new(bad).unwrap_err();
            assert_eq!(err.detail(), "Phone number must be in E.164 format");
        }
    }
}
