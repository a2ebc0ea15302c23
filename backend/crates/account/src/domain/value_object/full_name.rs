//! Full Name Value Object

use kernel::error::app_error::{AppError, AppResult};
use std::fmt;

pub const FULL_NAME_MIN_LENGTH: usize = 2;
pub const FULL_NAME_MAX_LENGTH: usize = 100;

/// Display name of an account holder (2 to 100 characters, trimmed)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let name = raw.as_ref().trim();

        let len = name.chars().count();
        if len < FULL_NAME_MIN_LENGTH || len > FULL_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Full name must be between {} and {} characters",
                FULL_NAME_MIN_LENGTH, FULL_NAME_MAX_LENGTH
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AppError::bad_request(
                "Full name cannot contain control characters",
            ));
        }

        Ok(Self(name.to_string()))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_bounds() {
        assert!(FullName::new("A").is_err());
        assert!(FullName::new("Al").is_ok());
        assert!(FullName::new("x".repeat(100)).is_ok());
        assert!(FullName::new("x".repeat(101)).is_err());
        assert!(FullName::new("   A   ").is_err());
    }

    #[test]
    fn test_full_name_trimmed() {
        assert_eq!(FullName::new("  Alice A ").unwrap().as_str(), "Alice A");
    }
}
