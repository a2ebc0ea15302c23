//! User Name Value Object
//!
//! The public handle of an account.
//!
//! - NFKC normalization, then trim, then validation
//! - The original spelling is kept for display
//! - The canonical (lowercase) form is what uniqueness is decided on, so
//!   `Alice` and `alice` cannot both register
//!
//! ## Invariants
//! - Length: 3 to 50 characters (after normalization)
//! - Canonical form at most 100 characters (lowercasing may expand, e.g. `İ`)
//! - No whitespace or control characters

use kernel::error::app_error::{AppError, AppResult};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

pub const USER_NAME_MIN_LENGTH: usize = 3;
pub const USER_NAME_MAX_LENGTH: usize = 50;
/// Width of the `user_name_canonical` column
pub const USER_NAME_CANONICAL_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let original = normalized.trim().to_string();

        let len = original.chars().count();
        if len < USER_NAME_MIN_LENGTH || len > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be between {} and {} characters",
                USER_NAME_MIN_LENGTH, USER_NAME_MAX_LENGTH
            )));
        }

        if original
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(AppError::bad_request(
                "Username cannot contain spaces or control characters",
            ));
        }

        let canonical = original.to_lowercase();

        if canonical.chars().count() > USER_NAME_CANONICAL_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be between {} and {} characters",
                USER_NAME_MIN_LENGTH, USER_NAME_MAX_LENGTH
            )));
        }

        Ok(Self {
            original,
            canonical,
        })
    }

    /// Rebuild from stored columns (assumed already validated)
    pub fn from_db(original: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            canonical: canonical.into(),
        }
    }

    /// Spelling as the user typed it
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Lowercase form used for uniqueness
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_bounds() {
        assert!(UserName::new("ab").is_err());
        assert!(UserName::new("abc").is_ok());
        assert!(UserName::new("a".repeat(50)).is_ok());
        assert!(UserName::new("a".repeat(51)).is_err());
    }

    #[test]
    fn test_canonical_is_lowercase() {
        let name = UserName::new("  Alice ").unwrap();
        assert_eq!(name.original(), "Alice");
        assert_eq!(name.canonical(), "alice");
    }

    #[test]
    fn test_nfkc_normalization() {
        // Full-width letters collapse to ASCII
        let name = UserName::new("ａｌｉｃｅ").unwrap();
        assert_eq!(name.canonical(), "alice");
    }

    #[test]
    fn test_expanding_lowercase_fits_canonical_column() {
        // U+0130 lowercases to two code points
        let name = UserName::new("İ".repeat(USER_NAME_MAX_LENGTH)).unwrap();
        assert_eq!(name.original().chars().count(), 50);
        assert_eq!(name.canonical().chars().count(), 100);
        assert!(name.canonical().chars().count() <= USER_NAME_CANONICAL_MAX_LENGTH);
    }

    #[test]
    fn test_rejects_inner_whitespace() {
        assert!(UserName::new("al ice").is_err());
        assert!(UserName::new("al\tice").is_err());
    }
}
