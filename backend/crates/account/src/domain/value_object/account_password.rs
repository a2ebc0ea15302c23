//! Account Password Value Objects
//!
//! Domain wrappers around `platform::password`.
//!
//! - [`RawPassword`]: clear text from a request, zeroized on drop
//! - [`AccountPassword`]: Argon2id PHC string, the only form ever stored
//!
//! ## Usage
//! ```rust
//! use account::domain::value_object::account_password::{AccountPassword, RawPassword};
//! use platform::password::HashCost;
//!
//! let raw = RawPassword::new("longenough1".to_string()).unwrap();
//! let hashed = AccountPassword::from_raw(&raw, None, HashCost::minimal()).unwrap();
//! assert!(hashed.verify(&raw, None));
//! ```

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashCost, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a password that is about to be stored
    ///
    /// Enforces the length policy (8 to 100 characters).
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, .. } => {
                AppError::bad_request(format!("Password must be at least {} characters", min))
                    .with_action("Please choose a longer password")
            }

            PasswordPolicyError::TooLong { max, .. } => {
                AppError::bad_request(format!("Password must be at most {} characters", max))
                    .with_action("Please choose a shorter password")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// Wrap a password that will only be compared against a stored hash
    /// (sign-in, current password). No policy is applied.
    pub fn presented(raw: String) -> Self {
        Self(ClearTextPassword::for_comparison(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Account Password (Hashed, for storage)
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct AccountPassword(HashedPassword);

impl AccountPassword {
    /// Hash a raw password with a fresh salt
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>, cost: HashCost) -> AppResult<Self> {
        let hashed = raw.inner().hash(pepper, cost).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AppError::internal(format!("Password hashing failed: {}", msg))
            }
            PasswordHashError::InvalidCost(msg) => {
                AppError::internal(format!("Password hash cost misconfigured: {}", msg))
            }
        })?;

        Ok(Self(hashed))
    }

    /// Load the stored column. A malformed value simply never verifies.
    pub fn from_db(phc_string: impl Into<String>) -> Self {
        Self(HashedPassword::from_stored(phc_string))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time verification; `false` on mismatch or malformed hash
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    /// True when the stored hash was made with other cost parameters
    pub fn needs_rehash(&self, cost: HashCost) -> bool {
        self.0.needs_rehash(cost)
    }
}

impl fmt::Debug for AccountPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for AccountPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HASHED_PASSWORD]")
    }
}
