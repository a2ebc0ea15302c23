//! Authorization Policy
//!
//! Role gating as a pure function of the caller's role, usable without any
//! transport in scope.

use crate::domain::entity::account::Account;
use crate::domain::value_object::account_role::AccountRole;
use crate::error::{AccountError, AccountResult};

/// Outcome of a policy check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

impl Access {
    pub fn is_allowed(self) -> bool {
        matches!(self, Access::Allow)
    }
}

/// Roles allowed to run administrative operations
pub const ADMIN_ROLES: &[AccountRole] = &[AccountRole::SuperAdmin];

/// Allow iff `role` is one of `required`
pub fn authorize(role: AccountRole, required: &[AccountRole]) -> Access {
    if required.contains(&role) {
        Access::Allow
    } else {
        Access::Deny
    }
}

/// Pass the account through when its role is allowed, `InsufficientRole` otherwise
pub fn require_role(account: Account, required: &[AccountRole]) -> AccountResult<Account> {
    match authorize(account.role, required) {
        Access::Allow => Ok(account),
        Access::Deny => {
            tracing::warn!(
                account_id = %account.account_id,
                role = %account.role,
                "Role not permitted"
            );
            Err(AccountError::InsufficientRole)
        }
    }
}
