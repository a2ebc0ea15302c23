//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::account::Account;
use crate::domain::value_object::{AccountId, email::Email, user_name::UserName};
use crate::error::AccountResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Find account by normalized email
    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<Account>>;

    /// Find account by user name (canonical form)
    async fn find_by_user_name(&self, user_name: &UserName) -> AccountResult<Option<Account>>;

    /// Find account by ID
    async fn find_by_id(&self, account_id: &AccountId) -> AccountResult<Option<Account>>;

    /// Insert a new account
    ///
    /// Fails with `EmailTaken` / `UserNameTaken` when a unique constraint
    /// rejects the row.
    async fn insert(&self, account: &Account) -> AccountResult<()>;

    /// Persist mutable fields of an existing account
    async fn update(&self, account: &Account) -> AccountResult<()>;

    /// Page through accounts in insertion order
    async fn list(&self, skip: u64, limit: u64) -> AccountResult<Vec<Account>>;
}
