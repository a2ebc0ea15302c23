//! In-Memory Repository Implementation
//!
//! Used by tests and by the server when no database is configured.
//! Uniqueness is checked under the write lock, so concurrent inserts of the
//! same email or user name cannot both succeed.

use tokio::sync::RwLock;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{AccountId, email::Email, user_name::UserName};
use crate::error::{AccountError, AccountResult};

/// Insertion-ordered account store
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<Vec<Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.email == *email).cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AccountResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .find(|a| a.user_name.canonical() == user_name.canonical())
            .cloned())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AccountResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .find(|a| a.account_id == *account_id)
            .cloned())
    }

    async fn insert(&self, account: &Account) -> AccountResult<()> {
        let mut accounts = self.accounts.write().await;

        if accounts.iter().any(|a| a.email == account.email) {
            return Err(AccountError::EmailTaken);
        }
        if accounts
            .iter()
            .any(|a| a.user_name.canonical() == account.user_name.canonical())
        {
            return Err(AccountError::UserNameTaken);
        }
        if accounts.iter().any(|a| a.account_id == account.account_id) {
            return Err(AccountError::AccountExists);
        }

        accounts.push(account.clone());
        Ok(())
    }

    async fn update(&self, account: &Account) -> AccountResult<()> {
        let mut accounts = self.accounts.write().await;

        let stored = accounts
            .iter_mut()
            .find(|a| a.account_id == account.account_id)
            .ok_or(AccountError::AccountNotFound)?;

        // Identity columns stay as inserted
        stored.full_name = account.full_name.clone();
        stored.password_hash = account.password_hash.clone();
        stored.role = account.role;
        stored.is_active = account.is_active;
        stored.avatar_url = account.avatar_url.clone();
        stored.points = account.points;
        stored.updated_at = account.updated_at;

        Ok(())
    }

    async fn list(&self, skip: u64, limit: u64) -> AccountResult<Vec<Account>> {
        let accounts = self.accounts.read().await;
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(accounts.iter().skip(skip).take(limit).cloned().collect())
    }
}
