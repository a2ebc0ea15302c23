//! Admin Use Case
//!
//! Operations over other accounts. Role gating happens before these run.

use std::sync::Arc;

use crate::application::clock::Clock;
use crate::application::config::AccountConfig;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::AccountId;
use crate::error::{AccountError, AccountResult};

/// Admin use case
pub struct AdminUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AccountConfig>,
    clock: Arc<dyn Clock>,
}

impl<R> AdminUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            config,
            clock,
        }
    }

    /// Accounts in insertion order; `limit` falls back to the default page
    /// size and is capped by `max_page_size`
    pub async fn list_accounts(
        &self,
        skip: Option<u64>,
        limit: Option<u64>,
    ) -> AccountResult<Vec<Account>> {
        let limit = self.config.page_limit(limit);
        if limit == 0 {
            return Ok(Vec::new());
        }

        self.repo.list(skip.unwrap_or(0), limit).await
    }

    pub async fn get_account(&self, account_id: &AccountId) -> AccountResult<Account> {
        self.repo
            .find_by_id(account_id)
            .await?
            .ok_or(AccountError::AccountNotFound)
    }

    pub async fn toggle_active(&self, account_id: &AccountId) -> AccountResult<Account> {
        let mut account = self.get_account(account_id).await?;

        let is_active = account.toggle_active(self.clock.now());
        self.repo.update(&account).await?;

        tracing::info!(
            account_id = %account.account_id,
            is_active,
            "Account active flag toggled"
        );

        Ok(account)
    }
}
