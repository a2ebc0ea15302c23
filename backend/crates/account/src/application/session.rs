//! Session Use Case
//!
//! Issues bearer tokens and resolves them back to accounts.

use std::sync::Arc;

use crate::application::clock::Clock;
use crate::application::config::AccountConfig;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::services::{CredentialEngine, IssuedToken};
use crate::error::{AccountError, AccountResult};

/// Session use case
pub struct SessionUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AccountConfig>,
    credentials: Arc<CredentialEngine>,
    clock: Arc<dyn Clock>,
}

impl<R> SessionUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(
        repo: Arc<R>,
        config: Arc<AccountConfig>,
        credentials: Arc<CredentialEngine>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            config,
            credentials,
            clock,
        }
    }

    /// Sign a token for the account with the configured TTL
    pub fn issue(&self, account: &Account) -> AccountResult<IssuedToken> {
        self.credentials.issue_token(
            &account.account_id,
            account.role,
            self.clock.now(),
            self.config.token_ttl_chrono(),
        )
    }

    /// Verify the token and load its account
    ///
    /// The account is re-read so that role changes are picked up; a token
    /// whose account vanished is treated like an invalid one.
    pub async fn resolve(&self, token: &str) -> AccountResult<Account> {
        let session = self.credentials.verify_token(token, self.clock.now())?;

        let account = self
            .repo
            .find_by_id(&session.account_id)
            .await?
            .ok_or(AccountError::SessionInvalid)?;

        Ok(account)
    }
}
