//! Profile Use Case
//!
//! Self-service changes to the signed-in account.

use std::sync::Arc;

use crate::application::clock::Clock;
use crate::application::credentials::{hash_password, verify_password};
use crate::domain::entity::account::{Account, ProfilePatch};
use crate::domain::repository::AccountRepository;
use crate::domain::services::CredentialEngine;
use crate::domain::value_object::{AccountId, account_password::RawPassword};
use crate::error::{AccountError, AccountResult};

/// Change password input
pub struct ChangePasswordInput {
    /// Compared against the stored hash, no policy applied
    pub current_password: String,
    /// Already passed the password policy
    pub new_password: RawPassword,
}

/// Profile use case
pub struct ProfileUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    credentials: Arc<CredentialEngine>,
    clock: Arc<dyn Clock>,
}

impl<R> ProfileUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, credentials: Arc<CredentialEngine>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            credentials,
            clock,
        }
    }

    pub async fn update_profile(
        &self,
        account_id: &AccountId,
        patch: ProfilePatch,
    ) -> AccountResult<Account> {
        let mut account = self.load(account_id).await?;

        account.apply_profile(patch, self.clock.now());
        self.repo.update(&account).await?;

        tracing::info!(account_id = %account.account_id, "Profile updated");

        Ok(account)
    }

    pub async fn change_password(
        &self,
        account_id: &AccountId,
        input: ChangePasswordInput,
    ) -> AccountResult<()> {
        let mut account = self.load(account_id).await?;

        let current = RawPassword::presented(input.current_password);
        let valid =
            verify_password(&self.credentials, current, account.password_hash.clone()).await?;

        if !valid {
            return Err(AccountError::IncorrectPassword);
        }

        let password_hash = hash_password(&self.credentials, input.new_password).await?;
        account.set_password(password_hash, self.clock.now());
        self.repo.update(&account).await?;

        tracing::info!(account_id = %account.account_id, "Password changed");

        Ok(())
    }

    async fn load(&self, account_id: &AccountId) -> AccountResult<Account> {
        self.repo
            .find_by_id(account_id)
            .await?
            .ok_or(AccountError::AccountNotFound)
    }
}
