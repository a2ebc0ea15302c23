//! Register Use Case
//!
//! Creates a new account.

use std::sync::Arc;

use crate::application::clock::Clock;
use crate::application::credentials::hash_password;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::services::CredentialEngine;
use crate::domain::value_object::{
    account_password::RawPassword, account_role::AccountRole, email::Email,
    full_name::FullName, user_name::UserName,
};
use crate::error::{AccountError, AccountResult};

/// Register input (already validated)
#[derive(Debug)]
pub struct RegisterInput {
    pub email: Email,
    pub user_name: UserName,
    pub full_name: FullName,
    pub password: RawPassword,
    pub role: AccountRole,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    credentials: Arc<CredentialEngine>,
    clock: Arc<dyn Clock>,
}

impl<R> RegisterUseCase<R>
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

    /// Email is checked before user name, so a double collision reports
    /// the email. The insert itself is the final arbiter under races.
    pub async fn execute(&self, input: RegisterInput) -> AccountResult<Account> {
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AccountError::EmailTaken);
        }

        if self.repo.find_by_user_name(&input.user_name).await?.is_some() {
            return Err(AccountError::UserNameTaken);
        }

        let password_hash = hash_password(&self.credentials, input.password).await?;

        let account = Account::new(
            input.email,
            input.user_name,
            input.full_name,
            password_hash,
            input.role,
            self.clock.now(),
        );

        self.repo.insert(&account).await?;

        tracing::info!(
            account_id = %account.account_id,
            user_name = %account.user_name,
            role = %account.role,
            "Account registered"
        );

        Ok(account)
    }
}
