//! Sign In Use Case
//!
//! Checks an email + password pair against the stored hash. A hash made
//! with outdated Argon2 parameters is replaced after a successful sign in.

use std::sync::Arc;

use crate::application::credentials::{PasswordCheck, verify_and_upgrade};
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::services::CredentialEngine;
use crate::domain::value_object::{account_password::RawPassword, email::Email};
use crate::error::{AccountError, AccountResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    credentials: Arc<CredentialEngine>,
}

impl<R> SignInUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, credentials: Arc<CredentialEngine>) -> Self {
        Self { repo, credentials }
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    /// The active flag is consulted only after the password matched.
    pub async fn execute(&self, input: SignInInput) -> AccountResult<Account> {
        let email = Email::new(input.email).map_err(|_| AccountError::InvalidCredentials)?;

        let mut account = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let password = RawPassword::presented(input.password);
        let check =
            verify_and_upgrade(&self.credentials, password, account.password_hash.clone()).await?;

        let upgraded = match check {
            PasswordCheck::Mismatch => return Err(AccountError::InvalidCredentials),
            PasswordCheck::Match { upgraded } => upgraded,
        };

        if !account.can_login() {
            tracing::info!(account_id = %account.account_id, "Inactive account sign in refused");
            return Err(AccountError::AccountInactive);
        }

        if let Some(fresh) = upgraded {
            // Same password under new parameters; updated_at stays
            account.password_hash = fresh;
            match self.repo.update(&account).await {
                Ok(()) => {
                    tracing::info!(account_id = %account.account_id, "Password hash upgraded")
                }
                Err(e) => {
                    tracing::warn!(account_id = %account.account_id, error = %e, "Password hash upgrade not saved")
                }
            }
        }

        tracing::info!(account_id = %account.account_id, "Account signed in");

        Ok(account)
    }
}
