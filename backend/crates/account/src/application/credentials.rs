//! Argon2 work off the async executor

use std::sync::Arc;

use crate::domain::services::CredentialEngine;
use crate::domain::value_object::account_password::{AccountPassword, RawPassword};
use crate::error::AccountResult;

pub(crate) async fn hash_password(
    engine: &Arc<CredentialEngine>,
    password: RawPassword,
) -> AccountResult<AccountPassword> {
    let engine = Arc::clone(engine);
    tokio::task::spawn_blocking(move || engine.hash(&password)).await?
}

pub(crate) async fn verify_password(
    engine: &Arc<CredentialEngine>,
    password: RawPassword,
    hash: AccountPassword,
) -> AccountResult<bool> {
    let engine = Arc::clone(engine);
    Ok(tokio::task::spawn_blocking(move || engine.verify(&password, &hash)).await?)
}

/// Outcome of checking a presented password at sign-in
pub(crate) enum PasswordCheck {
    Mismatch,
    /// `upgraded` holds a fresh hash when the stored one used stale cost parameters
    Match { upgraded: Option<AccountPassword> },
}

pub(crate) async fn verify_and_upgrade(
    engine: &Arc<CredentialEngine>,
    password: RawPassword,
    hash: AccountPassword,
) -> AccountResult<PasswordCheck> {
    let engine = Arc::clone(engine);
    let check = tokio::task::spawn_blocking(move || {
        if !engine.verify(&password, &hash) {
            return PasswordCheck::Mismatch;
        }
        if !engine.needs_rehash(&hash) {
            return PasswordCheck::Match { upgraded: None };
        }

        match engine.hash(&password) {
            Ok(fresh) => PasswordCheck::Match {
                upgraded: Some(fresh),
            },
            Err(e) => {
                tracing::warn!(error = %e, "Password rehash failed, keeping stored hash");
                PasswordCheck::Match { upgraded: None }
            }
        }
    })
    .await?;

    Ok(check)
}
