//! Credential Engine
//!
//! Password hashing and session token signing. Pure computation: no I/O,
//! no ambient clock. Callers pass `now` explicitly and run the Argon2 paths
//! on a blocking worker.
//!
//! Tokens are HS256 JWTs with claims `{ sub, role, iat, exp }` (unix
//! seconds). `exp` is checked here against the caller's `now`, not the
//! wall clock.

use chrono::{DateTime, Duration, Utc};
use platform::password::HashCost;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_object::{
    AccountId,
    account_password::{AccountPassword, RawPassword},
    account_role::AccountRole,
};
use crate::error::{AccountError, AccountResult};

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    role: String,
    iat: i64,
    exp: i64,
}

/// A freshly signed session token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Identity carried by a token that passed verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedSession {
    pub account_id: AccountId,
    pub role: AccountRole,
    pub expires_at: DateTime<Utc>,
}

/// Hashes passwords and signs/verifies session tokens
pub struct CredentialEngine {
    signing_key: Vec<u8>,
    pepper: Option<Vec<u8>>,
    cost: HashCost,
    leeway: Duration,
}

impl CredentialEngine {
    pub fn new(
        signing_key: Vec<u8>,
        pepper: Option<Vec<u8>>,
        cost: HashCost,
        leeway: Duration,
    ) -> Self {
        Self {
            signing_key,
            pepper,
            cost,
            leeway,
        }
    }

    /// Salted Argon2id hash of a password
    pub fn hash(&self, password: &RawPassword) -> AccountResult<AccountPassword> {
        Ok(AccountPassword::from_raw(
            password,
            self.pepper.as_deref(),
            self.cost,
        )?)
    }

    /// `false` on mismatch and on a malformed stored hash
    pub fn verify(&self, password: &RawPassword, hash: &AccountPassword) -> bool {
        hash.verify(password, self.pepper.as_deref())
    }

    /// True when `hash` was made with other cost parameters than ours
    pub fn needs_rehash(&self, hash: &AccountPassword) -> bool {
        hash.needs_rehash(self.cost)
    }

    pub fn issue_token(
        &self,
        account_id: &AccountId,
        role: AccountRole,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> AccountResult<IssuedToken> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AccountError::Internal("Token lifetime out of range".to_string()))?;
        let claims = SessionClaims {
            sub: account_id.to_string(),
            role: role.code().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = platform::token::sign(&claims, &self.signing_key)
            .map_err(|e| AccountError::Internal(format!("Token signing failed: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Check signature, algorithm, claims and expiry at `now`
    ///
    /// Every failure collapses into `SessionInvalid`; the cause is only logged.
    pub fn verify_token(&self, token: &str, now: DateTime<Utc>) -> AccountResult<VerifiedSession> {
        let claims: SessionClaims =
            platform::token::verify(token, &self.signing_key).map_err(|e| {
                tracing::debug!(error = %e, "Session token rejected");
                AccountError::SessionInvalid
            })?;

        let account_id = Uuid::parse_str(&claims.sub)
            .map(AccountId::from_uuid)
            .map_err(|_| AccountError::SessionInvalid)?;

        let role = AccountRole::from_code(&claims.role).ok_or(AccountError::SessionInvalid)?;

        let expires_at =
            DateTime::from_timestamp(claims.exp, 0).ok_or(AccountError::SessionInvalid)?;

        let deadline = expires_at
            .checked_add_signed(self.leeway)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        if now >= deadline {
            tracing::debug!(account_id = %account_id, "Session token expired");
            return Err(AccountError::SessionInvalid);
        }

        Ok(VerifiedSession {
            account_id,
            role,
            expires_at,
        })
    }
}

impl std::fmt::Debug for CredentialEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialEngine")
            .field("signing_key", &"[REDACTED]")
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .field("cost", &self.cost)
            .field("leeway", &self.leeway)
            .finish()
    }
}
