//! Application Configuration
//!
//! Configuration for the Account application layer. Built once at startup
//! and shared behind an `Arc`.

use std::time::Duration;

use platform::password::HashCost;

use crate::domain::services::CredentialEngine;

/// Longest session token lifetime accepted at startup (one year)
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Account application configuration
#[derive(Clone)]
pub struct AccountConfig {
    /// Secret key for HS256 token signing
    pub token_secret: Vec<u8>,
    /// Session token lifetime (default 30 minutes, at most [`MAX_TOKEN_TTL`])
    pub token_ttl: Duration,
    /// Grace period past `exp` during verification (default zero)
    pub token_leeway: Duration,
    /// Argon2 cost parameters
    pub hash_cost: HashCost,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Listing page size when the caller sends none
    pub default_page_size: u64,
    /// Hard cap on listing page size
    pub max_page_size: u64,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            token_secret: vec![0u8; 32],
            token_ttl: Duration::from_secs(30 * 60), // 30 minutes
            token_leeway: Duration::ZERO,
            hash_cost: HashCost::default(),
            password_pepper: None,
            default_page_size: 100,
            max_page_size: 100,
        }
    }
}

impl AccountConfig {
    /// Create config with a random token secret
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: platform::crypto::random_bytes(32),
            ..Default::default()
        }
    }

    /// Create config for development (random secret, cheap hashing)
    pub fn development() -> Self {
        Self {
            hash_cost: HashCost::minimal(),
            ..Self::with_random_secret()
        }
    }

    /// `token_ttl` in range: a positive lifetime no longer than [`MAX_TOKEN_TTL`]
    pub fn validate_token_ttl(ttl: Duration) -> Result<Duration, String> {
        if ttl.is_zero() {
            return Err("token lifetime must be positive".to_string());
        }
        if ttl > MAX_TOKEN_TTL {
            return Err(format!(
                "token lifetime must be at most {} minutes",
                MAX_TOKEN_TTL.as_secs() / 60
            ));
        }
        Ok(ttl)
    }

    /// Token lifetime as a chrono duration, capped at [`MAX_TOKEN_TTL`]
    pub fn token_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.token_ttl.min(MAX_TOKEN_TTL))
            .unwrap_or(chrono::Duration::zero())
    }

    /// Effective page size: default when absent, never above the cap
    pub fn page_limit(&self, requested: Option<u64>) -> u64 {
        requested
            .unwrap_or(self.default_page_size)
            .min(self.max_page_size)
    }

    /// Build the credential engine this config describes
    pub fn credential_engine(&self) -> CredentialEngine {
        CredentialEngine::new(
            self.token_secret.clone(),
            self.password_pepper.clone(),
            self.hash_cost,
            chrono::Duration::from_std(self.token_leeway).unwrap_or(chrono::Duration::zero()),
        )
    }
}

impl std::fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("token_leeway", &self.token_leeway)
            .field("hash_cost", &self.hash_cost)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("default_page_size", &self.default_page_size)
            .field("max_page_size", &self.max_page_size)
            .finish()
    }
}
