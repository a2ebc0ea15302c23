//! Account Entity
//!
//! A registered identity with one role. Timestamps come from the caller's
//! clock so that use cases stay deterministic under test.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    AccountId, account_password::AccountPassword, account_role::AccountRole, email::Email,
    full_name::FullName, user_name::UserName,
};

/// Account entity
#[derive(Debug, Clone)]
pub struct Account {
    /// Internal UUID identifier
    pub account_id: AccountId,
    /// Unique, lowercased email
    pub email: Email,
    /// Unique handle (compared by canonical form)
    pub user_name: UserName,
    pub full_name: FullName,
    /// Argon2id PHC string, never exposed through DTOs
    pub password_hash: AccountPassword,
    pub role: AccountRole,
    pub is_active: bool,
    pub avatar_url: Option<String>,
    pub points: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a profile update that were present in the request
///
/// `avatar_url: Some(None)` clears the avatar; `None` leaves it alone.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub full_name: Option<FullName>,
    pub avatar_url: Option<Option<String>>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.avatar_url.is_none()
    }
}

impl Account {
    /// Create a new, active account with zero points
    pub fn new(
        email: Email,
        user_name: UserName,
        full_name: FullName,
        password_hash: AccountPassword,
        role: AccountRole,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            account_id: AccountId::new(),
            email,
            user_name,
            full_name,
            password_hash,
            role,
            is_active: true,
            avatar_url: None,
            points: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply only the fields present in the patch
    pub fn apply_profile(&mut self, patch: ProfilePatch, now: DateTime<Utc>) {
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        if let Some(avatar_url) = patch.avatar_url {
            self.avatar_url = avatar_url;
        }
        self.touch(now);
    }

    pub fn set_password(&mut self, password_hash: AccountPassword, now: DateTime<Utc>) {
        self.password_hash = password_hash;
        self.touch(now);
    }

    /// Flip the active flag, returning the new value
    pub fn toggle_active(&mut self, now: DateTime<Utc>) -> bool {
        self.is_active = !self.is_active;
        self.touch(now);
        self.is_active
    }

    /// Check if account can sign in
    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// `updated_at` never goes behind `created_at`
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }
}
