//! API DTOs (Data Transfer Objects)
//!
//! Request bodies are turned into validated value objects here, before any
//! use case runs. No response type carries the password hash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{ChangePasswordInput, RegisterInput, SignInInput};
use crate::domain::entity::account::{Account, ProfilePatch};
use crate::domain::value_object::{
    account_password::RawPassword, account_role::AccountRole, email::Email,
    full_name::FullName, user_name::UserName,
};
use crate::error::AccountResult;

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub password: String,
    #[serde(default)]
    pub role: AccountRole,
}

impl RegisterRequest {
    pub fn validate(self) -> AccountResult<RegisterInput> {
        Ok(RegisterInput {
            email: Email::new(self.email)?,
            user_name: UserName::new(&self.username)?,
            full_name: FullName::new(&self.full_name)?,
            password: RawPassword::new(self.password)?,
            role: self.role,
        })
    }
}

// ============================================================================
// Login
// ============================================================================

/// Login request
///
/// Not validated beyond presence: malformed emails fail as bad credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<LoginRequest> for SignInInput {
    fn from(req: LoginRequest) -> Self {
        SignInInput {
            email: req.email,
            password: req.password,
        }
    }
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always `"bearer"`
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
    pub user: AccountResponse,
}

// ============================================================================
// Profile
// ============================================================================

/// Profile update request; absent fields are left unchanged
///
/// `"avatar_url": null` is an explicit request to clear the avatar.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdateRequest {
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub avatar_url: Option<Option<String>>,
}

/// Keeps a present `null` apart from a missing field (which `default` covers)
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ProfileUpdateRequest {
    pub fn validate(self) -> AccountResult<ProfilePatch> {
        let full_name = self.full_name.map(FullName::new).transpose()?;

        Ok(ProfilePatch {
            full_name,
            avatar_url: self.avatar_url,
        })
    }
}

/// Change password request
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

impl ChangePasswordRequest {
    pub fn validate(self) -> AccountResult<ChangePasswordInput> {
        Ok(ChangePasswordInput {
            new_password: RawPassword::new(self.new_password)?,
            current_password: self.old_password,
        })
    }
}

/// Generic acknowledgement body
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ============================================================================
// Admin
// ============================================================================

/// Query string of `GET /users`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAccountsQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

// ============================================================================
// Account Representations
// ============================================================================

/// Public view of an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub role: AccountRole,
    pub is_active: bool,
    pub avatar_url: Option<String>,
    pub points: i32,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.account_id.into_uuid(),
            email: account.email.as_str().to_string(),
            username: account.user_name.original().to_string(),
            full_name: account.full_name.as_str().to_string(),
            role: account.role,
            is_active: account.is_active,
            avatar_url: account.avatar_url.clone(),
            points: account.points,
            created_at: account.created_at,
        }
    }
}

/// Account view including the last update time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub account: AccountResponse,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for ProfileResponse {
    fn from(account: &Account) -> Self {
        Self {
            account: AccountResponse::from(account),
            updated_at: account.updated_at,
        }
    }
}
