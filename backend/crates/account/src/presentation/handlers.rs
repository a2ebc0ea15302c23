//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::{
    AccountConfig, AdminUseCase, Clock, ProfileUseCase, RegisterUseCase, SessionUseCase,
    SignInUseCase, SystemClock,
};
use crate::domain::policy::{ADMIN_ROLES, require_role};
use crate::domain::repository::AccountRepository;
use crate::domain::services::CredentialEngine;
use crate::domain::value_object::AccountId;
use crate::error::{AccountError, AccountResult};
use crate::presentation::dto::{
    AccountResponse, ChangePasswordRequest, ListAccountsQuery, LoginRequest, LoginResponse,
    MessageResponse, ProfileResponse, ProfileUpdateRequest, RegisterRequest,
};
use crate::presentation::middleware::CurrentAccount;

/// Shared state for account handlers
pub struct AccountAppState<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountConfig>,
    pub credentials: Arc<CredentialEngine>,
    pub clock: Arc<dyn Clock>,
}

impl<R> AccountAppState<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    /// State on the system clock
    pub fn new(repo: R, config: AccountConfig) -> Self {
        Self::with_clock(repo, config, Arc::new(SystemClock))
    }

    pub fn with_clock(repo: R, config: AccountConfig, clock: Arc<dyn Clock>) -> Self {
        let credentials = Arc::new(config.credential_engine());
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            credentials,
            clock,
        }
    }
}

impl<R> Clone for AccountAppState<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
            credentials: Arc::clone(&self.credentials),
            clock: Arc::clone(&self.clock),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/v1/auth/register
pub async fn register<R>(
    State(state): State<AccountAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AccountResult<(StatusCode, Json<AccountResponse>)>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let input = req.validate()?;

    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.credentials.clone(),
        state.clock.clone(),
    );
    let account = use_case.execute(input).await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(&account))))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/v1/auth/login
pub async fn login<R>(
    State(state): State<AccountAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AccountResult<Json<LoginResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let sign_in = SignInUseCase::new(state.repo.clone(), state.credentials.clone());
    let account = sign_in.execute(req.into()).await?;

    let session = SessionUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.credentials.clone(),
        state.clock.clone(),
    );
    let issued = session.issue(&account)?;

    Ok(Json(LoginResponse {
        access_token: issued.token,
        token_type: "bearer",
        expires_at: issued.expires_at,
        user: AccountResponse::from(&account),
    }))
}

// ============================================================================
// Self Service (requires session)
// ============================================================================

/// GET /api/v1/auth/me
pub async fn get_me(Extension(CurrentAccount(account)): Extension<CurrentAccount>) -> Json<ProfileResponse> {
    Json(ProfileResponse::from(&account))
}

/// PUT /api/v1/auth/me
pub async fn update_me<R>(
    State(state): State<AccountAppState<R>>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    Json(req): Json<ProfileUpdateRequest>,
) -> AccountResult<Json<ProfileResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let patch = req.validate()?;

    let use_case = ProfileUseCase::new(
        state.repo.clone(),
        state.credentials.clone(),
        state.clock.clone(),
    );
    let updated = use_case.update_profile(&account.account_id, patch).await?;

    Ok(Json(ProfileResponse::from(&updated)))
}

/// POST /api/v1/auth/change-password
pub async fn change_password<R>(
    State(state): State<AccountAppState<R>>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    Json(req): Json<ChangePasswordRequest>,
) -> AccountResult<Json<MessageResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let input = req.validate()?;

    let use_case = ProfileUseCase::new(
        state.repo.clone(),
        state.credentials.clone(),
        state.clock.clone(),
    );
    use_case.change_password(&account.account_id, input).await?;

    Ok(Json(MessageResponse {
        message: "Password changed successfully",
    }))
}

// ============================================================================
// Admin (requires session + super_admin)
// ============================================================================

/// GET /api/v1/auth/users
pub async fn list_accounts<R>(
    State(state): State<AccountAppState<R>>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    Query(query): Query<ListAccountsQuery>,
) -> AccountResult<Json<Vec<AccountResponse>>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    require_role(account, ADMIN_ROLES)?;

    let accounts = admin_use_case(&state)
        .list_accounts(query.skip, query.limit)
        .await?;

    Ok(Json(accounts.iter().map(AccountResponse::from).collect()))
}

/// GET /api/v1/auth/users/{id}
pub async fn get_account<R>(
    State(state): State<AccountAppState<R>>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    Path(id): Path<String>,
) -> AccountResult<Json<ProfileResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    require_role(account, ADMIN_ROLES)?;

    let target = admin_use_case(&state)
        .get_account(&parse_account_id(&id)?)
        .await?;

    Ok(Json(ProfileResponse::from(&target)))
}

/// PATCH /api/v1/auth/users/{id}/toggle-active
pub async fn toggle_active<R>(
    State(state): State<AccountAppState<R>>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    Path(id): Path<String>,
) -> AccountResult<Json<AccountResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let admin = require_role(account, ADMIN_ROLES)?;

    let target = admin_use_case(&state)
        .toggle_active(&parse_account_id(&id)?)
        .await?;

    tracing::info!(
        admin_id = %admin.account_id,
        account_id = %target.account_id,
        is_active = target.is_active,
        "Admin toggled account"
    );

    Ok(Json(AccountResponse::from(&target)))
}

fn admin_use_case<R>(state: &AccountAppState<R>) -> AdminUseCase<R>
where
    R: AccountRepository + Send + Sync + 'static,
{
    AdminUseCase::new(state.repo.clone(), state.config.clone(), state.clock.clone())
}

/// A path id that is not a UUID cannot name an account
fn parse_account_id(raw: &str) -> AccountResult<AccountId> {
    raw.parse().map_err(|_| AccountError::AccountNotFound)
}
