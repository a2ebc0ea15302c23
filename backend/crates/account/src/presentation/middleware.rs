//! Session Middleware
//!
//! Resolves the bearer token on protected routes and hands the signed-in
//! account to handlers through request extensions.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::application::SessionUseCase;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::error::{AccountError, AccountResult};
use crate::presentation::handlers::AccountAppState;

/// Account resolved from the bearer token of the current request
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

/// Middleware that requires a valid bearer token
pub async fn require_session<R>(
    State(state): State<AccountAppState<R>>,
    mut req: Request,
    next: Next,
) -> AccountResult<Response>
where
    R: AccountRepository + Send + Sync + 'static,
{
    let token = extract_bearer_token(req.headers()).ok_or(AccountError::SessionInvalid)?;

    let use_case = SessionUseCase::new(
        Arc::clone(&state.repo),
        Arc::clone(&state.config),
        Arc::clone(&state.credentials),
        Arc::clone(&state.clock),
    );
    let account = use_case.resolve(token).await?;

    req.extensions_mut().insert(CurrentAccount(account));

    Ok(next.run(req).await)
}

/// Token part of `Authorization: Bearer <token>`
///
/// The scheme is matched case-insensitively.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
