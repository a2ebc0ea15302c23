//! Account Router

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::application::config::AccountConfig;
use crate::domain::repository::AccountRepository;
use crate::infra::postgres::PgAccountRepository;
use crate::presentation::handlers::{self, AccountAppState};
use crate::presentation::middleware::require_session;

/// Create the Account router with PostgreSQL repository
pub fn account_router(repo: PgAccountRepository, config: AccountConfig) -> Router {
    account_router_generic(repo, config)
}

/// Create a generic Account router for any repository implementation
pub fn account_router_generic<R>(repo: R, config: AccountConfig) -> Router
where
    R: AccountRepository + Send + Sync + 'static,
{
    account_router_with_state(AccountAppState::new(repo, config))
}

/// Router over prepared state (custom clock, shared repository)
pub fn account_router_with_state<R>(state: AccountAppState<R>) -> Router
where
    R: AccountRepository + Send + Sync + 'static,
{
    let protected = Router::new()
        .route(
            "/me",
            get(handlers::get_me).put(handlers::update_me::<R>),
        )
        .route("/change-password", post(handlers::change_password::<R>))
        .route("/users", get(handlers::list_accounts::<R>))
        .route("/users/{id}", get(handlers::get_account::<R>))
        .route(
            "/users/{id}/toggle-active",
            patch(handlers::toggle_active::<R>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session::<R>,
        ));

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .merge(protected)
        .with_state(state)
}
