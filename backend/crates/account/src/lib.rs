//! Account (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository trait, policy, credential engine
//! - `application/` - Use cases, configuration, clock
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration with email, user name, full name and password
//! - Email + password sign in returning a bearer token
//! - Self-service profile and password changes
//! - Role-gated account administration (list, lookup, activate/deactivate)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Stateless HS256 JWTs with expiry, verified against an injected clock
//! - Unknown email and wrong password are reported identically

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

mod tests;

// Re-exports for convenience
pub use application::config::AccountConfig;
pub use error::{AccountError, AccountResult};
pub use infra::{memory::InMemoryAccountRepository, postgres::PgAccountRepository};
pub use presentation::router::{account_router, account_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
