//! Domain Layer
//!
//! Contains entities, value objects, repository traits, the authorization
//! policy and the credential engine.

pub mod entity;
pub mod policy;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::account::Account;
pub use policy::{Access, authorize, require_role};
pub use repository::AccountRepository;
pub use services::CredentialEngine;
