//! Value Object Module

pub mod account_password;
pub mod account_role;
pub mod email;
pub mod full_name;
pub mod user_name;

pub use kernel::id::AccountId;
