//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Secure random bytes
//! - Password hashing (Argon2id with tunable cost)
//! - HS256 JSON Web Tokens

pub mod crypto;
pub mod password;
pub mod token;
