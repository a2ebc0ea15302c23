//! Signed Tokens
//!
//! HS256 JSON Web Tokens (`header.payload.signature`).
//!
//! This module only signs and authenticates. What the claims mean (subject,
//! expiry, ...) is up to the caller, and so is the clock: `exp` must be
//! present but is not compared against wall time here.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Serialize, de::DeserializeOwned};

/// Token signing and decoding failures
///
/// Callers are expected to collapse all of these into one opaque
/// "invalid token" outcome; the kind exists for logging.
pub type TokenError = jsonwebtoken::errors::Error;

pub use jsonwebtoken::errors::ErrorKind as TokenErrorKind;

/// Claims every token must carry
const REQUIRED_CLAIMS: &[&str] = &["sub", "exp"];

/// Sign `claims` with `key` as an HS256 JWT
pub fn sign<C: Serialize>(claims: &C, key: &[u8]) -> Result<String, TokenError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(key),
    )
}

/// Authenticate `token` with `key` and decode its claims
///
/// Only HS256 is accepted. Expiry is left to the caller.
pub fn verify<C: DeserializeOwned>(token: &str, key: &[u8]) -> Result<C, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(REQUIRED_CLAIMS);

    decode::<C>(token, &DecodingKey::from_secret(key), &validation).map(|data| data.claims)
}
