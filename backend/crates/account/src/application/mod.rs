//! Application Layer
//!
//! Use cases and application services.

pub mod admin;
pub mod clock;
pub mod config;
mod credentials;
pub mod profile;
pub mod register;
pub mod session;
pub mod sign_in;

// Re-exports
pub use admin::AdminUseCase;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AccountConfig;
pub use profile::{ChangePasswordInput, ProfileUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use session::SessionUseCase;
pub use sign_in::{SignInInput, SignInUseCase};
