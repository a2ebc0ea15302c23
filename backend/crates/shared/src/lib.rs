//! Shared Kernel
//!
//! The smallest core of vocabulary shared by every crate:
//! - Unified error type and result alias
//! - Typed ID wrappers
//!
//! Only things that mean the same in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
