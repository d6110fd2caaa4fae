//! Shared Kernel - Cross-crate minimal core
//!
//! The small vocabulary every DDCursor crate agrees on:
//! - Unified error type and result alias
//! - Typed identifiers for platform-owned records
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across crates.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
