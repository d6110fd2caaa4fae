//! Auth (Authentication) Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Lockout state, session info, collaborator traits
//! - `application/` - Login guard and its configuration
//! - `infra/` - Hosted authenticator, client storage and clock implementations
//!
//! ## Features
//! - Email + password sign-in delegated to the hosted auth platform
//! - Local password policy check before any network call
//! - Lockout after repeated failures, persisted in client storage
//! - Busy flag against double submission
//!
//! ## Security Model
//! The lockout lives on the client and is cleared by wiping client storage.
//! It throttles honest users; the hosted platform must enforce its own limits.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;


// Re-exports for convenience
pub use application::config::GuardConfig;
pub use application::login::{LoginGuard, LoginInput, LoginOutput};
pub use error::{LoginError, LoginResult};
pub use infra::{
    clock::SystemClock, file_storage::FileStorage, memory::MemoryStorage,
    supabase::SupabaseAuthenticator,
};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}
