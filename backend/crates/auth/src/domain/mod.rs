//! Domain Layer
//!
//! Contains entities, value objects, and collaborator traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{auth_session::SessionInfo, lockout_state::LockoutState};
pub use repository::{Authenticator, AuthenticatorError, ClientStorage, Clock};
