//! Collaborator Traits
//!
//! Interfaces for the hosted authenticator, durable client storage and time.
//! Implementations are in the infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppResult;
use thiserror::Error;

use crate::domain::entity::auth_session::SessionInfo;

/// Authenticator failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthenticatorError {
    /// Credentials were checked and rejected
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The service could not answer (network, 5xx, malformed response)
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Hosted authentication platform
#[trait_variant::make(Authenticator: Send)]
pub trait LocalAuthenticator {
    /// Exchange credentials for a session
    async fn authenticate(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<SessionInfo, AuthenticatorError>;
}

/// Durable client-local key/value storage
#[trait_variant::make(ClientStorage: Send)]
pub trait LocalClientStorage {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Removing a missing key is not an error
    async fn remove(&self, key: &str) -> AppResult<()>;
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
