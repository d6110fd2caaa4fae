//! Auth Error Types
//!
//! This module provides login-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use chrono::{DateTime, Utc};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordPolicyError;
use thiserror::Error;

/// Login-specific result type alias
pub type LoginResult<T> = Result<T, LoginError>;

/// Outcome of a rejected sign-in submission
///
/// None of these is fatal: the guard stays usable after reporting any of them.
#[derive(Debug, Error)]
pub enum LoginError {
    /// Another submission is still in flight
    #[error("A sign-in request is already in progress")]
    Busy,

    /// Rejected locally because a lockout window is active
    #[error("Login is locked out for another {remaining_minutes} minute(s)")]
    LockedOut { remaining_minutes: i64 },

    /// Password failed the local format check (counted as an attempt)
    #[error("Invalid password format: {reason}")]
    InvalidFormat {
        reason: PasswordPolicyError,
        remaining_attempts: u32,
    },

    /// Authenticator rejected the credentials
    #[error("Invalid credentials ({remaining_attempts} attempt(s) remaining)")]
    AuthenticationFailed { remaining_attempts: u32 },

    /// This failure reached the threshold and started a lockout
    #[error("Too many failed attempts, locked until {locked_until}")]
    TooManyAttempts {
        locked_until: DateTime<Utc>,
        minutes: i64,
    },

    /// The authenticator could not be reached (not counted)
    #[error("Authentication service unavailable: {0}")]
    Transport(String),

    /// Client storage failed
    #[error("Client storage error: {0}")]
    Storage(#[from] AppError),
}

impl LoginError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoginError::Busy => ErrorKind::Busy,
            LoginError::LockedOut { .. } | LoginError::TooManyAttempts { .. } => ErrorKind::Locked,
            LoginError::InvalidFormat { .. } => ErrorKind::InvalidInput,
            LoginError::AuthenticationFailed { .. } => ErrorKind::Unauthorized,
            LoginError::Transport(_) => ErrorKind::Unavailable,
            LoginError::Storage(e) => e.kind(),
        }
    }

    /// Whether this failure was counted toward the lockout threshold
    pub fn is_counted(&self) -> bool {
        matches!(
            self,
            LoginError::InvalidFormat { .. }
                | LoginError::AuthenticationFailed { .. }
                | LoginError::TooManyAttempts { .. }
        )
    }

    /// Text shown to the person signing in
    pub fn user_message(&self) -> String {
        match self {
            LoginError::Busy => "Signing in, please wait.".to_string(),
            LoginError::LockedOut { remaining_minutes } => format!(
                "Too many login attempts. Please try again in {} minutes.",
                remaining_minutes
            ),
            LoginError::InvalidFormat {
                remaining_attempts, ..
            }
            | LoginError::AuthenticationFailed { remaining_attempts } => format!(
                "Failed to sign in. {} attempts remaining.",
                remaining_attempts
            ),
            LoginError::TooManyAttempts { minutes, .. } => format!(
                "Too many failed attempts. Account locked for {} minutes.",
                minutes
            ),
            LoginError::Transport(_) => {
                "Failed to sign in. Please check your connection and try again.".to_string()
            }
            LoginError::Storage(_) => "Failed to sign in. Please try again.".to_string(),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let app = AppError::new(self.kind(), self.user_message());
        match self {
            LoginError::LockedOut { remaining_minutes } => {
                app.with_action(format!("Wait {} minutes", remaining_minutes))
            }
            LoginError::TooManyAttempts { minutes, .. } => {
                app.with_action(format!("Wait {} minutes", minutes))
            }
            LoginError::Transport(_) => app.with_action("Check your connection"),
            _ => app,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            LoginError::Storage(e) => {
                tracing::error!(error = %e, "Client storage error during sign-in");
            }
            LoginError::Transport(msg) => {
                tracing::warn!(message = %msg, "Authentication service unavailable");
            }
            LoginError::TooManyAttempts { locked_until, .. } => {
                tracing::warn!(%locked_until, "Login locked out after repeated failures");
            }
            LoginError::LockedOut { remaining_minutes } => {
                tracing::warn!(remaining_minutes, "Login attempt during lockout");
            }
            LoginError::AuthenticationFailed { remaining_attempts } => {
                tracing::warn!(remaining_attempts, "Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Login rejected");
            }
        }
    }
}

impl From<LoginError> for AppError {
    fn from(err: LoginError) -> Self {
        let app = err.to_app_error();
        match err {
            LoginError::Storage(source) => app.with_source(source),
            _ => app,
        }
    }
}
