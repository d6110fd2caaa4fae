//! Auth Session Entity
//!
//! Session handed back by the authenticator after a successful sign-in.

use std::time::Duration;

use crate::domain::value_object::{access_token::AccessToken, email::Email, user_id::UserId};

/// Authenticated session
#[derive(Debug, Clone)]
pub struct SessionInfo {
    /// Hosted platform user id
    pub user_id: UserId,
    /// Email the platform has on record, when it reports one
    pub email: Option<Email>,
    /// Bearer token for subsequent requests
    pub access_token: AccessToken,
    /// Token lifetime
    pub expires_in: Duration,
}

impl SessionInfo {
    pub fn new(user_id: UserId, access_token: AccessToken, expires_in: Duration) -> Self {
        Self {
            user_id,
            email: None,
            access_token,
            expires_in,
        }
    }

    pub fn with_email(mut self, email: Email) -> Self {
        self.email = Some(email);
        self
    }
}
