//! Hosted Auth Platform Client
//!
//! Password sign-in against a Supabase project's auth endpoint:
//! `POST {url}/auth/v1/token?grant_type=password` with the anon key in the
//! `apikey` header and `{email, password}` as JSON.

use std::time::Duration;

use kernel::error::app_error::{AppError, AppResult};
use platform::config::{Secret, SupabaseSettings};
use serde::{Deserialize, Serialize};

use crate::domain::entity::auth_session::SessionInfo;
use crate::domain::repository::{Authenticator, AuthenticatorError};
use crate::domain::value_object::{access_token::AccessToken, email::Email, user_id::UserId};

const TOKEN_PATH: &str = "/auth/v1/token?grant_type=password";

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: AccessToken,
    #[serde(default)]
    expires_in: u64,
    user: TokenUser,
}

#[derive(Deserialize)]
struct TokenUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Error body; field names differ between platform versions
#[derive(Deserialize)]
struct ErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
    }
}

/// Supabase password authenticator
#[derive(Debug, Clone)]
pub struct SupabaseAuthenticator {
    client: reqwest::Client,
    endpoint: String,
    anon_key: Secret,
}

impl SupabaseAuthenticator {
    pub fn new(settings: &SupabaseSettings) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ddcursor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::configuration("Failed to build HTTP client").with_source(e))?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", settings.url.trim_end_matches('/'), TOKEN_PATH),
            anon_key: settings.anon_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Authenticator for SupabaseAuthenticator {
    async fn authenticate(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<SessionInfo, AuthenticatorError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", self.anon_key.expose())
            .json(&PasswordGrant {
                email: identifier,
                password,
            })
            .send()
            .await
            .map_err(|e| AuthenticatorError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthenticatorError::Transport(e.to_string()))?;

        if status.is_success() {
            return parse_session(&body);
        }

        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| status.to_string());

        Err(classify_failure(status.as_u16(), message))
    }
}

/// Statuses the platform uses for rejected credentials
fn classify_failure(status: u16, message: String) -> AuthenticatorError {
    match status {
        400 | 401 | 422 => AuthenticatorError::InvalidCredentials(message),
        _ => AuthenticatorError::Transport(format!("HTTP {}: {}", status, message)),
    }
}

fn parse_session(body: &str) -> Result<SessionInfo, AuthenticatorError> {
    let token: TokenResponse = serde_json::from_str(body)
        .map_err(|e| AuthenticatorError::Transport(format!("Malformed token response: {}", e)))?;

    let user_id = UserId::parse_str(&token.user.id)
        .map_err(|e| AuthenticatorError::Transport(format!("Malformed user id: {}", e)))?;

    let session = SessionInfo::new(
        user_id,
        token.access_token,
        Duration::from_secs(token.expires_in),
    );

    Ok(match token.user.email.map(Email::new) {
        Some(Ok(email)) => session.with_email(email),
        _ => session,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(url: &str) -> SupabaseSettings {
        SupabaseSettings {
            url: url.to_string(),
            anon_key: Secret::new("anon"),
        }
    }

    #[test]
    fn test_endpoint() {
        let auth = SupabaseAuthenticator::new(&settings("https://project.supabase.co/")).unwrap();
        assert_eq!(
            auth.endpoint(),
            "https://project.supabase.co/auth/v1/token?grant_type=password"
        );
    }

    #[test]
    fn test_parse_session() {
        let body = r#"{
            "access_token": "jwt-token",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh",
            "user": { "id": "0b7c5c1e-3f0a-4c7e-9a51-2f1f1a9d8e10", "email": "Alice@Example.com" }
        }"#;

        let session = parse_session(body).unwrap();
        assert_eq!(
            session.user_id.to_string(),
            "0b7c5c1e-3f0a-4c7e-9a51-2f1f1a9d8e10"
        );
        assert_eq!(session.email.unwrap().as_str(), "alice@example.com");
        assert_eq!(session.access_token.expose(), "jwt-token");
        assert_eq!(session.expires_in, Duration::from_secs(3600));
    }

    #[test]
    fn test_malformed_session_is_transport() {
        assert!(matches!(
            parse_session("{}"),
            Err(AuthenticatorError::Transport(_))
        ));
        assert!(matches!(
            parse_session(r#"{"access_token":"t","user":{"id":"nope"}}"#),
            Err(AuthenticatorError::Transport(_))
        ));
    }

    #[test]
    fn test_classify_failure() {
        assert_eq!(
            classify_failure(400, "Invalid login credentials".into()),
            AuthenticatorError::InvalidCredentials("Invalid login credentials".into())
        );
        assert!(matches!(
            classify_failure(422, String::new()),
            AuthenticatorError::InvalidCredentials(_)
        ));
        assert!(matches!(
            classify_failure(503, "down".into()),
            AuthenticatorError::Transport(_)
        ));
    }

    #[test]
    fn test_error_body_message() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        )
        .unwrap();
        assert_eq!(
            body.into_message().as_deref(),
            Some("Invalid login credentials")
        );

        let body: ErrorBody =
            serde_json::from_str(r#"{"code":400,"msg":"Email not confirmed"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Email not confirmed"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport() {
        let auth = SupabaseAuthenticator::new(&settings("http://127.0.0.1:1")).unwrap();
        let err = auth
            .authenticate("user@example.com", "Passw0rd!")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthenticatorError::Transport(_)));
    }
}
