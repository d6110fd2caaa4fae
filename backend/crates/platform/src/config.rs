//! Application Configuration
//!
//! Settings read from the process environment (optionally seeded from a
//! `.env` file by the binary). Values are parsed once into an explicit
//! [`AppConfig`] that is passed to whatever needs it.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::cipher::{CipherError, DataCipher};
use crate::file::UploadPolicy;
use crate::lockout::{LockoutPolicy, MAX_LOCKOUT_SECS};

/// Variables that must be present
pub const REQUIRED_VARS: &[&str] = &["SUPABASE_URL", "SUPABASE_ANON_KEY"];

const DEFAULT_APP_NAME: &str = "DDCursor";
const DEFAULT_MAX_FILE_SIZE: u64 = 10_485_760;
const DEFAULT_ALLOWED_FILE_TYPES: &str = "pdf,doc,docx,txt,md";
const DEFAULT_MAX_LOGIN_ATTEMPTS: u32 = 5;
const DEFAULT_LOCKOUT_SECS: u64 = 15 * 60;
const DEFAULT_SESSION_SECS: u64 = 3600;
const DEFAULT_STORAGE_PATH: &str = ".ddcursor/storage.json";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<String>),

    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Configuration value that must not show up in logs
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}

/// Hosted platform connection settings
#[derive(Debug, Clone)]
pub struct SupabaseSettings {
    pub url: String,
    pub anon_key: Secret,
}

/// Security settings
#[derive(Debug, Clone)]
pub struct SecuritySettings {
    pub lockout: LockoutPolicy,
    pub session_duration: Duration,
    /// Key material for [`DataCipher`]; absent disables encryption
    pub encryption_key: Option<Secret>,
}

/// Full application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_name: String,
    pub supabase: SupabaseSettings,
    pub upload: UploadPolicy,
    pub security: SecuritySettings,
    /// File backing durable client storage
    pub storage_path: PathBuf,
    /// Default tracing filter directive
    pub log_level: String,
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary lookup function
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|var| get(*var).is_none())
            .map(String::from)
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let url = get("SUPABASE_URL").unwrap_or_default();
        let anon_key = get("SUPABASE_ANON_KEY").unwrap_or_default();

        let max_file_size = parse_or(&get, "MAX_FILE_SIZE", DEFAULT_MAX_FILE_SIZE)?;
        let allowed_types = get("ALLOWED_FILE_TYPES")
            .unwrap_or_else(|| DEFAULT_ALLOWED_FILE_TYPES.to_string())
            .split(',')
            .map(String::from)
            .collect();

        let max_attempts = parse_or(&get, "MAX_LOGIN_ATTEMPTS", DEFAULT_MAX_LOGIN_ATTEMPTS)?;
        if max_attempts == 0 {
            return Err(ConfigError::Invalid {
                var: "MAX_LOGIN_ATTEMPTS",
                value: "0".to_string(),
            });
        }
        let lockout_secs = parse_or(&get, "LOCKOUT_DURATION", DEFAULT_LOCKOUT_SECS)?;
        if lockout_secs > MAX_LOCKOUT_SECS {
            return Err(ConfigError::Invalid {
                var: "LOCKOUT_DURATION",
                value: lockout_secs.to_string(),
            });
        }
        let session_secs = parse_or(&get, "SESSION_DURATION", DEFAULT_SESSION_SECS)?;

        Ok(Self {
            app_name: get("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            supabase: SupabaseSettings {
                url: url.trim_end_matches('/').to_string(),
                anon_key: Secret::new(anon_key),
            },
            upload: UploadPolicy::new(allowed_types, max_file_size),
            security: SecuritySettings {
                lockout: LockoutPolicy::new(max_attempts, lockout_secs),
                session_duration: Duration::from_secs(session_secs),
                encryption_key: get("ENCRYPTION_KEY").map(Secret::new),
            },
            storage_path: get("STORAGE_PATH")
                .unwrap_or_else(|| DEFAULT_STORAGE_PATH.to_string())
                .into(),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }

    /// Build the data cipher from the configured key
    pub fn cipher(&self) -> Result<DataCipher, CipherError> {
        let key = self
            .security
            .encryption_key
            .as_ref()
            .ok_or(CipherError::MissingKey)?;
        DataCipher::new(key.expose())
    }
}

fn parse_or<G, T>(get: &G, var: &'static str, default: T) -> Result<T, ConfigError>
where
    G: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match get(var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("SUPABASE_URL", "https://project.supabase.co/"),
        ("SUPABASE_ANON_KEY", "anon"),
    ];

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(REQUIRED)).unwrap();

        assert_eq!(config.app_name, "DDCursor");
        assert_eq!(config.supabase.url, "https://project.supabase.co");
        assert_eq!(config.upload.max_file_size, 10_485_760);
        assert_eq!(config.upload.allowed_types, vec!["pdf", "doc", "docx", "txt", "md"]);
        assert_eq!(config.security.lockout, LockoutPolicy::default());
        assert_eq!(config.security.session_duration, Duration::from_secs(3600));
        assert!(config.security.encryption_key.is_none());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_missing_required() {
        let err = AppConfig::from_lookup(lookup(&[("SUPABASE_URL", "")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing(vec![
                "SUPABASE_URL".to_string(),
                "SUPABASE_ANON_KEY".to_string()
            ])
        );
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: SUPABASE_URL, SUPABASE_ANON_KEY"
        );
    }

    #[test]
    fn test_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("MAX_LOGIN_ATTEMPTS", "3"),
            ("LOCKOUT_DURATION", "300"),
            ("ALLOWED_FILE_TYPES", "PDF, png"),
            ("LOG_LEVEL", "debug"),
        ]);
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();

        assert_eq!(config.security.lockout, LockoutPolicy::new(3, 300));
        assert_eq!(config.upload.allowed_types, vec!["pdf", "png"]);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_number() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("MAX_FILE_SIZE", "ten"));
        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "MAX_FILE_SIZE", .. }));

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("MAX_LOGIN_ATTEMPTS", "0"));
        assert!(AppConfig::from_lookup(lookup(&pairs)).is_err());
    }

    #[test]
    fn test_lockout_duration_out_of_range() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("LOCKOUT_DURATION", "100000000000000"));
        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "LOCKOUT_DURATION",
                value: "100000000000000".to_string()
            }
        );

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("LOCKOUT_DURATION", "31536000"));
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.security.lockout.duration_minutes(), 525_600);
    }

    #[test]
    fn test_cipher_requires_key() {
        let config = AppConfig::from_lookup(lookup(REQUIRED)).unwrap();
        assert_eq!(config.cipher().unwrap_err(), CipherError::MissingKey);

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("ENCRYPTION_KEY", "k3y"));
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        let cipher = config.cipher().unwrap();
        assert_eq!(cipher.decrypt(&cipher.encrypt("x").unwrap()).unwrap(), "x");
    }

    #[test]
    fn test_secrets_redacted() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("ENCRYPTION_KEY", "super-secret-key"));
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("REDACTED"));
    }
}
