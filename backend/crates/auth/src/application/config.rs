//! Application Configuration
//!
//! Configuration for the login guard.

use platform::config::AppConfig;
use platform::lockout::LockoutPolicy;

/// Storage key for the persisted lockout timestamp
pub const LOCKOUT_STORAGE_KEY: &str = "loginLockout";

/// Storage key for the session correlation id
pub const SESSION_ID_STORAGE_KEY: &str = "sessionId";

/// Login guard configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    pub lockout: LockoutPolicy,
    pub lockout_key: String,
    pub session_id_key: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            lockout: LockoutPolicy::default(),
            lockout_key: LOCKOUT_STORAGE_KEY.to_string(),
            session_id_key: SESSION_ID_STORAGE_KEY.to_string(),
        }
    }
}

impl GuardConfig {
    pub fn with_lockout(lockout: LockoutPolicy) -> Self {
        Self {
            lockout,
            ..Default::default()
        }
    }
}

impl From<&AppConfig> for GuardConfig {
    fn from(config: &AppConfig) -> Self {
        Self::with_lockout(config.security.lockout.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys() {
        let config = GuardConfig::default();
        assert_eq!(config.lockout_key, "loginLockout");
        assert_eq!(config.session_id_key, "sessionId");
        assert_eq!(config.lockout.max_attempts, 5);
    }

    #[test]
    fn test_from_app_config() {
        let app = AppConfig::from_lookup(|var| match var {
            "SUPABASE_URL" => Some("https://project.supabase.co".to_string()),
            "SUPABASE_ANON_KEY" => Some("anon".to_string()),
            "MAX_LOGIN_ATTEMPTS" => Some("3".to_string()),
            _ => None,
        })
        .unwrap();

        let config = GuardConfig::from(&app);
        assert_eq!(config.lockout.max_attempts, 3);
        assert_eq!(config.lockout_key, "loginLockout");
    }
}
