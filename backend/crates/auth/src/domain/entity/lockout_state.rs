//! Lockout State Entity
//!
//! Persisted end of the current lockout window. Stored in client storage as
//! Unix milliseconds in decimal so it survives restarts.

use chrono::{DateTime, Utc};
use platform::lockout::{LockoutPolicy, remaining_minutes};

/// Active or expired lockout window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutState {
    pub locked_until: DateTime<Utc>,
}

impl LockoutState {
    /// Lockout starting at `now` under `policy`
    pub fn begin(now: DateTime<Utc>, policy: &LockoutPolicy) -> Self {
        Self {
            locked_until: policy.lock_until(now),
        }
    }

    /// Check if the window is still running
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.locked_until
    }

    /// Whole minutes left, rounded up
    pub fn remaining_minutes(&self, now: DateTime<Utc>) -> i64 {
        remaining_minutes(self.locked_until, now)
    }

    /// Parse a stored value; anything unparseable is treated as no lockout
    pub fn from_storage(value: &str) -> Option<Self> {
        let ms = value.trim().parse::<i64>().ok()?;
        DateTime::from_timestamp_millis(ms).map(|locked_until| Self { locked_until })
    }

    pub fn to_storage(&self) -> String {
        self.locked_until.timestamp_millis().to_string()
    }
}
