//! Login Lockout Policy
//!
//! Fixed-window throttle applied after repeated failed sign-ins. This is a
//! client-side UX throttle: anything stored on the client can be cleared by
//! the user, so it is not a substitute for a server-enforced rate limit.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// Longest accepted lockout window (one year)
pub const MAX_LOCKOUT_SECS: u64 = 365 * 24 * 60 * 60;

/// Lockout policy configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockoutPolicy {
    /// Failed attempts that trigger a lockout
    pub max_attempts: u32,
    /// How long submissions are rejected once locked
    pub duration: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            duration: Duration::from_secs(15 * 60),
        }
    }
}

impl LockoutPolicy {
    pub fn new(max_attempts: u32, duration_secs: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            duration: Duration::from_secs(duration_secs),
        }
    }

    pub fn duration_ms(&self) -> i64 {
        i64::try_from(self.duration.as_millis()).unwrap_or(i64::MAX)
    }

    /// Lockout length in whole minutes, rounded up
    pub fn duration_minutes(&self) -> i64 {
        ceil_minutes(self.duration_ms())
    }

    /// Whether `attempts` failures reach the threshold
    pub fn is_exhausted(&self, attempts: u32) -> bool {
        attempts >= self.max_attempts
    }

    /// Attempts left before a lockout
    pub fn remaining_attempts(&self, attempts: u32) -> u32 {
        self.max_attempts.saturating_sub(attempts)
    }

    /// End of a lockout starting at `now`, saturating at the latest
    /// representable instant
    pub fn lock_until(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        TimeDelta::try_milliseconds(self.duration_ms())
            .and_then(|window| now.checked_add_signed(window))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Minutes left until `until`, rounded up; zero once it has passed
pub fn remaining_minutes(until: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let remaining_ms = (until - now).num_milliseconds();
    if remaining_ms <= 0 {
        return 0;
    }
    ceil_minutes(remaining_ms)
}

fn ceil_minutes(ms: i64) -> i64 {
    ms / 60_000 + i64::from(ms % 60_000 != 0)
}
