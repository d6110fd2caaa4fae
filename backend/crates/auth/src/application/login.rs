//! Login Use Case
//!
//! Guards sign-in submissions: rejects while a lockout is active, checks the
//! password format locally, delegates to the authenticator and counts
//! failures toward a lockout.
//!
//! ## Flow
//! 1. Reject if a submission is already in flight
//! 2. Reject if the persisted lockout is still running (expired ones are removed)
//! 3. Check the password policy; a violation counts as a failed attempt
//! 4. Persist a fresh session correlation id
//! 5. Authenticate; rejected credentials count, transport failures do not
//! 6. On success reset the counter and clear the lockout

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use chrono::{DateTime, Utc};
use platform::crypto::generate_session_id_at;
use platform::password::ClearTextPassword;

use crate::application::config::GuardConfig;
use crate::domain::entity::{auth_session::SessionInfo, lockout_state::LockoutState};
use crate::domain::repository::{Authenticator, AuthenticatorError, ClientStorage, Clock};
use crate::error::{LoginError, LoginResult};

/// Login input
#[derive(Debug)]
pub struct LoginInput {
    /// Email address, passed to the authenticator as entered
    pub identifier: String,
    /// Password
    pub password: ClearTextPassword,
}

impl LoginInput {
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: ClearTextPassword::new(password.into()),
        }
    }
}

/// Login output
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub session: SessionInfo,
    /// Correlation id persisted for this attempt
    pub correlation_id: String,
}

/// Result of counting one failure
enum Tally {
    Remaining(u32),
    Locked(LockoutState),
}

/// Holds the busy flag for the duration of a submission
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Login guard
///
/// The failure counter is kept in memory only; a restart forgets progress
/// toward a lockout but not an active lockout. Only a success resets it, so
/// the first failure after a lockout expires locks again.
pub struct LoginGuard<A, S, C>
where
    A: Authenticator,
    S: ClientStorage,
    C: Clock,
{
    authenticator: Arc<A>,
    storage: Arc<S>,
    clock: Arc<C>,
    config: Arc<GuardConfig>,
    attempts: AtomicU32,
    busy: AtomicBool,
}

impl<A, S, C> LoginGuard<A, S, C>
where
    A: Authenticator,
    S: ClientStorage,
    C: Clock,
{
    pub fn new(
        authenticator: Arc<A>,
        storage: Arc<S>,
        clock: Arc<C>,
        config: Arc<GuardConfig>,
    ) -> Self {
        Self {
            authenticator,
            storage,
            clock,
            config,
            attempts: AtomicU32::new(0),
            busy: AtomicBool::new(false),
        }
    }

    /// Failed attempts since the last success
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::Acquire)
    }

    /// Whether a submission is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Load the persisted lockout, dropping it if it has expired
    ///
    /// Call once at startup to pick up a lockout left by a previous run.
    pub async fn restore(&self) -> LoginResult<Option<LockoutState>> {
        self.active_lockout(self.clock.now()).await
    }

    pub async fn is_locked_out(&self) -> LoginResult<bool> {
        Ok(self.restore().await?.is_some())
    }

    pub async fn submit(&self, input: LoginInput) -> LoginResult<LoginOutput> {
        let _in_flight = InFlight::acquire(&self.busy).ok_or(LoginError::Busy)?;

        let result = self.run(input).await;
        if let Err(e) = &result {
            e.log();
        }
        result
    }

    async fn run(&self, input: LoginInput) -> LoginResult<LoginOutput> {
        let now = self.clock.now();

        if let Some(state) = self.active_lockout(now).await? {
            return Err(LoginError::LockedOut {
                remaining_minutes: state.remaining_minutes(now),
            });
        }

        if let Err(reason) = input.password.check_policy() {
            return Err(match self.count_failure(now).await? {
                Tally::Remaining(remaining_attempts) => LoginError::InvalidFormat {
                    reason,
                    remaining_attempts,
                },
                Tally::Locked(state) => self.too_many_attempts(state),
            });
        }

        let correlation_id = generate_session_id_at(now);
        self.storage
            .set(&self.config.session_id_key, &correlation_id)
            .await?;

        match self
            .authenticator
            .authenticate(&input.identifier, input.password.expose())
            .await
        {
            Ok(session) => {
                self.attempts.store(0, Ordering::Release);
                self.storage.remove(&self.config.lockout_key).await?;

                tracing::info!(
                    user_id = %session.user_id,
                    correlation_id = %correlation_id,
                    "User signed in"
                );

                Ok(LoginOutput {
                    session,
                    correlation_id,
                })
            }
            Err(AuthenticatorError::InvalidCredentials(reason)) => {
                tracing::debug!(reason = %reason, "Credentials rejected");
                let now = self.clock.now();
                Err(match self.count_failure(now).await? {
                    Tally::Remaining(remaining_attempts) => {
                        LoginError::AuthenticationFailed { remaining_attempts }
                    }
                    Tally::Locked(state) => self.too_many_attempts(state),
                })
            }
            Err(AuthenticatorError::Transport(msg)) => Err(LoginError::Transport(msg)),
        }
    }

    async fn active_lockout(&self, now: DateTime<Utc>) -> LoginResult<Option<LockoutState>> {
        let key = &self.config.lockout_key;
        let Some(raw) = self.storage.get(key).await? else {
            return Ok(None);
        };

        match LockoutState::from_storage(&raw) {
            Some(state) if state.is_active(now) => Ok(Some(state)),
            _ => {
                tracing::debug!(stored = %raw, "Removing expired lockout");
                self.storage.remove(key).await?;
                Ok(None)
            }
        }
    }

    async fn count_failure(&self, now: DateTime<Utc>) -> LoginResult<Tally> {
        let policy = &self.config.lockout;
        let attempts = self.attempts.fetch_add(1, Ordering::AcqRel) + 1;

        if !policy.is_exhausted(attempts) {
            return Ok(Tally::Remaining(policy.remaining_attempts(attempts)));
        }

        let state = LockoutState::begin(now, policy);
        self.storage
            .set(&self.config.lockout_key, &state.to_storage())
            .await?;

        Ok(Tally::Locked(state))
    }

    fn too_many_attempts(&self, state: LockoutState) -> LoginError {
        LoginError::TooManyAttempts {
            locked_until: state.locked_until,
            minutes: self.config.lockout.duration_minutes(),
        }
    }
}
