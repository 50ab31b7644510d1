//! Admin gate: one shared secret, an explicit per-command session.
//!
//! There are no user accounts. A [`Session`] starts as `Guest` and becomes
//! `Admin` only after a successful comparison against the configured secret.
//! Consecutive failures lock the session for a cooldown period.

use crate::errors::{AppError, AppResult};
use std::time::{Duration, Instant};

pub const ADMIN_SECRET_ENV: &str = "TEAMLOG_ADMIN_SECRET";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    Guest,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottlePolicy {
    pub max_attempts: u32,
    pub cooldown: Duration,
}

impl Default for ThrottlePolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            cooldown: Duration::from_secs(30),
        }
    }
}

/// Holds the configured secret. `None` disables admin login entirely.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    secret: Option<String>,
    policy: ThrottlePolicy,
}

impl AccessGuard {
    pub fn new(secret: Option<String>, policy: ThrottlePolicy) -> Self {
        let secret = secret.filter(|s| !s.is_empty());
        Self { secret, policy }
    }

    /// Environment wins over the config value.
    pub fn from_sources(config_secret: Option<&str>, policy: ThrottlePolicy) -> Self {
        let secret = std::env::var(ADMIN_SECRET_ENV)
            .ok()
            .or_else(|| config_secret.map(str::to_string));
        Self::new(secret, policy)
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    pub fn policy(&self) -> ThrottlePolicy {
        self.policy
    }

    fn verify(&self, candidate: &str) -> bool {
        self.secret.as_deref().is_some_and(|s| s == candidate)
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    state: AccessState,
    failed_attempts: u32,
    locked_until: Option<Instant>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: AccessState::Guest,
            failed_attempts: 0,
            locked_until: None,
        }
    }

    pub fn login(&mut self, guard: &AccessGuard, candidate: &str) -> bool {
        self.login_at(guard, candidate, Instant::now())
    }

    /// Login with an explicit clock, used by the throttling logic.
    pub fn login_at(&mut self, guard: &AccessGuard, candidate: &str, now: Instant) -> bool {
        if self.is_locked_at(now) {
            return false;
        }

        if guard.verify(candidate) {
            self.state = AccessState::Admin;
            self.failed_attempts = 0;
            self.locked_until = None;
            return true;
        }

        self.failed_attempts += 1;
        let policy = guard.policy();
        if policy.max_attempts > 0 && self.failed_attempts >= policy.max_attempts {
            self.locked_until = Some(now + policy.cooldown);
            self.failed_attempts = 0;
        }
        false
    }

    pub fn logout(&mut self) {
        self.state = AccessState::Guest;
    }

    pub fn is_admin(&self) -> bool {
        self.state == AccessState::Admin
    }

    pub fn state(&self) -> AccessState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked_at(Instant::now())
    }

    pub fn is_locked_at(&self, now: Instant) -> bool {
        self.locked_until.is_some_and(|until| now < until)
    }

    /// Gate for destructive operations.
    pub fn require_admin(&self, action: &str) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Unauthorized(action.to_string()))
        }
    }
}
