//! In-memory rate limiting for authentication flows.
//!
//! Tracks failed-attempt counters per identifier (email or IP) with a sliding
//! window and temporary blocking. Each limiter instance owns its own map, so
//! the login, signup, and password-reset flows track state independently.
//!
//! The limiter is advisory only: it never returns errors and never rejects
//! anything itself. Callers decide what to do with the reported status.
//! Expired entries are removed lazily during queries and recordings; there is
//! no background sweep, and state is lost on process restart.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};

#[cfg(test)]
mod tests;

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Wall-clock port so limiter state transitions are testable without sleeps.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for one rate limiter instance.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Failures tolerated within the window before the identifier is blocked.
    pub max_attempts: u32,
    /// Sliding window after which the failure count resets, measured from the
    /// most recent failure.
    pub window: Duration,
    /// How long an identifier stays blocked once `max_attempts` is reached.
    pub block_duration: Duration,
}

impl RateLimitConfig {
    /// Creates a new rate limit configuration.
    #[must_use]
    pub fn new(max_attempts: u32, window: Duration, block_duration: Duration) -> Self {
        Self {
            max_attempts,
            window,
            block_duration,
        }
    }

    /// Standard configuration for the login flow: 5 attempts per 15 minutes,
    /// 30 minute block.
    #[must_use]
    pub fn login() -> Self {
        Self::new(5, Duration::minutes(15), Duration::minutes(30))
    }

    /// Standard configuration for the signup flow: 3 attempts per hour,
    /// 1 hour block.
    #[must_use]
    pub fn signup() -> Self {
        Self::new(3, Duration::minutes(60), Duration::minutes(60))
    }

    /// Standard configuration for the password-reset flow: 3 attempts per
    /// hour, 2 hour block.
    #[must_use]
    pub fn password_reset() -> Self {
        Self::new(3, Duration::minutes(60), Duration::minutes(120))
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Tracked state for one identifier. Exists only while the identifier has at
/// least one failure since the last reset.
#[derive(Debug, Clone)]
struct RateLimitEntry {
    attempts: u32,
    last_attempt_at: DateTime<Utc>,
    blocked_until: Option<DateTime<Utc>>,
}

/// Status reported by [`RateLimiter::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitStatus {
    /// True when the identifier is currently blocked.
    pub limited: bool,
    /// When the block lifts, if blocked.
    pub reset_time: Option<DateTime<Utc>>,
    /// Failures left before a block, if not blocked.
    pub attempts_left: Option<u32>,
}

/// Outcome of [`RateLimiter::record_failure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAttemptOutcome {
    /// True when this failure reached the limit and triggered a block.
    pub blocked: bool,
    /// When the block lifts, if one was triggered.
    pub reset_time: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Limiter
// ---------------------------------------------------------------------------

/// Advisory in-memory failure tracker for one authentication flow.
pub struct RateLimiter {
    config: RateLimitConfig,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, RateLimitEntry>>,
}

impl RateLimiter {
    /// Creates a new limiter with the given configuration and clock.
    #[must_use]
    pub fn new(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Reports whether the identifier is currently limited.
    ///
    /// Pure query apart from lazy deletion: entries whose window or block has
    /// elapsed are removed here, after which repeated calls stabilize to the
    /// fresh result.
    pub fn check(&self, identifier: &str) -> RateLimitStatus {
        let now = self.clock.now();
        let mut entries = self.lock_entries();

        let Some(entry) = entries.get(identifier) else {
            return self.fresh_status();
        };

        if let Some(blocked_until) = entry.blocked_until {
            if now < blocked_until {
                return RateLimitStatus {
                    limited: true,
                    reset_time: Some(blocked_until),
                    attempts_left: None,
                };
            }

            entries.remove(identifier);
            return self.fresh_status();
        }

        if now.signed_duration_since(entry.last_attempt_at) > self.config.window {
            entries.remove(identifier);
            return self.fresh_status();
        }

        RateLimitStatus {
            limited: false,
            reset_time: None,
            attempts_left: Some(self.config.max_attempts.saturating_sub(entry.attempts)),
        }
    }

    /// Records a failed attempt for the identifier.
    ///
    /// Resets the count to 1 when the prior window has expired, otherwise
    /// increments it. Reaching `max_attempts` blocks the identifier for the
    /// configured duration.
    pub fn record_failure(&self, identifier: &str) -> FailedAttemptOutcome {
        let now = self.clock.now();
        let mut entries = self.lock_entries();

        let attempts = match entries.get(identifier) {
            Some(entry)
                if now.signed_duration_since(entry.last_attempt_at) <= self.config.window =>
            {
                entry.attempts + 1
            }
            _ => 1,
        };

        if attempts >= self.config.max_attempts {
            let blocked_until = now + self.config.block_duration;
            entries.insert(
                identifier.to_owned(),
                RateLimitEntry {
                    attempts,
                    last_attempt_at: now,
                    blocked_until: Some(blocked_until),
                },
            );

            return FailedAttemptOutcome {
                blocked: true,
                reset_time: Some(blocked_until),
            };
        }

        entries.insert(
            identifier.to_owned(),
            RateLimitEntry {
                attempts,
                last_attempt_at: now,
                blocked_until: None,
            },
        );

        FailedAttemptOutcome {
            blocked: false,
            reset_time: None,
        }
    }

    /// Clears all failure history for the identifier. A successful operation
    /// forgives every prior failure.
    pub fn record_success(&self, identifier: &str) {
        self.lock_entries().remove(identifier);
    }

    /// Convenience over [`check`](Self::check): failures left before a block,
    /// zero while blocked.
    pub fn remaining_attempts(&self, identifier: &str) -> u32 {
        self.check(identifier).attempts_left.unwrap_or(0)
    }

    /// Administrative override: removes tracked state for one identifier.
    pub fn clear(&self, identifier: &str) {
        self.lock_entries().remove(identifier);
    }

    /// Administrative override: removes all tracked state.
    pub fn clear_all(&self) {
        self.lock_entries().clear();
    }

    fn fresh_status(&self) -> RateLimitStatus {
        RateLimitStatus {
            limited: false,
            reset_time: None,
            attempts_left: Some(self.config.max_attempts),
        }
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, RateLimitEntry>> {
        // No code path panics while holding the lock; recover from poisoning
        // rather than propagating a panic from an unrelated thread.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The process-standard limiter instances, one per authentication flow.
///
/// Constructed once at startup and passed explicitly to whoever needs them;
/// there are no module-level globals.
#[derive(Clone)]
pub struct AuthRateLimiters {
    /// Login flow limiter.
    pub login: Arc<RateLimiter>,
    /// Signup flow limiter.
    pub signup: Arc<RateLimiter>,
    /// Password-reset flow limiter.
    pub password_reset: Arc<RateLimiter>,
}

impl AuthRateLimiters {
    /// Builds the three standard limiters sharing the given clock.
    #[must_use]
    pub fn standard(clock: Arc<dyn Clock>) -> Self {
        Self {
            login: Arc::new(RateLimiter::new(RateLimitConfig::login(), clock.clone())),
            signup: Arc::new(RateLimiter::new(RateLimitConfig::signup(), clock.clone())),
            password_reset: Arc::new(RateLimiter::new(RateLimitConfig::password_reset(), clock)),
        }
    }
}
