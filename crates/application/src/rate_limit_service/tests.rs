use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

use super::{AuthRateLimiters, Clock, RateLimitConfig, RateLimiter};

/// Test clock advanced by hand so window and block expiry need no sleeping.
struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    fn starting_at(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(now),
        })
    }

    fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default()
}

fn login_limiter() -> (Arc<ManualClock>, RateLimiter) {
    let clock = ManualClock::starting_at(epoch());
    let limiter = RateLimiter::new(RateLimitConfig::login(), clock.clone());
    (clock, limiter)
}

#[test]
fn unknown_identifier_reports_full_attempts() {
    let (_clock, limiter) = login_limiter();

    let status = limiter.check("a@b.com");
    assert!(!status.limited);
    assert_eq!(status.attempts_left, Some(5));
    assert_eq!(status.reset_time, None);
}

#[test]
fn fifth_failure_blocks_for_the_configured_duration() {
    let (clock, limiter) = login_limiter();

    for _ in 0..4 {
        let outcome = limiter.record_failure("a@b.com");
        assert!(!outcome.blocked);
    }

    let status = limiter.check("a@b.com");
    assert!(!status.limited);
    assert_eq!(status.attempts_left, Some(1));

    let outcome = limiter.record_failure("a@b.com");
    assert!(outcome.blocked);
    assert_eq!(outcome.reset_time, Some(clock.now() + Duration::minutes(30)));

    let status = limiter.check("a@b.com");
    assert!(status.limited);
    assert_eq!(status.reset_time, outcome.reset_time);
    assert_eq!(status.attempts_left, None);
}

#[test]
fn success_clears_all_failure_history() {
    let (_clock, limiter) = login_limiter();

    for _ in 0..4 {
        limiter.record_failure("a@b.com");
    }
    limiter.record_success("a@b.com");

    let status = limiter.check("a@b.com");
    assert!(!status.limited);
    assert_eq!(status.attempts_left, Some(5));
}

#[test]
fn window_expiry_resets_the_counter_lazily() {
    let (clock, limiter) = login_limiter();

    limiter.record_failure("a@b.com");
    limiter.record_failure("a@b.com");
    clock.advance(Duration::minutes(16));

    let status = limiter.check("a@b.com");
    assert_eq!(status.attempts_left, Some(5));

    // Entry was deleted on the first check; further checks are stable.
    let status = limiter.check("a@b.com");
    assert_eq!(status.attempts_left, Some(5));
}

#[test]
fn block_expiry_deletes_the_entry_on_next_check() {
    let (clock, limiter) = login_limiter();

    for _ in 0..5 {
        limiter.record_failure("a@b.com");
    }
    assert!(limiter.check("a@b.com").limited);

    clock.advance(Duration::minutes(31));
    let status = limiter.check("a@b.com");
    assert!(!status.limited);
    assert_eq!(status.attempts_left, Some(5));
}

#[test]
fn repeated_checks_never_consume_attempts() {
    let (_clock, limiter) = login_limiter();

    limiter.record_failure("a@b.com");
    for _ in 0..10 {
        assert_eq!(limiter.check("a@b.com").attempts_left, Some(4));
    }
}

#[test]
fn failures_spaced_beyond_the_window_never_block() {
    // The window slides from the most recent failure. Failures spaced just
    // past it each reset the counter to 1, so an arbitrarily long run of slow
    // failures never reaches the block threshold.
    let (clock, limiter) = login_limiter();

    for _ in 0..20 {
        let outcome = limiter.record_failure("slow@b.com");
        assert!(!outcome.blocked);
        clock.advance(Duration::minutes(16));
    }

    assert_eq!(limiter.check("slow@b.com").attempts_left, Some(5));
}

#[test]
fn failures_spaced_within_the_window_accumulate_across_its_length() {
    // Because expiry is measured from the last attempt rather than the first,
    // failures 14 minutes apart accumulate even though the first and fifth
    // are nearly an hour apart.
    let (clock, limiter) = login_limiter();

    for _ in 0..4 {
        let outcome = limiter.record_failure("steady@b.com");
        assert!(!outcome.blocked);
        clock.advance(Duration::minutes(14));
    }

    let outcome = limiter.record_failure("steady@b.com");
    assert!(outcome.blocked);
}

#[test]
fn identifiers_are_tracked_independently() {
    let (_clock, limiter) = login_limiter();

    for _ in 0..5 {
        limiter.record_failure("blocked@b.com");
    }

    assert!(limiter.check("blocked@b.com").limited);
    assert!(!limiter.check("other@b.com").limited);
}

#[test]
fn remaining_attempts_is_zero_while_blocked() {
    let (_clock, limiter) = login_limiter();

    assert_eq!(limiter.remaining_attempts("a@b.com"), 5);
    limiter.record_failure("a@b.com");
    assert_eq!(limiter.remaining_attempts("a@b.com"), 4);

    for _ in 0..4 {
        limiter.record_failure("a@b.com");
    }
    assert_eq!(limiter.remaining_attempts("a@b.com"), 0);
}

#[test]
fn clear_removes_one_identifier_and_clear_all_removes_everything() {
    let (_clock, limiter) = login_limiter();

    for identifier in ["a@b.com", "c@d.com"] {
        for _ in 0..5 {
            limiter.record_failure(identifier);
        }
    }

    limiter.clear("a@b.com");
    assert!(!limiter.check("a@b.com").limited);
    assert!(limiter.check("c@d.com").limited);

    limiter.clear_all();
    assert!(!limiter.check("c@d.com").limited);
}

#[test]
fn failures_while_blocked_extend_the_block() {
    let (clock, limiter) = login_limiter();

    for _ in 0..5 {
        limiter.record_failure("a@b.com");
    }

    clock.advance(Duration::minutes(10));
    let outcome = limiter.record_failure("a@b.com");
    assert!(outcome.blocked);
    assert_eq!(outcome.reset_time, Some(clock.now() + Duration::minutes(30)));
}

#[test]
fn standard_limiters_use_flow_specific_configs() {
    let clock = ManualClock::starting_at(epoch());
    let limiters = AuthRateLimiters::standard(clock);

    assert_eq!(limiters.login.check("x").attempts_left, Some(5));
    assert_eq!(limiters.signup.check("x").attempts_left, Some(3));
    assert_eq!(limiters.password_reset.check("x").attempts_left, Some(3));
}
