//! Application services and ports.

#![forbid(unsafe_code)]

mod rate_limit_service;
mod user_service;

pub use rate_limit_service::{
    AuthRateLimiters, Clock, FailedAttemptOutcome, RateLimitConfig, RateLimitStatus, RateLimiter,
};
pub use user_service::{
    AuthOutcome, EmailService, PasswordHasher, RegisterParams, UserRecord, UserRepository,
    UserService,
};
