//! User account ports and application service.
//!
//! Owns the staff authentication flows: login, signup, and password-reset
//! requests. Every flow consults its rate limiter before touching the user
//! store, and failures use generic messages so responses never reveal whether
//! an account exists.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use bridgeworks_core::{AppError, AppResult};
use bridgeworks_domain::{PasswordRequirements, UserId};

use crate::rate_limit_service::AuthRateLimiters;

mod login;
mod password_reset;
mod registration;

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// User record returned by repository queries.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Unique user identifier.
    pub id: UserId,
    /// Canonical email address.
    pub email: String,
    /// Argon2id password hash.
    pub password_hash: String,
    /// Display name shown in the back office.
    pub display_name: String,
    /// Company the staff member belongs to, if recorded.
    pub company: Option<String>,
}

/// Repository port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>>;

    /// Creates a new user record. Returns the assigned user ID.
    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        display_name: &str,
        company: Option<&str>,
    ) -> AppResult<UserId>;

    /// Updates the password hash for a user.
    async fn update_password(&self, user_id: UserId, password_hash: &str) -> AppResult<()>;
}

/// Port for password hashing operations. Keeps the application layer free of
/// direct cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    /// Must run in constant time regardless of validity.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

/// Port for outbound email delivery. Reset notifications are plain text.
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Sends a plain-text email.
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}

// ---------------------------------------------------------------------------
// Authentication outcome
// ---------------------------------------------------------------------------

/// Result of a login attempt.
#[derive(Debug)]
pub enum AuthOutcome {
    /// Authentication succeeded. Session can be established.
    Authenticated(UserRecord),
    /// Authentication failed. Generic message prevents enumeration.
    Failed,
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Parameters for user registration.
#[derive(Debug)]
pub struct RegisterParams {
    /// Email address for the new account.
    pub email: String,
    /// Plaintext password, evaluated against the configured requirements.
    pub password: String,
    /// Display name for the new account.
    pub display_name: String,
    /// Company the staff member belongs to.
    pub company: Option<String>,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for staff authentication and registration.
#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    email_service: Arc<dyn EmailService>,
    limiters: AuthRateLimiters,
    password_requirements: PasswordRequirements,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        email_service: Arc<dyn EmailService>,
        limiters: AuthRateLimiters,
        password_requirements: PasswordRequirements,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            email_service,
            limiters,
            password_requirements,
        }
    }
}

/// Builds the error returned when a limiter reports an active block.
fn rate_limited_error(reset_time: Option<DateTime<Utc>>) -> AppError {
    let message = match reset_time {
        Some(reset_time) => format!(
            "too many attempts, please try again after {}",
            reset_time.to_rfc3339()
        ),
        None => "too many attempts, please try again later".to_owned(),
    };

    AppError::RateLimited(message)
}
