//! Request and response payloads for the staff API.

use serde::{Deserialize, Serialize};

/// Incoming payload for email/password login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Auth status response for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: String,
    pub email: String,
    pub display_name: String,
}

/// Incoming payload for email/password signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub company: Option<String>,
}

/// Incoming payload for a password-reset request.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Incoming payload for the live password-strength check on the signup form.
#[derive(Debug, Deserialize)]
pub struct PasswordStrengthRequest {
    pub password: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub company: Option<String>,
}

/// Strength evaluation returned to the signup form's meter.
#[derive(Debug, Serialize)]
pub struct PasswordStrengthResponse {
    pub score: u8,
    pub label: &'static str,
    pub color: &'static str,
    pub percent: u8,
    pub feedback: Vec<String>,
    pub is_valid: bool,
}

/// Catch-all response carrying a single human-readable message.
#[derive(Debug, Serialize)]
pub struct GenericMessageResponse {
    pub message: String,
}

/// Health probe response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
