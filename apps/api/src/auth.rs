//! Public authentication handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use bridgeworks_application::{AuthOutcome, RegisterParams};
use bridgeworks_core::AppError;
use bridgeworks_domain::{
    PasswordRequirements, UserContext, evaluate_password, strength_color, strength_label,
    strength_percent,
};

use crate::dto::{
    ForgotPasswordRequest, GenericMessageResponse, LoginRequest, LoginResponse,
    PasswordStrengthRequest, PasswordStrengthResponse, SignupRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /auth/login - Authenticate with email+password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let outcome = state
        .user_service
        .login(&payload.email, &payload.password)
        .await?;

    match outcome {
        AuthOutcome::Authenticated(user) => Ok(Json(LoginResponse {
            status: "ok".to_owned(),
            email: user.email,
            display_name: user.display_name,
        })),
        AuthOutcome::Failed => {
            // Generic message for every credential failure; no enumeration.
            Err(AppError::Unauthorized("invalid email or password".to_owned()).into())
        }
    }
}

/// POST /auth/signup - Create a new staff account.
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<GenericMessageResponse>)> {
    state
        .user_service
        .register(RegisterParams {
            email: payload.email,
            password: payload.password,
            display_name: payload.display_name,
            company: payload.company,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(GenericMessageResponse {
            message: "account created, you can now sign in".to_owned(),
        }),
    ))
}

/// POST /auth/forgot-password - Request a password reset link.
pub async fn forgot_password_handler(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> ApiResult<(StatusCode, Json<GenericMessageResponse>)> {
    state
        .user_service
        .request_password_reset(&payload.email)
        .await?;

    // Same response whether or not the account exists.
    Ok((
        StatusCode::ACCEPTED,
        Json(GenericMessageResponse {
            message: "if an account exists for that address, a password reset link has been sent"
                .to_owned(),
        }),
    ))
}

/// POST /auth/password-strength - Live strength feedback for the signup form.
pub async fn password_strength_handler(
    Json(payload): Json<PasswordStrengthRequest>,
) -> Json<PasswordStrengthResponse> {
    let context = UserContext {
        email: payload.email,
        name: payload.name,
        company: payload.company,
    };

    let strength = evaluate_password(
        &payload.password,
        &PasswordRequirements::default(),
        Some(&context),
    );

    Json(PasswordStrengthResponse {
        score: strength.score,
        label: strength_label(strength.score),
        color: strength_color(strength.score),
        percent: strength_percent(strength.score),
        feedback: strength.feedback,
        is_valid: strength.is_valid,
    })
}
