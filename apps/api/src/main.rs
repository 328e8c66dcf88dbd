//! Bridgeworks API composition root.

#![forbid(unsafe_code)]

mod api_router;
mod auth;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::env;
use std::sync::Arc;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use bridgeworks_application::{AuthRateLimiters, RegisterParams, UserService};
use bridgeworks_core::AppError;
use bridgeworks_domain::PasswordRequirements;
use bridgeworks_infrastructure::{
    Argon2PasswordHasher, ConsoleEmailService, InMemoryUserRepository, SystemClock,
};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let frontend_url =
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
    let admin_token = required_env("ADMIN_API_TOKEN")?;

    if admin_token.len() < 16 {
        return Err(AppError::Validation(
            "ADMIN_API_TOKEN must be at least 16 characters".to_owned(),
        ));
    }

    let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
    let api_port = env::var("API_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3001);

    // One limiter per auth flow, all sharing the system clock. Constructed
    // here and passed explicitly to everything that needs them.
    let limiters = AuthRateLimiters::standard(Arc::new(SystemClock::new()));

    let user_repository = Arc::new(InMemoryUserRepository::new());
    let password_hasher = Arc::new(Argon2PasswordHasher::new());
    let email_service = Arc::new(ConsoleEmailService::new());

    let user_service = UserService::new(
        user_repository,
        password_hasher,
        email_service,
        limiters.clone(),
        PasswordRequirements::default(),
    );

    seed_bootstrap_user(&user_service).await?;

    let cors = CorsLayer::new()
        .allow_origin(frontend_url.parse::<HeaderValue>().map_err(|error| {
            AppError::Validation(format!("invalid FRONTEND_URL '{frontend_url}': {error}"))
        })?)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    let app_state = AppState {
        user_service,
        limiters,
        admin_token,
    };

    let router = api_router::build_router(app_state, cors);

    let listener = tokio::net::TcpListener::bind(format!("{api_host}:{api_port}"))
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to bind {api_host}:{api_port}: {error}"))
        })?;

    info!("bridgeworks api listening on {api_host}:{api_port}");

    axum::serve(listener, router)
        .await
        .map_err(|error| AppError::Internal(format!("server error: {error}")))?;

    Ok(())
}

/// Creates the bootstrap staff account when both seed variables are set.
/// The password goes through the same strength policy as any signup.
async fn seed_bootstrap_user(user_service: &UserService) -> Result<(), AppError> {
    let (Ok(email), Ok(password)) = (
        env::var("BOOTSTRAP_USER_EMAIL"),
        env::var("BOOTSTRAP_USER_PASSWORD"),
    ) else {
        return Ok(());
    };

    let user_id = user_service
        .register(RegisterParams {
            email: email.clone(),
            password,
            display_name: "Administrator".to_owned(),
            company: None,
        })
        .await?;

    info!(email = email.as_str(), user_id = %user_id, "seeded bootstrap user");

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::Validation(format!("{name} environment variable is required")))
}
