use bridgeworks_application::{AuthRateLimiters, UserService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub limiters: AuthRateLimiters,
    pub admin_token: String,
}
