//! Health and internal administrative handlers.

use axum::Json;
use axum::extract::{Path, State};
use tracing::info;

use crate::dto::{GenericMessageResponse, HealthResponse};
use crate::state::AppState;

/// GET /health - Liveness probe.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// DELETE /internal/rate-limits - Clear tracked state across all limiters.
pub async fn clear_rate_limits_handler(
    State(state): State<AppState>,
) -> Json<GenericMessageResponse> {
    state.limiters.login.clear_all();
    state.limiters.signup.clear_all();
    state.limiters.password_reset.clear_all();

    info!("cleared all rate limit state");

    Json(GenericMessageResponse {
        message: "all rate limit state cleared".to_owned(),
    })
}

/// DELETE /internal/rate-limits/{identifier} - Clear one identifier everywhere.
pub async fn clear_rate_limit_identifier_handler(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Json<GenericMessageResponse> {
    state.limiters.login.clear(&identifier);
    state.limiters.signup.clear(&identifier);
    state.limiters.password_reset.clear(&identifier);

    info!(identifier = identifier.as_str(), "cleared rate limit state");

    Json(GenericMessageResponse {
        message: format!("rate limit state cleared for '{identifier}'"),
    })
}
