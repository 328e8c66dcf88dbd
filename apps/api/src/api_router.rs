use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{auth, handlers, middleware};

/// Builds the full API router: public auth routes, the health probe, and the
/// token-guarded internal routes.
pub fn build_router(app_state: AppState, cors: CorsLayer) -> Router {
    let internal_routes = Router::new()
        .route(
            "/internal/rate-limits",
            delete(handlers::clear_rate_limits_handler),
        )
        .route(
            "/internal/rate-limits/{identifier}",
            delete(handlers::clear_rate_limit_identifier_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_admin_auth,
        ));

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/signup", post(auth::signup_handler))
        .route("/auth/forgot-password", post(auth::forgot_password_handler))
        .route(
            "/auth/password-strength",
            post(auth::password_strength_handler),
        )
        .merge(internal_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
