pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::scoring::handlers as analyses;
use crate::sessions::handlers as sessions;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyses", post(analyses::handle_analyze))
        .route("/api/v1/analyses/allocate", post(analyses::handle_allocate))
        // Session API
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route("/api/v1/sessions/:id", get(sessions::handle_get_session))
        .route(
            "/api/v1/sessions/:id/result",
            put(sessions::handle_replace_result),
        )
        .route("/api/v1/sessions/:id/toggle", post(sessions::handle_toggle))
        .route("/api/v1/sessions/:id/reset", post(sessions::handle_reset))
        .route(
            "/api/v1/sessions/:id/selected",
            get(sessions::handle_selected_suggestions),
        )
        .with_state(state)
}
