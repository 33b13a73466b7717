//! Router configuration.

use crate::handlers::{create_event, health_check, index, readiness_check};
use crate::middleware::track_correlation_id;
use crate::state::AppState;
use axum::{
    Router,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Build the complete Axum router.
///
/// - `GET /health`, `GET /ready`
/// - `GET /api`
/// - `POST /api/events` (also with a trailing slash)
///
/// Requests taking longer than `request_timeout` are answered with 408.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let api_routes = Router::new()
        .route("/", get(index))
        .route("/events", post(create_event))
        .route("/events/", post(create_event));

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(track_correlation_id))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                )),
        )
        .with_state(state)
}
