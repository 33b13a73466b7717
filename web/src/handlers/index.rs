//! API entry point.

use crate::handlers::HAL_JSON;
use crate::state::AppState;
use axum::{Json, extract::State, http::header, response::IntoResponse};
use events_core::Links;
use serde::Serialize;

/// Body of the entry point: links only.
#[derive(Debug, Serialize)]
pub struct IndexResource {
    /// Top-level relations
    #[serde(rename = "_links")]
    pub links: Links,
}

/// List the top-level resources.
///
/// ```text
/// GET /api
/// ```
///
/// ```json
/// { "_links": { "events": { "href": "http://localhost:8080/api/events" } } }
/// ```
#[allow(clippy::unused_async)]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let links = state.service().links().index();
    ([(header::CONTENT_TYPE, HAL_JSON)], Json(IndexResource { links }))
}
