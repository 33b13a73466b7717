//! Event endpoints.

use crate::error::AppError;
use crate::extractors::{CorrelationId, EventPayload};
use crate::handlers::HAL_JSON;
use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

/// Create an event.
///
/// ```text
/// POST /api/events
/// ```
///
/// # Responses
///
/// - 201 Created: HAL document of the stored event, `Location` set to its
///   `self` link
/// - 400 Bad Request: array of field errors followed by global errors
/// - 415 Unsupported Media Type: body is not declared as JSON
/// - 500 Internal Server Error: the event could not be stored
pub async fn create_event(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    EventPayload(input): EventPayload,
) -> Result<Response, AppError> {
    tracing::debug!(correlation_id = %correlation_id.0, "Creating event");

    let created = state.service().create(&input).await?;

    Ok((
        StatusCode::CREATED,
        [
            (header::LOCATION, created.location),
            (header::CONTENT_TYPE, HAL_JSON.to_string()),
        ],
        Json(created.resource),
    )
        .into_response())
}
