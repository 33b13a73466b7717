//! Error types for web handlers.
//!
//! [`AppError`] bridges domain errors and HTTP responses. Rejected
//! submissions render as the validation error array; everything else
//! renders as a `{code, message}` object.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use events_core::{CreateEventError, RepositoryError, ValidationErrors, to_error_json};
use serde::Serialize;
use std::fmt;

/// Application error type for web handlers.
///
/// # Examples
///
/// ```ignore
/// async fn handler(State(state): State<AppState>) -> Result<Response, AppError> {
///     let created = state.service().create(&input).await?;
///     Ok(created_response(created))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    body: ErrorBody,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

#[derive(Debug)]
enum ErrorBody {
    Message { code: &'static str, message: String },
    Validation(ValidationErrors),
}

/// Error response body (JSON) for non-validation failures.
#[derive(Debug, Serialize)]
struct ErrorResponse<'a> {
    code: &'a str,
    message: &'a str,
}

impl AppError {
    const fn message(status: StatusCode, code: &'static str, message: String) -> Self {
        Self {
            status,
            body: ErrorBody::Message { code, message },
            source: None,
        }
    }

    /// Attach the underlying cause, logged but never sent to the client.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Create a 400 Bad Request carrying the validation error array.
    #[must_use]
    pub const fn validation(errors: ValidationErrors) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody::Validation(errors),
            source: None,
        }
    }

    /// Create a 415 Unsupported Media Type error.
    #[must_use]
    pub fn unsupported_media_type(message: impl Into<String>) -> Self {
        Self::message(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "UNSUPPORTED_MEDIA_TYPE",
            message.into(),
        )
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::message(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_SERVER_ERROR",
            message.into(),
        )
    }

    /// Create a 503 Service Unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::message(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            message.into(),
        )
    }

    /// HTTP status this error renders with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// The validation errors, for 400 responses.
    #[must_use]
    pub const fn validation_errors(&self) -> Option<&ValidationErrors> {
        match &self.body {
            ErrorBody::Validation(errors) => Some(errors),
            ErrorBody::Message { .. } => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            ErrorBody::Message { code, message } => write!(f, "[{code}] {message}"),
            ErrorBody::Validation(errors) => write!(f, "[VALIDATION] {errors}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            match &self.source {
                Some(source) => tracing::error!(
                    status = %self.status,
                    error = %source,
                    "{self}"
                ),
                None => tracing::error!(status = %self.status, "{self}"),
            }
        }

        match self.body {
            ErrorBody::Validation(errors) => {
                (self.status, Json(to_error_json(&errors))).into_response()
            }
            ErrorBody::Message { code, message } => {
                (self.status, Json(ErrorResponse { code, message: &message })).into_response()
            }
        }
    }
}

impl From<CreateEventError> for AppError {
    fn from(err: CreateEventError) -> Self {
        match err {
            CreateEventError::Validation(errors) => Self::validation(errors),
            CreateEventError::Persistence(source) => source.into(),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Unavailable(_) => {
                Self::unavailable("Storage is unavailable").with_source(err)
            }
            RepositoryError::Database(_) | RepositoryError::CorruptRecord { .. } => {
                Self::internal("An internal error occurred").with_source(err)
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal("An internal error occurred").with_source(err)
    }
}
