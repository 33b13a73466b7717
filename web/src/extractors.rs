//! Custom Axum extractors.
//!
//! - [`CorrelationId`]: the request's correlation id
//! - [`EventPayload`]: a creation request body, parsed leniently or strictly
//!   depending on [`ApiConfig::fail_on_unknown_properties`](crate::config::ApiConfig)

use crate::error::AppError;
use crate::middleware::CORRELATION_ID_HEADER;
use crate::state::AppState;
use axum::{
    Json, async_trait,
    extract::{FromRequest, FromRequestParts, Request, rejection::JsonRejection},
    http::request::Parts,
};
use events_core::ValidationErrors;
use events_core::input::{EventInput, INPUT_PROPERTIES};
use serde_json::Value;
use uuid::Uuid;

/// Code of the global error reported for unreadable bodies.
pub const MALFORMED_REQUEST: &str = "malformedRequest";

/// Code of the field error reported for unrecognized properties.
pub const UNKNOWN_PROPERTY: &str = "unknownProperty";

/// Correlation ID for request tracing.
///
/// Prefers the id stored by the correlation middleware, then the
/// `X-Correlation-ID` header, and finally generates a UUID v4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Self>() {
            return Ok(*id);
        }

        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}

/// A creation request body.
///
/// Rejections are 400 responses in the validation error format:
/// a `malformedRequest` global error when the body is not a JSON object
/// (arrays included) or its values have the wrong types, and one `unknownProperty` field error per unrecognized
/// property when strict parsing is enabled. A missing JSON content type is
/// rejected with 415.
#[derive(Debug, Clone)]
pub struct EventPayload(pub EventInput);

#[async_trait]
impl FromRequest<AppState> for EventPayload {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        if !body.is_object() {
            return Err(malformed(format!(
                "Request body must be a JSON object, found {}",
                json_kind(&body)
            )));
        }

        if state.api().fail_on_unknown_properties {
            unknown_properties(&body)?;
        }

        serde_json::from_value(body)
            .map(Self)
            .map_err(|e| malformed(e.to_string()))
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::unsupported_media_type(rejection.body_text())
        }
        _ => malformed(rejection.body_text()),
    }
}

fn malformed(message: String) -> AppError {
    tracing::debug!(%message, "Unreadable event submission");
    metrics::counter!("events.rejected", "reason" => "malformed").increment(1);

    let mut errors = ValidationErrors::for_event();
    errors.reject(MALFORMED_REQUEST, message);
    AppError::validation(errors)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn unknown_properties(body: &Value) -> Result<(), AppError> {
    let Some(object) = body.as_object() else {
        return Ok(());
    };

    let mut errors = ValidationErrors::for_event();
    for key in object.keys().filter(|k| !INPUT_PROPERTIES.contains(&k.as_str())) {
        errors.reject_value(
            key.clone(),
            UNKNOWN_PROPERTY,
            format!("Unrecognized field \"{key}\""),
            None,
        );
    }

    if errors.has_errors() {
        tracing::debug!(errors = %errors, "Event submission has unknown properties");
        metrics::counter!("events.rejected", "reason" => "unknown_property").increment(1);
    }
    errors.into_result().map_err(AppError::validation)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_properties_pass_strict_check() {
        let body = json!({ "name": "Spring", "basePrice": 100, "location": null });
        assert!(unknown_properties(&body).is_ok());
    }

    #[test]
    fn test_each_unknown_property_is_reported() {
        let body = json!({ "name": "Spring", "id": 100, "free": true });

        let err = unknown_properties(&body).unwrap_err();
        let errors = err.validation_errors().unwrap();

        let mut fields: Vec<&str> = errors.field_errors().iter().map(|e| e.field.as_str()).collect();
        fields.sort_unstable();
        assert_eq!(fields, vec!["free", "id"]);
        assert!(errors.field_errors().iter().all(|e| e.code == UNKNOWN_PROPERTY));
    }

    #[test]
    fn test_json_kind_names_non_objects() {
        assert_eq!(json_kind(&json!(["Spring", 100])), "an array");
        assert_eq!(json_kind(&json!("Spring")), "a string");
        assert_eq!(json_kind(&Value::Null), "null");
    }

    #[test]
    fn test_malformed_is_a_single_global_error() {
        let err = malformed("expected value at line 1 column 1".to_string());
        let errors = err.validation_errors().unwrap();

        assert!(errors.field_errors().is_empty());
        assert_eq!(errors.global_errors().len(), 1);
        assert_eq!(errors.global_errors()[0].code, MALFORMED_REQUEST);
    }
}
