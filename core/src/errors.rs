//! Validation error collection and its JSON rendering.
//!
//! Both the structural checks and the business rules report into the same
//! [`ValidationErrors`] value, so the HTTP layer renders every 400 response
//! the same way through [`to_error_json`].

use serde_json::{Map, Value};

/// Object name reported with every error about an event submission.
pub const OBJECT_NAME: &str = "eventDto";

/// An error attached to a single input property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    /// Property name in the request body (camelCase)
    pub field: String,
    /// Name of the rejected object
    pub object_name: String,
    /// Machine-readable error code
    pub code: String,
    /// Human-readable description
    pub default_message: String,
    /// The offending value, stringified, when there was one
    pub rejected_value: Option<String>,
}

/// An error about the submission as a whole.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalError {
    /// Name of the rejected object
    pub object_name: String,
    /// Machine-readable error code
    pub code: String,
    /// Human-readable description
    pub default_message: String,
}

/// Accumulated field and global errors for one submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationErrors {
    object_name: String,
    field_errors: Vec<FieldError>,
    global_errors: Vec<GlobalError>,
}

impl ValidationErrors {
    /// Creates an empty collection for the given object name.
    #[must_use]
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            field_errors: Vec::new(),
            global_errors: Vec::new(),
        }
    }

    /// Creates an empty collection for an event submission.
    #[must_use]
    pub fn for_event() -> Self {
        Self::new(OBJECT_NAME)
    }

    /// Records an error on `field`.
    pub fn reject_value(
        &mut self,
        field: impl Into<String>,
        code: impl Into<String>,
        default_message: impl Into<String>,
        rejected_value: Option<String>,
    ) {
        self.field_errors.push(FieldError {
            field: field.into(),
            object_name: self.object_name.clone(),
            code: code.into(),
            default_message: default_message.into(),
            rejected_value,
        });
    }

    /// Records an error about the whole submission.
    pub fn reject(&mut self, code: impl Into<String>, default_message: impl Into<String>) {
        self.global_errors.push(GlobalError {
            object_name: self.object_name.clone(),
            code: code.into(),
            default_message: default_message.into(),
        });
    }

    /// Appends every error of `other`.
    pub fn extend(&mut self, other: Self) {
        self.field_errors.extend(other.field_errors);
        self.global_errors.extend(other.global_errors);
    }

    /// Whether anything was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.field_errors.is_empty() || !self.global_errors.is_empty()
    }

    /// Total number of recorded errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.field_errors.len() + self.global_errors.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.has_errors()
    }

    /// Field errors in the order they were recorded.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Global errors in the order they were recorded.
    #[must_use]
    pub fn global_errors(&self) -> &[GlobalError] {
        &self.global_errors
    }

    /// Converts into `Err(self)` when anything was recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` if it holds at least one error.
    pub fn into_result(self) -> Result<(), Self> {
        if self.has_errors() { Err(self) } else { Ok(()) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let codes: Vec<&str> = self
            .field_errors
            .iter()
            .map(|e| e.code.as_str())
            .chain(self.global_errors.iter().map(|e| e.code.as_str()))
            .collect();
        write!(f, "{} validation error(s) on {}: {}", self.len(), self.object_name, codes.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Renders errors as a JSON array: field errors first, then global errors.
///
/// Field errors carry `field`, `objectName`, `code`, `defaultMessage` and,
/// only when present, `rejectedValue`. Global errors carry `objectName`,
/// `code` and `defaultMessage`.
#[must_use]
pub fn to_error_json(errors: &ValidationErrors) -> Value {
    let fields = errors.field_errors.iter().map(|e| {
        let mut entry = Map::new();
        entry.insert("field".to_string(), Value::from(e.field.as_str()));
        entry.insert("objectName".to_string(), Value::from(e.object_name.as_str()));
        entry.insert("code".to_string(), Value::from(e.code.as_str()));
        entry.insert("defaultMessage".to_string(), Value::from(e.default_message.as_str()));
        if let Some(rejected) = &e.rejected_value {
            entry.insert("rejectedValue".to_string(), Value::from(rejected.as_str()));
        }
        Value::Object(entry)
    });

    let globals = errors.global_errors.iter().map(|e| {
        let mut entry = Map::new();
        entry.insert("objectName".to_string(), Value::from(e.object_name.as_str()));
        entry.insert("code".to_string(), Value::from(e.code.as_str()));
        entry.insert("defaultMessage".to_string(), Value::from(e.default_message.as_str()));
        Value::Object(entry)
    });

    Value::Array(fields.chain(globals).collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collection_has_no_errors() {
        let errors = ValidationErrors::for_event();
        assert!(errors.is_empty());
        assert!(errors.clone().into_result().is_ok());
        assert_eq!(to_error_json(&errors), serde_json::json!([]));
    }

    #[test]
    fn test_field_errors_precede_global_errors() {
        let mut errors = ValidationErrors::for_event();
        errors.reject("wrongPrices", "Values for prices are wrong");
        errors.reject_value(
            "endEventDateTime",
            "wrongValue",
            "endEventDateTime is wrong",
            Some("2019-05-17T00:11:00".to_string()),
        );

        let json = to_error_json(&errors);
        assert_eq!(
            json,
            serde_json::json!([
                {
                    "field": "endEventDateTime",
                    "objectName": "eventDto",
                    "code": "wrongValue",
                    "defaultMessage": "endEventDateTime is wrong",
                    "rejectedValue": "2019-05-17T00:11:00"
                },
                {
                    "objectName": "eventDto",
                    "code": "wrongPrices",
                    "defaultMessage": "Values for prices are wrong"
                }
            ])
        );
    }

    #[test]
    fn test_rejected_value_omitted_when_absent() {
        let mut errors = ValidationErrors::for_event();
        errors.reject_value("name", "NotEmpty", "must not be empty", None);

        let json = to_error_json(&errors);
        let entry = json[0].as_object().unwrap();
        assert!(!entry.contains_key("rejectedValue"));
        assert_eq!(entry["field"], "name");
    }

    #[test]
    fn test_extend_and_display() {
        let mut first = ValidationErrors::for_event();
        first.reject_value("name", "NotEmpty", "must not be empty", None);
        let mut second = ValidationErrors::for_event();
        second.reject("wrongPrices", "Values for prices are wrong");

        first.extend(second);
        assert_eq!(first.len(), 2);
        assert_eq!(
            first.to_string(),
            "2 validation error(s) on eventDto: NotEmpty, wrongPrices"
        );
    }
}
