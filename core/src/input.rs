//! The creation request accepted from callers and its structural constraints.
//!
//! [`EventInput`] mirrors the request body. Every field a caller may omit is
//! optional here so that missing values surface as field errors instead of
//! parse failures. [`EventInput::check`] turns it into [`EventDetails`] or
//! reports every constraint it violates.
//!
//! Constraints:
//!
//! | Field                                   | Code       |
//! |-----------------------------------------|------------|
//! | `name`, `description` (non-blank)       | `NotEmpty` |
//! | the four timestamps (present)           | `NotNull`  |
//! | `basePrice`, `maxPrice`, `limitOfEnrollment` (>= 0) | `Min` |

use crate::errors::ValidationErrors;
use crate::event::{EventDetails, timestamp};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Every property name [`EventInput`] understands, as it appears on the wire.
pub const INPUT_PROPERTIES: [&str; 10] = [
    "name",
    "description",
    "beginEnrollmentDateTime",
    "closeEnrollmentDateTime",
    "beginEventDateTime",
    "endEventDateTime",
    "location",
    "basePrice",
    "maxPrice",
    "limitOfEnrollment",
];

const NOT_EMPTY: (&str, &str) = ("NotEmpty", "must not be empty");
const NOT_NULL: (&str, &str) = ("NotNull", "must not be null");
const MIN_ZERO: (&str, &str) = ("Min", "must be greater than or equal to 0");

/// Raw event creation request.
///
/// Properties outside [`INPUT_PROPERTIES`] (including `id`, `free`,
/// `offline` and `status`) are ignored by serde; strict rejection is the
/// HTTP layer's decision.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    /// Event name
    #[serde(default)]
    pub name: Option<String>,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Enrollment opens
    #[serde(default, with = "timestamp::option")]
    pub begin_enrollment_date_time: Option<NaiveDateTime>,
    /// Enrollment closes
    #[serde(default, with = "timestamp::option")]
    pub close_enrollment_date_time: Option<NaiveDateTime>,
    /// Event starts
    #[serde(default, with = "timestamp::option")]
    pub begin_event_date_time: Option<NaiveDateTime>,
    /// Event ends
    #[serde(default, with = "timestamp::option")]
    pub end_event_date_time: Option<NaiveDateTime>,
    /// Venue; absent for online events
    #[serde(default)]
    pub location: Option<String>,
    /// Lowest price (defaults to 0)
    #[serde(default, deserialize_with = "zero_if_null")]
    pub base_price: i32,
    /// Highest price (defaults to 0, meaning unbounded)
    #[serde(default, deserialize_with = "zero_if_null")]
    pub max_price: i32,
    /// Enrollment capacity (defaults to 0)
    #[serde(default, deserialize_with = "zero_if_null")]
    pub limit_of_enrollment: i32,
}

impl EventInput {
    /// Applies the per-field constraints.
    ///
    /// All violations are collected; nothing stops at the first one.
    ///
    /// # Errors
    ///
    /// Returns the collected field errors when any constraint fails.
    pub fn check(&self) -> Result<EventDetails, ValidationErrors> {
        let mut errors = ValidationErrors::for_event();

        let name = required_text(&mut errors, "name", self.name.as_deref());
        let description = required_text(&mut errors, "description", self.description.as_deref());
        let begin_enrollment = required_timestamp(
            &mut errors,
            "beginEnrollmentDateTime",
            self.begin_enrollment_date_time,
        );
        let close_enrollment = required_timestamp(
            &mut errors,
            "closeEnrollmentDateTime",
            self.close_enrollment_date_time,
        );
        let begin_event =
            required_timestamp(&mut errors, "beginEventDateTime", self.begin_event_date_time);
        let end_event =
            required_timestamp(&mut errors, "endEventDateTime", self.end_event_date_time);
        let base_price = non_negative(&mut errors, "basePrice", self.base_price);
        let max_price = non_negative(&mut errors, "maxPrice", self.max_price);
        let limit_of_enrollment =
            non_negative(&mut errors, "limitOfEnrollment", self.limit_of_enrollment);

        match (
            name,
            description,
            begin_enrollment,
            close_enrollment,
            begin_event,
            end_event,
            base_price,
            max_price,
            limit_of_enrollment,
        ) {
            (
                Some(name),
                Some(description),
                Some(begin_enrollment_date_time),
                Some(close_enrollment_date_time),
                Some(begin_event_date_time),
                Some(end_event_date_time),
                Some(base_price),
                Some(max_price),
                Some(limit_of_enrollment),
            ) => Ok(EventDetails {
                name,
                description,
                begin_enrollment_date_time,
                close_enrollment_date_time,
                begin_event_date_time,
                end_event_date_time,
                location: self.location.clone(),
                base_price,
                max_price,
                limit_of_enrollment,
            }),
            _ => Err(errors),
        }
    }
}

fn zero_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or_default())
}

fn required_text(errors: &mut ValidationErrors, field: &str, value: Option<&str>) -> Option<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Some(text.to_string()),
        other => {
            errors.reject_value(field, NOT_EMPTY.0, NOT_EMPTY.1, other.map(str::to_string));
            None
        }
    }
}

fn required_timestamp(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<NaiveDateTime>,
) -> Option<NaiveDateTime> {
    if value.is_none() {
        errors.reject_value(field, NOT_NULL.0, NOT_NULL.1, None);
    }
    value
}

fn non_negative(errors: &mut ValidationErrors, field: &str, value: i32) -> Option<u32> {
    u32::try_from(value).map_or_else(
        |_| {
            errors.reject_value(field, MIN_ZERO.0, MIN_ZERO.1, Some(value.to_string()));
            None
        },
        Some,
    )
}
