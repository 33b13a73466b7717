//! Sample events used across the test suites.

#![allow(clippy::missing_panics_doc)] // Hardcoded fixtures always parse

use chrono::{NaiveDate, NaiveDateTime};
use events_core::event::{EventDetails, NewEvent};
use events_core::flags;
use events_core::input::EventInput;
use serde_json::{Value, json};

/// 2019-05-`day` 00:11:00, the dates the sample events are scheduled around.
#[must_use]
#[allow(clippy::expect_used)]
pub fn may_2019(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2019, 5, day)
        .and_then(|date| date.and_hms_opt(0, 11, 0))
        .expect("hardcoded date should always be valid")
}

/// Request body of a valid, paid, offline event.
#[must_use]
pub fn event_json() -> Value {
    json!({
        "name": "Spring",
        "description": "REST API Development with Spring",
        "beginEnrollmentDateTime": "2019-05-16T00:11",
        "closeEnrollmentDateTime": "2019-05-16T00:11",
        "beginEventDateTime": "2019-05-16T00:11",
        "endEventDateTime": "2019-05-17T00:11",
        "basePrice": 100,
        "maxPrice": 200,
        "limitOfEnrollment": 100,
        "location": "Gangnam D2 Startup Factory"
    })
}

/// Request body violating both business rules: base price above max price
/// and an end date before the event begins.
#[must_use]
pub fn inconsistent_event_json() -> Value {
    let mut body = event_json();
    body["beginEventDateTime"] = json!("2019-05-19T00:11");
    body["basePrice"] = json!(10_000);
    body
}

/// [`event_json`] as a typed input.
#[must_use]
#[allow(clippy::expect_used)]
pub fn event_input() -> EventInput {
    serde_json::from_value(event_json()).expect("fixture should deserialize")
}

/// Details matching [`event_json`].
#[must_use]
pub fn event_details() -> EventDetails {
    EventDetails {
        name: "Spring".to_string(),
        description: "REST API Development with Spring".to_string(),
        begin_enrollment_date_time: may_2019(16),
        close_enrollment_date_time: may_2019(16),
        begin_event_date_time: may_2019(16),
        end_event_date_time: may_2019(17),
        location: Some("Gangnam D2 Startup Factory".to_string()),
        base_price: 100,
        max_price: 200,
        limit_of_enrollment: 100,
    }
}

/// Validated, derived event ready to be saved.
#[must_use]
pub fn new_event() -> NewEvent {
    flags::prepare(event_details())
}
