//! The event record and its lifecycle status.
//!
//! An event exists in two shapes:
//!
//! - [`NewEvent`]: validated caller input plus the derived flags, not yet stored
//! - [`Event`]: a stored event carrying the identifier its repository assigned
//!
//! The only way to obtain an [`Event`] is [`Event::persisted`], which the
//! repository implementations call exactly once per saved record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to an event when it is persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of an event.
///
/// Newly created events always start as [`EventStatus::Draft`]. The remaining
/// states exist for the stored representation only; nothing transitions into
/// them yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    /// Being prepared, not visible to participants
    Draft,
    /// Announced
    Published,
    /// Enrollment window is open
    BeganEnrollment,
    /// Enrollment window has closed
    ClosedEnrollment,
    /// The event is running
    Started,
    /// The event is over
    Ended,
}

impl EventStatus {
    /// Database string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
            Self::BeganEnrollment => "BEGAN_ENROLLMENT",
            Self::ClosedEnrollment => "CLOSED_ENROLLMENT",
            Self::Started => "STARTED",
            Self::Ended => "ENDED",
        }
    }

    /// Parse the database string representation.
    ///
    /// Returns `None` for unknown values.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DRAFT" => Some(Self::Draft),
            "PUBLISHED" => Some(Self::Published),
            "BEGAN_ENROLLMENT" => Some(Self::BeganEnrollment),
            "CLOSED_ENROLLMENT" => Some(Self::ClosedEnrollment),
            "STARTED" => Some(Self::Started),
            "ENDED" => Some(Self::Ended),
            _ => None,
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied fields of an event that passed the structural checks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    /// Event name
    pub name: String,
    /// Free text description
    pub description: String,
    /// Enrollment opens
    #[serde(with = "timestamp")]
    pub begin_enrollment_date_time: NaiveDateTime,
    /// Enrollment closes
    #[serde(with = "timestamp")]
    pub close_enrollment_date_time: NaiveDateTime,
    /// Event starts
    #[serde(with = "timestamp")]
    pub begin_event_date_time: NaiveDateTime,
    /// Event ends
    #[serde(with = "timestamp")]
    pub end_event_date_time: NaiveDateTime,
    /// Venue; `None` for online events
    pub location: Option<String>,
    /// Lowest price
    pub base_price: u32,
    /// Highest price, `0` meaning unbounded
    pub max_price: u32,
    /// Enrollment capacity
    pub limit_of_enrollment: u32,
}

/// Fields computed by the server from [`EventDetails`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DerivedState {
    /// Whether the event happens at a physical location
    pub offline: bool,
    /// Whether attending costs nothing
    pub free: bool,
    /// Lifecycle status
    pub status: EventStatus,
}

/// A validated event that has not been stored yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewEvent {
    #[serde(flatten)]
    details: EventDetails,
    #[serde(flatten)]
    state: DerivedState,
}

impl NewEvent {
    /// Combines caller fields with their derived state.
    #[must_use]
    pub const fn new(details: EventDetails, state: DerivedState) -> Self {
        Self { details, state }
    }

    /// Caller-supplied fields.
    #[must_use]
    pub const fn details(&self) -> &EventDetails {
        &self.details
    }

    /// Server-computed fields.
    #[must_use]
    pub const fn state(&self) -> &DerivedState {
        &self.state
    }
}

/// A stored event.
#[derive(Clone, Debug, Serialize)]
pub struct Event {
    id: EventId,
    #[serde(flatten)]
    details: EventDetails,
    #[serde(flatten)]
    state: DerivedState,
}

impl Event {
    /// Attaches the identifier assigned by a repository.
    #[must_use]
    pub fn persisted(id: EventId, event: NewEvent) -> Self {
        Self {
            id,
            details: event.details,
            state: event.state,
        }
    }

    /// Repository-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> EventId {
        self.id
    }

    /// Caller-supplied fields.
    #[must_use]
    pub const fn details(&self) -> &EventDetails {
        &self.details
    }

    /// Server-computed fields.
    #[must_use]
    pub const fn state(&self) -> &DerivedState {
        &self.state
    }
}

/// Serde adapters for zone-less timestamps.
///
/// Accepts `YYYY-MM-DDTHH:MM`, `YYYY-MM-DDTHH:MM:SS` and fractional seconds.
/// Writes `YYYY-MM-DDTHH:MM:SS`, followed by the fraction only when it is
/// non-zero.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
    const READ_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

    /// Render a timestamp the way it appears in JSON.
    #[must_use]
    pub fn format(value: &NaiveDateTime) -> String {
        value.format(WRITE_FORMAT).to_string()
    }

    /// Parse a timestamp in any accepted format.
    ///
    /// # Errors
    ///
    /// Returns the parser error for the most permissive format when none match.
    pub fn parse(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s, READ_FORMATS[0])
            .or_else(|_| NaiveDateTime::parse_from_str(s, READ_FORMATS[1]))
    }

    /// Serialize a timestamp.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    /// Deserialize a timestamp.
    ///
    /// # Errors
    ///
    /// Fails when the string is not a recognised timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{raw}': {e}")))
    }

    /// Adapters for optional timestamps.
    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        /// Serialize an optional timestamp.
        ///
        /// # Errors
        ///
        /// Propagates serializer errors.
        pub fn serialize<S: Serializer>(
            value: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize an optional timestamp; `null` maps to `None`.
        ///
        /// # Errors
        ///
        /// Fails when a present value is not a recognised timestamp.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| {
                    super::parse(&raw).map_err(|e| {
                        serde::de::Error::custom(format!("invalid timestamp '{raw}': {e}"))
                    })
                })
                .transpose()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 5, day)
            .unwrap()
            .and_hms_opt(hour, 11, 0)
            .unwrap()
    }

    fn details() -> EventDetails {
        EventDetails {
            name: "Spring".to_string(),
            description: "REST API Development with Spring".to_string(),
            begin_enrollment_date_time: at(16, 0),
            close_enrollment_date_time: at(16, 0),
            begin_event_date_time: at(16, 0),
            end_event_date_time: at(17, 0),
            location: None,
            base_price: 0,
            max_price: 0,
            limit_of_enrollment: 100,
        }
    }

    #[test]
    fn test_status_roundtrips_through_database_string() {
        for status in [
            EventStatus::Draft,
            EventStatus::Published,
            EventStatus::BeganEnrollment,
            EventStatus::ClosedEnrollment,
            EventStatus::Started,
            EventStatus::Ended,
        ] {
            assert_eq!(EventStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(EventStatus::parse("draft"), None);
    }

    #[test]
    fn test_status_serializes_screaming_snake_case() {
        let json = serde_json::to_value(EventStatus::ClosedEnrollment).unwrap();
        assert_eq!(json, "CLOSED_ENROLLMENT");
    }

    #[test]
    fn test_persisted_event_json_is_flat() {
        let state = DerivedState {
            offline: false,
            free: true,
            status: EventStatus::Draft,
        };
        let event = Event::persisted(EventId::new(7), NewEvent::new(details(), state));
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Spring");
        assert_eq!(json["beginEnrollmentDateTime"], "2019-05-16T00:11:00");
        assert_eq!(json["endEventDateTime"], "2019-05-17T00:11:00");
        assert_eq!(json["location"], serde_json::Value::Null);
        assert_eq!(json["limitOfEnrollment"], 100);
        assert_eq!(json["free"], true);
        assert_eq!(json["offline"], false);
        assert_eq!(json["status"], "DRAFT");
    }

    #[test]
    fn test_timestamp_accepts_minutes_precision() {
        assert_eq!(timestamp::parse("2019-05-16T00:11").unwrap(), at(16, 0));
        assert_eq!(timestamp::parse("2019-05-16T00:11:00").unwrap(), at(16, 0));
        assert_eq!(timestamp::parse("2019-05-16T00:11:00.000").unwrap(), at(16, 0));
        assert!(timestamp::parse("16/05/2019").is_err());
    }

    #[test]
    fn test_timestamp_keeps_fractional_seconds() {
        let parsed = timestamp::parse("2019-05-17T00:11:00.500").unwrap();

        assert_eq!(parsed, at(17, 0) + chrono::Duration::milliseconds(500));
        assert_eq!(timestamp::format(&parsed), "2019-05-17T00:11:00.500");
        assert_eq!(timestamp::parse(&timestamp::format(&parsed)).unwrap(), parsed);
        assert_eq!(timestamp::format(&at(17, 0)), "2019-05-17T00:11:00");
    }
}
