//! Cross-field business rules that per-field constraints can not express.

use crate::errors::ValidationErrors;
use crate::event::{EventDetails, timestamp};

/// Error code for a base price above a bounded max price.
pub const WRONG_PRICES: &str = "wrongPrices";

/// Error code for an end timestamp that precedes another timestamp.
pub const WRONG_VALUE: &str = "wrongValue";

/// Business validator for event submissions.
///
/// Both rules run on every call, so one submission can yield zero, one or
/// two errors. Nothing is thrown; errors are returned.
#[derive(Clone, Copy, Debug, Default)]
pub struct EventValidator;

impl EventValidator {
    /// Creates a validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Checks price ordering and chronology.
    #[must_use]
    pub fn validate(&self, details: &EventDetails) -> ValidationErrors {
        let mut errors = ValidationErrors::for_event();

        // maxPrice == 0 means unbounded
        if details.max_price > 0 && details.base_price > details.max_price {
            errors.reject(WRONG_PRICES, "Values for prices are wrong");
        }

        let end = details.end_event_date_time;
        if end < details.begin_event_date_time
            || end < details.close_enrollment_date_time
            || end < details.begin_enrollment_date_time
        {
            errors.reject_value(
                "endEventDateTime",
                WRONG_VALUE,
                "endEventDateTime is wrong",
                Some(timestamp::format(&end)),
            );
        }

        errors
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn may(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 5, day)
            .unwrap()
            .and_hms_opt(0, 11, 0)
            .unwrap()
    }

    fn details(base_price: u32, max_price: u32) -> EventDetails {
        EventDetails {
            name: "Spring".to_string(),
            description: "REST API Development with Spring".to_string(),
            begin_enrollment_date_time: may(16),
            close_enrollment_date_time: may(16),
            begin_event_date_time: may(16),
            end_event_date_time: may(17),
            location: None,
            base_price,
            max_price,
            limit_of_enrollment: 100,
        }
    }

    #[test]
    fn test_consistent_event_has_no_errors() {
        let errors = EventValidator::new().validate(&details(100, 200));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_base_above_max_is_wrong_prices() {
        let errors = EventValidator::new().validate(&details(10_000, 200));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.global_errors()[0].code, WRONG_PRICES);
        assert_eq!(errors.global_errors()[0].object_name, "eventDto");
    }

    #[test]
    fn test_unbounded_max_price_allows_any_base() {
        let errors = EventValidator::new().validate(&details(10_000, 0));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_equal_prices_are_fine() {
        assert!(EventValidator::new().validate(&details(200, 200)).is_empty());
    }

    #[test]
    fn test_end_before_begin_event_is_wrong_value() {
        let mut event = details(100, 200);
        event.begin_event_date_time = may(19);

        let errors = EventValidator::new().validate(&event);

        assert_eq!(errors.len(), 1);
        let error = &errors.field_errors()[0];
        assert_eq!(error.field, "endEventDateTime");
        assert_eq!(error.code, WRONG_VALUE);
        assert_eq!(error.rejected_value.as_deref(), Some("2019-05-17T00:11:00"));
    }

    #[test]
    fn test_end_before_enrollment_close_is_wrong_value() {
        let mut event = details(100, 200);
        event.close_enrollment_date_time = may(18);

        let errors = EventValidator::new().validate(&event);
        assert_eq!(errors.field_errors()[0].code, WRONG_VALUE);
    }

    #[test]
    fn test_end_before_enrollment_begin_is_wrong_value() {
        let mut event = details(100, 200);
        event.begin_enrollment_date_time = may(20);

        let errors = EventValidator::new().validate(&event);
        assert_eq!(errors.field_errors()[0].field, "endEventDateTime");
    }

    #[test]
    fn test_end_equal_to_begin_is_fine() {
        let mut event = details(100, 200);
        event.end_event_date_time = may(16);

        assert!(EventValidator::new().validate(&event).is_empty());
    }

    #[test]
    fn test_both_rules_report_together() {
        let mut event = details(10_000, 200);
        event.begin_event_date_time = may(19);

        let errors = EventValidator::new().validate(&event);

        assert_eq!(errors.field_errors().len(), 1);
        assert_eq!(errors.global_errors().len(), 1);
    }
}
