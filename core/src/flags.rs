//! Derivation of the server-computed event fields.

use crate::event::{DerivedState, EventDetails, EventStatus, NewEvent};

/// Computes `free`, `offline` and the initial status.
///
/// - `offline`: a location is present and not blank
/// - `free`: both prices are zero
/// - `status`: always [`EventStatus::Draft`]
#[must_use]
pub fn derive_state(details: &EventDetails) -> DerivedState {
    DerivedState {
        offline: details
            .location
            .as_deref()
            .is_some_and(|location| !location.trim().is_empty()),
        free: details.base_price == 0 && details.max_price == 0,
        status: EventStatus::Draft,
    }
}

/// Builds the transient record for validated details.
#[must_use]
pub fn prepare(details: EventDetails) -> NewEvent {
    let state = derive_state(&details);
    NewEvent::new(details, state)
}
