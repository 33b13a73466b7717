//! HTTP request handlers.

pub mod events;
pub mod health;
pub mod index;

pub use events::create_event;
pub use health::{health_check, readiness_check};
pub use index::index;

/// Content type of hypermedia responses.
pub const HAL_JSON: &str = "application/hal+json;charset=UTF-8";
