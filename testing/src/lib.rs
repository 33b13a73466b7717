//! # Events Testing
//!
//! Testing utilities and helpers for the Events API.
//!
//! This crate provides:
//! - In-memory and failing implementations of `EventRepository`
//! - Sample request bodies and records
//! - A one-line tracing setup for tests
//!
//! ## Example
//!
//! ```ignore
//! use events_testing::{InMemoryEventRepository, fixtures};
//! use events_core::{EventLinks, EventService, EventValidator};
//! use std::sync::Arc;
//!
//! #[tokio::test]
//! async fn test_create() {
//!     let repository = Arc::new(InMemoryEventRepository::new());
//!     let service = EventService::new(
//!         EventValidator::new(),
//!         repository.clone(),
//!         EventLinks::new("http://localhost"),
//!     );
//!
//!     service.create(&fixtures::event_input()).await.unwrap();
//!     assert_eq!(repository.len(), 1);
//! }
//! ```

pub mod fixtures;
pub mod repository_mocks;

// Re-export commonly used items
pub use repository_mocks::{FailingEventRepository, InMemoryEventRepository};

/// Route `tracing` output to the test writer.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}
