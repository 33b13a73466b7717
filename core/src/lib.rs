//! # Events Core
//!
//! Domain model and creation pipeline for the Events API.
//!
//! ## Pipeline
//!
//! 1. **Structural constraints**: [`EventInput::check`] (required fields, non-negative numbers)
//! 2. **Business rules**: [`EventValidator`] (price ordering, chronology)
//! 3. **Derivation**: [`flags::derive_state`] (`free`, `offline`, `DRAFT`)
//! 4. **Persistence**: an [`EventRepository`] assigns the identifier
//! 5. **Hypermedia**: [`EventLinks::wrap`] adds `self`, `query-events`, `update-event`, `profile`
//!
//! [`EventService`] runs all five in order. Both validation stages report into
//! one [`ValidationErrors`] type, rendered for HTTP by [`to_error_json`].
//!
//! ## Example
//!
//! ```ignore
//! use events_core::{EventLinks, EventService, EventValidator};
//! use std::sync::Arc;
//!
//! let service = EventService::new(
//!     EventValidator::new(),
//!     Arc::new(repository),
//!     EventLinks::new("http://localhost:8080"),
//! );
//! let created = service.create(&input).await?;
//! println!("created at {}", created.location);
//! ```

pub mod errors;
pub mod event;
pub mod flags;
pub mod hypermedia;
pub mod input;
pub mod repository;
pub mod service;
pub mod validator;

// Re-export commonly used types
pub use errors::{FieldError, GlobalError, ValidationErrors, to_error_json};
pub use event::{DerivedState, Event, EventDetails, EventId, EventStatus, NewEvent};
pub use hypermedia::{EventLinks, Link, Links, Resource};
pub use input::EventInput;
pub use repository::{EventRepository, RepositoryError, RepositoryFuture};
pub use service::{CreateEventError, CreatedEvent, EventService};
pub use validator::EventValidator;
