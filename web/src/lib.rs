//! HTTP surface of the Events API.
//!
//! # Request Flow
//!
//! 1. **Correlate**: every request gets an `X-Correlation-ID` and a tracing span
//! 2. **Extract**: the body becomes an `EventInput` (strictly, if configured)
//! 3. **Create**: `EventService` validates, derives, stores and links the event
//! 4. **Respond**: 201 with a HAL document, or 400 with the error array
//!
//! # Example
//!
//! ```ignore
//! use events_web::{AppState, Config, build_router};
//! use std::sync::Arc;
//!
//! let config = Config::from_env();
//! let state = AppState::new(Arc::new(repository), config.api.clone());
//! let app = build_router(state, config.request_timeout());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use config::{ApiConfig, Config};
pub use error::AppError;
pub use extractors::{CorrelationId, EventPayload};
pub use middleware::CORRELATION_ID_HEADER;
pub use router::build_router;
pub use state::AppState;
