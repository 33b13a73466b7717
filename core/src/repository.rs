//! Persistence abstraction for events.
//!
//! # Implementations
//!
//! - `PostgresEventRepository` (in `events-postgres`): production storage
//! - `InMemoryEventRepository` (in `events-testing`): fast, deterministic tests
//!
//! # Dyn Compatibility
//!
//! Methods return `Pin<Box<dyn Future>>` instead of using `async fn` so the
//! service can hold an `Arc<dyn EventRepository>`.

use crate::event::{Event, EventId, NewEvent};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by repository methods.
pub type RepositoryFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, RepositoryError>> + Send + 'a>>;

/// Errors raised by a repository.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database connection or query failure.
    #[error("Database error: {0}")]
    Database(String),

    /// A stored row could not be turned back into an event.
    #[error("Corrupt record {id}: {reason}")]
    CorruptRecord {
        /// Identifier of the offending row
        id: i64,
        /// What was wrong with it
        reason: String,
    },

    /// The repository refused the operation.
    #[error("Repository unavailable: {0}")]
    Unavailable(String),
}

/// Stores events and assigns their identifiers.
///
/// Implementations must hand out each identifier at most once, also under
/// concurrent `save` calls.
pub trait EventRepository: Send + Sync {
    /// Persists `event` and returns it with its new identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when the write fails; nothing is stored then.
    fn save(&self, event: NewEvent) -> RepositoryFuture<'_, Event>;

    /// Loads a stored event.
    ///
    /// Returns `Ok(None)` when no event has that identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when the read fails.
    fn find_by_id(&self, id: EventId) -> RepositoryFuture<'_, Option<Event>>;

    /// Checks that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when it is not.
    fn ping(&self) -> RepositoryFuture<'_, ()>;
}
