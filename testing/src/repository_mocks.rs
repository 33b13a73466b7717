//! In-memory repository testing utilities
//!
//! Provides fast, deterministic stand-ins for the database:
//! - [`InMemoryEventRepository`]: HashMap-backed storage with sequential ids
//! - [`FailingEventRepository`]: fails every call, for error paths

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Lock poisoning only follows a panicking test

use events_core::event::{Event, EventId, NewEvent};
use events_core::repository::{EventRepository, RepositoryError, RepositoryFuture};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory event repository for fast, deterministic testing.
///
/// Identifiers come from an atomic counter starting at 1, so concurrent saves
/// never share an id.
///
/// # Example
///
/// ```
/// use events_testing::{InMemoryEventRepository, fixtures};
/// use events_core::repository::EventRepository;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repository = InMemoryEventRepository::new();
/// let event = repository.save(fixtures::new_event()).await?;
///
/// assert_eq!(event.id().value(), 1);
/// assert_eq!(repository.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<HashMap<EventId, Event>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryEventRepository {
    /// Create a new empty repository
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Number of stored events
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().unwrap().len()
    }

    /// Check if nothing was stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().unwrap().is_empty()
    }

    /// Snapshot of a stored event, for assertions
    #[must_use]
    pub fn get(&self, id: EventId) -> Option<Event> {
        self.events.read().unwrap().get(&id).cloned()
    }

    /// All stored events ordered by id
    #[must_use]
    pub fn all(&self) -> Vec<Event> {
        let mut events: Vec<Event> = self.events.read().unwrap().values().cloned().collect();
        events.sort_by_key(Event::id);
        events
    }
}

impl Default for InMemoryEventRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRepository for InMemoryEventRepository {
    fn save(&self, event: NewEvent) -> RepositoryFuture<'_, Event> {
        Box::pin(async move {
            let id = EventId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
            let event = Event::persisted(id, event);
            self.events.write().unwrap().insert(id, event.clone());
            Ok(event)
        })
    }

    fn find_by_id(&self, id: EventId) -> RepositoryFuture<'_, Option<Event>> {
        Box::pin(async move { Ok(self.get(id)) })
    }

    fn ping(&self) -> RepositoryFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }
}

/// Repository whose every call fails.
///
/// Used to exercise the persistence error path.
#[derive(Clone, Debug)]
pub struct FailingEventRepository {
    message: String,
}

impl FailingEventRepository {
    /// Fail with the given database error message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl EventRepository for FailingEventRepository {
    fn save(&self, _event: NewEvent) -> RepositoryFuture<'_, Event> {
        Box::pin(async move { Err(RepositoryError::Database(self.message.clone())) })
    }

    fn find_by_id(&self, _id: EventId) -> RepositoryFuture<'_, Option<Event>> {
        Box::pin(async move { Err(RepositoryError::Database(self.message.clone())) })
    }

    fn ping(&self) -> RepositoryFuture<'_, ()> {
        Box::pin(async move { Err(RepositoryError::Unavailable(self.message.clone())) })
    }
}
