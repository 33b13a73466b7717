//! The event creation pipeline.
//!
//! ```text
//! EventInput ─► check ─► EventValidator ─► derive flags ─► repository.save ─► wrap
//!                 │            │                                  │
//!                 └──── ValidationErrors (400) ───┘               └─ RepositoryError (500)
//! ```
//!
//! Nothing is persisted unless both validation stages pass.

use crate::errors::ValidationErrors;
use crate::event::Event;
use crate::flags;
use crate::hypermedia::{EventLinks, Resource};
use crate::input::EventInput;
use crate::repository::{EventRepository, RepositoryError};
use crate::validator::EventValidator;
use std::sync::Arc;
use thiserror::Error;

/// Why an event could not be created.
#[derive(Error, Debug)]
pub enum CreateEventError {
    /// The submission violated a structural constraint or a business rule.
    #[error("{0}")]
    Validation(ValidationErrors),

    /// Storing the event failed.
    #[error("Failed to persist event: {0}")]
    Persistence(#[from] RepositoryError),
}

/// A stored event ready to be returned to the caller.
#[derive(Clone, Debug)]
pub struct CreatedEvent {
    /// Address of the new event; equals the resource's `self` link
    pub location: String,
    /// The event with its navigational links
    pub resource: Resource<Event>,
}

/// Creates events: validate, derive, persist, wrap.
#[derive(Clone)]
pub struct EventService {
    validator: EventValidator,
    repository: Arc<dyn EventRepository>,
    links: EventLinks,
}

impl EventService {
    /// Assembles a service from its collaborators.
    #[must_use]
    pub fn new(
        validator: EventValidator,
        repository: Arc<dyn EventRepository>,
        links: EventLinks,
    ) -> Self {
        Self {
            validator,
            repository,
            links,
        }
    }

    /// The repository events are stored in.
    #[must_use]
    pub fn repository(&self) -> &Arc<dyn EventRepository> {
        &self.repository
    }

    /// The address builder used for responses.
    #[must_use]
    pub const fn links(&self) -> &EventLinks {
        &self.links
    }

    /// Runs the creation pipeline for one submission.
    ///
    /// Structural failures skip the business rules. Business rule failures
    /// carry every violated rule.
    ///
    /// # Errors
    ///
    /// - [`CreateEventError::Validation`] when the input is rejected
    /// - [`CreateEventError::Persistence`] when the repository fails
    pub async fn create(&self, input: &EventInput) -> Result<CreatedEvent, CreateEventError> {
        let details = input.check().map_err(|errors| {
            reject("structural", &errors);
            CreateEventError::Validation(errors)
        })?;

        self.validator.validate(&details).into_result().map_err(|errors| {
            reject("business", &errors);
            CreateEventError::Validation(errors)
        })?;

        let event = self.repository.save(flags::prepare(details)).await?;

        tracing::info!(
            event_id = %event.id(),
            name = %event.details().name,
            free = event.state().free,
            offline = event.state().offline,
            "Event created"
        );
        metrics::counter!("events.created").increment(1);

        let resource = self.links.wrap(event);
        let location = self.links.event(resource.content().id());

        Ok(CreatedEvent { location, resource })
    }
}

fn reject(reason: &'static str, errors: &ValidationErrors) {
    tracing::debug!(reason, errors = %errors, "Event submission rejected");
    metrics::counter!("events.rejected", "reason" => reason).increment(1);
}
