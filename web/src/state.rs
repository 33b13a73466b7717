//! Application state for Axum handlers.

use crate::config::ApiConfig;
use events_core::{EventLinks, EventRepository, EventService, EventValidator};
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloning is cheap; clones share the repository and configuration.
#[derive(Clone)]
pub struct AppState {
    service: EventService,
    api: Arc<ApiConfig>,
}

impl AppState {
    /// Assemble the state around `repository`, with links rooted at
    /// [`ApiConfig::public_base_url`].
    #[must_use]
    pub fn new(repository: Arc<dyn EventRepository>, api: ApiConfig) -> Self {
        let links = EventLinks::new(api.public_base_url.clone());
        Self {
            service: EventService::new(EventValidator::new(), repository, links),
            api: Arc::new(api),
        }
    }

    /// The event creation pipeline.
    #[must_use]
    pub const fn service(&self) -> &EventService {
        &self.service
    }

    /// HTTP API settings.
    #[must_use]
    pub fn api(&self) -> &ApiConfig {
        &self.api
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use events_testing::InMemoryEventRepository;

    #[test]
    fn test_links_use_public_base_url() {
        let api = ApiConfig {
            public_base_url: "https://events.example.com/".to_string(),
            fail_on_unknown_properties: true,
        };
        let state = AppState::new(Arc::new(InMemoryEventRepository::new()), api);

        assert_eq!(
            state.service().links().collection(),
            "https://events.example.com/api/events"
        );
        assert!(state.api().fail_on_unknown_properties);
    }
}
