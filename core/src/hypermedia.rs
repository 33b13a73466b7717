//! HAL-style resources: content plus named navigational links.
//!
//! A [`Resource`] serializes as its content's fields followed by a `_links`
//! object:
//!
//! ```json
//! {
//!   "id": 1,
//!   "name": "Spring",
//!   "_links": {
//!     "self": { "href": "http://localhost:8080/api/events/1" },
//!     "query-events": { "href": "http://localhost:8080/api/events" }
//!   }
//! }
//! ```

use crate::event::{Event, EventId};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Relation name of the link addressing the resource itself.
pub const REL_SELF: &str = "self";
/// Relation name of the link to the event collection.
pub const REL_QUERY_EVENTS: &str = "query-events";
/// Relation name of the link for updating an event.
pub const REL_UPDATE_EVENT: &str = "update-event";
/// Relation name of the link to the documentation fragment.
pub const REL_PROFILE: &str = "profile";
/// Relation name used by the API index for the event collection.
pub const REL_EVENTS: &str = "events";

/// Documentation fragment describing event creation.
pub const CREATE_EVENT_PROFILE: &str = "/docs/index.html#resources-events-create";

/// Collection path of events, relative to the public base URL.
pub const EVENTS_PATH: &str = "/api/events";

/// A navigational link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Target address
    pub href: String,
}

/// Ordered set of links keyed by relation name.
///
/// Serializes as a JSON object in insertion order. Adding a relation twice
/// replaces the earlier target but keeps its position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Links {
    entries: Vec<(String, Link)>,
}

impl Links {
    /// No links.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Adds or replaces the link for `rel`.
    pub fn add(&mut self, rel: impl Into<String>, href: impl Into<String>) {
        let rel = rel.into();
        let link = Link { href: href.into() };
        match self.entries.iter_mut().find(|(existing, _)| *existing == rel) {
            Some(entry) => entry.1 = link,
            None => self.entries.push((rel, link)),
        }
    }

    /// Looks up the link for `rel`.
    #[must_use]
    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == rel)
            .map(|(_, link)| link)
    }

    /// Relation names in insertion order.
    pub fn rels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(rel, _)| rel.as_str())
    }

    /// Number of links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no links.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (rel, link) in &self.entries {
            map.serialize_entry(rel, link)?;
        }
        map.end()
    }
}

/// Content decorated with links.
#[derive(Clone, Debug, Serialize)]
pub struct Resource<T> {
    #[serde(flatten)]
    content: T,
    #[serde(rename = "_links")]
    links: Links,
}

impl<T> Resource<T> {
    /// Wraps `content` with `links`.
    #[must_use]
    pub const fn new(content: T, links: Links) -> Self {
        Self { content, links }
    }

    /// The wrapped content.
    #[must_use]
    pub const fn content(&self) -> &T {
        &self.content
    }

    /// The attached links.
    #[must_use]
    pub const fn links(&self) -> &Links {
        &self.links
    }

    /// Target of the `self` link, if any.
    #[must_use]
    pub fn self_href(&self) -> Option<&str> {
        self.links.get(REL_SELF).map(|link| link.href.as_str())
    }
}

/// Builds absolute event addresses from the public base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventLinks {
    base_url: String,
}

impl EventLinks {
    /// Uses `base_url` (scheme, host and optional port) as prefix.
    ///
    /// A trailing slash is dropped.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Address of the event collection.
    #[must_use]
    pub fn collection(&self) -> String {
        format!("{}{EVENTS_PATH}", self.base_url)
    }

    /// Address of a single event.
    #[must_use]
    pub fn event(&self, id: EventId) -> String {
        format!("{}{EVENTS_PATH}/{id}", self.base_url)
    }

    /// Wraps a freshly created event with `self`, `query-events`,
    /// `update-event` and `profile` links.
    #[must_use]
    pub fn wrap(&self, event: Event) -> Resource<Event> {
        let event_href = self.event(event.id());

        let mut links = Links::new();
        links.add(REL_SELF, event_href.clone());
        links.add(REL_QUERY_EVENTS, self.collection());
        links.add(REL_UPDATE_EVENT, event_href);
        links.add(REL_PROFILE, CREATE_EVENT_PROFILE);

        Resource::new(event, links)
    }

    /// Links of the API entry point.
    #[must_use]
    pub fn index(&self) -> Links {
        let mut links = Links::new();
        links.add(REL_EVENTS, self.collection());
        links
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::event::{DerivedState, EventDetails, EventStatus, NewEvent};
    use chrono::NaiveDate;

    fn event(id: i64) -> Event {
        let at = NaiveDate::from_ymd_opt(2019, 5, 16)
            .unwrap()
            .and_hms_opt(0, 11, 0)
            .unwrap();
        let details = EventDetails {
            name: "Spring".to_string(),
            description: "REST API Development with Spring".to_string(),
            begin_enrollment_date_time: at,
            close_enrollment_date_time: at,
            begin_event_date_time: at,
            end_event_date_time: at,
            location: Some("Seoul".to_string()),
            base_price: 100,
            max_price: 200,
            limit_of_enrollment: 100,
        };
        let state = DerivedState {
            offline: true,
            free: false,
            status: EventStatus::Draft,
        };
        Event::persisted(EventId::new(id), NewEvent::new(details, state))
    }

    #[test]
    fn test_trailing_slash_is_dropped() {
        let links = EventLinks::new("http://localhost:8080/");
        assert_eq!(links.collection(), "http://localhost:8080/api/events");
        assert_eq!(links.event(EventId::new(3)), "http://localhost:8080/api/events/3");
    }

    #[test]
    fn test_wrap_adds_links_in_order() {
        let resource = EventLinks::new("http://localhost").wrap(event(1));

        let rels: Vec<&str> = resource.links().rels().collect();
        assert_eq!(rels, vec!["self", "query-events", "update-event", "profile"]);
        assert_eq!(resource.self_href(), Some("http://localhost/api/events/1"));
        assert_eq!(
            resource.links().get(REL_UPDATE_EVENT).unwrap().href,
            "http://localhost/api/events/1"
        );
        assert_eq!(resource.content().id(), EventId::new(1));
    }

    #[test]
    fn test_resource_json_flattens_content() {
        let resource = EventLinks::new("http://localhost").wrap(event(42));
        let json = serde_json::to_value(&resource).unwrap();

        assert_eq!(json["id"], 42);
        assert_eq!(json["offline"], true);
        assert_eq!(json["_links"]["self"]["href"], "http://localhost/api/events/42");
        assert_eq!(json["_links"]["query-events"]["href"], "http://localhost/api/events");
        assert_eq!(json["_links"]["profile"]["href"], CREATE_EVENT_PROFILE);
    }

    #[test]
    fn test_links_replace_keeps_position() {
        let mut links = Links::new();
        links.add("a", "/1");
        links.add("b", "/2");
        links.add("a", "/3");

        assert_eq!(links.len(), 2);
        assert_eq!(links.rels().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(links.get("a").unwrap().href, "/3");
    }

    #[test]
    fn test_links_serialize_in_insertion_order() {
        let mut links = Links::new();
        links.add("zeta", "/z");
        links.add("alpha", "/a");

        let json = serde_json::to_string(&links).unwrap();
        assert_eq!(json, r#"{"zeta":{"href":"/z"},"alpha":{"href":"/a"}}"#);
    }
}
