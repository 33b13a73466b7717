//! `PostgreSQL` event repository for the Events API.
//!
//! This crate provides the production implementation of the `EventRepository`
//! trait from `events-core`. It uses sqlx and supports:
//!
//! - Identifier assignment through a `BIGSERIAL` sequence
//! - Connection pooling
//! - Embedded migrations
//!
//! # Example
//!
//! ```ignore
//! use events_postgres::{PoolSettings, PostgresEventRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repository =
//!         PostgresEventRepository::connect("postgres://localhost/events", &PoolSettings::default())
//!             .await?;
//!     repository.migrate().await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use chrono::NaiveDateTime;
use events_core::event::{DerivedState, Event, EventDetails, EventId, EventStatus, NewEvent};
use events_core::repository::{EventRepository, RepositoryError, RepositoryFuture};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use std::time::Duration;

const SELECT_COLUMNS: &str = r"
    id, name, description,
    begin_enrollment_date_time, close_enrollment_date_time,
    begin_event_date_time, end_event_date_time,
    location, base_price, max_price, limit_of_enrollment,
    offline, free, status
";

/// Connection pool tuning.
#[derive(Clone, Debug)]
pub struct PoolSettings {
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// How long to wait for a connection
    pub connect_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            connect_timeout: Duration::from_secs(30),
        }
    }
}

/// `PostgreSQL`-backed event repository.
///
/// Cloning is cheap; clones share the pool.
#[derive(Clone, Debug)]
pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    /// Connect to `database_url` with the given pool settings.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if the connection fails.
    pub async fn connect(database_url: &str, settings: &PoolSettings) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.connect_timeout)
            .connect(database_url)
            .await
            .map_err(|e| RepositoryError::Database(format!("Failed to connect: {e}")))?;

        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `events` table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(format!("Migration failed: {e}")))
    }

    /// Get the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn insert(&self, event: NewEvent) -> Result<Event, RepositoryError> {
        let details = event.details();
        let state = event.state();

        let id: (i64,) = sqlx::query_as(
            r"
            INSERT INTO events (
                name, description,
                begin_enrollment_date_time, close_enrollment_date_time,
                begin_event_date_time, end_event_date_time,
                location, base_price, max_price, limit_of_enrollment,
                offline, free, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            ",
        )
        .bind(&details.name)
        .bind(&details.description)
        .bind(details.begin_enrollment_date_time)
        .bind(details.close_enrollment_date_time)
        .bind(details.begin_event_date_time)
        .bind(details.end_event_date_time)
        .bind(details.location.as_deref())
        .bind(i64::from(details.base_price))
        .bind(i64::from(details.max_price))
        .bind(i64::from(details.limit_of_enrollment))
        .bind(state.offline)
        .bind(state.free)
        .bind(state.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            metrics::counter!("events.repository.save", "outcome" => "error").increment(1);
            RepositoryError::Database(e.to_string())
        })?;

        metrics::counter!("events.repository.save", "outcome" => "ok").increment(1);
        tracing::debug!(event_id = id.0, "Event row inserted");

        Ok(Event::persisted(EventId::new(id.0), event))
    }

    async fn select(&self, id: EventId) -> Result<Option<Event>, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {SELECT_COLUMNS} FROM events WHERE id = $1"))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        row.as_ref().map(row_to_event).transpose()
    }
}

fn row_to_event(row: &PgRow) -> Result<Event, RepositoryError> {
    let id: i64 = row.get("id");
    let corrupt = |reason: String| RepositoryError::CorruptRecord { id, reason };

    let status_str: String = row.get("status");
    let status = EventStatus::parse(&status_str)
        .ok_or_else(|| corrupt(format!("unknown status '{status_str}'")))?;

    let amount = |column: &str| -> Result<u32, RepositoryError> {
        let value: i64 = row.get(column);
        u32::try_from(value).map_err(|_| corrupt(format!("{column} out of range: {value}")))
    };

    let details = EventDetails {
        name: row.get("name"),
        description: row.get("description"),
        begin_enrollment_date_time: row.get::<NaiveDateTime, _>("begin_enrollment_date_time"),
        close_enrollment_date_time: row.get::<NaiveDateTime, _>("close_enrollment_date_time"),
        begin_event_date_time: row.get::<NaiveDateTime, _>("begin_event_date_time"),
        end_event_date_time: row.get::<NaiveDateTime, _>("end_event_date_time"),
        location: row.get("location"),
        base_price: amount("base_price")?,
        max_price: amount("max_price")?,
        limit_of_enrollment: amount("limit_of_enrollment")?,
    };
    let state = DerivedState {
        offline: row.get("offline"),
        free: row.get("free"),
        status,
    };

    Ok(Event::persisted(EventId::new(id), NewEvent::new(details, state)))
}

impl EventRepository for PostgresEventRepository {
    fn save(&self, event: NewEvent) -> RepositoryFuture<'_, Event> {
        Box::pin(self.insert(event))
    }

    fn find_by_id(&self, id: EventId) -> RepositoryFuture<'_, Option<Event>> {
        Box::pin(self.select(id))
    }

    fn ping(&self) -> RepositoryFuture<'_, ()> {
        Box::pin(async move {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .map(|_| ())
                .map_err(|e| RepositoryError::Unavailable(e.to_string()))
        })
    }
}
