/// Experience event model and database operations
///
/// Experience events are the raw, append-only history behind every user's
/// total experience. They are owned by exactly one user and are never
/// updated after insertion.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE experience_events (
///     id BIGSERIAL PRIMARY KEY,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     points BIGINT NOT NULL,
///     recorded_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use leaderboard_shared::models::experience::{ExperienceEvent, NewExperience};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
/// let event = ExperienceEvent::append(&pool, user_id, NewExperience::now(25)).await?;
/// println!("Recorded {} points at {}", event.points, event.timestamp);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

/// Largest award accepted for a single event
pub const MAX_EVENT_POINTS: i64 = 1_000_000_000;

/// Largest correction accepted for a single event
pub const MIN_EVENT_POINTS: i64 = -MAX_EVENT_POINTS;

/// A single timestamped point award
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEvent {
    /// Points awarded (may be negative for corrections)
    pub points: i64,

    /// When the points were awarded
    pub timestamp: DateTime<Utc>,
}

/// Input for appending an experience event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExperience {
    /// Points to award
    pub points: i64,

    /// When the points were awarded
    pub timestamp: DateTime<Utc>,
}

impl NewExperience {
    /// Creates an event stamped with the current time
    pub fn now(points: i64) -> Self {
        Self {
            points,
            timestamp: Utc::now(),
        }
    }
}

impl From<NewExperience> for ExperienceEvent {
    fn from(data: NewExperience) -> Self {
        Self {
            points: data.points,
            timestamp: data.timestamp,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ExperienceRow {
    user_id: Uuid,
    points: i64,
    recorded_at: DateTime<Utc>,
}

impl From<ExperienceRow> for ExperienceEvent {
    fn from(row: ExperienceRow) -> Self {
        Self {
            points: row.points,
            timestamp: row.recorded_at,
        }
    }
}

impl ExperienceEvent {
    /// Appends an event to a user's history
    ///
    /// # Errors
    ///
    /// Returns a foreign key violation if the user does not exist, or an
    /// error if the database connection fails.
    pub async fn append(
        pool: &PgPool,
        user_id: Uuid,
        data: NewExperience,
    ) -> Result<Self, sqlx::Error> {
        let row = sqlx::query_as::<_, ExperienceRow>(
            r#"
            INSERT INTO experience_events (user_id, points, recorded_at)
            VALUES ($1, $2, $3)
            RETURNING user_id, points, recorded_at
            "#,
        )
        .bind(user_id)
        .bind(data.points)
        .bind(data.timestamp)
        .fetch_one(pool)
        .await?;

        Ok(row.into())
    }

    /// Lists one user's events in insertion order
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ExperienceRow>(
            r#"
            SELECT user_id, points, recorded_at
            FROM experience_events
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(ExperienceEvent::from).collect())
    }

    /// Loads every event, grouped by owning user
    ///
    /// Used to build leaderboard snapshots in a single round trip.
    pub async fn list_grouped_by_user(
        pool: &PgPool,
    ) -> Result<HashMap<Uuid, Vec<Self>>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ExperienceRow>(
            r#"
            SELECT user_id, points, recorded_at
            FROM experience_events
            ORDER BY user_id, id
            "#,
        )
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<Self>> = HashMap::new();
        for row in rows {
            grouped.entry(row.user_id).or_default().push(row.into());
        }

        Ok(grouped)
    }
}
