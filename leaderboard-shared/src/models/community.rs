/// Community model and database operations
///
/// A community has no member list of its own. Membership is derived from
/// `users.community_id`, and leaderboard totals are computed on every read
/// (see [`crate::leaderboard`]).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE communities (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(100) NOT NULL,
///     logo VARCHAR(512),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use leaderboard_shared::models::community::{Community, CreateCommunity};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let community = Community::create(&pool, CreateCommunity {
///     name: "Pixel Pioneers".to_string(),
///     logo: None,
/// }).await?;
///
/// let found = Community::find_by_id(&pool, community.id).await?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Community record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    /// Unique community ID (UUID v4)
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Optional logo URL
    pub logo: Option<String>,

    /// When the community was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a community
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommunity {
    /// Display name
    pub name: String,

    /// Optional logo URL
    pub logo: Option<String>,
}

impl Community {
    /// Creates a new community
    pub async fn create(pool: &PgPool, data: CreateCommunity) -> Result<Self, sqlx::Error> {
        let community = sqlx::query_as::<_, Community>(
            r#"
            INSERT INTO communities (name, logo)
            VALUES ($1, $2)
            RETURNING id, name, logo, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.logo)
        .fetch_one(pool)
        .await?;

        Ok(community)
    }

    /// Finds a community by ID
    ///
    /// # Returns
    ///
    /// The community if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let community = sqlx::query_as::<_, Community>(
            r#"
            SELECT id, name, logo, created_at
            FROM communities
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(community)
    }

    /// Lists all communities
    ///
    /// Ordered by creation time, then ID. The leaderboard's stable sort keeps
    /// this order between communities with equal totals.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let communities = sqlx::query_as::<_, Community>(
            r#"
            SELECT id, name, logo, created_at
            FROM communities
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(communities)
    }
}
