/// User model, public views and database operations
///
/// The stored [`User`] record carries the password hash and is never
/// serialized. Every endpoint returns one of the explicit views instead:
///
/// - [`UserProfile`]: public fields, returned by create/join/leave
/// - [`UserDetail`]: profile plus the private experience history and total
/// - [`UserWithTotal`]: profile summary plus total, used for listings
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     profile_picture VARCHAR(512),
///     community_id UUID,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// `community_id` has no foreign key. Joining a community that does not
/// exist is accepted; such a user never contributes to the leaderboard.
///
/// # Example
///
/// ```no_run
/// use leaderboard_shared::models::user::{User, CreateUser};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, community_id: Uuid) -> Result<(), sqlx::Error> {
/// let user = User::create(&pool, CreateUser {
///     email: "user@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     profile_picture: None,
/// }).await?;
///
/// let joined = User::set_community(&pool, user.id, community_id).await?;
/// assert_eq!(joined.unwrap().community_id, Some(community_id));
/// # Ok(())
/// # }
/// ```

use crate::leaderboard::total_experience;
use crate::models::experience::ExperienceEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Stored user record
///
/// Deliberately not `Serialize`: use [`User::profile`] to build a view.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Email address, unique across all users
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// Optional profile picture URL
    pub profile_picture: Option<String>,

    /// Community the user currently belongs to, if any
    pub community_id: Option<Uuid>,

    /// When the user was created
    pub created_at: DateTime<Utc>,

    /// When the user was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT plaintext password!)
    pub password_hash: String,

    /// Optional profile picture URL
    pub profile_picture: Option<String>,
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub profile_picture: Option<String>,
    pub community_id: Option<Uuid>,
}

/// A user together with their full experience history
///
/// This is the snapshot the leaderboard is computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserHistory {
    #[serde(flatten)]
    pub profile: UserProfile,

    pub experience_points: Vec<ExperienceEvent>,
}

/// Single-user view including the private history and its total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    #[serde(flatten)]
    pub profile: UserProfile,

    pub experience_points: Vec<ExperienceEvent>,

    pub total_experience: i64,
}

/// Listing view: a user and their total experience
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithTotal {
    pub id: Uuid,
    pub email: String,
    pub profile_picture: Option<String>,
    pub total_experience: i64,
}

impl From<UserHistory> for UserDetail {
    fn from(history: UserHistory) -> Self {
        let total_experience = total_experience(&history.experience_points);
        Self {
            profile: history.profile,
            experience_points: history.experience_points,
            total_experience,
        }
    }
}

impl From<&UserHistory> for UserWithTotal {
    fn from(history: &UserHistory) -> Self {
        Self {
            id: history.profile.id,
            email: history.profile.email.clone(),
            profile_picture: history.profile.profile_picture.clone(),
            total_experience: total_experience(&history.experience_points),
        }
    }
}

const USER_COLUMNS: &str =
    "id, email, password_hash, profile_picture, community_id, created_at, updated_at";

impl User {
    /// Builds the public view of this user
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            profile_picture: self.profile_picture.clone(),
            community_id: self.community_id,
        }
    }

    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Email already exists (unique constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, profile_picture) \
             VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(data.email)
            .bind(data.password_hash)
            .bind(data.profile_picture)
            .fetch_one(pool)
            .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Lists all users, oldest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM users ORDER BY created_at, id",
            USER_COLUMNS
        );

        let users = sqlx::query_as::<_, User>(&query).fetch_all(pool).await?;

        Ok(users)
    }

    /// Points the user at a community, replacing any previous membership
    ///
    /// The community is not checked for existence.
    ///
    /// # Returns
    ///
    /// The updated user, None if the user doesn't exist
    pub async fn set_community(
        pool: &PgPool,
        id: Uuid,
        community_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET community_id = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(community_id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Clears the user's community membership
    ///
    /// The reference is cleared whatever community it currently points at.
    ///
    /// # Returns
    ///
    /// The updated user, None if the user doesn't exist
    pub async fn clear_community(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET community_id = NULL, updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }
}
