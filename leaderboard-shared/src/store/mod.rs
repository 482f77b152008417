/// Storage abstraction for users, communities and experience history
///
/// The HTTP layer talks to a [`LeaderboardStore`] trait object so the same
/// handlers run against PostgreSQL in production and an in-memory store in
/// tests.
///
/// # Implementations
///
/// - [`PgStore`]: PostgreSQL via sqlx (delegates to the `models` operations)
/// - [`MemoryStore`]: process-local maps behind a `tokio::sync::RwLock`
///
/// # Example
///
/// ```
/// use leaderboard_shared::store::{LeaderboardStore, MemoryStore};
/// use leaderboard_shared::models::community::CreateCommunity;
///
/// # async fn example() -> Result<(), leaderboard_shared::store::StoreError> {
/// let store = MemoryStore::new();
/// let community = store.create_community(CreateCommunity {
///     name: "Alpha".to_string(),
///     logo: None,
/// }).await?;
///
/// assert!(store.find_community(community.id).await?.is_some());
/// # Ok(())
/// # }
/// ```

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::models::community::{Community, CreateCommunity};
use crate::models::experience::{ExperienceEvent, NewExperience};
use crate::models::user::{CreateUser, UserHistory, UserProfile};
use async_trait::async_trait;
use uuid::Uuid;

/// Store error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness rule was violated (e.g. duplicate email)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Operations the leaderboard service needs from its backing store
///
/// Lookups that miss return `Ok(None)`; the caller decides whether that is a
/// 404. Membership updates touch a single user record and need no
/// transaction because community totals are never stored.
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    /// Verifies the store is reachable
    async fn ping(&self) -> StoreResult<()>;

    /// Creates a community
    async fn create_community(&self, data: CreateCommunity) -> StoreResult<Community>;

    /// Finds a community by ID
    async fn find_community(&self, id: Uuid) -> StoreResult<Option<Community>>;

    /// Lists all communities, oldest first
    async fn list_communities(&self) -> StoreResult<Vec<Community>>;

    /// Creates a user with an empty history and no community
    ///
    /// Fails with [`StoreError::Conflict`] when the email is taken.
    async fn create_user(&self, data: CreateUser) -> StoreResult<UserProfile>;

    /// Finds a user's public profile
    async fn find_user(&self, id: Uuid) -> StoreResult<Option<UserProfile>>;

    /// Finds a user including their experience history
    async fn find_user_history(&self, id: Uuid) -> StoreResult<Option<UserHistory>>;

    /// Lists every user with their experience history, oldest first
    async fn list_user_histories(&self) -> StoreResult<Vec<UserHistory>>;

    /// Appends an event to a user's history
    ///
    /// Returns None if the user doesn't exist.
    async fn append_experience(
        &self,
        user_id: Uuid,
        data: NewExperience,
    ) -> StoreResult<Option<ExperienceEvent>>;

    /// Sets the user's community, replacing any previous one
    ///
    /// The community is not required to exist. Returns None if the user
    /// doesn't exist.
    async fn set_community(
        &self,
        user_id: Uuid,
        community_id: Uuid,
    ) -> StoreResult<Option<UserProfile>>;

    /// Clears the user's community, whatever it currently is
    ///
    /// `community_id` is the community the caller asked to leave; it is not
    /// compared with the stored reference. Returns None if the user doesn't
    /// exist.
    async fn clear_community(
        &self,
        user_id: Uuid,
        community_id: Uuid,
    ) -> StoreResult<Option<UserProfile>>;
}
