use super::{LeaderboardStore, StoreError, StoreResult};
use crate::db::pool::health_check;
use crate::models::community::{Community, CreateCommunity};
use crate::models::experience::{ExperienceEvent, NewExperience};
use crate::models::user::{CreateUser, User, UserHistory, UserProfile};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL-backed store
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn map_unique_violation(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let what = db_err
                .constraint()
                .filter(|c| c.contains("email"))
                .map(|_| "Email already exists".to_string())
                .unwrap_or_else(|| db_err.message().to_string());
            return StoreError::Conflict(what);
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl LeaderboardStore for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        health_check(&self.pool).await?;
        Ok(())
    }

    async fn create_community(&self, data: CreateCommunity) -> StoreResult<Community> {
        Ok(Community::create(&self.pool, data).await?)
    }

    async fn find_community(&self, id: Uuid) -> StoreResult<Option<Community>> {
        Ok(Community::find_by_id(&self.pool, id).await?)
    }

    async fn list_communities(&self) -> StoreResult<Vec<Community>> {
        Ok(Community::list(&self.pool).await?)
    }

    async fn create_user(&self, data: CreateUser) -> StoreResult<UserProfile> {
        let user = User::create(&self.pool, data)
            .await
            .map_err(map_unique_violation)?;
        Ok(user.profile())
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<UserProfile>> {
        let user = User::find_by_id(&self.pool, id).await?;
        Ok(user.map(|u| u.profile()))
    }

    async fn find_user_history(&self, id: Uuid) -> StoreResult<Option<UserHistory>> {
        let Some(user) = User::find_by_id(&self.pool, id).await? else {
            return Ok(None);
        };

        let experience_points = ExperienceEvent::list_for_user(&self.pool, id).await?;

        Ok(Some(UserHistory {
            profile: user.profile(),
            experience_points,
        }))
    }

    async fn list_user_histories(&self) -> StoreResult<Vec<UserHistory>> {
        let users = User::list(&self.pool).await?;
        let mut events = ExperienceEvent::list_grouped_by_user(&self.pool).await?;

        debug!(users = users.len(), "Loaded user histories");

        Ok(users
            .into_iter()
            .map(|user| UserHistory {
                experience_points: events.remove(&user.id).unwrap_or_default(),
                profile: user.profile(),
            })
            .collect())
    }

    async fn append_experience(
        &self,
        user_id: Uuid,
        data: NewExperience,
    ) -> StoreResult<Option<ExperienceEvent>> {
        if User::find_by_id(&self.pool, user_id).await?.is_none() {
            return Ok(None);
        }

        let event = ExperienceEvent::append(&self.pool, user_id, data).await?;
        Ok(Some(event))
    }

    async fn set_community(
        &self,
        user_id: Uuid,
        community_id: Uuid,
    ) -> StoreResult<Option<UserProfile>> {
        let user = User::set_community(&self.pool, user_id, community_id).await?;
        Ok(user.map(|u| u.profile()))
    }

    async fn clear_community(
        &self,
        user_id: Uuid,
        community_id: Uuid,
    ) -> StoreResult<Option<UserProfile>> {
        debug!(%user_id, %community_id, "Clearing community membership");
        let user = User::clear_community(&self.pool, user_id).await?;
        Ok(user.map(|u| u.profile()))
    }
}
