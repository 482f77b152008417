use super::{LeaderboardStore, StoreError, StoreResult};
use crate::models::community::{Community, CreateCommunity};
use crate::models::experience::{ExperienceEvent, NewExperience};
use crate::models::user::{CreateUser, User, UserHistory, UserProfile};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

struct StoredUser {
    user: User,
    experience: Vec<ExperienceEvent>,
}

impl StoredUser {
    fn history(&self) -> UserHistory {
        UserHistory {
            profile: self.user.profile(),
            experience_points: self.experience.clone(),
        }
    }
}

#[derive(Default)]
struct Inner {
    // Vecs keep insertion order, matching the created_at ordering of PgStore.
    communities: Vec<Community>,
    users: Vec<StoredUser>,
}

impl Inner {
    fn user_mut(&mut self, id: Uuid) -> Option<&mut StoredUser> {
        self.users.iter_mut().find(|stored| stored.user.id == id)
    }
}

/// In-memory store for tests and local runs without PostgreSQL
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeaderboardStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_community(&self, data: CreateCommunity) -> StoreResult<Community> {
        let community = Community {
            id: Uuid::new_v4(),
            name: data.name,
            logo: data.logo,
            created_at: Utc::now(),
        };

        self.inner.write().await.communities.push(community.clone());
        Ok(community)
    }

    async fn find_community(&self, id: Uuid) -> StoreResult<Option<Community>> {
        let inner = self.inner.read().await;
        Ok(inner.communities.iter().find(|c| c.id == id).cloned())
    }

    async fn list_communities(&self) -> StoreResult<Vec<Community>> {
        Ok(self.inner.read().await.communities.clone())
    }

    async fn create_user(&self, data: CreateUser) -> StoreResult<UserProfile> {
        let mut inner = self.inner.write().await;

        if inner.users.iter().any(|stored| stored.user.email == data.email) {
            return Err(StoreError::Conflict("Email already exists".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: data.email,
            password_hash: data.password_hash,
            profile_picture: data.profile_picture,
            community_id: None,
            created_at: now,
            updated_at: now,
        };
        let profile = user.profile();

        inner.users.push(StoredUser {
            user,
            experience: Vec::new(),
        });

        Ok(profile)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<UserProfile>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .find(|stored| stored.user.id == id)
            .map(|stored| stored.user.profile()))
    }

    async fn find_user_history(&self, id: Uuid) -> StoreResult<Option<UserHistory>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .find(|stored| stored.user.id == id)
            .map(StoredUser::history))
    }

    async fn list_user_histories(&self) -> StoreResult<Vec<UserHistory>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().map(StoredUser::history).collect())
    }

    async fn append_experience(
        &self,
        user_id: Uuid,
        data: NewExperience,
    ) -> StoreResult<Option<ExperienceEvent>> {
        let mut inner = self.inner.write().await;
        let Some(stored) = inner.user_mut(user_id) else {
            return Ok(None);
        };

        let event = ExperienceEvent::from(data);
        stored.experience.push(event.clone());
        Ok(Some(event))
    }

    async fn set_community(
        &self,
        user_id: Uuid,
        community_id: Uuid,
    ) -> StoreResult<Option<UserProfile>> {
        let mut inner = self.inner.write().await;
        Ok(inner.user_mut(user_id).map(|stored| {
            stored.user.community_id = Some(community_id);
            stored.user.updated_at = Utc::now();
            stored.user.profile()
        }))
    }

    async fn clear_community(
        &self,
        user_id: Uuid,
        _community_id: Uuid,
    ) -> StoreResult<Option<UserProfile>> {
        let mut inner = self.inner.write().await;
        Ok(inner.user_mut(user_id).map(|stored| {
            stored.user.community_id = None;
            stored.user.updated_at = Utc::now();
            stored.user.profile()
        }))
    }
}
