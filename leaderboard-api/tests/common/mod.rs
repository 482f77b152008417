/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - An application wired to an in-memory store
/// - Seeding helpers for communities, users and experience
/// - Request helpers returning status and parsed JSON

use axum::body::Body;
use axum::http::{Request, StatusCode};
use leaderboard_api::app::{build_router, AppState};
use leaderboard_api::config::{ApiConfig, Config, DatabaseConfig, LeaderboardConfig};
use leaderboard_shared::leaderboard::EmptyCommunityPolicy;
use leaderboard_shared::models::community::{Community, CreateCommunity};
use leaderboard_shared::models::experience::NewExperience;
use leaderboard_shared::models::user::{CreateUser, UserProfile};
use leaderboard_shared::store::{LeaderboardStore, MemoryStore};
use std::sync::Arc;
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a context with the default leaderboard policy
    pub fn new() -> Self {
        Self::with_policy(EmptyCommunityPolicy::Drop)
    }

    /// Creates a context whose leaderboard uses `policy`
    pub fn with_policy(policy: EmptyCommunityPolicy) -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), test_config(policy));
        let app = build_router(state);

        TestContext { store, app }
    }

    /// Seeds a community directly in the store
    pub async fn community(&self, name: &str) -> Community {
        self.store
            .create_community(CreateCommunity {
                name: name.to_string(),
                logo: None,
            })
            .await
            .unwrap()
    }

    /// Seeds a user directly in the store
    pub async fn user(&self, email: &str) -> UserProfile {
        self.store
            .create_user(CreateUser {
                email: email.to_string(),
                password_hash: "test_hash".to_string(), // Not used in tests
                profile_picture: None,
            })
            .await
            .unwrap()
    }

    /// Seeds a user that belongs to `community_id` and has the given events
    pub async fn member(&self, email: &str, community_id: Uuid, points: &[i64]) -> UserProfile {
        let user = self.user(email).await;
        self.award(user.id, points).await;
        self.store
            .set_community(user.id, community_id)
            .await
            .unwrap()
            .unwrap()
    }

    /// Appends one event per entry of `points`
    pub async fn award(&self, user_id: Uuid, points: &[i64]) {
        for &points in points {
            self.store
                .append_experience(user_id, NewExperience::now(points))
                .await
                .unwrap()
                .unwrap();
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send(Request::builder().method("POST").uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send(Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or_else(|_| {
                panic!("Expected JSON, got {}: {}", status, String::from_utf8_lossy(&body))
            })
        };

        (status, json)
    }
}

fn test_config(policy: EmptyCommunityPolicy) -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            production: false,
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
        },
        leaderboard: LeaderboardConfig {
            empty_communities: policy,
        },
    }
}
