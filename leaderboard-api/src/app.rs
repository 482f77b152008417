/// Application state and router builder
///
/// This module defines the shared application state and builds the Axum
/// router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use leaderboard_api::{app::AppState, config::Config};
/// use leaderboard_shared::store::PgStore;
/// use sqlx::PgPool;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(Arc::new(PgStore::new(pool)), config);
/// let app = leaderboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer, routes};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use leaderboard_shared::{leaderboard::EmptyCommunityPolicy, store::LeaderboardStore};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Backing store for users, communities and experience
    pub store: Arc<dyn LeaderboardStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn LeaderboardStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// How the leaderboard treats communities without qualifying members
    pub fn empty_community_policy(&self) -> EmptyCommunityPolicy {
        self.config.leaderboard.empty_communities
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Routes
///
/// ```text
/// /
/// ├── GET    /health
/// ├── /community
/// │   ├── GET    /                  # Leaderboard
/// │   ├── POST   /                  # Create community
/// │   └── GET    /:id               # Single community
/// └── /user
///     ├── GET    /                  # Users with total experience
///     ├── POST   /                  # Create user
///     ├── GET    /:id               # User with experience history
///     ├── POST   /:id/experience
///     ├── POST   /:id/join/:community_id
///     └── DELETE /:id/leave/:community_id
/// ```
///
/// Collection routes answer both with and without a trailing slash.
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Security headers
pub fn build_router(state: AppState) -> Router {
    let community_collection = get(routes::communities::community_leaderboard)
        .post(routes::communities::create_community);
    let user_collection = get(routes::users::list_users).post(routes::users::create_user);

    let api_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/community", community_collection.clone())
        .route("/community/", community_collection)
        .route("/community/:id", get(routes::communities::get_community))
        .route("/user", user_collection.clone())
        .route("/user/", user_collection)
        .route("/user/:id", get(routes::users::get_user))
        .route(
            "/user/:id/experience",
            post(routes::users::record_experience),
        )
        .route(
            "/user/:id/join/:community_id",
            post(routes::users::join_community),
        )
        .route(
            "/user/:id/leave/:community_id",
            delete(routes::users::leave_community),
        );

    let cors = build_cors(&state.config.api.cors_origins);

    api_routes
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

fn build_cors(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        // Development mode: permissive CORS
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
