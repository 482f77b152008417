/// Community endpoints
///
/// # Endpoints
///
/// - `GET /community/` - Community leaderboard
/// - `POST /community/` - Create a community
/// - `GET /community/:id` - Get a single community

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::parse_id,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use leaderboard_shared::{
    leaderboard::{rank_communities, CommunityLeaderboardEntry},
    models::community::{Community, CreateCommunity},
};
use serde::Deserialize;
use validator::Validate;

/// Create community request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommunityRequest {
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Optional logo URL
    #[validate(length(max = 2048, message = "Logo URL must be at most 2048 characters"))]
    pub logo: Option<String>,
}

/// Community leaderboard
///
/// Ranks communities by the summed experience of their members, highest
/// first. Ties keep the store's community order.
///
/// # Endpoint
///
/// ```text
/// GET /community/
/// ```
///
/// # Response
///
/// ```json
/// [
///   {
///     "id": "uuid",
///     "name": "Alpha",
///     "logo": null,
///     "totalCommunityPoints": 35,
///     "totalUsers": 2
///   }
/// ]
/// ```
pub async fn community_leaderboard(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CommunityLeaderboardEntry>>> {
    let communities = state.store.list_communities().await?;
    let users = state.store.list_user_histories().await?;

    let entries = rank_communities(&communities, &users, state.empty_community_policy());

    tracing::debug!(
        communities = communities.len(),
        users = users.len(),
        ranked = entries.len(),
        "Computed community leaderboard"
    );

    Ok(Json(entries))
}

/// Create a community
///
/// # Endpoint
///
/// ```text
/// POST /community/
/// Content-Type: application/json
///
/// { "name": "Alpha Team", "logo": "https://example.com/alpha.png" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body or name outside 1-100 characters
pub async fn create_community(
    State(state): State<AppState>,
    payload: Result<Json<CreateCommunityRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Community>)> {
    let Json(req) = payload?;
    req.validate()?;

    let community = state
        .store
        .create_community(CreateCommunity {
            name: req.name,
            logo: req.logo,
        })
        .await?;

    tracing::info!(community_id = %community.id, name = %community.name, "Community created");

    Ok((StatusCode::CREATED, Json(community)))
}

/// Get a single community
///
/// # Errors
///
/// - `400 Bad Request`: `id` is not a UUID
/// - `404 Not Found`: No community with that ID
pub async fn get_community(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Community>> {
    let id = parse_id(&id)?;

    state
        .store
        .find_community(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Community not found".to_string()))
}
