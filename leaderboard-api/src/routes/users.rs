/// User endpoints
///
/// # Endpoints
///
/// - `GET /user/` - All users with their total experience
/// - `POST /user/` - Create a user
/// - `GET /user/:id` - User with full experience history
/// - `POST /user/:id/experience` - Record an experience event
/// - `POST /user/:id/join/:community_id` - Join a community
/// - `DELETE /user/:id/leave/:community_id` - Leave a community
///
/// A user belongs to at most one community. Joining replaces any previous
/// membership; leaving clears it.

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
use chrono::{DateTime, Utc};
use leaderboard_shared::{
    leaderboard::users_with_totals,
    models::{
        experience::{ExperienceEvent, NewExperience, MAX_EVENT_POINTS, MIN_EVENT_POINTS},
        user::{CreateUser, UserDetail, UserProfile, UserWithTotal},
    },
    password,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Create user request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Plaintext password, hashed before storage
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Optional profile picture URL
    #[validate(length(max = 2048, message = "Profile picture URL must be at most 2048 characters"))]
    pub profile_picture: Option<String>,
}

/// Record experience request
#[derive(Debug, Deserialize, Validate)]
pub struct RecordExperienceRequest {
    /// Points to award (negative values are corrections)
    #[validate(range(
        min = MIN_EVENT_POINTS,
        max = MAX_EVENT_POINTS,
        message = "Points must be between -1000000000 and 1000000000"
    ))]
    pub points: i64,

    /// When the points were earned; defaults to now
    pub timestamp: Option<DateTime<Utc>>,
}

fn user_not_found() -> ApiError {
    ApiError::NotFound("User not found.".to_string())
}

/// List all users with their total experience
///
/// Users without any events report a total of 0.
///
/// # Response
///
/// ```json
/// [
///   {
///     "id": "uuid",
///     "email": "ada@example.com",
///     "profilePicture": null,
///     "totalExperience": 35
///   }
/// ]
/// ```
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserWithTotal>>> {
    let users = state.store.list_user_histories().await?;
    Ok(Json(users_with_totals(&users)))
}

/// Create a user
///
/// # Endpoint
///
/// ```text
/// POST /user/
/// Content-Type: application/json
///
/// {
///   "email": "ada@example.com",
///   "password": "correct horse",
///   "profilePicture": "https://example.com/ada.png"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body, invalid email or short password
/// - `409 Conflict`: Email already exists
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserProfile>)> {
    let Json(req) = payload?;
    req.validate()?;

    let password_hash = password::hash_password(&req.password)?;

    let user = state
        .store
        .create_user(CreateUser {
            email: req.email,
            password_hash,
            profile_picture: req.profile_picture,
        })
        .await?;

    tracing::info!(user_id = %user.id, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user with their experience history and total
///
/// # Errors
///
/// - `400 Bad Request`: `id` is not a UUID
/// - `404 Not Found`: No user with that ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserDetail>> {
    let id = parse_id(&id)?;

    let history = state
        .store
        .find_user_history(id)
        .await?
        .ok_or_else(user_not_found)?;

    Ok(Json(UserDetail::from(history)))
}

/// Record an experience event for a user
///
/// # Endpoint
///
/// ```text
/// POST /user/:id/experience
/// Content-Type: application/json
///
/// { "points": 10, "timestamp": "2025-03-01T12:00:00Z" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: `id` is not a UUID, the body is malformed, or
///   `points` is outside ±1,000,000,000
/// - `404 Not Found`: No user with that ID
pub async fn record_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RecordExperienceRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ExperienceEvent>)> {
    let user_id = parse_id(&id)?;
    let Json(req) = payload?;
    req.validate()?;

    let data = match req.timestamp {
        Some(timestamp) => NewExperience {
            points: req.points,
            timestamp,
        },
        None => NewExperience::now(req.points),
    };

    let event = state
        .store
        .append_experience(user_id, data)
        .await?
        .ok_or_else(user_not_found)?;

    tracing::debug!(user_id = %user_id, points = event.points, "Experience recorded");

    Ok((StatusCode::CREATED, Json(event)))
}

fn parse_membership_ids(user_id: &str, community_id: &str) -> ApiResult<(Uuid, Uuid)> {
    Ok((parse_id(user_id)?, parse_id(community_id)?))
}

/// Join a community
///
/// Replaces any current membership. The community itself is not looked up,
/// so joining an unknown community succeeds and the user simply stops
/// counting towards any leaderboard entry.
///
/// # Errors
///
/// - `400 Bad Request`: Either ID is not a UUID
/// - `404 Not Found`: No user with that ID
pub async fn join_community(
    State(state): State<AppState>,
    Path((user_id, community_id)): Path<(String, String)>,
) -> ApiResult<Json<UserProfile>> {
    let (user_id, community_id) = parse_membership_ids(&user_id, &community_id)?;

    let user = state
        .store
        .set_community(user_id, community_id)
        .await?
        .ok_or_else(user_not_found)?;

    tracing::info!(user_id = %user_id, community_id = %community_id, "User joined community");

    Ok(Json(user))
}

/// Leave a community
///
/// Clears the user's membership regardless of which community ID is given.
///
/// # Errors
///
/// - `400 Bad Request`: Either ID is not a UUID
/// - `404 Not Found`: No user with that ID
pub async fn leave_community(
    State(state): State<AppState>,
    Path((user_id, community_id)): Path<(String, String)>,
) -> ApiResult<Json<UserProfile>> {
    let (user_id, community_id) = parse_membership_ids(&user_id, &community_id)?;

    let user = state
        .store
        .clear_community(user_id, community_id)
        .await?
        .ok_or_else(user_not_found)?;

    tracing::info!(user_id = %user_id, community_id = %community_id, "User left community");

    Ok(Json(user))
}
