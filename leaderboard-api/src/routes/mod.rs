/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `communities`: Community lookup, creation and the leaderboard
/// - `users`: User lookup, creation, experience and membership

pub mod communities;
pub mod health;
pub mod users;

use crate::error::{ApiError, ApiResult};
use uuid::Uuid;

/// Parses a path identifier, rejecting anything that is not a UUID with 400
///
/// Path segments are extracted as strings so that malformed identifiers get
/// the API's JSON error body instead of axum's plain-text rejection.
pub(crate) fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| {
        tracing::debug!(id = raw, "Rejected malformed identifier");
        ApiError::invalid_input()
    })
}
