/// Presentation rules shared with leaderboard clients
///
/// The server only returns raw JSON. These helpers capture the conventions a
/// client follows when rendering that JSON and reacting to membership
/// mutations, so Rust clients (and tests) do not re-derive them.
///
/// # Cache invalidation
///
/// Clients cache two collections, keyed by [`QueryKey`]. Each
/// [`InvalidationRule`] lists the mutations that make a cached collection
/// stale. Both collections carry derived totals, so both are refetched after
/// every join or leave:
///
/// | Key           | Invalidated on |
/// |---------------|----------------|
/// | `users`       | join, leave    |
/// | `communities` | join, leave    |
///
/// # Example
///
/// ```
/// use leaderboard_shared::display::{format_points, initials, Mutation, QueryKey};
///
/// assert_eq!(
///     Mutation::Join.invalidated_keys(),
///     vec![QueryKey::Users, QueryKey::Communities]
/// );
/// assert_eq!(initials("Pixel Pioneers"), "PP");
/// assert_eq!(format_points(1234567), "1,234,567");
/// ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cached client-side collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKey {
    /// `GET /user/`
    Users,

    /// `GET /community/`
    Communities,
}

impl QueryKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKey::Users => "users",
            QueryKey::Communities => "communities",
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership mutations a client can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutation {
    /// `POST /user/:userId/join/:communityId`
    Join,

    /// `DELETE /user/:userId/leave/:communityId`
    Leave,
}

/// One cache key and the mutations that invalidate it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidationRule {
    pub key: QueryKey,
    pub invalidate_on: &'static [Mutation],
}

/// Every cache invalidation rule, in refetch order
pub const INVALIDATION_RULES: &[InvalidationRule] = &[
    InvalidationRule {
        key: QueryKey::Users,
        invalidate_on: &[Mutation::Join, Mutation::Leave],
    },
    InvalidationRule {
        key: QueryKey::Communities,
        invalidate_on: &[Mutation::Join, Mutation::Leave],
    },
];

/// Shown when a failed mutation response carried no message
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error has occurred. Please try again later.";

impl Mutation {
    /// Cache keys to refetch after this mutation succeeds
    pub fn invalidated_keys(&self) -> Vec<QueryKey> {
        INVALIDATION_RULES
            .iter()
            .filter(|rule| rule.invalidate_on.contains(self))
            .map(|rule| rule.key)
            .collect()
    }

    /// Notification text for a successful mutation
    pub fn success_message(&self) -> &'static str {
        match self {
            Mutation::Join => "Successfully joined the community",
            Mutation::Leave => "Successfully left the community",
        }
    }
}

/// Notification text for a failed mutation
///
/// `server_message` is the `message` field of the error body, if any. Only
/// a missing message falls back to the generic text; an empty or blank one
/// is shown as sent.
pub fn failure_message(server_message: Option<&str>) -> String {
    let message = server_message.unwrap_or(UNKNOWN_ERROR_MESSAGE);
    format!("Error: {}", message)
}

/// Fallback avatar text for a community without a logo
///
/// First letter of the first word, plus the first letter of the second word
/// when there is one.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .collect()
}

/// Formats points with en-US digit grouping
pub fn format_points(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
