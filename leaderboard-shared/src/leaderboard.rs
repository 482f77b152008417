/// Experience aggregation and community ranking
///
/// Totals are never stored. Every leaderboard read takes a snapshot of all
/// communities and all users (with their histories) and runs the pure
/// functions in this module over it.
///
/// # Ranking rules
///
/// - A user's total is the plain sum of their event points.
/// - A *qualifying member* is a user with at least one experience event whose
///   community reference matches an existing community.
/// - Each community reports the sum of its qualifying members' totals and
///   the number of qualifying members.
/// - Communities without qualifying members are dropped unless
///   [`EmptyCommunityPolicy::Include`] is selected.
/// - Entries are sorted by total points, highest first, with a stable sort:
///   ties keep the order in which communities were passed in.
///
/// # Example
///
/// ```
/// use leaderboard_shared::leaderboard::{rank_communities, EmptyCommunityPolicy};
///
/// let ranking = rank_communities(&[], &[], EmptyCommunityPolicy::Drop);
/// assert!(ranking.is_empty());
/// ```

use crate::models::community::Community;
use crate::models::experience::ExperienceEvent;
use crate::models::user::{UserHistory, UserWithTotal};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// What to do with communities that have no qualifying members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyCommunityPolicy {
    /// Omit them from the leaderboard
    #[default]
    Drop,

    /// List them with zero points and zero members
    Include,
}

impl EmptyCommunityPolicy {
    /// Maps the `include empty communities` configuration flag to a policy
    pub fn from_include_flag(include_empty: bool) -> Self {
        if include_empty {
            Self::Include
        } else {
            Self::Drop
        }
    }
}

/// One ranked community
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityLeaderboardEntry {
    pub id: Uuid,
    pub name: String,
    pub logo: Option<String>,

    /// Sum of all qualifying members' totals
    pub total_community_points: i64,

    /// Number of qualifying members
    pub total_users: u64,
}

/// Sums the points of a user's experience history
///
/// Event order is irrelevant and an empty history is worth 0. The sum
/// saturates at the `i64` bounds instead of overflowing.
pub fn total_experience(events: &[ExperienceEvent]) -> i64 {
    events
        .iter()
        .fold(0i64, |total, event| total.saturating_add(event.points))
}

/// Reduces every user's history to a total, keeping the input order
pub fn users_with_totals(users: &[UserHistory]) -> Vec<UserWithTotal> {
    users.iter().map(UserWithTotal::from).collect()
}

#[derive(Default)]
struct Tally {
    points: i64,
    members: u64,
}

/// Builds the community leaderboard from a store snapshot
///
/// Users without events, without a community, or pointing at a community
/// missing from `communities` contribute nothing.
pub fn rank_communities(
    communities: &[Community],
    users: &[UserHistory],
    policy: EmptyCommunityPolicy,
) -> Vec<CommunityLeaderboardEntry> {
    let mut tallies: HashMap<Uuid, Tally> = HashMap::new();

    for user in users {
        let Some(community_id) = user.profile.community_id else {
            continue;
        };
        if user.experience_points.is_empty() {
            continue;
        }

        let tally = tallies.entry(community_id).or_default();
        tally.points = tally
            .points
            .saturating_add(total_experience(&user.experience_points));
        tally.members += 1;
    }

    let mut entries: Vec<CommunityLeaderboardEntry> = communities
        .iter()
        .filter_map(|community| {
            let (points, members) = match tallies.remove(&community.id) {
                Some(tally) => (tally.points, tally.members),
                None if policy == EmptyCommunityPolicy::Include => (0, 0),
                None => return None,
            };

            Some(CommunityLeaderboardEntry {
                id: community.id,
                name: community.name.clone(),
                logo: community.logo.clone(),
                total_community_points: points,
                total_users: members,
            })
        })
        .collect();

    // sort_by is stable
    entries.sort_by(|a, b| b.total_community_points.cmp(&a.total_community_points));

    if !tallies.is_empty() {
        tracing::debug!(
            orphaned_communities = tallies.len(),
            "Ignoring members of unknown communities"
        );
    }

    entries
}
