/// Database models for the community leaderboard
///
/// This module contains the stored records, their public views and their
/// PostgreSQL operations.
///
/// # Models
///
/// - `user`: User accounts, community membership and public views
/// - `community`: Communities users can join
/// - `experience`: Append-only experience point history
///
/// # Example
///
/// ```no_run
/// use leaderboard_shared::models::user::{User, CreateUser};
/// use leaderboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     email: "user@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     profile_picture: None,
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod community;
pub mod experience;
pub mod user;
