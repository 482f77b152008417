//! # Community Leaderboard Shared Library
//!
//! Domain types, the leaderboard computation and storage used by the
//! leaderboard API server.
//!
//! ## Module Organization
//!
//! - `models`: Stored records, public views and their SQL operations
//! - `leaderboard`: Experience aggregation and community ranking
//! - `store`: Storage trait with PostgreSQL and in-memory implementations
//! - `db`: Connection pool and migrations
//! - `password`: Argon2id credential hashing
//! - `display`: Client rendering and cache invalidation rules

pub mod db;
pub mod display;
pub mod leaderboard;
pub mod models;
pub mod password;
pub mod store;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
