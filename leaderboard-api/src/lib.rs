//! # Community Leaderboard API Server Library
//!
//! This library provides the HTTP layer of the community leaderboard: users
//! collect experience points, belong to at most one community, and
//! communities are ranked by the summed points of their members.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Response middleware
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
