//! # ladder-leaderboard
//!
//! Per-tier top-N leaderboard snapshots: a builder that rebuilds whole
//! snapshots from the store, and a read-through in-memory cache in front
//! of the persisted copies.

pub mod builder;
pub mod cache;

pub use builder::{build_snapshot, rebuild_all, RebuildReport};
pub use cache::LeaderboardCache;
