//! # ladder-service
//!
//! Orchestrates the pure engine against the store: rate-limited
//! recalculation, the vote-resolution hook, inactivity penalties, the
//! read-only status projection, and the admin tier override.

pub mod rate_limit;
pub mod service;
pub mod status;

pub use service::{RankService, RefreshResponse};
