//! # ladder-core
//!
//! Foundation crate for the Ladder progression system.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod telemetry;
pub mod tier;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{LadderConfig, RankConfig, TierConfig};
pub use errors::{LadderError, LadderResult, RankError, StorageError};
pub use models::{
    LeaderboardEntry, LeaderboardSnapshot, PromotionTrigger, RankCalculation, RankUpgrade,
    ScoreBreakdown, UserStats,
};
pub use tier::Tier;
