//! # ladder-engine
//!
//! The pure rank calculation engine. No I/O, no clocks: callers pass `now`
//! explicitly, so every result is deterministic and testable.

pub mod engine;
pub mod factors;
pub mod formula;
pub mod promotion;

pub use engine::RankEngine;
pub use formula::WeightedScore;
pub use promotion::prepare_upgrade;
