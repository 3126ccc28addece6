/// Ladder system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of tiers in the progression chain.
pub const TIER_COUNT: usize = 6;

/// Batch size for the daily recalculation sweep.
pub const RECALC_BATCH_SIZE: usize = 100;

/// Days without activity before the weekly sweep counts a user as inactive.
pub const INACTIVITY_CUTOFF_DAYS: i64 = 30;

/// Days without activity before a user is flagged for a dormancy notification.
pub const DORMANT_NOTIFY_DAYS: i64 = 60;

/// Percentage threshold for the promotion sweep (float-tolerant 100).
pub const PROMOTION_PERCENTAGE_THRESHOLD: f64 = 99.9;

/// Points deducted per inactivity streak.
pub const INACTIVITY_PENALTY_PER_STREAK: f64 = 10.0;

/// Hard cap on the total inactivity penalty.
pub const MAX_INACTIVITY_PENALTY: f64 = 50.0;

/// Maximum contrarian bonus added to raw accuracy.
pub const CONTRARIAN_BONUS_CAP: f64 = 10.0;

/// Entry counts for the two persisted leaderboard snapshots.
pub const LEADERBOARD_SMALL: usize = 10;
pub const LEADERBOARD_LARGE: usize = 100;
