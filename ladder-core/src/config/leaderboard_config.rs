use serde::{Deserialize, Serialize};

use super::defaults;

/// Leaderboard cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// Entry count of the small persisted snapshot.
    pub small_size: usize,
    /// Entry count of the large persisted snapshot.
    pub large_size: usize,
    /// Snapshot freshness window; stale reads force a rebuild.
    pub ttl_secs: u64,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            small_size: defaults::DEFAULT_LEADERBOARD_SMALL,
            large_size: defaults::DEFAULT_LEADERBOARD_LARGE,
            ttl_secs: defaults::DEFAULT_LEADERBOARD_TTL_SECS,
        }
    }
}
