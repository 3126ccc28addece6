use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tier::Tier;

/// One row in a per-tier leaderboard snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Contiguous position starting at 1.
    pub position: usize,
    pub user_id: String,
    pub tier: Tier,
    pub percentage: f64,
}

/// A per-tier, TTL-stamped top-N snapshot. Rebuilt whole, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardSnapshot {
    pub tier: Tier,
    /// Requested snapshot size (entries may be fewer if the tier is small).
    pub size: usize,
    pub entries: Vec<LeaderboardEntry>,
    pub generated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl LeaderboardSnapshot {
    /// Whether readers may still serve this snapshot.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
