use chrono::{DateTime, Utc};

use crate::errors::LadderResult;
use crate::models::{LeaderboardSnapshot, RankUpgrade, UserStats};
use crate::tier::Tier;

/// Persistence seam for the progression system: per-user stats with
/// compare-and-swap updates, append-only history, and snapshot documents.
pub trait IRankStore: Send + Sync {
    // --- User stats ---
    fn create_user(&self, stats: &UserStats) -> LadderResult<()>;
    fn get_user(&self, user_id: &str) -> LadderResult<Option<UserStats>>;
    /// Compare-and-swap update keyed on `stats.version`. On success the
    /// stored version is bumped by one; on a stale version the call fails
    /// with `StorageError::VersionConflict` and the caller rereads.
    fn update_user(&self, stats: &UserStats) -> LadderResult<()>;
    fn user_count(&self) -> LadderResult<usize>;

    // --- Batch queries ---
    /// Page of users ordered by user id, for the recalculation sweep.
    fn users_page(&self, offset: usize, limit: usize) -> LadderResult<Vec<UserStats>>;
    /// Cursor-paginated page of users whose `last_active_at` is before the
    /// cutoff, ordered by user id ascending. `cursor` is the last user id of
    /// the previous page; `None` starts from the beginning.
    fn stale_users_page(
        &self,
        inactive_since: DateTime<Utc>,
        cursor: Option<&str>,
        limit: usize,
    ) -> LadderResult<Vec<UserStats>>;
    /// Users whose percentage is at or above the threshold, capped.
    fn promotion_candidates(&self, min_percentage: f64, limit: usize)
        -> LadderResult<Vec<UserStats>>;
    /// Top users of one tier by percentage descending (user id breaks ties
    /// so ordering is stable).
    fn top_by_tier(&self, tier: Tier, limit: usize) -> LadderResult<Vec<UserStats>>;

    // --- Promotion history (append-only) ---
    fn append_history(&self, upgrade: &RankUpgrade) -> LadderResult<()>;
    fn history_for_user(&self, user_id: &str) -> LadderResult<Vec<RankUpgrade>>;

    // --- Leaderboard snapshots ---
    fn put_snapshot(&self, snapshot: &LeaderboardSnapshot) -> LadderResult<()>;
    fn get_snapshot(&self, tier: Tier, size: usize) -> LadderResult<Option<LeaderboardSnapshot>>;
}
