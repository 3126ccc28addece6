use chrono::{DateTime, Utc};

use ladder_core::models::{PromotionTrigger, RankUpgrade, UserStats};
use ladder_core::tier::Tier;

/// Build the append-only history row for a tier change without performing
/// any write. The caller persists it and mutates the user record.
pub fn prepare_upgrade(
    stats: &UserStats,
    new_tier: Tier,
    trigger: PromotionTrigger,
    now: DateTime<Utc>,
) -> RankUpgrade {
    RankUpgrade {
        user_id: stats.user_id.clone(),
        previous_tier: stats.tier,
        new_tier,
        achieved_at: now,
        percentage_at_upgrade: stats.rank_percentage,
        days_in_previous_tier: stats.days_in_tier(now),
        trigger,
    }
}
