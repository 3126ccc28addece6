//! Snapshot construction. Snapshots are rebuilt whole from the store,
//! never patched in place.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use tracing::{debug, warn};

use ladder_core::config::LeaderboardConfig;
use ladder_core::errors::LadderResult;
use ladder_core::models::{LeaderboardEntry, LeaderboardSnapshot};
use ladder_core::tier::Tier;
use ladder_core::traits::IRankStore;

/// Outcome of a full rebuild across all tiers and sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebuildReport {
    /// Snapshots written to the store.
    pub written: usize,
    /// Tier/size combinations that failed; the rest were still written.
    pub failed: usize,
}

/// Build one snapshot for a tier at the requested size.
///
/// Entries are ordered by percentage descending with positions starting
/// at 1; a tier with fewer users than `size` yields a shorter list.
pub fn build_snapshot(
    store: &dyn IRankStore,
    tier: Tier,
    size: usize,
    ttl: Duration,
    now: DateTime<Utc>,
) -> LadderResult<LeaderboardSnapshot> {
    let users = store.top_by_tier(tier, size)?;
    let entries = users
        .iter()
        .enumerate()
        .map(|(idx, stats)| LeaderboardEntry {
            position: idx + 1,
            user_id: stats.user_id.clone(),
            tier,
            percentage: stats.rank_percentage,
        })
        .collect();

    // Millisecond precision matches the persisted timestamp format, so a
    // snapshot read back from the store compares equal to this one.
    let generated_at = now.trunc_subsecs(3);
    Ok(LeaderboardSnapshot {
        tier,
        size,
        entries,
        generated_at,
        expires_at: generated_at + ttl,
    })
}

/// Rebuild and persist every tier at both configured sizes.
///
/// Per-combination failures are logged and counted but do not stop the
/// sweep; the report says how much of the board is fresh.
pub fn rebuild_all(
    store: &dyn IRankStore,
    config: &LeaderboardConfig,
    now: DateTime<Utc>,
) -> RebuildReport {
    let ttl = Duration::seconds(config.ttl_secs as i64);
    let mut report = RebuildReport {
        written: 0,
        failed: 0,
    };

    for tier in Tier::ORDERED {
        for size in [config.small_size, config.large_size] {
            let outcome = build_snapshot(store, tier, size, ttl, now)
                .and_then(|snapshot| store.put_snapshot(&snapshot));
            match outcome {
                Ok(()) => report.written += 1,
                Err(e) => {
                    warn!(%tier, size, error = %e, "leaderboard snapshot rebuild failed");
                    report.failed += 1;
                }
            }
        }
    }

    debug!(
        written = report.written,
        failed = report.failed,
        "leaderboard rebuild finished"
    );
    report
}
