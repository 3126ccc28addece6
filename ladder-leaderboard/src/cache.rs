//! In-memory read-through cache in front of the persisted snapshots.
//!
//! Reads hit moka first, then the store, and only rebuild from user rows
//! when both copies are missing or stale.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use moka::sync::Cache;
use tracing::debug;

use ladder_core::config::LeaderboardConfig;
use ladder_core::errors::LadderResult;
use ladder_core::models::LeaderboardSnapshot;
use ladder_core::tier::Tier;
use ladder_core::traits::IRankStore;

use crate::builder;

/// TTL leaderboard cache keyed by tier and size.
pub struct LeaderboardCache {
    store: Arc<dyn IRankStore>,
    cache: Cache<(Tier, usize), LeaderboardSnapshot>,
    config: LeaderboardConfig,
}

impl LeaderboardCache {
    pub fn new(store: Arc<dyn IRankStore>, config: LeaderboardConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity((Tier::ORDERED.len() * 2) as u64)
            .time_to_live(StdDuration::from_secs(config.ttl_secs))
            .build();
        Self {
            store,
            cache,
            config,
        }
    }

    /// Fetch the snapshot for a tier at the given size, rebuilding it from
    /// user rows when no fresh copy exists anywhere.
    pub fn get(&self, tier: Tier, size: usize) -> LadderResult<LeaderboardSnapshot> {
        let now = Utc::now();

        if let Some(snapshot) = self.cache.get(&(tier, size)) {
            if snapshot.is_fresh(now) {
                return Ok(snapshot);
            }
            // moka's clock and the snapshot's own expiry can disagree
            // slightly; trust the snapshot.
            self.cache.invalidate(&(tier, size));
        }

        if let Some(snapshot) = self.store.get_snapshot(tier, size)? {
            if snapshot.is_fresh(now) {
                self.cache.insert((tier, size), snapshot.clone());
                return Ok(snapshot);
            }
        }

        debug!(%tier, size, "rebuilding stale leaderboard snapshot");
        let ttl = Duration::seconds(self.config.ttl_secs as i64);
        let snapshot = builder::build_snapshot(self.store.as_ref(), tier, size, ttl, now)?;
        self.store.put_snapshot(&snapshot)?;
        self.cache.insert((tier, size), snapshot.clone());
        Ok(snapshot)
    }

    /// Drop every cached snapshot; the next read goes back to the store.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladder_core::models::UserStats;
    use ladder_storage::StorageEngine;

    fn seeded_store() -> Arc<StorageEngine> {
        let store = StorageEngine::open_in_memory().unwrap();
        for (id, pct) in [("a", 30.0), ("b", 80.0)] {
            let mut stats = UserStats::new(id, Utc::now());
            stats.tier = Tier::Forecaster;
            stats.rank_percentage = pct;
            store.create_user(&stats).unwrap();
        }
        Arc::new(store)
    }

    #[test]
    fn miss_rebuilds_and_persists() {
        let store = seeded_store();
        let cache = LeaderboardCache::new(store.clone(), LeaderboardConfig::default());

        let snapshot = cache.get(Tier::Forecaster, 10).unwrap();
        assert_eq!(snapshot.entries[0].user_id, "b");

        // The rebuild wrote through to the store.
        let persisted = store.get_snapshot(Tier::Forecaster, 10).unwrap().unwrap();
        assert_eq!(persisted.entries.len(), 2);
    }

    #[test]
    fn fresh_persisted_snapshot_is_served_without_rebuild() {
        let store = seeded_store();
        let cache = LeaderboardCache::new(store.clone(), LeaderboardConfig::default());

        let first = cache.get(Tier::Forecaster, 10).unwrap();
        cache.clear();

        // A second read finds the persisted copy from the first rebuild.
        let second = cache.get(Tier::Forecaster, 10).unwrap();
        assert_eq!(first.generated_at, second.generated_at);
    }

    #[test]
    fn stale_persisted_snapshot_forces_a_rebuild() {
        let store = seeded_store();
        let cache = LeaderboardCache::new(store.clone(), LeaderboardConfig::default());

        let past = Utc::now() - Duration::hours(3);
        let stale = builder::build_snapshot(
            store.as_ref(),
            Tier::Forecaster,
            10,
            Duration::hours(1),
            past,
        )
        .unwrap();
        store.put_snapshot(&stale).unwrap();

        let served = cache.get(Tier::Forecaster, 10).unwrap();
        assert!(served.generated_at > stale.generated_at);
        assert!(served.is_fresh(Utc::now()));
    }
}
