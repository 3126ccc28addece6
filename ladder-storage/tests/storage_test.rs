use chrono::{Duration, Utc};
use ladder_core::models::{
    LeaderboardEntry, LeaderboardSnapshot, PromotionTrigger, RankUpgrade, UserStats,
};
use ladder_core::tier::Tier;
use ladder_core::traits::IRankStore;
use ladder_storage::StorageEngine;

fn make_user(id: &str, age_days: i64) -> UserStats {
    UserStats::new(id, Utc::now() - Duration::days(age_days))
}

#[test]
fn create_and_get_round_trip() {
    let store = StorageEngine::open_in_memory().unwrap();
    let mut stats = make_user("user-a", 10);
    stats.predictions_count = 7;
    stats.rank_percentage = 42.5;
    store.create_user(&stats).unwrap();

    let loaded = store.get_user("user-a").unwrap().unwrap();
    assert_eq!(loaded.user_id, "user-a");
    assert_eq!(loaded.predictions_count, 7);
    assert_eq!(loaded.rank_percentage, 42.5);
    assert_eq!(loaded.tier, Tier::Novice);
    assert_eq!(loaded.version, 0);
}

#[test]
fn get_unknown_user_returns_none() {
    let store = StorageEngine::open_in_memory().unwrap();
    assert!(store.get_user("ghost").unwrap().is_none());
}

#[test]
fn update_bumps_version() {
    let store = StorageEngine::open_in_memory().unwrap();
    let stats = make_user("user-a", 10);
    store.create_user(&stats).unwrap();

    let mut loaded = store.get_user("user-a").unwrap().unwrap();
    loaded.rank_percentage = 50.0;
    store.update_user(&loaded).unwrap();

    let reloaded = store.get_user("user-a").unwrap().unwrap();
    assert_eq!(reloaded.version, 1);
    assert_eq!(reloaded.rank_percentage, 50.0);
}

#[test]
fn stale_version_update_is_rejected() {
    let store = StorageEngine::open_in_memory().unwrap();
    let stats = make_user("user-a", 10);
    store.create_user(&stats).unwrap();

    let first = store.get_user("user-a").unwrap().unwrap();
    let mut racing = first.clone();

    let mut winner = first;
    winner.rank_percentage = 60.0;
    store.update_user(&winner).unwrap();

    // The second writer still holds version 0.
    racing.rank_percentage = 10.0;
    let err = store.update_user(&racing).unwrap_err();
    assert!(err.is_version_conflict(), "unexpected error: {err}");

    // The winner's write survived.
    let reloaded = store.get_user("user-a").unwrap().unwrap();
    assert_eq!(reloaded.rank_percentage, 60.0);
}

#[test]
fn updating_a_missing_user_is_not_found() {
    let store = StorageEngine::open_in_memory().unwrap();
    let stats = make_user("ghost", 10);
    let err = store.update_user(&stats).unwrap_err();
    assert!(!err.is_version_conflict());
}

#[test]
fn stale_users_page_follows_the_cursor() {
    let store = StorageEngine::open_in_memory().unwrap();
    let now = Utc::now();
    // Four stale users, one fresh.
    for (id, days_inactive) in [("a", 40), ("b", 45), ("c", 50), ("d", 60), ("fresh", 1)] {
        let mut stats = make_user(id, 100);
        stats.last_active_at = now - Duration::days(days_inactive);
        store.create_user(&stats).unwrap();
    }

    let cutoff = now - Duration::days(30);
    let page1 = store.stale_users_page(cutoff, None, 2).unwrap();
    assert_eq!(
        page1.iter().map(|u| u.user_id.as_str()).collect::<Vec<_>>(),
        vec!["a", "b"]
    );

    let page2 = store
        .stale_users_page(cutoff, Some(&page1.last().unwrap().user_id), 2)
        .unwrap();
    assert_eq!(
        page2.iter().map(|u| u.user_id.as_str()).collect::<Vec<_>>(),
        vec!["c", "d"]
    );

    let page3 = store
        .stale_users_page(cutoff, Some(&page2.last().unwrap().user_id), 2)
        .unwrap();
    assert!(page3.is_empty());
}

#[test]
fn promotion_candidates_respect_threshold_and_cap() {
    let store = StorageEngine::open_in_memory().unwrap();
    for (id, pct) in [("a", 100.0), ("b", 99.95), ("c", 99.0), ("d", 100.0)] {
        let mut stats = make_user(id, 100);
        stats.rank_percentage = pct;
        store.create_user(&stats).unwrap();
    }

    let candidates = store.promotion_candidates(99.9, 10).unwrap();
    let ids: Vec<&str> = candidates.iter().map(|u| u.user_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "d", "b"]);

    let capped = store.promotion_candidates(99.9, 2).unwrap();
    assert_eq!(capped.len(), 2);
}

#[test]
fn top_by_tier_is_sorted_descending() {
    let store = StorageEngine::open_in_memory().unwrap();
    for (id, tier, pct) in [
        ("a", Tier::Analyst, 40.0),
        ("b", Tier::Analyst, 90.0),
        ("c", Tier::Analyst, 70.0),
        ("d", Tier::Novice, 95.0),
    ] {
        let mut stats = make_user(id, 100);
        stats.tier = tier;
        stats.rank_percentage = pct;
        store.create_user(&stats).unwrap();
    }

    let top = store.top_by_tier(Tier::Analyst, 10).unwrap();
    let ids: Vec<&str> = top.iter().map(|u| u.user_id.as_str()).collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
}

#[test]
fn history_appends_and_reads_in_order() {
    let store = StorageEngine::open_in_memory().unwrap();
    let now = Utc::now();
    let first = RankUpgrade {
        user_id: "user-a".to_string(),
        previous_tier: Tier::Novice,
        new_tier: Tier::Apprentice,
        achieved_at: now - Duration::days(10),
        percentage_at_upgrade: 100.0,
        days_in_previous_tier: 9,
        trigger: PromotionTrigger::Recalculation,
    };
    let second = RankUpgrade {
        user_id: "user-a".to_string(),
        previous_tier: Tier::Apprentice,
        new_tier: Tier::Analyst,
        achieved_at: now,
        percentage_at_upgrade: 100.0,
        days_in_previous_tier: 10,
        trigger: PromotionTrigger::AutoPromotion,
    };
    store.append_history(&first).unwrap();
    store.append_history(&second).unwrap();

    let history = store.history_for_user("user-a").unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].new_tier, Tier::Apprentice);
    assert_eq!(history[1].new_tier, Tier::Analyst);
    assert_eq!(history[1].trigger, PromotionTrigger::AutoPromotion);
}

#[test]
fn snapshot_round_trip() {
    let store = StorageEngine::open_in_memory().unwrap();
    let now = Utc::now();
    let snapshot = LeaderboardSnapshot {
        tier: Tier::Oracle,
        size: 10,
        entries: vec![LeaderboardEntry {
            position: 1,
            user_id: "user-a".to_string(),
            tier: Tier::Oracle,
            percentage: 88.0,
        }],
        generated_at: now,
        expires_at: now + Duration::hours(1),
    };
    store.put_snapshot(&snapshot).unwrap();

    let loaded = store.get_snapshot(Tier::Oracle, 10).unwrap().unwrap();
    assert_eq!(loaded.entries.len(), 1);
    assert_eq!(loaded.entries[0].position, 1);
    assert!(loaded.is_fresh(now));

    // Replacing the snapshot overwrites the document.
    let mut newer = snapshot.clone();
    newer.entries.clear();
    store.put_snapshot(&newer).unwrap();
    let reloaded = store.get_snapshot(Tier::Oracle, 10).unwrap().unwrap();
    assert!(reloaded.entries.is_empty());

    assert!(store.get_snapshot(Tier::Novice, 10).unwrap().is_none());
}

#[test]
fn breakdown_column_round_trips() {
    let store = StorageEngine::open_in_memory().unwrap();
    let mut stats = make_user("user-a", 10);
    stats.last_breakdown = Some(ladder_core::models::ScoreBreakdown {
        time: 100.0,
        accuracy: 20.0,
        consistency: 85.0,
        volume: 85.0,
    });
    store.create_user(&stats).unwrap();

    let loaded = store.get_user("user-a").unwrap().unwrap();
    let breakdown = loaded.last_breakdown.unwrap();
    assert_eq!(breakdown.time, 100.0);
    assert_eq!(breakdown.consistency, 85.0);
}

#[test]
fn concurrent_writers_on_distinct_users_all_land() {
    use std::sync::Arc;
    use uuid::Uuid;

    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let ids: Vec<String> = (0..8).map(|_| Uuid::new_v4().to_string()).collect();
    for id in &ids {
        store.create_user(&UserStats::new(id.clone(), Utc::now())).unwrap();
    }

    std::thread::scope(|scope| {
        for id in &ids {
            let store = store.clone();
            scope.spawn(move || {
                let mut stats = store.get_user(id).unwrap().unwrap();
                stats.rank_percentage = 25.0;
                store.update_user(&stats).unwrap();
            });
        }
    });

    for id in &ids {
        let stats = store.get_user(id).unwrap().unwrap();
        assert_eq!(stats.version, 1, "user {id}");
        assert_eq!(stats.rank_percentage, 25.0);
    }
}
