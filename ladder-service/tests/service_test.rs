//! End-to-end service tests over an in-memory store.

use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};

use ladder_core::config::ServiceConfig;
use ladder_core::errors::LadderResult;
use ladder_core::models::{PromotionTrigger, RankUpgrade, UserStats};
use ladder_core::tier::Tier;
use ladder_core::traits::{IPromotionNotifier, IRankStore};
use ladder_service::{RankService, RefreshResponse};
use ladder_storage::StorageEngine;

/// Notifier that records every delivery for later assertions.
#[derive(Default)]
struct RecordingNotifier {
    promotions: Mutex<Vec<RankUpgrade>>,
    dormancies: Mutex<Vec<(String, i64)>>,
}

impl IPromotionNotifier for RecordingNotifier {
    fn promoted(&self, upgrade: &RankUpgrade) -> LadderResult<()> {
        self.promotions.lock().unwrap().push(upgrade.clone());
        Ok(())
    }

    fn dormant(&self, user_id: &str, days_inactive: i64) -> LadderResult<()> {
        self.dormancies
            .lock()
            .unwrap()
            .push((user_id.to_string(), days_inactive));
        Ok(())
    }
}

fn setup() -> (RankService, Arc<StorageEngine>, Arc<RecordingNotifier>) {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let notifier = Arc::new(RecordingNotifier::default());
    let service = RankService::new(
        store.clone(),
        notifier.clone(),
        ServiceConfig::default(),
    )
    .unwrap();
    (service, store, notifier)
}

/// A novice old and active enough that every factor scores 100.
fn perfect_novice(store: &StorageEngine, user_id: &str) -> UserStats {
    let now = Utc::now();
    let mut stats = UserStats::new(user_id, now - Duration::days(30));
    stats.predictions_count = 100;
    stats.resolved_count = 50;
    stats.correct_count = 50;
    stats.accuracy = 100.0;
    stats.weekly_activity = 50;
    store.create_user(&stats).unwrap();
    stats
}

fn middling_novice(store: &StorageEngine, user_id: &str) -> UserStats {
    let now = Utc::now();
    let mut stats = UserStats::new(user_id, now - Duration::days(2));
    stats.predictions_count = 3;
    stats.resolved_count = 2;
    stats.correct_count = 1;
    stats.accuracy = 50.0;
    stats.weekly_activity = 1;
    store.create_user(&stats).unwrap();
    stats
}

#[test]
fn second_recalculation_within_interval_is_rate_limited() {
    let (service, store, _) = setup();
    middling_novice(&store, "u1");

    service.recalculate("u1", false).unwrap();
    let err = service.recalculate("u1", false).unwrap_err();
    assert!(err.is_rate_limited());
}

#[test]
fn forced_recalculation_bypasses_the_rate_limit() {
    let (service, store, _) = setup();
    middling_novice(&store, "u1");

    service.recalculate("u1", false).unwrap();
    service.recalculate("u1", true).unwrap();
    service.recalculate("u1", true).unwrap();
}

#[test]
fn recalculation_persists_percentage_and_breakdown() {
    let (service, store, _) = setup();
    middling_novice(&store, "u1");

    let calc = service.recalculate("u1", false).unwrap();
    let stored = store.get_user("u1").unwrap().unwrap();
    assert_eq!(stored.rank_percentage, calc.percentage);
    assert_eq!(stored.last_breakdown, Some(calc.breakdown));
    assert!(stored.last_recalculated_at.is_some());
}

#[test]
fn promotion_resets_percentage_and_appends_history() {
    let (service, store, notifier) = setup();
    perfect_novice(&store, "u1");

    let calc = service.recalculate("u1", false).unwrap();
    assert!(calc.eligible_for_upgrade);

    let stored = store.get_user("u1").unwrap().unwrap();
    assert_eq!(stored.tier, Tier::Apprentice);
    assert_eq!(stored.rank_percentage, 0.0);

    let history = store.history_for_user("u1").unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].previous_tier, Tier::Novice);
    assert_eq!(history[0].new_tier, Tier::Apprentice);
    assert_eq!(history[0].trigger, PromotionTrigger::Recalculation);
    assert_eq!(history[0].percentage_at_upgrade, 100.0);

    let promotions = notifier.promotions.lock().unwrap();
    assert_eq!(promotions.len(), 1);
    assert_eq!(promotions[0].user_id, "u1");
}

#[test]
fn recalculating_unknown_user_is_not_found() {
    let (service, _, _) = setup();
    let err = service.recalculate("ghost", false).unwrap_err();
    assert!(!err.is_rate_limited());
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn resolution_hook_updates_counters_and_swallows_rate_limit() {
    let (service, store, _) = setup();
    middling_novice(&store, "u1");

    // The first resolution triggers a recalculation; the second lands
    // inside the interval and must still succeed as a counter update.
    service.on_prediction_resolved("u1", true, true).unwrap();
    service.on_prediction_resolved("u1", false, false).unwrap();

    let stored = store.get_user("u1").unwrap().unwrap();
    assert_eq!(stored.resolved_count, 4);
    assert_eq!(stored.correct_count, 2);
    assert_eq!(stored.contrarian_wins, 1);
}

#[test]
fn inactivity_penalty_lowers_the_stored_percentage() {
    let (service, store, _) = setup();
    middling_novice(&store, "u1");

    let before = service.recalculate("u1", false).unwrap().percentage;
    service.apply_inactivity_penalty("u1").unwrap();
    service.apply_inactivity_penalty("u1").unwrap();

    let stored = store.get_user("u1").unwrap().unwrap();
    assert_eq!(stored.inactivity_streaks, 2);
    assert!(stored.rank_percentage < before);
    assert!(stored.rank_percentage >= 0.0);
}

#[test]
fn status_for_unknown_user_is_none() {
    let (service, _, _) = setup();
    assert!(service.get_user_rank_status("ghost").unwrap().is_none());
}

#[test]
fn status_is_read_only() {
    let (service, store, _) = setup();
    middling_novice(&store, "u1");

    let status = service.get_user_rank_status("u1").unwrap().unwrap();
    assert!(status.calculation.percentage >= 0.0);

    let stored = store.get_user("u1").unwrap().unwrap();
    assert!(stored.last_recalculated_at.is_none());
    assert_eq!(stored.version, 0);
}

#[test]
fn refresh_maps_rate_limit_to_wait() {
    let (service, store, _) = setup();
    middling_novice(&store, "u1");

    match service.refresh("u1").unwrap() {
        RefreshResponse::Refreshed(_) => {}
        other => panic!("expected a refresh, got {other:?}"),
    }
    match service.refresh("u1").unwrap() {
        RefreshResponse::Wait { minutes } => {
            assert!(minutes >= 1 && minutes <= 60, "minutes = {minutes}");
        }
        other => panic!("expected a wait, got {other:?}"),
    }
}

#[test]
fn sweep_promotes_within_tolerance_of_full_percentage() {
    let (service, store, notifier) = setup();
    let now = Utc::now();

    // 99.6% accuracy on real counts: 0.4*100 + 0.2*99.6 + 0.2*100 +
    // 0.2*100 = 99.92, a hair short of 100 but inside the sweep band.
    let mut near = UserStats::new("near", now - Duration::days(30));
    near.predictions_count = 1000;
    near.resolved_count = 1000;
    near.correct_count = 996;
    near.accuracy = 99.6;
    near.weekly_activity = 50;
    store.create_user(&near).unwrap();

    // 99.0% accuracy lands at 99.8, below the band.
    let mut short = near.clone();
    short.user_id = "short".to_string();
    short.correct_count = 990;
    short.accuracy = 99.0;
    store.create_user(&short).unwrap();

    let calc = service.engine().calculate(&near, now);
    assert!(calc.percentage < 100.0, "got {}", calc.percentage);
    assert!(!calc.eligible_for_upgrade);

    assert!(service.promote_if_eligible("near").unwrap());
    assert!(!service.promote_if_eligible("short").unwrap());

    let promoted = store.get_user("near").unwrap().unwrap();
    assert_eq!(promoted.tier, Tier::Apprentice);
    assert_eq!(promoted.rank_percentage, 0.0);
    let history = store.history_for_user("near").unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].trigger, PromotionTrigger::AutoPromotion);
    assert_eq!(notifier.promotions.lock().unwrap().len(), 1);

    let left = store.get_user("short").unwrap().unwrap();
    assert_eq!(left.tier, Tier::Novice);
    assert!(store.history_for_user("short").unwrap().is_empty());
}

#[test]
fn override_may_move_backward_and_records_the_trigger() {
    let (service, store, _) = setup();
    let now = Utc::now();
    let mut stats = UserStats::new("u1", now - Duration::days(400));
    stats.tier = Tier::Oracle;
    stats.rank_percentage = 42.0;
    store.create_user(&stats).unwrap();

    service.override_tier("u1", Tier::Analyst).unwrap();

    let stored = store.get_user("u1").unwrap().unwrap();
    assert_eq!(stored.tier, Tier::Analyst);
    assert_eq!(stored.rank_percentage, 0.0);

    let history = store.history_for_user("u1").unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].previous_tier, Tier::Oracle);
    assert_eq!(history[0].new_tier, Tier::Analyst);
    assert_eq!(history[0].trigger, PromotionTrigger::ManualOverride);
}
