use chrono::{Duration, Utc};
use ladder_core::config::{RankConfig, RankCriteria, TierConfig};
use ladder_core::models::UserStats;
use ladder_core::tier::Tier;
use ladder_engine::RankEngine;

/// A table whose lowest tier has real floors, so every factor except time
/// can be driven to zero.
fn strict_table() -> RankConfig {
    let mut tiers = *RankConfig::standard().tiers();
    tiers[0] = TierConfig {
        tier: Tier::Novice,
        min_time_gate_days: 0,
        criteria: RankCriteria {
            min_predictions: 10,
            min_accuracy: 50.0,
            min_resolved_predictions: 5,
            min_active_weeks: 2,
            time_weight: 0.40,
            accuracy_weight: 0.20,
            consistency_weight: 0.20,
            volume_weight: 0.20,
        },
    };
    RankConfig::from_tiers(tiers)
}

fn make_stats(age_days: i64) -> UserStats {
    let now = Utc::now();
    UserStats::new("user-1", now - Duration::days(age_days))
}

// ── Time component alone ─────────────────────────────────────────────────

#[test]
fn new_account_past_gate_scores_exactly_the_time_weight() {
    let engine = RankEngine::with_config(strict_table());
    let now = Utc::now();
    // Age 10 days, apprentice gate 7 days, zero activity everywhere else.
    let stats = make_stats(10);

    let calc = engine.calculate(&stats, now);
    assert_eq!(calc.breakdown.time, 100.0);
    assert_eq!(calc.breakdown.accuracy, 0.0);
    assert_eq!(calc.breakdown.consistency, 0.0);
    assert_eq!(calc.breakdown.volume, 0.0);
    assert!((calc.percentage - 40.0).abs() < 1e-9, "got {}", calc.percentage);
    assert!(!calc.eligible_for_upgrade);
}

#[test]
fn brand_new_account_with_zero_activity_scores_above_zero() {
    // The production table has no floors at the lowest tier, so consistency
    // and volume contribute immediately even at age zero.
    let engine = RankEngine::new();
    let now = Utc::now();
    let stats = make_stats(0);

    let calc = engine.calculate(&stats, now);
    assert!(calc.percentage > 0.0);
    assert!(calc.percentage <= 100.0);
}

// ── Perfect accuracy under the resolved floor ────────────────────────────

#[test]
fn perfect_accuracy_below_resolved_floor_scores_zero_accuracy() {
    let engine = RankEngine::with_config(strict_table());
    let now = Utc::now();
    let mut stats = make_stats(100);
    stats.resolved_count = 4; // floor is 5
    stats.correct_count = 4;
    stats.accuracy = 100.0;

    let calc = engine.calculate(&stats, now);
    assert_eq!(calc.breakdown.accuracy, 0.0);
}

#[test]
fn accuracy_boundary_at_floor_minus_one() {
    let engine = RankEngine::with_config(strict_table());
    let now = Utc::now();

    let mut below = make_stats(100);
    below.resolved_count = 4;
    below.correct_count = 4;
    below.accuracy = 100.0;

    let mut at = below.clone();
    at.resolved_count = 5;
    at.correct_count = 5;

    assert_eq!(engine.calculate(&below, now).breakdown.accuracy, 0.0);
    assert!(engine.calculate(&at, now).breakdown.accuracy > 0.0);
}

// ── Deep inactivity ──────────────────────────────────────────────────────

#[test]
fn heavy_inactivity_floors_at_zero_percentage() {
    let engine = RankEngine::new();
    let now = Utc::now();
    let mut stats = make_stats(3);
    stats.inactivity_streaks = 10; // penalty caps at 50

    let calc = engine.calculate(&stats, now);
    assert!(calc.percentage >= 0.0, "got {}", calc.percentage);
}

#[test]
fn inactivity_penalty_subtracts_from_the_weighted_sum() {
    let engine = RankEngine::new();
    let now = Utc::now();

    let clean = make_stats(100);
    let mut penalized = clean.clone();
    penalized.inactivity_streaks = 2;

    let clean_pct = engine.calculate(&clean, now).percentage;
    let penalized_pct = engine.calculate(&penalized, now).percentage;
    assert!((clean_pct - penalized_pct - 20.0).abs() < 1e-9);
}

// ── Eligibility guards ───────────────────────────────────────────────────

#[test]
fn percentage_below_one_hundred_is_never_eligible() {
    let engine = RankEngine::new();
    let now = Utc::now();
    // Gate comfortably met, but accuracy at zero keeps percentage short.
    let stats = make_stats(400);

    let calc = engine.calculate(&stats, now);
    assert!(calc.percentage < 100.0);
    assert!(!calc.eligible_for_upgrade);
    assert!(calc.blockers.iter().any(|b| b.contains("percentage points")));
}

#[test]
fn promotion_target_is_exactly_one_tier_ahead() {
    let engine = RankEngine::new();
    let now = Utc::now();
    for tier in Tier::ORDERED {
        let mut stats = make_stats(1000);
        stats.tier = tier;
        let calc = engine.calculate(&stats, now);
        match tier.next() {
            Some(next) => assert_eq!(calc.next_tier, Some(next)),
            None => assert_eq!(calc.next_tier, None),
        }
    }
}
