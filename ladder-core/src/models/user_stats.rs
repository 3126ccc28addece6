use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ScoreBreakdown;
use crate::tier::Tier;

/// Per-user progression record. One row per user, owned by the store;
/// mutated by vote-resolution events, the rank service, and the batch jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub user_id: String,
    /// Account creation time. An unparsable stored value is coerced to
    /// "now" (age 0) with a logged warning, never a hard failure.
    pub created_at: DateTime<Utc>,
    pub tier: Tier,
    /// Progress toward the next tier, 0–100.
    pub rank_percentage: f64,
    /// Total predictions made (resolved or not).
    pub predictions_count: u64,
    /// Predictions whose question has resolved.
    pub resolved_count: u64,
    pub correct_count: u64,
    /// Correct votes cast against the prevailing majority.
    pub contrarian_wins: u64,
    /// Raw accuracy 0–100, recomputed on every resolution.
    pub accuracy: f64,
    /// Distinct weeks with at least one vote.
    pub weekly_activity: u64,
    /// Consecutive inactivity detections; drives the score penalty.
    pub inactivity_streaks: u64,
    /// When the user entered the current tier.
    pub tier_started_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
    /// When the rate-limited recalculation last ran. `None` until first run.
    pub last_recalculated_at: Option<DateTime<Utc>>,
    /// Breakdown persisted by the most recent recalculation.
    pub last_breakdown: Option<ScoreBreakdown>,
    /// CAS counter; the store bumps it on every successful update.
    pub version: u64,
}

impl UserStats {
    /// The record created at signup: lowest tier, zero progress.
    pub fn new(user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            created_at: now,
            tier: Tier::lowest(),
            rank_percentage: 0.0,
            predictions_count: 0,
            resolved_count: 0,
            correct_count: 0,
            contrarian_wins: 0,
            accuracy: 0.0,
            weekly_activity: 0,
            inactivity_streaks: 0,
            tier_started_at: now,
            last_active_at: now,
            last_updated_at: now,
            last_recalculated_at: None,
            last_breakdown: None,
            version: 0,
        }
    }

    /// Whole days since account creation, clamped to >= 0.
    pub fn account_age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_days().max(0)
    }

    /// Whole days since entering the current tier, clamped to >= 0.
    pub fn days_in_tier(&self, now: DateTime<Utc>) -> i64 {
        (now - self.tier_started_at).num_days().max(0)
    }

    /// Apply one resolved prediction and recompute accuracy.
    pub fn record_resolution(&mut self, was_correct: bool, was_contrarian: bool, now: DateTime<Utc>) {
        self.resolved_count += 1;
        if was_correct {
            self.correct_count += 1;
            if was_contrarian {
                self.contrarian_wins += 1;
            }
        }
        self.accuracy = self.recomputed_accuracy();
        self.last_active_at = now;
        self.last_updated_at = now;
    }

    /// Raw accuracy 0–100 from the counters; 0 when nothing has resolved.
    pub fn recomputed_accuracy(&self) -> f64 {
        if self.resolved_count == 0 {
            0.0
        } else {
            self.correct_count as f64 / self.resolved_count as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn signup_record_starts_at_the_bottom() {
        let now = Utc::now();
        let stats = UserStats::new("u1", now);
        assert_eq!(stats.tier, Tier::Novice);
        assert_eq!(stats.rank_percentage, 0.0);
        assert_eq!(stats.version, 0);
        assert!(stats.last_recalculated_at.is_none());
    }

    #[test]
    fn account_age_never_negative() {
        let now = Utc::now();
        let mut stats = UserStats::new("u1", now);
        // Clock skew: creation in the future.
        stats.created_at = now + Duration::days(3);
        assert_eq!(stats.account_age_days(now), 0);
    }

    #[test]
    fn resolution_updates_counters_and_accuracy() {
        let now = Utc::now();
        let mut stats = UserStats::new("u1", now);
        stats.record_resolution(true, true, now);
        stats.record_resolution(false, false, now);
        assert_eq!(stats.resolved_count, 2);
        assert_eq!(stats.correct_count, 1);
        assert_eq!(stats.contrarian_wins, 1);
        assert!((stats.accuracy - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn incorrect_contrarian_vote_is_not_a_win() {
        let now = Utc::now();
        let mut stats = UserStats::new("u1", now);
        stats.record_resolution(false, true, now);
        assert_eq!(stats.contrarian_wins, 0);
    }
}
