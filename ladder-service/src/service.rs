//! RankService — orchestrates the engine with rate limiting, persistence,
//! and promotion execution.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::{debug, info, warn};

use ladder_core::config::ServiceConfig;
use ladder_core::constants::PROMOTION_PERCENTAGE_THRESHOLD;
use ladder_core::errors::{LadderError, LadderResult, RankError};
use ladder_core::models::{PromotionTrigger, RankCalculation, RankStatus, RankUpgrade, UserStats};
use ladder_core::tier::Tier;
use ladder_core::traits::{IPromotionNotifier, IRankStore};
use ladder_engine::{prepare_upgrade, RankEngine};

use crate::rate_limit;
use crate::status;

/// Payload for the user-facing "refresh my rank" action: a rate-limit hit
/// becomes a wait message, never an error page.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshResponse {
    Refreshed(RankCalculation),
    Wait { minutes: i64 },
}

/// The rank service. One instance serves all users; per-user work is
/// serialized through a guard map plus the store's CAS version column.
pub struct RankService {
    store: Arc<dyn IRankStore>,
    notifier: Arc<dyn IPromotionNotifier>,
    engine: RankEngine,
    config: ServiceConfig,
    /// One mutex per user id, so a vote-resolution trigger and a sweep
    /// never interleave their read-modify-write on the same record.
    user_guards: DashMap<String, Arc<Mutex<()>>>,
}

impl RankService {
    /// Create a service over the given store and notifier. Validates the
    /// compiled-in rank table; an invalid table is a startup failure.
    pub fn new(
        store: Arc<dyn IRankStore>,
        notifier: Arc<dyn IPromotionNotifier>,
        config: ServiceConfig,
    ) -> LadderResult<Self> {
        let engine = RankEngine::new();
        engine.config().validate()?;
        Ok(Self {
            store,
            notifier,
            engine,
            config,
            user_guards: DashMap::new(),
        })
    }

    /// The engine this service scores with.
    pub fn engine(&self) -> &RankEngine {
        &self.engine
    }

    fn guard(&self, user_id: &str) -> Arc<Mutex<()>> {
        self.user_guards
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn recalc_interval(&self) -> Duration {
        Duration::seconds(self.config.recalc_interval_secs as i64)
    }

    /// Read-modify-write with bounded retries on CAS version conflicts.
    fn update_with_retry<F, T>(&self, user_id: &str, mut apply: F) -> LadderResult<T>
    where
        F: FnMut(&mut UserStats) -> LadderResult<T>,
    {
        let mut attempt = 0;
        loop {
            let mut stats = self
                .store
                .get_user(user_id)?
                .ok_or_else(|| LadderError::not_found(user_id))?;
            let out = apply(&mut stats)?;
            match self.store.update_user(&stats) {
                Ok(()) => return Ok(out),
                Err(e) if e.is_version_conflict() && attempt < self.config.cas_retry_limit => {
                    attempt += 1;
                    debug!(user_id, attempt, "version conflict, retrying update");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Recalculate one user's rank and execute any resulting promotion.
    ///
    /// Unless `force` is set, at most one recalculation per user per
    /// configured interval; a violation returns
    /// [`RankError::RateLimited`] carrying the next-allowed time.
    pub fn recalculate(&self, user_id: &str, force: bool) -> LadderResult<RankCalculation> {
        let guard = self.guard(user_id);
        let _held = guard.lock().unwrap_or_else(|e| e.into_inner());
        let now = Utc::now();

        let interval = self.recalc_interval();
        let engine = &self.engine;
        let result: (RankCalculation, Option<RankUpgrade>) =
            self.update_with_retry(user_id, |stats| {
                if !force {
                    if let Err(retry_at) =
                        rate_limit::check(stats.last_recalculated_at, interval, now)
                    {
                        return Err(RankError::RateLimited { retry_at }.into());
                    }
                }

                let calc = engine.calculate(stats, now);
                stats.rank_percentage = calc.percentage;
                stats.last_breakdown = Some(calc.breakdown);
                stats.last_recalculated_at = Some(now);
                stats.last_updated_at = now;

                let upgrade = match (calc.eligible_for_upgrade, calc.next_tier) {
                    (true, Some(next)) => {
                        let upgrade =
                            prepare_upgrade(stats, next, PromotionTrigger::Recalculation, now);
                        stats.tier = next;
                        stats.rank_percentage = 0.0;
                        stats.tier_started_at = now;
                        Some(upgrade)
                    }
                    _ => None,
                };
                Ok((calc, upgrade))
            })?;

        let (calc, upgrade) = result;
        if let Some(upgrade) = upgrade {
            self.store.append_history(&upgrade)?;
            info!(
                user_id,
                from = %upgrade.previous_tier,
                to = %upgrade.new_tier,
                "user promoted"
            );
            // Best-effort: delivery problems never block the promotion.
            if let Err(e) = self.notifier.promoted(&upgrade) {
                warn!(user_id, error = %e, "promotion notification failed");
            }
        }
        Ok(calc)
    }

    /// Vote-resolution hook: update the counters, then attempt a non-forced
    /// recalculation. A rate-limit hit here is a legitimate no-op.
    pub fn on_prediction_resolved(
        &self,
        user_id: &str,
        was_correct: bool,
        was_contrarian: bool,
    ) -> LadderResult<()> {
        {
            let guard = self.guard(user_id);
            let _held = guard.lock().unwrap_or_else(|e| e.into_inner());
            let now = Utc::now();
            self.update_with_retry(user_id, |stats| {
                stats.record_resolution(was_correct, was_contrarian, now);
                Ok(())
            })?;
        }

        match self.recalculate(user_id, false) {
            Ok(_) => Ok(()),
            Err(e) if e.is_rate_limited() => {
                debug!(user_id, "recalculation rate limited after resolution");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Increment the inactivity streak and force-recalculate so the penalty
    /// takes effect immediately, bypassing the rate limit.
    pub fn apply_inactivity_penalty(&self, user_id: &str) -> LadderResult<()> {
        {
            let guard = self.guard(user_id);
            let _held = guard.lock().unwrap_or_else(|e| e.into_inner());
            self.update_with_retry(user_id, |stats| {
                stats.inactivity_streaks += 1;
                stats.last_updated_at = Utc::now();
                Ok(())
            })?;
        }
        self.recalculate(user_id, true)?;
        Ok(())
    }

    /// Promotion-sweep path: re-verify eligibility against live stats and
    /// promote with the auto-promotion trigger. Returns whether a promotion
    /// happened. Does not stamp `last_recalculated_at`, so the user's own
    /// refresh budget is untouched.
    ///
    /// The sweep promotes from [`PROMOTION_PERCENTAGE_THRESHOLD`] up, not
    /// from exactly 100: a table whose weights land a hair short of 100
    /// must not strand users. The next tier's time gate still binds.
    pub fn promote_if_eligible(&self, user_id: &str) -> LadderResult<bool> {
        let guard = self.guard(user_id);
        let _held = guard.lock().unwrap_or_else(|e| e.into_inner());
        let now = Utc::now();

        let engine = &self.engine;
        let upgrade = self.update_with_retry(user_id, |stats| {
            let calc = engine.calculate(stats, now);
            stats.rank_percentage = calc.percentage;
            stats.last_breakdown = Some(calc.breakdown);
            stats.last_updated_at = now;

            match calc.next_tier {
                Some(next)
                    if calc.percentage >= PROMOTION_PERCENTAGE_THRESHOLD
                        && stats.account_age_days(now)
                            >= engine.config().config_for(next).min_time_gate_days =>
                {
                    let upgrade =
                        prepare_upgrade(stats, next, PromotionTrigger::AutoPromotion, now);
                    stats.tier = next;
                    stats.rank_percentage = 0.0;
                    stats.tier_started_at = now;
                    Ok(Some(upgrade))
                }
                _ => Ok(None),
            }
        })?;

        let Some(upgrade) = upgrade else {
            return Ok(false);
        };
        self.store.append_history(&upgrade)?;
        info!(
            user_id,
            from = %upgrade.previous_tier,
            to = %upgrade.new_tier,
            "user auto-promoted"
        );
        if let Err(e) = self.notifier.promoted(&upgrade) {
            warn!(user_id, error = %e, "promotion notification failed");
        }
        Ok(true)
    }

    /// Read-only projection: stats, a fresh calculation, and the days-to-
    /// next-tier estimate. `Ok(None)` for unknown users; nothing persists.
    pub fn get_user_rank_status(&self, user_id: &str) -> LadderResult<Option<RankStatus>> {
        let Some(stats) = self.store.get_user(user_id)? else {
            return Ok(None);
        };
        let now = Utc::now();
        let calculation = self.engine.calculate(&stats, now);
        let estimated = status::estimated_days_to_next_tier(
            calculation.percentage,
            stats.days_in_tier(now),
        );
        Ok(Some(RankStatus {
            stats,
            calculation,
            estimated_days_to_next_tier: estimated,
        }))
    }

    /// User-triggered refresh: same rate limit as the internal rule, but a
    /// violation becomes a friendly wait payload instead of an error.
    pub fn refresh(&self, user_id: &str) -> LadderResult<RefreshResponse> {
        match self.recalculate(user_id, false) {
            Ok(calc) => Ok(RefreshResponse::Refreshed(calc)),
            Err(LadderError::Rank(RankError::RateLimited { retry_at })) => {
                let minutes = wait_minutes(retry_at, Utc::now());
                Ok(RefreshResponse::Wait { minutes })
            }
            Err(e) => Err(e),
        }
    }

    /// Out-of-band admin override. The only path that may move a user
    /// backward or skip tiers; records a manual-override history row.
    pub fn override_tier(&self, user_id: &str, new_tier: Tier) -> LadderResult<()> {
        let guard = self.guard(user_id);
        let _held = guard.lock().unwrap_or_else(|e| e.into_inner());
        let now = Utc::now();

        let upgrade = self.update_with_retry(user_id, |stats| {
            let upgrade = prepare_upgrade(stats, new_tier, PromotionTrigger::ManualOverride, now);
            stats.tier = new_tier;
            stats.rank_percentage = 0.0;
            stats.tier_started_at = now;
            stats.last_updated_at = now;
            Ok(upgrade)
        })?;

        self.store.append_history(&upgrade)?;
        info!(
            user_id,
            from = %upgrade.previous_tier,
            to = %upgrade.new_tier,
            "manual tier override"
        );
        Ok(())
    }
}

/// Whole minutes until the retry time, rounded up, never below 1.
fn wait_minutes(retry_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let secs = (retry_at - now).num_seconds().max(0);
    ((secs + 59) / 60).max(1)
}
