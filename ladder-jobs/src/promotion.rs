//! Daily promotion sweep: re-verifies users whose stored percentage sits at
//! the top of their tier and promotes the ones that hold up.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{info, warn};

use ladder_core::config::JobsConfig;
use ladder_core::constants::PROMOTION_PERCENTAGE_THRESHOLD;
use ladder_core::errors::{JobError, LadderResult};
use ladder_core::models::JobReport;
use ladder_core::traits::IRankStore;
use ladder_service::RankService;

use crate::{Job, RunningGuard};

const NAME: &str = "daily_promotion";

pub struct DailyPromotionJob {
    service: Arc<RankService>,
    store: Arc<dyn IRankStore>,
    config: JobsConfig,
    is_running: AtomicBool,
}

impl DailyPromotionJob {
    pub fn new(service: Arc<RankService>, store: Arc<dyn IRankStore>, config: JobsConfig) -> Self {
        Self {
            service,
            store,
            config,
            is_running: AtomicBool::new(false),
        }
    }

    fn sweep(&self) -> LadderResult<JobReport> {
        let started = Instant::now();
        let budget = Duration::from_secs(self.config.promotion_budget_secs);
        let mut report = JobReport::new(NAME, Utc::now());

        // The stored percentage is only a pre-filter; eligibility is
        // re-verified against live stats before any tier change.
        let candidates = self.store.promotion_candidates(
            PROMOTION_PERCENTAGE_THRESHOLD,
            self.config.promotion_page_size,
        )?;

        for stats in &candidates {
            if started.elapsed() >= budget {
                report.budget_exhausted = true;
                break;
            }
            if stats.tier.is_terminal() {
                report.skipped += 1;
                continue;
            }
            match self.service.promote_if_eligible(&stats.user_id) {
                Ok(true) => report.processed += 1,
                Ok(false) => report.skipped += 1,
                Err(e) => {
                    warn!(user_id = %stats.user_id, error = %e, "promotion check failed");
                    report.failed += 1;
                }
            }
        }

        report.finished_at = Utc::now();
        info!(
            candidates = candidates.len(),
            promoted = report.processed,
            skipped = report.skipped,
            failed = report.failed,
            "daily promotion sweep finished"
        );
        Ok(report)
    }
}

impl Job for DailyPromotionJob {
    fn name(&self) -> &'static str {
        NAME
    }

    fn run(&self) -> LadderResult<JobReport> {
        if self
            .is_running
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(JobError::RunFailed {
                job: NAME,
                reason: "previous run still in progress".to_string(),
            }
            .into());
        }
        let _guard = RunningGuard(&self.is_running);
        self.sweep()
    }
}
