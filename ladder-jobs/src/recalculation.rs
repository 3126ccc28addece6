//! Daily recalculation sweep: force-recalculates every user page by page,
//! then rebuilds the leaderboard snapshots.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use rayon::prelude::*;
use tracing::{info, warn};

use ladder_core::config::{JobsConfig, LeaderboardConfig};
use ladder_core::errors::{JobError, LadderResult};
use ladder_core::models::JobReport;
use ladder_core::traits::IRankStore;
use ladder_service::RankService;

use crate::{Job, RunningGuard};

const NAME: &str = "daily_recalculation";

enum PageOutcome {
    Processed,
    Skipped,
    Failed,
}

pub struct DailyRecalculationJob {
    service: Arc<RankService>,
    store: Arc<dyn IRankStore>,
    config: JobsConfig,
    leaderboard: LeaderboardConfig,
    is_running: AtomicBool,
}

impl DailyRecalculationJob {
    pub fn new(
        service: Arc<RankService>,
        store: Arc<dyn IRankStore>,
        config: JobsConfig,
        leaderboard: LeaderboardConfig,
    ) -> Self {
        Self {
            service,
            store,
            config,
            leaderboard,
            is_running: AtomicBool::new(false),
        }
    }

    fn sweep(&self) -> LadderResult<JobReport> {
        let started = Instant::now();
        let budget = Duration::from_secs(self.config.recalc_budget_secs);
        let skip_window = chrono::Duration::seconds(self.config.recalc_skip_secs as i64);
        let mut report = JobReport::new(NAME, Utc::now());

        let mut offset = 0;
        loop {
            // Budget stops new pages from being enqueued; a page already in
            // flight always settles, so no user is dropped mid-write.
            if started.elapsed() >= budget {
                report.budget_exhausted = true;
                break;
            }
            let page = self.store.users_page(offset, self.config.recalc_batch_size)?;
            if page.is_empty() {
                break;
            }
            offset += page.len();

            // One user per work unit; a failure is counted, never cancels
            // its siblings.
            let outcomes: Vec<PageOutcome> = page
                .par_iter()
                .map(|stats| {
                    // Users touched recently already carry a fresh score.
                    if Utc::now() - stats.last_updated_at < skip_window {
                        return PageOutcome::Skipped;
                    }
                    match self.service.recalculate(&stats.user_id, true) {
                        Ok(_) => PageOutcome::Processed,
                        Err(e) => {
                            warn!(user_id = %stats.user_id, error = %e, "recalculation failed");
                            PageOutcome::Failed
                        }
                    }
                })
                .collect();

            for outcome in outcomes {
                match outcome {
                    PageOutcome::Processed => report.processed += 1,
                    PageOutcome::Skipped => report.skipped += 1,
                    PageOutcome::Failed => report.failed += 1,
                }
            }
        }

        // Best-effort: a partial leaderboard never fails the sweep.
        let rebuild = ladder_leaderboard::rebuild_all(self.store.as_ref(), &self.leaderboard, Utc::now());
        if rebuild.failed > 0 {
            warn!(failed = rebuild.failed, "leaderboard rebuild was partial");
        }

        report.finished_at = Utc::now();
        info!(
            processed = report.processed,
            skipped = report.skipped,
            failed = report.failed,
            budget_exhausted = report.budget_exhausted,
            "daily recalculation sweep finished"
        );
        Ok(report)
    }
}

impl Job for DailyRecalculationJob {
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
