//! Weekly inactivity sweep: finds users inactive past the cutoff, applies
//! the streak penalty, and nudges the long-dormant.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{info, warn};

use ladder_core::config::JobsConfig;
use ladder_core::constants::{DORMANT_NOTIFY_DAYS, INACTIVITY_CUTOFF_DAYS};
use ladder_core::errors::{JobError, LadderResult};
use ladder_core::models::JobReport;
use ladder_core::traits::{IPromotionNotifier, IRankStore};
use ladder_service::RankService;

use crate::{Job, RunningGuard};

const NAME: &str = "weekly_inactivity";

pub struct WeeklyInactivityJob {
    service: Arc<RankService>,
    store: Arc<dyn IRankStore>,
    notifier: Arc<dyn IPromotionNotifier>,
    config: JobsConfig,
    is_running: AtomicBool,
}

impl WeeklyInactivityJob {
    pub fn new(
        service: Arc<RankService>,
        store: Arc<dyn IRankStore>,
        notifier: Arc<dyn IPromotionNotifier>,
        config: JobsConfig,
    ) -> Self {
        Self {
            service,
            store,
            notifier,
            config,
            is_running: AtomicBool::new(false),
        }
    }

    fn sweep(&self) -> LadderResult<JobReport> {
        let started = Instant::now();
        let budget = Duration::from_secs(self.config.inactivity_budget_secs);
        let now = Utc::now();
        let cutoff = now - chrono::Duration::days(INACTIVITY_CUTOFF_DAYS);
        let mut report = JobReport::new(NAME, now);

        // Cursor pagination: penalized users stay in the stale set (the
        // penalty does not touch last_active_at), so an offset would
        // revisit them. The cursor walks user ids strictly forward.
        let mut cursor: Option<String> = None;
        'pages: loop {
            let page = self.store.stale_users_page(
                cutoff,
                cursor.as_deref(),
                self.config.inactivity_page_size,
            )?;
            let Some(last) = page.last() else {
                break;
            };
            cursor = Some(last.user_id.clone());

            for stats in &page {
                if started.elapsed() >= budget {
                    report.budget_exhausted = true;
                    break 'pages;
                }
                match self.service.apply_inactivity_penalty(&stats.user_id) {
                    Ok(()) => report.processed += 1,
                    Err(e) => {
                        warn!(user_id = %stats.user_id, error = %e, "inactivity penalty failed");
                        report.failed += 1;
                        continue;
                    }
                }

                let days_inactive = (now - stats.last_active_at).num_days();
                if days_inactive >= DORMANT_NOTIFY_DAYS {
                    // Best-effort nudge.
                    if let Err(e) = self.notifier.dormant(&stats.user_id, days_inactive) {
                        warn!(user_id = %stats.user_id, error = %e, "dormancy notification failed");
                    }
                }
            }
        }

        report.finished_at = Utc::now();
        info!(
            processed = report.processed,
            failed = report.failed,
            budget_exhausted = report.budget_exhausted,
            "weekly inactivity sweep finished"
        );
        Ok(report)
    }
}

impl Job for WeeklyInactivityJob {
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
