//! Runs the sweeps on fixed intervals with whole-run retries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{error, info, warn};

use ladder_core::config::JobsConfig;
use ladder_core::errors::{JobError, LadderResult};
use ladder_core::models::JobReport;

use crate::Job;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);
const WEEK: Duration = Duration::from_secs(7 * 24 * 60 * 60);
/// The promotion sweep trails the recalculation sweep so it sees the
/// scores that sweep just wrote.
const PROMOTION_OFFSET: Duration = Duration::from_secs(30 * 60);

pub struct JobScheduler {
    recalculation: Arc<dyn Job>,
    inactivity: Arc<dyn Job>,
    promotion: Arc<dyn Job>,
    config: JobsConfig,
}

impl JobScheduler {
    pub fn new(
        recalculation: Arc<dyn Job>,
        inactivity: Arc<dyn Job>,
        promotion: Arc<dyn Job>,
        config: JobsConfig,
    ) -> Self {
        Self {
            recalculation,
            inactivity,
            promotion,
            config,
        }
    }

    /// Spawn the three recurring loops onto the current runtime.
    pub fn spawn(self) -> Vec<JoinHandle<()>> {
        vec![
            spawn_loop(self.recalculation, Duration::ZERO, DAY, self.config.clone()),
            spawn_loop(self.inactivity, Duration::ZERO, WEEK, self.config.clone()),
            spawn_loop(self.promotion, PROMOTION_OFFSET, DAY, self.config),
        ]
    }
}

fn spawn_loop(
    job: Arc<dyn Job>,
    initial_delay: Duration,
    interval: Duration,
    config: JobsConfig,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        sleep(initial_delay).await;
        loop {
            if let Err(e) = run_with_retries(job.clone(), &config).await {
                error!(job = job.name(), error = %e, "job run abandoned");
            }
            sleep(interval).await;
        }
    })
}

/// Run one job on a blocking thread, retrying whole-run failures with
/// capped exponential backoff.
pub async fn run_with_retries(job: Arc<dyn Job>, config: &JobsConfig) -> LadderResult<JobReport> {
    let mut attempt = 0;
    loop {
        let handle = {
            let job = job.clone();
            tokio::task::spawn_blocking(move || job.run())
        };
        let outcome = match handle.await {
            Ok(result) => result,
            Err(join_err) => Err(JobError::RunFailed {
                job: job.name(),
                reason: join_err.to_string(),
            }
            .into()),
        };

        match outcome {
            Ok(report) => {
                info!(job = job.name(), attempt, "job run succeeded");
                return Ok(report);
            }
            Err(e) if attempt < config.max_retries => {
                attempt += 1;
                let delay = backoff_delay(config, attempt);
                warn!(
                    job = job.name(),
                    attempt,
                    delay_secs = delay.as_secs(),
                    error = %e,
                    "job run failed, backing off"
                );
                sleep(delay).await;
            }
            Err(e) => {
                error!(job = job.name(), error = %e, "job retries exhausted");
                return Err(JobError::RetriesExhausted {
                    job: job.name(),
                    attempts: attempt,
                }
                .into());
            }
        }
    }
}

/// Delay before retry `attempt` (1-based): base doubled per attempt,
/// capped at the ceiling.
fn backoff_delay(config: &JobsConfig, attempt: u32) -> Duration {
    let exp = attempt.saturating_sub(1).min(16);
    let secs = config
        .backoff_base_secs
        .saturating_mul(1u64 << exp)
        .min(config.backoff_ceiling_secs);
    Duration::from_secs(secs)
}
