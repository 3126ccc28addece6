use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome summary of one batch-job run, surfaced to the scheduler and logs.
///
/// Per-user failures are counted here, never retried within the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobReport {
    pub job: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    /// True when the run stopped enqueuing work because the wall-clock
    /// budget was reached; the remainder is picked up by the next run.
    pub budget_exhausted: bool,
}

impl JobReport {
    pub fn new(job: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            job: job.into(),
            started_at,
            finished_at: started_at,
            processed: 0,
            skipped: 0,
            failed: 0,
            budget_exhausted: false,
        }
    }
}
