use serde::{Deserialize, Serialize};

use super::defaults;

/// Batch-job configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobsConfig {
    /// Users per page in the daily recalculation sweep.
    pub recalc_batch_size: usize,
    /// Skip users updated within this many seconds.
    pub recalc_skip_secs: u64,
    /// Wall-clock budget for the recalculation sweep.
    pub recalc_budget_secs: u64,
    /// Users per page in the weekly inactivity sweep.
    pub inactivity_page_size: usize,
    pub inactivity_budget_secs: u64,
    /// Max promotion candidates examined per run.
    pub promotion_page_size: usize,
    pub promotion_budget_secs: u64,
    /// Whole-job retry policy applied by the scheduler.
    pub max_retries: u32,
    pub backoff_base_secs: u64,
    pub backoff_ceiling_secs: u64,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            recalc_batch_size: defaults::DEFAULT_RECALC_BATCH_SIZE,
            recalc_skip_secs: defaults::DEFAULT_RECALC_SKIP_SECS,
            recalc_budget_secs: defaults::DEFAULT_RECALC_BUDGET_SECS,
            inactivity_page_size: defaults::DEFAULT_INACTIVITY_PAGE_SIZE,
            inactivity_budget_secs: defaults::DEFAULT_INACTIVITY_BUDGET_SECS,
            promotion_page_size: defaults::DEFAULT_PROMOTION_PAGE_SIZE,
            promotion_budget_secs: defaults::DEFAULT_PROMOTION_BUDGET_SECS,
            max_retries: defaults::DEFAULT_JOB_MAX_RETRIES,
            backoff_base_secs: defaults::DEFAULT_JOB_BACKOFF_BASE_SECS,
            backoff_ceiling_secs: defaults::DEFAULT_JOB_BACKOFF_CEILING_SECS,
        }
    }
}
