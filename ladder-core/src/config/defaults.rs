//! Default values for the toml-loadable configuration.

/// Minimum interval between non-forced recalculations per user.
pub const DEFAULT_RECALC_INTERVAL_SECS: u64 = 3_600;

/// Bounded retries on CAS version conflicts.
pub const DEFAULT_CAS_RETRY_LIMIT: u32 = 3;

/// Users per page in the daily recalculation sweep.
pub const DEFAULT_RECALC_BATCH_SIZE: usize = 100;

/// Skip users whose last update is newer than this (mirrors the service
/// rate limit, evaluated directly in the sweep).
pub const DEFAULT_RECALC_SKIP_SECS: u64 = 3_600;

/// Users per page in the weekly inactivity sweep.
pub const DEFAULT_INACTIVITY_PAGE_SIZE: usize = 500;

/// Max promotion candidates examined per run.
pub const DEFAULT_PROMOTION_PAGE_SIZE: usize = 200;

/// Wall-clock budgets. Jobs stop enqueuing new pages past their budget.
pub const DEFAULT_RECALC_BUDGET_SECS: u64 = 600;
pub const DEFAULT_INACTIVITY_BUDGET_SECS: u64 = 300;
pub const DEFAULT_PROMOTION_BUDGET_SECS: u64 = 300;

/// Whole-job retry policy applied by the scheduler.
pub const DEFAULT_JOB_MAX_RETRIES: u32 = 3;
pub const DEFAULT_JOB_BACKOFF_BASE_SECS: u64 = 30;
pub const DEFAULT_JOB_BACKOFF_CEILING_SECS: u64 = 300;

/// Leaderboard snapshot sizes and freshness.
pub const DEFAULT_LEADERBOARD_SMALL: usize = 10;
pub const DEFAULT_LEADERBOARD_LARGE: usize = 100;
pub const DEFAULT_LEADERBOARD_TTL_SECS: u64 = 3_600;
