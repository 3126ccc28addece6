//! # ladder-jobs
//!
//! The three batch sweeps over the user population and the scheduler that
//! runs them: daily recalculation (with a leaderboard rebuild), weekly
//! inactivity detection, and the daily promotion sweep.
//!
//! Per-user failures inside a sweep are counted and logged, never raised;
//! whole-run failures bubble to the scheduler, which retries with backoff.

use std::sync::atomic::{AtomicBool, Ordering};

use ladder_core::errors::LadderResult;
use ladder_core::models::JobReport;

pub mod inactivity;
pub mod promotion;
pub mod recalculation;
pub mod scheduler;

pub use inactivity::WeeklyInactivityJob;
pub use promotion::DailyPromotionJob;
pub use recalculation::DailyRecalculationJob;
pub use scheduler::JobScheduler;

/// A batch sweep the scheduler can run. Implementations are synchronous;
/// the scheduler moves them onto a blocking thread.
pub trait Job: Send + Sync {
    fn name(&self) -> &'static str;
    fn run(&self) -> LadderResult<JobReport>;
}

/// Clears the job's running flag when the run exits, on any path.
pub(crate) struct RunningGuard<'a>(pub(crate) &'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
