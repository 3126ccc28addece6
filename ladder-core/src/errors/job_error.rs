/// Batch-job errors reported to the scheduling layer.
///
/// Per-user failures inside a run are counted in the job report, not raised;
/// these variants cover whole-run failures the scheduler may retry.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("job {job} failed: {reason}")]
    RunFailed { job: &'static str, reason: String },

    #[error("job {job} exhausted {attempts} retry attempts")]
    RetriesExhausted { job: &'static str, attempts: u32 },
}
