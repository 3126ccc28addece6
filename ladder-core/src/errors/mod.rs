//! Error taxonomy: per-domain enums folded into a single `LadderError`.

mod job_error;
mod rank_error;
mod storage_error;

pub use job_error::JobError;
pub use rank_error::RankError;
pub use storage_error::StorageError;

/// Top-level error for the Ladder workspace.
#[derive(Debug, thiserror::Error)]
pub enum LadderError {
    #[error(transparent)]
    Rank(#[from] RankError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Job(#[from] JobError),
}

/// Result alias used across the workspace.
pub type LadderResult<T> = Result<T, LadderError>;

impl LadderError {
    /// Shorthand for the unknown-user error.
    pub fn not_found(user_id: impl Into<String>) -> Self {
        LadderError::Rank(RankError::NotFound {
            user_id: user_id.into(),
        })
    }

    /// Whether this is a rate-limit rejection (callers map it to a
    /// "try again later" payload instead of an error page).
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, LadderError::Rank(RankError::RateLimited { .. }))
    }

    /// Whether this is a CAS version conflict, which callers may retry.
    pub fn is_version_conflict(&self) -> bool {
        matches!(
            self,
            LadderError::Storage(StorageError::VersionConflict { .. })
        )
    }
}
