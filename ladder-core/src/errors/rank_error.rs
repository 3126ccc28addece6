use chrono::{DateTime, Utc};

/// Rank-service errors surfaced to callers.
#[derive(Debug, thiserror::Error)]
pub enum RankError {
    #[error("user not found: {user_id}")]
    NotFound { user_id: String },

    #[error("recalculation rate limited, next allowed at {retry_at}")]
    RateLimited { retry_at: DateTime<Utc> },

    #[error("invalid rank configuration: {reason}")]
    InvalidConfig { reason: String },
}
