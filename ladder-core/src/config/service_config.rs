use serde::{Deserialize, Serialize};

use super::defaults;

/// Rank-service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Minimum seconds between non-forced recalculations per user.
    pub recalc_interval_secs: u64,
    /// Bounded retries when a CAS update hits a version conflict.
    pub cas_retry_limit: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            recalc_interval_secs: defaults::DEFAULT_RECALC_INTERVAL_SECS,
            cas_retry_limit: defaults::DEFAULT_CAS_RETRY_LIMIT,
        }
    }
}
