//! Runtime configuration: the static rank table plus toml-loadable knobs.

pub mod defaults;
mod jobs_config;
mod leaderboard_config;
mod rank_table;
mod service_config;

use serde::{Deserialize, Serialize};

use crate::errors::LadderResult;

pub use jobs_config::JobsConfig;
pub use leaderboard_config::LeaderboardConfig;
pub use rank_table::{RankConfig, RankCriteria, TierConfig};
pub use service_config::ServiceConfig;

/// Aggregate runtime configuration for all subsystems.
///
/// Every field has a default, so an empty toml document yields a fully
/// working configuration. The rank table itself is compiled in and is not
/// part of this file-based config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LadderConfig {
    pub service: ServiceConfig,
    pub jobs: JobsConfig,
    pub leaderboard: LeaderboardConfig,
}

impl LadderConfig {
    /// Parse from a toml document; missing sections/fields keep defaults.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Validate the compiled-in rank table alongside this config.
    /// Run once at process start; an error here is fatal.
    pub fn validate(&self) -> LadderResult<()> {
        RankConfig::standard().validate()
    }
}
