//! Data models shared across the workspace.

mod calculation;
mod history;
mod job_report;
mod leaderboard;
mod rank_status;
mod user_stats;

pub use calculation::{RankCalculation, ScoreBreakdown};
pub use history::{PromotionTrigger, RankUpgrade};
pub use job_report::JobReport;
pub use leaderboard::{LeaderboardEntry, LeaderboardSnapshot};
pub use rank_status::RankStatus;
pub use user_stats::UserStats;
