use crate::errors::LadderResult;
use crate::models::RankUpgrade;

/// Outbound notification seam. Both calls are best-effort: callers log a
/// failure and discard it, so delivery problems never block the primary
/// vote-resolution or promotion flow.
pub trait IPromotionNotifier: Send + Sync {
    /// A user was promoted to a new tier.
    fn promoted(&self, upgrade: &RankUpgrade) -> LadderResult<()>;

    /// A user has been inactive long enough to warrant a dormancy nudge.
    fn dormant(&self, user_id: &str, days_inactive: i64) -> LadderResult<()>;
}

/// Notifier that drops everything; the default wiring.
pub struct NoopNotifier;

impl IPromotionNotifier for NoopNotifier {
    fn promoted(&self, _upgrade: &RankUpgrade) -> LadderResult<()> {
        Ok(())
    }

    fn dormant(&self, _user_id: &str, _days_inactive: i64) -> LadderResult<()> {
        Ok(())
    }
}
