//! Append and fetch for the append-only promotion history.

use rusqlite::{params, Connection, Row};

use ladder_core::errors::{LadderError, LadderResult, StorageError};
use ladder_core::models::{PromotionTrigger, RankUpgrade};
use ladder_core::tier::Tier;

use super::{fmt_ts, parse_ts};
use crate::to_storage_err;

/// Append one history row. There is deliberately no update or delete
/// counterpart anywhere in this crate.
pub fn append(conn: &Connection, upgrade: &RankUpgrade) -> LadderResult<()> {
    conn.execute(
        "INSERT INTO rank_history (
            user_id, previous_tier, new_tier, achieved_at,
            percentage_at_upgrade, days_in_previous_tier, trigger_kind
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            upgrade.user_id,
            upgrade.previous_tier.as_str(),
            upgrade.new_tier.as_str(),
            fmt_ts(upgrade.achieved_at),
            upgrade.percentage_at_upgrade,
            upgrade.days_in_previous_tier,
            upgrade.trigger.as_str(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// All history rows for one user, oldest first.
pub fn for_user(conn: &Connection, user_id: &str) -> LadderResult<Vec<RankUpgrade>> {
    let mut stmt = conn
        .prepare(
            "SELECT user_id, previous_tier, new_tier, achieved_at,
                    percentage_at_upgrade, days_in_previous_tier, trigger_kind
             FROM rank_history WHERE user_id = ?1 ORDER BY id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![user_id], read_raw)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for raw in rows {
        let raw = raw.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(into_upgrade(raw)?);
    }
    Ok(out)
}

struct RawUpgrade {
    user_id: String,
    previous_tier: String,
    new_tier: String,
    achieved_at: String,
    percentage_at_upgrade: f64,
    days_in_previous_tier: i64,
    trigger_kind: String,
}

fn read_raw(row: &Row<'_>) -> rusqlite::Result<RawUpgrade> {
    Ok(RawUpgrade {
        user_id: row.get(0)?,
        previous_tier: row.get(1)?,
        new_tier: row.get(2)?,
        achieved_at: row.get(3)?,
        percentage_at_upgrade: row.get(4)?,
        days_in_previous_tier: row.get(5)?,
        trigger_kind: row.get(6)?,
    })
}

fn into_upgrade(raw: RawUpgrade) -> LadderResult<RankUpgrade> {
    let malformed = |details: String| {
        LadderError::Storage(StorageError::MalformedRecord {
            user_id: raw.user_id.clone(),
            details,
        })
    };

    let previous_tier: Tier = raw.previous_tier.parse().map_err(malformed)?;
    let new_tier: Tier = raw.new_tier.parse().map_err(malformed)?;
    let achieved_at = parse_ts(&raw.achieved_at)
        .ok_or_else(|| malformed(format!("bad achieved_at: {}", raw.achieved_at)))?;
    let trigger = match raw.trigger_kind.as_str() {
        "recalculation" => PromotionTrigger::Recalculation,
        "auto_promotion" => PromotionTrigger::AutoPromotion,
        "manual_override" => PromotionTrigger::ManualOverride,
        other => return Err(malformed(format!("unknown trigger: {other}"))),
    };

    Ok(RankUpgrade {
        user_id: raw.user_id,
        previous_tier,
        new_tier,
        achieved_at,
        percentage_at_upgrade: raw.percentage_at_upgrade,
        days_in_previous_tier: raw.days_in_previous_tier,
        trigger,
    })
}
