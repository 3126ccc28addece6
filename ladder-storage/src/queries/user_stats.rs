//! CRUD and batch queries for the per-user progression record.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::warn;

use ladder_core::errors::{LadderError, LadderResult, StorageError};
use ladder_core::models::{ScoreBreakdown, UserStats};
use ladder_core::tier::Tier;

use super::{fmt_ts, parse_ts};
use crate::to_storage_err;

const COLUMNS: &str = "user_id, created_at, tier, rank_percentage, predictions_count, \
    resolved_count, correct_count, contrarian_wins, accuracy, weekly_activity, \
    inactivity_streaks, tier_started_at, last_active_at, last_updated_at, \
    last_recalculated_at, last_breakdown, version";

/// Raw row image before parsing; keeps the rusqlite closure infallible so
/// parse failures go through our own error path.
struct RawStats {
    user_id: String,
    created_at: String,
    tier: String,
    rank_percentage: f64,
    predictions_count: i64,
    resolved_count: i64,
    correct_count: i64,
    contrarian_wins: i64,
    accuracy: f64,
    weekly_activity: i64,
    inactivity_streaks: i64,
    tier_started_at: String,
    last_active_at: String,
    last_updated_at: String,
    last_recalculated_at: Option<String>,
    last_breakdown: Option<String>,
    version: i64,
}

fn read_raw(row: &Row<'_>) -> rusqlite::Result<RawStats> {
    Ok(RawStats {
        user_id: row.get(0)?,
        created_at: row.get(1)?,
        tier: row.get(2)?,
        rank_percentage: row.get(3)?,
        predictions_count: row.get(4)?,
        resolved_count: row.get(5)?,
        correct_count: row.get(6)?,
        contrarian_wins: row.get(7)?,
        accuracy: row.get(8)?,
        weekly_activity: row.get(9)?,
        inactivity_streaks: row.get(10)?,
        tier_started_at: row.get(11)?,
        last_active_at: row.get(12)?,
        last_updated_at: row.get(13)?,
        last_recalculated_at: row.get(14)?,
        last_breakdown: row.get(15)?,
        version: row.get(16)?,
    })
}

fn into_stats(raw: RawStats) -> LadderResult<UserStats> {
    let malformed = |details: String| {
        LadderError::Storage(StorageError::MalformedRecord {
            user_id: raw.user_id.clone(),
            details,
        })
    };

    let tier: Tier = raw
        .tier
        .parse()
        .map_err(|e: String| malformed(e))?;

    // ValidationError policy: an unparsable creation date is coerced to
    // "now" (age 0) with a warning, never a hard failure.
    let created_at = match parse_ts(&raw.created_at) {
        Some(t) => t,
        None => {
            warn!(
                user_id = %raw.user_id,
                raw = %raw.created_at,
                "unparsable created_at, treating account age as 0"
            );
            Utc::now()
        }
    };

    let tier_started_at = parse_ts(&raw.tier_started_at)
        .ok_or_else(|| malformed(format!("bad tier_started_at: {}", raw.tier_started_at)))?;
    let last_active_at = parse_ts(&raw.last_active_at)
        .ok_or_else(|| malformed(format!("bad last_active_at: {}", raw.last_active_at)))?;
    let last_updated_at = parse_ts(&raw.last_updated_at)
        .ok_or_else(|| malformed(format!("bad last_updated_at: {}", raw.last_updated_at)))?;
    let last_recalculated_at = match &raw.last_recalculated_at {
        Some(s) => Some(
            parse_ts(s).ok_or_else(|| malformed(format!("bad last_recalculated_at: {s}")))?,
        ),
        None => None,
    };
    let last_breakdown: Option<ScoreBreakdown> = match &raw.last_breakdown {
        Some(s) => Some(
            serde_json::from_str(s).map_err(|e| malformed(format!("bad breakdown json: {e}")))?,
        ),
        None => None,
    };

    Ok(UserStats {
        user_id: raw.user_id,
        created_at,
        tier,
        rank_percentage: raw.rank_percentage,
        predictions_count: raw.predictions_count.max(0) as u64,
        resolved_count: raw.resolved_count.max(0) as u64,
        correct_count: raw.correct_count.max(0) as u64,
        contrarian_wins: raw.contrarian_wins.max(0) as u64,
        accuracy: raw.accuracy,
        weekly_activity: raw.weekly_activity.max(0) as u64,
        inactivity_streaks: raw.inactivity_streaks.max(0) as u64,
        tier_started_at,
        last_active_at,
        last_updated_at,
        last_recalculated_at,
        last_breakdown,
        version: raw.version.max(0) as u64,
    })
}

fn breakdown_json(stats: &UserStats) -> LadderResult<Option<String>> {
    match &stats.last_breakdown {
        Some(b) => serde_json::to_string(b)
            .map(Some)
            .map_err(|e| to_storage_err(e.to_string())),
        None => Ok(None),
    }
}

/// Insert the signup record.
pub fn insert_user(conn: &Connection, stats: &UserStats) -> LadderResult<()> {
    conn.execute(
        "INSERT INTO user_stats (
            user_id, created_at, tier, rank_percentage, predictions_count,
            resolved_count, correct_count, contrarian_wins, accuracy,
            weekly_activity, inactivity_streaks, tier_started_at,
            last_active_at, last_updated_at, last_recalculated_at,
            last_breakdown, version
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
        params![
            stats.user_id,
            fmt_ts(stats.created_at),
            stats.tier.as_str(),
            stats.rank_percentage,
            stats.predictions_count,
            stats.resolved_count,
            stats.correct_count,
            stats.contrarian_wins,
            stats.accuracy,
            stats.weekly_activity,
            stats.inactivity_streaks,
            fmt_ts(stats.tier_started_at),
            fmt_ts(stats.last_active_at),
            fmt_ts(stats.last_updated_at),
            stats.last_recalculated_at.map(fmt_ts),
            breakdown_json(stats)?,
            stats.version,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Fetch one user's record.
pub fn get_user(conn: &Connection, user_id: &str) -> LadderResult<Option<UserStats>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {COLUMNS} FROM user_stats WHERE user_id = ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut rows = stmt
        .query_map(params![user_id], read_raw)
        .map_err(|e| to_storage_err(e.to_string()))?;

    match rows.next() {
        Some(raw) => {
            let raw = raw.map_err(|e| to_storage_err(e.to_string()))?;
            Ok(Some(into_stats(raw)?))
        }
        None => Ok(None),
    }
}

/// Compare-and-swap update: succeeds only when the stored version still
/// matches `stats.version`, and bumps it by one.
pub fn update_user(conn: &Connection, stats: &UserStats) -> LadderResult<()> {
    let changed = conn
        .execute(
            "UPDATE user_stats SET
                created_at = ?2, tier = ?3, rank_percentage = ?4,
                predictions_count = ?5, resolved_count = ?6, correct_count = ?7,
                contrarian_wins = ?8, accuracy = ?9, weekly_activity = ?10,
                inactivity_streaks = ?11, tier_started_at = ?12,
                last_active_at = ?13, last_updated_at = ?14,
                last_recalculated_at = ?15, last_breakdown = ?16,
                version = version + 1
             WHERE user_id = ?1 AND version = ?17",
            params![
                stats.user_id,
                fmt_ts(stats.created_at),
                stats.tier.as_str(),
                stats.rank_percentage,
                stats.predictions_count,
                stats.resolved_count,
                stats.correct_count,
                stats.contrarian_wins,
                stats.accuracy,
                stats.weekly_activity,
                stats.inactivity_streaks,
                fmt_ts(stats.tier_started_at),
                fmt_ts(stats.last_active_at),
                fmt_ts(stats.last_updated_at),
                stats.last_recalculated_at.map(fmt_ts),
                breakdown_json(stats)?,
                stats.version,
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if changed == 1 {
        return Ok(());
    }

    // Distinguish "gone" from "raced": both leave zero changed rows.
    let exists = conn
        .query_row(
            "SELECT 1 FROM user_stats WHERE user_id = ?1",
            params![stats.user_id],
            |_| Ok(()),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?
        .is_some();

    if exists {
        Err(LadderError::Storage(StorageError::VersionConflict {
            user_id: stats.user_id.clone(),
            expected: stats.version,
        }))
    } else {
        Err(LadderError::not_found(&stats.user_id))
    }
}

/// Total user count.
pub fn count(conn: &Connection) -> LadderResult<usize> {
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM user_stats", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n.max(0) as usize)
}

/// Stable page over all users, ordered by user id.
pub fn users_page(conn: &Connection, offset: usize, limit: usize) -> LadderResult<Vec<UserStats>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {COLUMNS} FROM user_stats ORDER BY user_id LIMIT ?1 OFFSET ?2"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    collect(stmt.query_map(params![limit, offset], read_raw))
}

/// Cursor page of users inactive since before the cutoff.
pub fn stale_users_page(
    conn: &Connection,
    inactive_since: DateTime<Utc>,
    cursor: Option<&str>,
    limit: usize,
) -> LadderResult<Vec<UserStats>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {COLUMNS} FROM user_stats
             WHERE last_active_at < ?1 AND user_id > ?2
             ORDER BY user_id LIMIT ?3"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    collect(stmt.query_map(
        params![fmt_ts(inactive_since), cursor.unwrap_or(""), limit],
        read_raw,
    ))
}

/// Users at or above the percentage threshold, highest first.
pub fn promotion_candidates(
    conn: &Connection,
    min_percentage: f64,
    limit: usize,
) -> LadderResult<Vec<UserStats>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {COLUMNS} FROM user_stats
             WHERE rank_percentage >= ?1
             ORDER BY rank_percentage DESC, user_id LIMIT ?2"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    collect(stmt.query_map(params![min_percentage, limit], read_raw))
}

/// Top users of one tier by percentage descending; user id breaks ties so
/// the ordering is stable across rebuilds.
pub fn top_by_tier(conn: &Connection, tier: Tier, limit: usize) -> LadderResult<Vec<UserStats>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {COLUMNS} FROM user_stats
             WHERE tier = ?1
             ORDER BY rank_percentage DESC, user_id LIMIT ?2"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    collect(stmt.query_map(params![tier.as_str(), limit], read_raw))
}

fn collect<F>(
    rows: rusqlite::Result<rusqlite::MappedRows<'_, F>>,
) -> LadderResult<Vec<UserStats>>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<RawStats>,
{
    let rows = rows.map_err(|e| to_storage_err(e.to_string()))?;
    let mut out = Vec::new();
    for raw in rows {
        let raw = raw.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(into_stats(raw)?);
    }
    Ok(out)
}
