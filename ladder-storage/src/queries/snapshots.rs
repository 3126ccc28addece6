//! Whole-document storage for leaderboard snapshots.

use rusqlite::{params, Connection, OptionalExtension};

use ladder_core::errors::{LadderError, LadderResult, StorageError};
use ladder_core::models::{LeaderboardEntry, LeaderboardSnapshot};
use ladder_core::tier::Tier;

use super::{fmt_ts, parse_ts};
use crate::to_storage_err;

/// Replace the snapshot for (tier, size). Snapshots are rebuilt whole.
pub fn put(conn: &Connection, snapshot: &LeaderboardSnapshot) -> LadderResult<()> {
    let entries = serde_json::to_string(&snapshot.entries)
        .map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "INSERT OR REPLACE INTO leaderboard_snapshots
            (tier, size, entries, generated_at, expires_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            snapshot.tier.as_str(),
            snapshot.size,
            entries,
            fmt_ts(snapshot.generated_at),
            fmt_ts(snapshot.expires_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Fetch the snapshot for (tier, size), if one has been built.
pub fn get(
    conn: &Connection,
    tier: Tier,
    size: usize,
) -> LadderResult<Option<LeaderboardSnapshot>> {
    let row: Option<(String, String, String)> = conn
        .query_row(
            "SELECT entries, generated_at, expires_at
             FROM leaderboard_snapshots WHERE tier = ?1 AND size = ?2",
            params![tier.as_str(), size],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let Some((entries_json, generated_at, expires_at)) = row else {
        return Ok(None);
    };

    let malformed = |details: String| {
        LadderError::Storage(StorageError::MalformedRecord {
            user_id: format!("leaderboard:{tier}:{size}"),
            details,
        })
    };

    let entries: Vec<LeaderboardEntry> =
        serde_json::from_str(&entries_json).map_err(|e| malformed(format!("bad entries: {e}")))?;
    let generated_at = parse_ts(&generated_at)
        .ok_or_else(|| malformed(format!("bad generated_at: {generated_at}")))?;
    let expires_at = parse_ts(&expires_at)
        .ok_or_else(|| malformed(format!("bad expires_at: {expires_at}")))?;

    Ok(Some(LeaderboardSnapshot {
        tier,
        size,
        entries,
        generated_at,
        expires_at,
    }))
}
