//! v001: user_stats — the per-user progression record with CAS version.

use rusqlite::Connection;

use ladder_core::errors::LadderResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LadderResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS user_stats (
            user_id               TEXT PRIMARY KEY,
            created_at            TEXT NOT NULL,
            tier                  TEXT NOT NULL,
            rank_percentage       REAL NOT NULL DEFAULT 0,
            predictions_count     INTEGER NOT NULL DEFAULT 0,
            resolved_count        INTEGER NOT NULL DEFAULT 0,
            correct_count         INTEGER NOT NULL DEFAULT 0,
            contrarian_wins       INTEGER NOT NULL DEFAULT 0,
            accuracy              REAL NOT NULL DEFAULT 0,
            weekly_activity       INTEGER NOT NULL DEFAULT 0,
            inactivity_streaks    INTEGER NOT NULL DEFAULT 0,
            tier_started_at       TEXT NOT NULL,
            last_active_at        TEXT NOT NULL,
            last_updated_at       TEXT NOT NULL,
            last_recalculated_at  TEXT,
            last_breakdown        TEXT,
            version               INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_stats_tier_pct
            ON user_stats(tier, rank_percentage DESC);
        CREATE INDEX IF NOT EXISTS idx_stats_pct ON user_stats(rank_percentage);
        CREATE INDEX IF NOT EXISTS idx_stats_last_active ON user_stats(last_active_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
