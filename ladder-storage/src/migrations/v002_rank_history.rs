//! v002: rank_history — append-only promotion log. No UPDATE or DELETE path
//! exists for this table anywhere in the workspace.

use rusqlite::Connection;

use ladder_core::errors::LadderResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LadderResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS rank_history (
            id                     INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id                TEXT NOT NULL,
            previous_tier          TEXT NOT NULL,
            new_tier               TEXT NOT NULL,
            achieved_at            TEXT NOT NULL,
            percentage_at_upgrade  REAL NOT NULL,
            days_in_previous_tier  INTEGER NOT NULL,
            trigger_kind           TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_history_user ON rank_history(user_id);
        CREATE INDEX IF NOT EXISTS idx_history_achieved ON rank_history(achieved_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
