//! v003: leaderboard_snapshots — whole-document snapshots keyed by tier and
//! size; rebuilt, never incrementally patched.

use rusqlite::Connection;

use ladder_core::errors::LadderResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> LadderResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS leaderboard_snapshots (
            tier          TEXT NOT NULL,
            size          INTEGER NOT NULL,
            entries       TEXT NOT NULL,
            generated_at  TEXT NOT NULL,
            expires_at    TEXT NOT NULL,
            PRIMARY KEY (tier, size)
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
