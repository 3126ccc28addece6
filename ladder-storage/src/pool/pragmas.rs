//! SQLite pragma configuration for writer and reader connections.

use rusqlite::Connection;

use ladder_core::errors::LadderResult;

use crate::to_storage_err;

/// Pragmas for the single write connection: WAL so readers are never
/// blocked, NORMAL sync (WAL makes this durable enough), busy timeout for
/// the rare writer-vs-checkpoint collision.
pub fn apply_write_pragmas(conn: &Connection) -> LadderResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Pragmas for read connections.
pub fn apply_read_pragmas(conn: &Connection) -> LadderResult<()> {
    conn.execute_batch(
        "
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
