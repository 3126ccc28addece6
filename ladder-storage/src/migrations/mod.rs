//! Schema migrations, applied in order and tracked in `schema_version`.

mod v001_user_stats;
mod v002_rank_history;
mod v003_leaderboard_snapshots;

use rusqlite::Connection;

use ladder_core::errors::{LadderError, LadderResult, StorageError};

use crate::to_storage_err;

/// All migrations in order. Each entry is (version, migrate fn).
const MIGRATIONS: &[(u32, fn(&Connection) -> LadderResult<()>)] = &[
    (1, v001_user_stats::migrate),
    (2, v002_rank_history::migrate),
    (3, v003_leaderboard_snapshots::migrate),
];

/// Apply any migrations newer than the stored schema version.
pub fn run_migrations(conn: &Connection) -> LadderResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current: u32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    for (version, migrate) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        migrate(conn).map_err(|e| {
            LadderError::Storage(StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })
        })?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [version],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(())
}
