/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("version conflict updating user {user_id}: expected version {expected}")]
    VersionConflict { user_id: String, expected: u64 },

    #[error("malformed stored record for user {user_id}: {details}")]
    MalformedRecord { user_id: String, details: String },
}
