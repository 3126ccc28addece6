//! StorageEngine — owns the ConnectionPool and implements IRankStore.

use std::path::Path;

use chrono::{DateTime, Utc};

use ladder_core::errors::LadderResult;
use ladder_core::models::{LeaderboardSnapshot, RankUpgrade, UserStats};
use ladder_core::tier::Tier;
use ladder_core::traits::IRankStore;

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries;

/// The main storage engine. Owns the connection pool and provides the full
/// IRankStore interface.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// When true, use the read pool for read operations (file-backed mode).
    /// When false, route all reads through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> LadderResult<Self> {
        let pool = ConnectionPool::open(path, 4)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> LadderResult<Self> {
        let pool = ConnectionPool::open_in_memory(1)?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> LadderResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| migrations::run_migrations(conn))
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> LadderResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> LadderResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }
}

impl IRankStore for StorageEngine {
    fn create_user(&self, stats: &UserStats) -> LadderResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::user_stats::insert_user(conn, stats))
    }

    fn get_user(&self, user_id: &str) -> LadderResult<Option<UserStats>> {
        self.with_reader(|conn| queries::user_stats::get_user(conn, user_id))
    }

    fn update_user(&self, stats: &UserStats) -> LadderResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::user_stats::update_user(conn, stats))
    }

    fn user_count(&self) -> LadderResult<usize> {
        self.with_reader(queries::user_stats::count)
    }

    fn users_page(&self, offset: usize, limit: usize) -> LadderResult<Vec<UserStats>> {
        self.with_reader(|conn| queries::user_stats::users_page(conn, offset, limit))
    }

    fn stale_users_page(
        &self,
        inactive_since: DateTime<Utc>,
        cursor: Option<&str>,
        limit: usize,
    ) -> LadderResult<Vec<UserStats>> {
        self.with_reader(|conn| {
            queries::user_stats::stale_users_page(conn, inactive_since, cursor, limit)
        })
    }

    fn promotion_candidates(
        &self,
        min_percentage: f64,
        limit: usize,
    ) -> LadderResult<Vec<UserStats>> {
        self.with_reader(|conn| {
            queries::user_stats::promotion_candidates(conn, min_percentage, limit)
        })
    }

    fn top_by_tier(&self, tier: Tier, limit: usize) -> LadderResult<Vec<UserStats>> {
        self.with_reader(|conn| queries::user_stats::top_by_tier(conn, tier, limit))
    }

    fn append_history(&self, upgrade: &RankUpgrade) -> LadderResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::history::append(conn, upgrade))
    }

    fn history_for_user(&self, user_id: &str) -> LadderResult<Vec<RankUpgrade>> {
        self.with_reader(|conn| queries::history::for_user(conn, user_id))
    }

    fn put_snapshot(&self, snapshot: &LeaderboardSnapshot) -> LadderResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::snapshots::put(conn, snapshot))
    }

    fn get_snapshot(&self, tier: Tier, size: usize) -> LadderResult<Option<LeaderboardSnapshot>> {
        self.with_reader(|conn| queries::snapshots::get(conn, tier, size))
    }
}
