//! # ladder-storage
//!
//! SQLite persistence for the progression system: a single write connection
//! plus a small read pool over WAL, schema migrations, and the queries
//! behind [`ladder_core::traits::IRankStore`]. Per-user atomicity comes from
//! a compare-and-swap on the `version` column rather than row locks.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use ladder_core::errors::{LadderError, StorageError};

/// Map a low-level SQLite failure into the workspace error type.
pub fn to_storage_err(message: impl Into<String>) -> LadderError {
    LadderError::Storage(StorageError::SqliteError {
        message: message.into(),
    })
}
