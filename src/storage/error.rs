//! Storage error type.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised by the person store or by the task running a store call.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },

    #[error("invalid persisted person data: {0}")]
    InvalidData(String),

    #[error("person {0} was removed before the write landed")]
    Vanished(crate::person::PersonId),

    #[error("storage connection lock poisoned")]
    Poisoned,

    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
