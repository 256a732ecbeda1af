//! Error type produced by the bucket store.

use std::path::PathBuf;

use rusqlite::Error as SqliteError;
use thiserror::Error;

/// Errors raised by [`super::BucketStore`] and its transactions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open bucket store at {path:?}")]
    Open {
        /// Location of the store file.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Applying connection pragmas failed.
    #[error("failed to configure bucket store ({pragma})")]
    Configure {
        /// Pragma being applied.
        pragma: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Creating the backing tables failed.
    #[error("failed to initialise bucket store schema ({step})")]
    Schema {
        /// Schema step that failed.
        step: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// A statement inside a transaction failed, typically on disk I/O.
    #[error("bucket store transaction failed to {operation}")]
    Transaction {
        /// Operation being attempted.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// A mutation was attempted inside a read transaction.
    #[error("cannot {operation} in a read-only transaction")]
    ReadOnly {
        /// Operation being attempted.
        operation: &'static str,
    },
    /// Buckets must have a non-empty name.
    #[error("bucket name must not be empty")]
    EmptyBucketName,
    /// Entries must have a non-empty key.
    #[error("entry key must not be empty")]
    EmptyKey,
    /// The named bucket does not exist.
    #[error("bucket not found: {name}")]
    BucketNotFound {
        /// Lossy UTF-8 rendering of the bucket name.
        name: String,
    },
    /// Closing the connection failed.
    #[error("failed to close bucket store")]
    Close {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}

impl StoreError {
    pub(crate) const fn transaction(operation: &'static str, source: SqliteError) -> Self {
        Self::Transaction { operation, source }
    }
}
