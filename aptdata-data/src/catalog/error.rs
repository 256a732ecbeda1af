use std::io;

use aptdata_core::{CodecError, RecordKind};
use camino::Utf8PathBuf;
use thiserror::Error;

use crate::bucket::StoreError;
use crate::guard::{MarkError, Unpopulated};
use crate::ingest::LoadError;

/// Errors raised by [`super::AptDb`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Creating the directory that holds the store failed.
    #[error("failed to create parent directory for {path:?}")]
    CreateDirectory {
        /// Location of the store file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The bucket store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// A source loader failed; the population flag was not set.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// Writing the population flag failed.
    #[error("failed to mark catalog populated")]
    MarkPopulated(#[from] MarkError),
    /// Deleting a bucket during reload failed.
    #[error("failed to clear bucket {bucket}")]
    ClearBucket {
        /// Name of the bucket being deleted.
        bucket: String,
        /// Source error raised by the store.
        #[source]
        source: StoreError,
    },
    /// The requested record does not exist.
    #[error("{kind} {code:?} not found")]
    NotFound {
        /// Kind of record requested.
        kind: RecordKind,
        /// Code that was looked up.
        code: String,
    },
    /// A stored record could not be decoded.
    #[error("stored record {code:?} is corrupt")]
    Decode {
        /// Key of the corrupt record.
        code: String,
        /// Source error raised by the codec.
        #[source]
        source: CodecError,
    },
    /// The catalog has not completed a load.
    #[error("catalog is not populated: {0}")]
    Unpopulated(#[from] Unpopulated),
}
