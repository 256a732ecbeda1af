//! Errors raised while loading source files into the store.

use std::io;

use aptdata_core::CodecError;
use camino::Utf8PathBuf;
use thiserror::Error;

use crate::bucket::StoreError;

/// Errors raised by [`super::load_source`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file is absent or could not be read.
    #[error("failed to read source file {path:?}")]
    SourceFile {
        /// Location of the source file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A row could not be turned into a record.
    #[error("failed to parse {path:?} at line {line}")]
    RowParse {
        /// Location of the source file.
        path: Utf8PathBuf,
        /// One-based line number of the offending row, or zero when unknown.
        line: u64,
        /// Why the row was rejected.
        #[source]
        source: RowParseError,
    },
    /// A parsed record could not be encoded.
    #[error("failed to encode a record from {path:?}")]
    Encode {
        /// Location of the source file.
        path: Utf8PathBuf,
        /// Source error raised by the codec.
        #[source]
        source: CodecError,
    },
    /// The store rejected a write or the transaction failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Why a single source row was rejected.
#[derive(Debug, Error)]
pub enum RowParseError {
    /// The row has fewer columns than the loader reads.
    #[error("expected at least {expected} columns, found {found}")]
    ColumnCount {
        /// Columns the loader requires.
        expected: usize,
        /// Columns present in the row.
        found: usize,
    },
    /// The row width differs from the header on a fixed-width file.
    #[error("expected {expected} columns to match the header, found {found}")]
    UnequalWidth {
        /// Width of the header row.
        expected: u64,
        /// Width of the offending row.
        found: u64,
    },
    /// The column forming the record key is empty.
    #[error("key column {column} is empty")]
    MissingKey {
        /// Name of the key column.
        column: &'static str,
    },
    /// A numeric or boolean column holds an unparseable value.
    #[error("column {column} (index {index}) holds invalid value {value:?}")]
    InvalidField {
        /// Name of the column.
        column: &'static str,
        /// Zero-based column index.
        index: usize,
        /// Raw field contents.
        value: String,
    },
    /// The CSV reader could not decode the row.
    #[error("malformed CSV row")]
    Malformed {
        /// Source error raised by the CSV reader.
        #[source]
        source: csv::Error,
    },
}
