//! Error types produced while downloading source files.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors produced while downloading the source set.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DownloadError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    Client {
        /// Builder failure reported by `reqwest`.
        #[source]
        source: reqwest::Error,
    },
    /// Preparing the destination directory failed.
    #[error("failed to create destination directory {path:?}: {source}")]
    CreateDir {
        /// Directory being created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Creating or flushing a destination file failed.
    #[error("failed to write {path:?}: {source}")]
    WriteFile {
        /// File being written.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Fetching a source file failed.
    #[error("failed to download {file}: {source}")]
    Transport {
        /// Name of the source file.
        file: String,
        /// Transport failure.
        #[source]
        source: TransportError,
    },
}

/// Transport-level errors encountered while issuing HTTP requests.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The server answered with a status other than 200.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Fully qualified request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Short error description.
        message: String,
    },
    /// The request or the body stream failed due to an I/O error.
    #[error("network error contacting {url}: {source}")]
    Network {
        /// Fully qualified request URL.
        url: String,
        /// I/O error reported by the transport.
        #[source]
        source: io::Error,
    },
}
