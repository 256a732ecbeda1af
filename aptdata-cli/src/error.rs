//! Error types emitted by the aptdata CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use aptdata_data::{CatalogError, DownloadError};
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Errors emitted by the aptdata CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// Opening, loading or querying the catalog failed.
    #[error("catalog operation on {path:?} failed: {source}")]
    Catalog {
        path: Utf8PathBuf,
        #[source]
        source: Box<CatalogError>,
    },
    /// Fetching the source files failed.
    #[error("failed to download source files: {0}")]
    Download(#[source] Box<DownloadError>),
    /// The async runtime backing downloads could not be started.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Serializing command output failed.
    #[error("failed to serialize command output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write command output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl CliError {
    pub(crate) fn catalog(path: &Utf8Path, source: CatalogError) -> Self {
        Self::Catalog {
            path: path.to_path_buf(),
            source: Box::new(source),
        }
    }
}

impl From<DownloadError> for CliError {
    fn from(source: DownloadError) -> Self {
        Self::Download(Box::new(source))
    }
}
