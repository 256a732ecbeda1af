//! Typed wrappers and options for source downloads.

use std::{fmt, ops::Deref};

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::ingest::SourceFiles;

/// Location of the published OurAirports data set.
pub const DEFAULT_BASE_URL: &str = "http://ourairports.com/data";

/// Base URL the source files are fetched from.
///
/// # Examples
/// ```
/// # use aptdata_data::BaseUrl;
/// let url = BaseUrl::new("https://example.org/data/");
/// assert_eq!(url.file_url("airports.csv"), "https://example.org/data/airports.csv");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Construct a base URL, dropping trailing slashes.
    ///
    /// An empty value falls back to [`DEFAULT_BASE_URL`].
    pub fn new(value: impl Into<String>) -> Self {
        let raw = value.into();
        let trimmed = raw.trim_end_matches('/');
        if trimmed.is_empty() {
            Self(DEFAULT_BASE_URL.to_owned())
        } else {
            Self(trimmed.to_owned())
        }
    }

    /// URL of `file_name` below this base.
    #[must_use]
    pub fn file_url(&self, file_name: &str) -> String {
        format!("{}/{file_name}", self.0)
    }

    /// Consume the wrapper and return the inner [`String`].
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl From<&str> for BaseUrl {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for BaseUrl {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Summary of one downloaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadReport {
    /// Name of the source file.
    pub file_name: String,
    /// URL the file was fetched from.
    pub url: String,
    /// Number of bytes written to disk.
    pub bytes_written: u64,
    /// Final location of the file.
    pub output_path: Utf8PathBuf,
}

/// Options controlling which files are fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadOptions {
    /// Names of the files fetched from the base URL and written under the
    /// destination directory.
    pub files: SourceFiles,
}
