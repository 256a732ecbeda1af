//! Fetching the OurAirports source files over HTTP.

mod error;
mod ops;
mod source;
mod types;

#[cfg(test)]
mod test_support;

pub use error::{DownloadError, TransportError};
pub use ops::download_sources;
pub use source::{DEFAULT_USER_AGENT, HttpSourceFetcher, SourceFetcher};
pub use types::{BaseUrl, DEFAULT_BASE_URL, DownloadOptions, DownloadReport};
