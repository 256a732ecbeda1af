//! Storage, ingestion and download logic for aptdata.
//!
//! Responsibilities:
//! - Persist records in a transactional bucket store ([`bucket`]).
//! - Load the OurAirports CSV exports into it ([`ingest`]).
//! - Expose the loaded data through the [`AptDb`] catalog.
//! - Fetch fresh exports over HTTP ([`download`]).
//!
//! Boundaries:
//! - Record types and their encoding live in `aptdata-core`.
//! - Loading is synchronous; only downloads run on an async executor.
//!
//! Invariants:
//! - A catalog counts as populated only after every loader in one load has
//!   committed.
//! - No global mutable state.
#![forbid(unsafe_code)]

pub mod bucket;
pub mod catalog;
pub mod download;
pub mod guard;
pub mod ingest;
pub mod layout;
pub mod validate;

pub use catalog::{AptDb, CatalogError, LoadReport};
pub use download::{
    BaseUrl, DEFAULT_BASE_URL, DownloadError, DownloadOptions, DownloadReport,
    HttpSourceFetcher, SourceFetcher, TransportError, download_sources,
};
pub use ingest::{LoadError, LoadOptions, LoadSummary, ParseMode, RowParseError, SourceFiles};
pub use validate::{DanglingReference, ReferenceReport};
