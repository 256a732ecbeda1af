//! Facade crate for the aptdata airport reference database.
//!
//! This crate re-exports the record types and exposes the SQLite-backed
//! catalog behind the `store-sqlite` feature.

#![forbid(unsafe_code)]

pub use aptdata_core::{
    Airport, CodecError, Country, Record, RecordKind, Region, Runway, RunwayEnd, decode, encode,
};

#[cfg(feature = "store-sqlite")]
pub use aptdata_data::{
    AptDb, BaseUrl, CatalogError, DEFAULT_BASE_URL, DanglingReference, DownloadError,
    DownloadOptions, DownloadReport, HttpSourceFetcher, LoadError, LoadOptions, LoadReport,
    LoadSummary, ParseMode, ReferenceReport, RowParseError, SourceFetcher, SourceFiles,
    TransportError, download_sources,
};
