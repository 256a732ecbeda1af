//! Loading OurAirports CSV exports into the bucket store.
//!
//! Each entity kind has a [`SourceLoader`] describing its file, columns and
//! bucket. [`load_source`] streams one file into the store inside a single
//! write transaction, so a malformed row leaves no record of that kind behind.

use std::io::{self, BufReader};

use aptdata_core::{Record, RecordKind, encode};
use camino::{Utf8Path, Utf8PathBuf};
use csv::{ErrorKind, ReaderBuilder, StringRecord};
use log::info;
use serde::{Deserialize, Serialize};

use crate::bucket::{Bucket, BucketStore, StoreError};

mod airports;
mod countries;
mod error;
mod fields;
mod regions;
mod runways;

pub use airports::AirportLoader;
pub use countries::CountryLoader;
pub use error::{LoadError, RowParseError};
pub use fields::Fields;
pub use regions::RegionLoader;
pub use runways::RunwayLoader;

/// How numeric and boolean fields that fail to parse are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Unparseable values read as zero or `false`.
    #[default]
    Lenient,
    /// Unparseable non-empty values reject the row.
    Strict,
}

/// File names of the four sources inside a data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceFiles {
    /// Airports export.
    pub airports: String,
    /// Runways export.
    pub runways: String,
    /// Countries export.
    pub countries: String,
    /// Regions export.
    pub regions: String,
}

impl SourceFiles {
    /// File names in load order.
    #[must_use]
    pub fn names(&self) -> [&str; 4] {
        [
            &self.airports,
            &self.runways,
            &self.countries,
            &self.regions,
        ]
    }
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self {
            airports: AirportLoader::DEFAULT_FILE.to_owned(),
            runways: RunwayLoader::DEFAULT_FILE.to_owned(),
            countries: CountryLoader::DEFAULT_FILE.to_owned(),
            regions: RegionLoader::DEFAULT_FILE.to_owned(),
        }
    }
}

/// Options controlling a catalog load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Field parsing strictness.
    pub parse_mode: ParseMode,
    /// Source file names relative to the data directory.
    pub files: SourceFiles,
}

/// Outcome of loading one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    /// Kind of record written.
    pub kind: RecordKind,
    /// File the records were read from.
    pub path: Utf8PathBuf,
    /// Number of records written.
    pub records: u64,
    /// Fields that failed to parse and were stored as zero or `false`.
    pub defaulted_fields: u64,
}

/// Description of one OurAirports source file.
pub trait SourceLoader {
    /// Record produced for each row.
    type Record: Record;
    /// Top-level bucket receiving the records.
    const BUCKET: &'static [u8];
    /// File name inside the published data set.
    const DEFAULT_FILE: &'static str;
    /// Minimum number of columns a row must carry.
    const COLUMNS: usize;
    /// Whether rows may differ in width from the header.
    const FLEXIBLE: bool = false;

    /// Build a record from the columns of one row.
    fn parse_row(fields: &mut Fields<'_>) -> Result<Self::Record, RowParseError>;

    /// Store an encoded record inside the loader's bucket.
    fn write(bucket: &Bucket<'_>, record: &Self::Record, value: &[u8]) -> Result<(), StoreError>;
}

/// Load every row of `path` into the store using loader `L`.
///
/// The header row is skipped. The whole file is written in one transaction;
/// any failure rolls it back.
pub fn load_source<L: SourceLoader>(
    store: &mut BucketStore,
    path: &Utf8Path,
    mode: ParseMode,
) -> Result<LoadSummary, LoadError> {
    let file = aptdata_fs::open_file(path).map_err(|source| LoadError::SourceFile {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(L::FLEXIBLE)
        .from_reader(BufReader::new(file));

    let summary = store.update(|tx| {
        let bucket = tx.create_bucket_if_not_exists(L::BUCKET)?;
        let mut summary = LoadSummary {
            kind: L::Record::KIND,
            path: path.to_path_buf(),
            records: 0,
            defaulted_fields: 0,
        };
        let mut row = StringRecord::new();
        while reader
            .read_record(&mut row)
            .map_err(|source| read_error(path, source))?
        {
            let line = row.position().map_or(0, csv::Position::line);
            let row_error = |source| LoadError::RowParse {
                path: path.to_path_buf(),
                line,
                source,
            };
            if row.len() < L::COLUMNS {
                return Err(row_error(RowParseError::ColumnCount {
                    expected: L::COLUMNS,
                    found: row.len(),
                }));
            }
            let mut fields = Fields::new(&row, mode, line);
            let record = L::parse_row(&mut fields).map_err(row_error)?;
            let value = encode(&record).map_err(|source| LoadError::Encode {
                path: path.to_path_buf(),
                source,
            })?;
            L::write(&bucket, &record, &value)?;
            summary.records += 1;
            summary.defaulted_fields += fields.defaulted();
        }
        Ok::<_, LoadError>(summary)
    })?;

    info!(
        "loaded {} {} records from {} ({} defaulted fields)",
        summary.records, summary.kind, summary.path, summary.defaulted_fields
    );
    Ok(summary)
}

fn read_error(path: &Utf8Path, source: csv::Error) -> LoadError {
    let line = source.position().map_or(0, csv::Position::line);
    let reason = match source.kind() {
        ErrorKind::Io(io) => {
            return LoadError::SourceFile {
                path: path.to_path_buf(),
                source: io::Error::new(io.kind(), source),
            };
        }
        ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => RowParseError::UnequalWidth {
            expected: *expected_len,
            found: *len,
        },
        _ => RowParseError::Malformed { source },
    };
    LoadError::RowParse {
        path: path.to_path_buf(),
        line,
        source: reason,
    }
}
