//! The airport catalog: lifecycle and typed lookups over the bucket store.
//!
//! An [`AptDb`] moves through three states: opened but never loaded, loaded
//! and populated, and (after a failed reload) opened with its buckets
//! cleared. Lookups work in any state and report [`CatalogError::NotFound`]
//! for missing data; callers that need a complete catalog check
//! [`AptDb::populated`] or [`AptDb::require_populated`] first.

use aptdata_core::{Airport, Country, Record, RecordKind, Region, Runway, decode};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use serde::Serialize;

use crate::bucket::{BucketStore, StoreError};
use crate::guard;
use crate::ingest::{
    AirportLoader, CountryLoader, LoadOptions, LoadSummary, RegionLoader, RunwayLoader,
    load_source,
};
use crate::layout;
use crate::validate::{self, ReferenceReport};

mod error;

pub use error::CatalogError;

/// Per-source outcome of a catalog load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Airports summary.
    pub airports: LoadSummary,
    /// Runways summary.
    pub runways: LoadSummary,
    /// Countries summary.
    pub countries: LoadSummary,
    /// Regions summary.
    pub regions: LoadSummary,
}

impl LoadReport {
    /// Summaries in load order.
    #[must_use]
    pub const fn summaries(&self) -> [&LoadSummary; 4] {
        [&self.airports, &self.runways, &self.countries, &self.regions]
    }

    /// Records written across all sources.
    #[must_use]
    pub fn records(&self) -> u64 {
        self.summaries().iter().map(|summary| summary.records).sum()
    }
}

/// Airport reference database backed by a single store file.
///
/// # Examples
/// ```no_run
/// use aptdata_data::AptDb;
/// use camino::Utf8Path;
///
/// let mut db = AptDb::open(Utf8Path::new("var/aptdata.db"))?;
/// if !db.populated() {
///     db.load(Utf8Path::new("var/sources"))?;
/// }
/// let seatac = db.airport("KSEA")?;
/// println!("{} has {} runways", seatac.name, db.runways("KSEA")?.len());
/// db.close()?;
/// # Ok::<(), aptdata_data::CatalogError>(())
/// ```
#[derive(Debug)]
pub struct AptDb {
    store: BucketStore,
    path: Utf8PathBuf,
}

impl AptDb {
    /// Open or create the catalog at `path`, creating parent directories.
    ///
    /// The catalog is not checked for population.
    pub fn open(path: &Utf8Path) -> Result<Self, CatalogError> {
        aptdata_fs::ensure_parent_dir(path).map_err(|source| CatalogError::CreateDirectory {
            path: path.to_path_buf(),
            source,
        })?;
        let store = BucketStore::open(path.as_std_path())?;
        debug!("opened catalog at {path}");
        Ok(Self {
            store,
            path: path.to_path_buf(),
        })
    }

    /// Location of the store file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Load the default source files from `data_dir` leniently.
    pub fn load(&mut self, data_dir: &Utf8Path) -> Result<LoadReport, CatalogError> {
        self.load_with(data_dir, &LoadOptions::default())
    }

    /// Load airports, runways, countries and regions in that order, then mark
    /// the catalog populated.
    ///
    /// The population flag is cleared before the first loader runs. A failing
    /// loader stops the load: its own writes are rolled back, those of earlier
    /// loaders remain, and the catalog stays unpopulated.
    pub fn load_with(
        &mut self,
        data_dir: &Utf8Path,
        options: &LoadOptions,
    ) -> Result<LoadReport, CatalogError> {
        guard::clear(&mut self.store)?;
        let mode = options.parse_mode;
        let files = &options.files;
        let airports =
            load_source::<AirportLoader>(&mut self.store, &data_dir.join(&files.airports), mode)?;
        let runways =
            load_source::<RunwayLoader>(&mut self.store, &data_dir.join(&files.runways), mode)?;
        let countries =
            load_source::<CountryLoader>(&mut self.store, &data_dir.join(&files.countries), mode)?;
        let regions =
            load_source::<RegionLoader>(&mut self.store, &data_dir.join(&files.regions), mode)?;
        guard::mark_populated(&mut self.store)?;

        let report = LoadReport {
            airports,
            runways,
            countries,
            regions,
        };
        info!(
            "catalog at {} populated with {} records",
            self.path,
            report.records()
        );
        Ok(report)
    }

    /// Clear every bucket and load the default source files from `data_dir`.
    pub fn reload(&mut self, data_dir: &Utf8Path) -> Result<LoadReport, CatalogError> {
        self.reload_with(data_dir, &LoadOptions::default())
    }

    /// Clear every bucket and load with explicit options.
    ///
    /// Buckets are deleted in one transaction; a bucket that does not exist
    /// is skipped. If the load then fails the catalog stays unpopulated.
    pub fn reload_with(
        &mut self,
        data_dir: &Utf8Path,
        options: &LoadOptions,
    ) -> Result<LoadReport, CatalogError> {
        self.clear()?;
        self.load_with(data_dir, options)
    }

    fn clear(&mut self) -> Result<(), CatalogError> {
        self.store.update(|tx| {
            for bucket in layout::ALL_BUCKETS {
                let name = String::from_utf8_lossy(bucket);
                match tx.delete_bucket(bucket) {
                    Ok(()) => debug!("deleted bucket {name}"),
                    Err(StoreError::BucketNotFound { .. }) => {
                        debug!("bucket {name} absent, nothing to clear");
                    }
                    Err(source) => {
                        return Err(CatalogError::ClearBucket {
                            bucket: name.into_owned(),
                            source,
                        });
                    }
                }
            }
            Ok(())
        })
    }

    /// Whether the last load completed.
    ///
    /// Any failure to read the flag counts as unpopulated and is logged at
    /// debug level.
    #[must_use]
    pub fn populated(&self) -> bool {
        match guard::require(&self.store) {
            Ok(()) => true,
            Err(reason) => {
                debug!("catalog at {} is not populated: {reason}", self.path);
                false
            }
        }
    }

    /// Fail with [`CatalogError::Unpopulated`] unless the last load completed.
    pub fn require_populated(&self) -> Result<(), CatalogError> {
        guard::require(&self.store).map_err(CatalogError::from)
    }

    /// Look up an airport by ident.
    pub fn airport(&self, code: &str) -> Result<Airport, CatalogError> {
        self.lookup(layout::AIRPORTS, code)
    }

    /// Look up a country by ISO code.
    pub fn country(&self, code: &str) -> Result<Country, CatalogError> {
        self.lookup(layout::COUNTRIES, code)
    }

    /// Look up a region by ISO region code.
    pub fn region(&self, code: &str) -> Result<Region, CatalogError> {
        self.lookup(layout::REGIONS, code)
    }

    /// Runways of an airport ordered by their `"<end1>/<end2>"` key.
    ///
    /// A known airport without runways yields an empty list; an airport that
    /// is neither in the runway data nor in the airport data is
    /// [`CatalogError::NotFound`].
    pub fn runways(&self, code: &str) -> Result<Vec<Runway>, CatalogError> {
        self.store.view(|tx| {
            let not_found = |kind| CatalogError::NotFound {
                kind,
                code: code.to_owned(),
            };
            let Some(runways) = tx.bucket(layout::RUNWAYS)? else {
                return Err(not_found(RecordKind::Runway));
            };
            let Some(airport) = runways.bucket(code.as_bytes())? else {
                let known = match tx.bucket(layout::AIRPORTS)? {
                    Some(airports) => airports.get(code.as_bytes())?.is_some(),
                    None => false,
                };
                return if known {
                    Ok(Vec::new())
                } else {
                    Err(not_found(RecordKind::Airport))
                };
            };

            let mut found = Vec::new();
            airport.for_each(|key, value| {
                let runway: Runway = decode(value).map_err(|source| CatalogError::Decode {
                    code: format!("{code}/{}", String::from_utf8_lossy(key)),
                    source,
                })?;
                found.push(runway);
                Ok::<_, CatalogError>(())
            })?;
            Ok(found)
        })
    }

    /// Report dangling references between the loaded records.
    ///
    /// The store is read, never modified.
    pub fn validate_references(&self) -> Result<ReferenceReport, CatalogError> {
        validate::scan(&self.store)
    }

    /// Release the store.
    pub fn close(self) -> Result<(), CatalogError> {
        self.store.close()?;
        debug!("closed catalog at {}", self.path);
        Ok(())
    }

    fn lookup<R: Record>(&self, bucket: &[u8], code: &str) -> Result<R, CatalogError> {
        let bytes = self.store.view(|tx| match tx.bucket(bucket)? {
            Some(records) => records.get(code.as_bytes()),
            None => Ok(None),
        })?;
        let bytes = bytes.ok_or_else(|| CatalogError::NotFound {
            kind: R::KIND,
            code: code.to_owned(),
        })?;
        decode(&bytes).map_err(|source| CatalogError::Decode {
            code: code.to_owned(),
            source,
        })
    }
}
