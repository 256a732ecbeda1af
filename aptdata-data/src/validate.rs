//! Read-only check for dangling references between loaded records.
//!
//! References such as an airport's country code are never enforced at load
//! time. This pass reports the ones pointing at records that do not exist:
//! runways grouped under an unknown airport, airports naming an unknown
//! country or region, and regions naming an unknown country. Empty reference
//! fields are not reported.

use std::collections::BTreeSet;

use aptdata_core::{Airport, Record, RecordKind, Region, decode};
use log::info;
use serde::Serialize;

use crate::bucket::{BucketStore, StoreError, Tx};
use crate::catalog::CatalogError;
use crate::layout;

/// A reference to a record that is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    /// Kind of the record holding the reference.
    pub kind: RecordKind,
    /// Code of the record holding the reference.
    pub code: String,
    /// Field carrying the reference.
    pub field: &'static str,
    /// Code the field points at.
    pub target: String,
}

/// Outcome of [`scan`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceReport {
    /// Dangling references in scan order: runways, airports, then regions.
    pub dangling: Vec<DanglingReference>,
}

impl ReferenceReport {
    /// Whether every reference resolved.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
    }

    fn check(
        &mut self,
        known: &BTreeSet<Vec<u8>>,
        kind: RecordKind,
        code: &str,
        field: &'static str,
        target: &str,
    ) {
        if !target.is_empty() && !known.contains(target.as_bytes()) {
            self.dangling.push(DanglingReference {
                kind,
                code: code.to_owned(),
                field,
                target: target.to_owned(),
            });
        }
    }
}

/// Scan the store for dangling references inside one read transaction.
pub fn scan(store: &BucketStore) -> Result<ReferenceReport, CatalogError> {
    let report = store.view(|tx| {
        let airports = keys(tx, layout::AIRPORTS)?;
        let countries = keys(tx, layout::COUNTRIES)?;
        let regions = keys(tx, layout::REGIONS)?;
        let mut report = ReferenceReport::default();

        if let Some(runways) = tx.bucket(layout::RUNWAYS)? {
            for name in runways.bucket_names()? {
                let airport = String::from_utf8_lossy(&name);
                report.check(&airports, RecordKind::Runway, &airport, "airport", &airport);
            }
        }

        for_each_record(tx, layout::AIRPORTS, |airport: Airport| {
            report.check(
                &countries,
                RecordKind::Airport,
                &airport.code,
                "country",
                &airport.country,
            );
            report.check(
                &regions,
                RecordKind::Airport,
                &airport.code,
                "region",
                &airport.region,
            );
        })?;

        for_each_record(tx, layout::REGIONS, |region: Region| {
            report.check(
                &countries,
                RecordKind::Region,
                &region.code,
                "country",
                &region.country,
            );
        })?;

        Ok::<_, CatalogError>(report)
    })?;

    info!(
        "reference scan found {} dangling references",
        report.dangling.len()
    );
    Ok(report)
}

fn keys(tx: &Tx<'_>, bucket: &[u8]) -> Result<BTreeSet<Vec<u8>>, StoreError> {
    let mut found = BTreeSet::new();
    if let Some(records) = tx.bucket(bucket)? {
        records.for_each(|key, _| {
            found.insert(key.to_vec());
            Ok::<_, StoreError>(())
        })?;
    }
    Ok(found)
}

fn for_each_record<R, F>(tx: &Tx<'_>, bucket: &[u8], mut visit: F) -> Result<(), CatalogError>
where
    R: Record,
    F: FnMut(R),
{
    let Some(records) = tx.bucket(bucket)? else {
        return Ok(());
    };
    records.for_each(|key, value| {
        let record = decode(value).map_err(|source| CatalogError::Decode {
            code: String::from_utf8_lossy(key).into_owned(),
            source,
        })?;
        visit(record);
        Ok(())
    })
}
