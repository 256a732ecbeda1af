use aptdata_core::{Runway, RunwayEnd};

use super::{Fields, RowParseError, SourceLoader};
use crate::bucket::{Bucket, StoreError};
use crate::layout;

/// Loader for `runways.csv`.
///
/// Runways are grouped into one nested bucket per airport. The published
/// header carries a trailing empty column, so rows are read flexibly.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunwayLoader;

/// First column of each end block: ident, latitude, longitude, elevation,
/// heading, displaced threshold.
const LOW_END: usize = 8;
const HIGH_END: usize = 14;

impl SourceLoader for RunwayLoader {
    type Record = Runway;
    const BUCKET: &'static [u8] = layout::RUNWAYS;
    const DEFAULT_FILE: &'static str = "runways.csv";
    const COLUMNS: usize = 20;
    const FLEXIBLE: bool = true;

    fn parse_row(fields: &mut Fields<'_>) -> Result<Runway, RowParseError> {
        Ok(Runway {
            airport: fields.key(2, "airport_ident")?,
            length: fields.integer(3, "length_ft")?,
            width: fields.integer(4, "width_ft")?,
            surface: fields.text(5),
            lighted: fields.flag(6, "lighted")?,
            closed: fields.flag(7, "closed")?,
            end1: parse_end(fields, LOW_END)?,
            end2: parse_end(fields, HIGH_END)?,
        })
    }

    fn write(bucket: &Bucket<'_>, record: &Runway, value: &[u8]) -> Result<(), StoreError> {
        let airport = bucket.create_bucket_if_not_exists(record.airport.as_bytes())?;
        airport.put(record.key().as_bytes(), value)
    }
}

fn parse_end(fields: &mut Fields<'_>, first: usize) -> Result<RunwayEnd, RowParseError> {
    Ok(RunwayEnd {
        name: fields.text(first),
        latitude: fields.float(first + 1, "latitude_deg")?,
        longitude: fields.float(first + 2, "longitude_deg")?,
        elevation: fields.integer(first + 3, "elevation_ft")?,
        heading: fields.float(first + 4, "heading_degT")?,
        displaced: fields.integer(first + 5, "displaced_threshold_ft")?,
    })
}
