use aptdata_core::Airport;

use super::{Fields, RowParseError, SourceLoader};
use crate::bucket::{Bucket, StoreError};
use crate::layout;

/// Loader for `airports.csv`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AirportLoader;

impl SourceLoader for AirportLoader {
    type Record = Airport;
    const BUCKET: &'static [u8] = layout::AIRPORTS;
    const DEFAULT_FILE: &'static str = "airports.csv";
    const COLUMNS: usize = 14;

    fn parse_row(fields: &mut Fields<'_>) -> Result<Airport, RowParseError> {
        Ok(Airport {
            code: fields.key(1, "ident")?,
            name: fields.text(3),
            latitude: fields.float(4, "latitude_deg")?,
            longitude: fields.float(5, "longitude_deg")?,
            elevation: fields.integer(6, "elevation_ft")?,
            continent: fields.text(7),
            country: fields.text(8),
            region: fields.text(9),
            city: fields.text(10),
            iata: fields.text(13),
        })
    }

    fn write(bucket: &Bucket<'_>, record: &Airport, value: &[u8]) -> Result<(), StoreError> {
        bucket.put(record.code.as_bytes(), value)
    }
}
