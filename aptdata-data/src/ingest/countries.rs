use aptdata_core::Country;

use super::{Fields, RowParseError, SourceLoader};
use crate::bucket::{Bucket, StoreError};
use crate::layout;

/// Loader for `countries.csv`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountryLoader;

impl SourceLoader for CountryLoader {
    type Record = Country;
    const BUCKET: &'static [u8] = layout::COUNTRIES;
    const DEFAULT_FILE: &'static str = "countries.csv";
    const COLUMNS: usize = 3;

    fn parse_row(fields: &mut Fields<'_>) -> Result<Country, RowParseError> {
        Ok(Country {
            code: fields.key(1, "code")?,
            name: fields.text(2),
        })
    }

    fn write(bucket: &Bucket<'_>, record: &Country, value: &[u8]) -> Result<(), StoreError> {
        bucket.put(record.code.as_bytes(), value)
    }
}
