use aptdata_core::Region;

use super::{Fields, RowParseError, SourceLoader};
use crate::bucket::{Bucket, StoreError};
use crate::layout;

/// Loader for `regions.csv`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionLoader;

impl SourceLoader for RegionLoader {
    type Record = Region;
    const BUCKET: &'static [u8] = layout::REGIONS;
    const DEFAULT_FILE: &'static str = "regions.csv";
    const COLUMNS: usize = 6;

    fn parse_row(fields: &mut Fields<'_>) -> Result<Region, RowParseError> {
        Ok(Region {
            code: fields.key(1, "code")?,
            local_code: fields.text(2),
            name: fields.text(3),
            country: fields.text(5),
        })
    }

    fn write(bucket: &Bucket<'_>, record: &Region, value: &[u8]) -> Result<(), StoreError> {
        bucket.put(record.code.as_bytes(), value)
    }
}
