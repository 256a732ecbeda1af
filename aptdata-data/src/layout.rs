//! Names of the buckets and keys that make up a catalog.

/// Airports keyed by ident.
pub const AIRPORTS: &[u8] = b"Airports";
/// Per-airport runway buckets keyed by `"<end1>/<end2>"`.
pub const RUNWAYS: &[u8] = b"Runways";
/// Countries keyed by ISO code.
pub const COUNTRIES: &[u8] = b"Countries";
/// Regions keyed by ISO region code.
pub const REGIONS: &[u8] = b"Regions";
/// Catalog metadata.
pub const META: &[u8] = b"Meta";
/// Key of the population flag inside [`META`].
pub const IS_POPULATED: &[u8] = b"IsPopulated";

/// Every top-level bucket, in the order a reload clears them.
pub const ALL_BUCKETS: [&[u8]; 5] = [AIRPORTS, RUNWAYS, COUNTRIES, REGIONS, META];
