use serde::{Deserialize, Serialize};

/// A sub-national administrative region.
///
/// `code` combines the country and local codes (for example `US-WA`), while
/// `local_code` holds only the sub-national part (`WA`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Region {
    /// Region code, the primary key.
    pub code: String,
    /// Code local to the country.
    pub local_code: String,
    /// Region name.
    pub name: String,
    /// ISO code of the owning country.
    pub country: String,
}
