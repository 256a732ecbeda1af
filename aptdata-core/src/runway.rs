use serde::{Deserialize, Serialize};

/// Separator between the two end names in a runway key.
pub(crate) const KEY_SEPARATOR: char = '/';

/// One physical end of a runway.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RunwayEnd {
    /// End designator such as `16L`.
    pub name: String,
    /// Latitude of the threshold in decimal degrees.
    pub latitude: f64,
    /// Longitude of the threshold in decimal degrees.
    pub longitude: f64,
    /// Threshold elevation in feet.
    pub elevation: i64,
    /// True heading in degrees.
    pub heading: f64,
    /// Displaced threshold distance in feet.
    pub displaced: i64,
}

/// The fundamental data for a runway.
///
/// A runway belongs to exactly one airport and is identified within it by the
/// names of its two ends.
///
/// # Examples
/// ```
/// use aptdata_core::{Runway, RunwayEnd};
///
/// let runway = Runway {
///     airport: "KSEA".into(),
///     end1: RunwayEnd { name: "16L".into(), ..RunwayEnd::default() },
///     end2: RunwayEnd { name: "34R".into(), ..RunwayEnd::default() },
///     ..Runway::default()
/// };
/// assert_eq!(runway.key(), "16L/34R");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Runway {
    /// Code of the owning airport.
    pub airport: String,
    /// Length in feet.
    pub length: i64,
    /// Width in feet.
    pub width: i64,
    /// Surface material as published, for example `ASP`.
    pub surface: String,
    /// Whether the runway is lighted.
    pub lighted: bool,
    /// Whether the runway is closed.
    pub closed: bool,
    /// Low-numbered end.
    pub end1: RunwayEnd,
    /// High-numbered end.
    pub end2: RunwayEnd,
}

impl Runway {
    /// Composite key addressing this runway inside its airport's bucket.
    #[must_use]
    pub fn key(&self) -> String {
        composite_key(&self.end1.name, &self.end2.name)
    }
}

/// Build the `"<end1>/<end2>"` key for a pair of end names.
pub(crate) fn composite_key(end1: &str, end2: &str) -> String {
    format!("{end1}{KEY_SEPARATOR}{end2}")
}
