use serde::{Deserialize, Serialize};

/// The fundamental data for an airport.
///
/// `code` is the primary key (the OurAirports `ident`, usually the ICAO
/// code). Coordinates are WGS84 decimal degrees and elevation is in feet.
///
/// # Examples
/// ```
/// use aptdata_core::Airport;
///
/// let airport = Airport {
///     code: "KSEA".into(),
///     name: "Seattle Tacoma International Airport".into(),
///     latitude: 47.449,
///     longitude: -122.309,
///     elevation: 433,
///     city: "Seattle".into(),
///     region: "US-WA".into(),
///     country: "US".into(),
///     continent: "NA".into(),
///     iata: "SEA".into(),
/// };
/// assert_eq!(airport.code, "KSEA");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Airport {
    /// Unique airport identifier.
    pub code: String,
    /// Official airport name.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Field elevation in feet.
    pub elevation: i64,
    /// Municipality served by the airport.
    pub city: String,
    /// Region code, see [`crate::Region`].
    pub region: String,
    /// ISO country code, see [`crate::Country`].
    pub country: String,
    /// Two-letter continent code.
    pub continent: String,
    /// IATA code, empty when the airport has none.
    pub iata: String,
}
