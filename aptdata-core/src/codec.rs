//! Binary encoding for records stored in the bucket store.
//!
//! Values are serialised with `bincode` using its default options: varint
//! integers, little-endian floats, no size limit, and trailing bytes rejected.
//! The encoding is not versioned; changing a record's fields changes the
//! format and previously written stores must be reloaded.

use std::fmt;

use bincode::Options;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::{Airport, Country, Region, Runway};

/// Kind of value held in the store, used to label codec failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// An [`Airport`].
    Airport,
    /// A [`Runway`].
    Runway,
    /// A [`Country`].
    Country,
    /// A [`Region`].
    Region,
    /// The boolean population flag.
    PopulationFlag,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Airport => "airport",
            Self::Runway => "runway",
            Self::Country => "country",
            Self::Region => "region",
            Self::PopulationFlag => "population flag",
        };
        f.write_str(label)
    }
}

/// A value that can be written to and read from the store.
pub trait Record: Serialize + DeserializeOwned {
    /// Kind reported in codec errors.
    const KIND: RecordKind;
}

impl Record for Airport {
    const KIND: RecordKind = RecordKind::Airport;
}

impl Record for Runway {
    const KIND: RecordKind = RecordKind::Runway;
}

impl Record for Country {
    const KIND: RecordKind = RecordKind::Country;
}

impl Record for Region {
    const KIND: RecordKind = RecordKind::Region;
}

impl Record for bool {
    const KIND: RecordKind = RecordKind::PopulationFlag;
}

/// Errors raised while encoding or decoding a stored value.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The record could not be serialised.
    #[error("failed to encode {kind}: {source}")]
    Encode {
        /// Kind of record being encoded.
        kind: RecordKind,
        /// Serialiser failure.
        #[source]
        source: bincode::Error,
    },
    /// The stored bytes were truncated or malformed.
    #[error("failed to decode {kind}: {source}")]
    Decode {
        /// Kind of record being decoded.
        kind: RecordKind,
        /// Deserialiser failure.
        #[source]
        source: bincode::Error,
    },
}

fn options() -> impl Options {
    bincode::DefaultOptions::new()
}

/// Encode a record into its stored representation.
///
/// # Examples
/// ```
/// use aptdata_core::{Country, decode, encode};
///
/// let country = Country { code: "US".into(), name: "United States".into() };
/// let bytes = encode(&country).expect("encode country");
/// let decoded: Country = decode(&bytes).expect("decode country");
/// assert_eq!(decoded, country);
/// ```
pub fn encode<R: Record>(record: &R) -> Result<Vec<u8>, CodecError> {
    options()
        .serialize(record)
        .map_err(|source| CodecError::Encode {
            kind: R::KIND,
            source,
        })
}

/// Decode a record from its stored representation.
///
/// The whole slice must be consumed; truncated input and trailing bytes are
/// both rejected.
pub fn decode<R: Record>(bytes: &[u8]) -> Result<R, CodecError> {
    options()
        .deserialize(bytes)
        .map_err(|source| CodecError::Decode {
            kind: R::KIND,
            source,
        })
}
