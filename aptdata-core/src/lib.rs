//! Core domain records for the aptdata reference database.
//!
//! The records are plain value objects: they are materialised from source
//! rows during a load, encoded with [`codec`] into the bucket store, and
//! decoded again on every lookup. Nothing here performs I/O.
//!
//! Cross-record references (a runway's airport, an airport's country) are
//! carried as codes and never enforced.

#![forbid(unsafe_code)]

mod airport;
pub mod codec;
mod country;
mod region;
mod runway;

pub use airport::Airport;
pub use codec::{CodecError, Record, RecordKind, decode, encode};
pub use country::Country;
pub use region::Region;
pub use runway::{Runway, RunwayEnd};
