//! Repository layer: user-scoped reads and writes of analytics inputs.

mod family;
mod genomic;
mod profile;
mod sample;

pub use family::*;
pub use genomic::*;
pub use profile::*;
pub use sample::*;

/// Timestamp format used for every TEXT datetime column.
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Date format used for every TEXT date column.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
