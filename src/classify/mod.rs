//! Field classifiers.
//!
//! Pure functions, one per API document shape, each walking the parsed
//! document model and emitting zero or more metric descriptors. No
//! classifier touches the network or holds state across poll cycles.

pub mod enclosure;
pub mod statistics;

pub use enclosure::classify_enclosure_status;
pub use statistics::{classify_statistics, StatisticsShape};
