//! Statistics derived from fetched collections.

pub mod aggregator;

pub use aggregator::*;
