//! Output module for contact results
//!
//! This module handles:
//! - Appending first-seen records to per-language NDJSON files
//! - Exporting snapshots of the result files
//! - Reporting per-type contact statistics

mod sink;
mod snapshot;
pub mod stats;
mod traits;

pub use sink::{Persister, ResultWriter};
pub use snapshot::export_snapshot;
pub use stats::{format_statistics, load_statistics, print_statistics, ContactStatistics};
pub use traits::{OutputError, OutputResult, RecordSink};
