//! Statistics generation from the contact database
//!
//! This module provides functionality for extracting and displaying
//! contact statistics from the storage layer.

use crate::record::ContactType;
use crate::storage::{SqliteStorage, StorageResult};
use std::collections::HashMap;
use std::fmt::Write;

/// Contact statistics summary
#[derive(Debug, Clone, Default)]
pub struct ContactStatistics {
    /// Total number of unique contacts
    pub total_contacts: u64,

    /// Count of contacts by type
    pub by_type: HashMap<ContactType, u64>,

    /// Number of distinct sites contributing contacts
    pub unique_sites: u64,
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `storage` - The storage backend to query
///
/// # Returns
///
/// * `Ok(ContactStatistics)` - Successfully loaded statistics
/// * `Err(StorageError)` - Failed to query statistics
pub fn load_statistics(storage: &SqliteStorage) -> StorageResult<ContactStatistics> {
    Ok(ContactStatistics {
        total_contacts: storage.count_contacts()?,
        by_type: storage.count_by_type()?,
        unique_sites: storage.count_sites()?,
    })
}

/// Renders statistics as a plain-text report
///
/// Every contact type is listed, in extraction order, including those with
/// no contacts yet.
pub fn format_statistics(stats: &ContactStatistics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Contact Statistics ===\n");
    let _ = writeln!(out, "Overview:");
    let _ = writeln!(out, "  Total contacts: {}", stats.total_contacts);
    let _ = writeln!(out, "  Unique sites: {}", stats.unique_sites);
    let _ = writeln!(out);
    let _ = writeln!(out, "Contacts by Type:");

    for kind in ContactType::ALL {
        let count = stats.by_type.get(&kind).copied().unwrap_or(0);
        let percentage = if stats.total_contacts > 0 {
            (count as f64 / stats.total_contacts as f64) * 100.0
        } else {
            0.0
        };
        let _ = writeln!(out, "  {:<9} {} ({:.1}%)", kind, count, percentage);
    }

    out
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &ContactStatistics) {
    print!("{}", format_statistics(stats));
}
