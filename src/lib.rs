//! Contact Crawler: keyword-driven contact discovery
//!
//! This crate discovers pages for a keyword through several search backends,
//! crawls them politely (robots.txt, per-host rate limits, bounded
//! concurrency), and extracts deduplicated contact identifiers from them.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod record;
pub mod robots;
pub mod search;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid path in config: {0}")]
    InvalidPath(String),
}

// Re-export commonly used types
pub use config::Config;
pub use record::{ContactRecord, ContactType, Language};
pub use state::{PauseSignal, SchedulerState, SchedulerStatus};
