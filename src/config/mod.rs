//! Configuration module for Contact Crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! plus the environment overrides applied on top of them.
//!
//! # Example
//!
//! ```no_run
//! use contact_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Global concurrency: {}", config.crawler.global_concurrency);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, SchedulerConfig, SearchConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{apply_env_overrides, load_config, load_config_or_default, parse_config};
pub use validation::validate;
