//! Crawler module for page fetching and contact extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with content-type filtering
//! - HTML parsing into a text corpus
//! - Per-host rate limiting
//! - The concurrent crawl engine and the keyword scheduler loop

mod engine;
mod fetcher;
mod language;
mod parser;
mod rate_limiter;
mod scheduler;

pub use engine::{CrawlEngine, CrawlReport, RecordHandler, SkipReason, UrlOutcome};
pub use fetcher::{
    build_http_client, fetch_page, is_html_content_type, FetchResult, DEFAULT_ACCEPT,
    DEFAULT_ACCEPT_LANGUAGE,
};
pub use language::classify_language;
pub use parser::{parse_page, ParsedPage};
pub use rate_limiter::HostRateLimiter;
pub use scheduler::{spawn_auto_loop, CrawlController, CycleError, CycleSummary, Scheduler};
