//! Seed discovery
//!
//! This module turns a keyword into candidate page URLs by querying several
//! public search engines in parallel and merging their results.

mod backend;
mod engines;
mod gatherer;
mod user_agent;

pub use backend::{SearchBackend, SearchError};
pub use engines::{Engine, EngineLimits, HtmlSearchBackend, KNOWN_ENGINES};
pub use gatherer::{build_search_client, SeedGatherer, SeedReport};
pub use user_agent::UserAgentPool;
