//! Robots.txt handling module
//!
//! This module provides functionality for fetching, parsing, and caching robots.txt files.
//! Any failure to obtain a policy is treated as "no restrictions" so that a
//! broken robots.txt never halts crawling.

mod cache;
mod parser;

pub use cache::{CachedRobots, RobotsCache};
pub use parser::ParsedRobots;

use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Fetches and parses `<origin>/robots.txt`
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `origin` - Origin to fetch from (`scheme://host[:port]`)
/// * `user_agent` - User-Agent header for the request
/// * `timeout` - Timeout for the whole request
///
/// # Returns
///
/// The parsed policy on HTTP 200, otherwise a permissive policy
pub async fn fetch_robots(
    client: &Client,
    origin: &str,
    user_agent: &str,
    timeout: Duration,
) -> ParsedRobots {
    let robots_url = format!("{}/robots.txt", origin.trim_end_matches('/'));

    let response = client
        .get(&robots_url)
        .header(USER_AGENT, user_agent)
        .timeout(timeout)
        .send()
        .await;

    match response {
        Ok(resp) if resp.status() == StatusCode::OK => match resp.text().await {
            Ok(body) => ParsedRobots::from_content(&body),
            Err(e) => {
                tracing::debug!("Failed to read {}: {}", robots_url, e);
                ParsedRobots::allow_all()
            }
        },
        Ok(resp) => {
            tracing::debug!("{} returned {}, allowing all", robots_url, resp.status());
            ParsedRobots::allow_all()
        }
        Err(e) => {
            tracing::debug!("Failed to fetch {}: {}", robots_url, e);
            ParsedRobots::allow_all()
        }
    }
}
