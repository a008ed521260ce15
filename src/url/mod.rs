//! URL handling module for Contact Crawler
//!
//! This module provides host, site-domain and origin extraction used for
//! record attribution, robots.txt caching and per-host rate limiting.

mod domain;

// Re-export main functions
pub use domain::{extract_domain, host_key, origin, site_domain};

use url::Url;

/// Parses a candidate URL, accepting only absolute HTTP(S) URLs with a host
///
/// # Examples
///
/// ```
/// use contact_crawler::url::parse_http_url;
///
/// assert!(parse_http_url("https://example.com/").is_some());
/// assert!(parse_http_url("mailto:someone@example.com").is_none());
/// assert!(parse_http_url("/relative/path").is_none());
/// ```
pub fn parse_http_url(candidate: &str) -> Option<Url> {
    let url = Url::parse(candidate.trim()).ok()?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return None;
    }
    Some(url)
}

/// Returns true if `url` belongs to `domain` or one of its subdomains
///
/// Used to drop a search engine's self-referential links.
pub fn is_on_domain(url: &str, domain: &str) -> bool {
    match parse_http_url(url).and_then(|u| extract_domain(&u)) {
        Some(host) => host == domain || host.ends_with(&format!(".{}", domain)),
        // Unparseable links are compared textually
        None => url.contains(domain),
    }
}
