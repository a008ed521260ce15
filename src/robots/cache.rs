//! Robots.txt caching implementation
//!
//! Policies are cached per origin and refreshed once older than a TTL. Each
//! origin has its own async lock, so a slow robots.txt fetch for one site
//! never holds up checks against another.

use crate::robots::{fetch_robots, ParsedRobots};
use crate::url::{origin, parse_http_url};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use dashmap::DashMap;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Cached robots.txt policy for an origin
#[derive(Debug, Clone)]
pub struct CachedRobots {
    /// The parsed robots.txt content
    pub content: Arc<ParsedRobots>,

    /// When the robots.txt was fetched
    pub fetched_at: DateTime<Utc>,
}

impl CachedRobots {
    /// Creates a new CachedRobots stamped with the current time
    pub fn new(content: ParsedRobots) -> Self {
        Self {
            content: Arc::new(content),
            fetched_at: Utc::now(),
        }
    }

    /// Checks if the cached policy is older than `ttl`
    pub fn is_stale(&self, ttl: ChronoDuration) -> bool {
        self.age() > ttl
    }

    /// Returns the age of the cached policy
    pub fn age(&self) -> ChronoDuration {
        Utc::now() - self.fetched_at
    }
}

type Slot = Arc<Mutex<Option<CachedRobots>>>;

/// Process-wide robots.txt policy cache keyed by origin
pub struct RobotsCache {
    client: Client,
    ttl: ChronoDuration,
    fetch_timeout: Duration,
    entries: DashMap<String, Slot>,
}

impl RobotsCache {
    /// Creates an empty cache
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client used for robots.txt requests
    /// * `ttl` - How long a fetched policy stays valid
    /// * `fetch_timeout` - Timeout for a single robots.txt request
    pub fn new(client: Client, ttl: Duration, fetch_timeout: Duration) -> Self {
        let ttl = ChronoDuration::from_std(ttl).unwrap_or_else(|_| ChronoDuration::hours(1));
        Self {
            client,
            ttl,
            fetch_timeout,
            entries: DashMap::new(),
        }
    }

    /// Checks whether `url` may be fetched by `user_agent`
    ///
    /// URLs without an HTTP(S) origin are allowed here; the engine rejects
    /// them on its own.
    pub async fn can_fetch(&self, url: &str, user_agent: &str) -> bool {
        let Some(origin) = parse_http_url(url).and_then(|u| origin(&u)) else {
            return true;
        };

        let policy = self.policy_for(&origin, user_agent).await;
        policy.is_allowed(url, user_agent)
    }

    /// Returns the policy for `origin`, fetching it on a miss or when stale
    ///
    /// Concurrent callers for the same origin wait on one fetch instead of
    /// issuing their own.
    pub async fn policy_for(&self, origin: &str, user_agent: &str) -> Arc<ParsedRobots> {
        let slot: Slot = Arc::clone(&self.entries.entry(origin.to_string()).or_default());
        let mut cached = slot.lock().await;

        if let Some(entry) = cached.as_ref() {
            if !entry.is_stale(self.ttl) {
                tracing::trace!("Using cached robots.txt for {}", origin);
                return Arc::clone(&entry.content);
            }
        }

        tracing::debug!("Fetching robots.txt for {}", origin);
        let fresh = CachedRobots::new(
            fetch_robots(&self.client, origin, user_agent, self.fetch_timeout).await,
        );
        let content = Arc::clone(&fresh.content);
        *cached = Some(fresh);
        content
    }

    /// Number of origins with a cache slot
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
