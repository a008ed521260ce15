//! Crawl engine
//!
//! Fetches a batch of seed URLs concurrently and turns every page into
//! contact records. Each URL passes through:
//! - the shared admission gate (global concurrency cap)
//! - the pause gate, which holds the fetch until resumed
//! - the robots.txt policy for its origin
//! - the per-host rate limiter
//! - fetch, parse, extract and language classification
//!
//! Failures are per URL and show up only in the returned [`CrawlReport`].

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchResult};
use crate::crawler::language::classify_language;
use crate::crawler::parser::parse_page;
use crate::crawler::rate_limiter::HostRateLimiter;
use crate::extract::{extract_with_region, DEFAULT_REGION};
use crate::record::ContactRecord;
use crate::robots::RobotsCache;
use crate::search::UserAgentPool;
use crate::state::PauseSignal;
use crate::url::{host_key, parse_http_url, site_domain};
use futures::future::join_all;
use phonenumber::country;
use reqwest::Client;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Receives every record the engine produces
///
/// Called synchronously from the crawl workers, once per record, in
/// extraction order for a given page.
pub trait RecordHandler: Send + Sync {
    fn handle(&self, record: ContactRecord);
}

impl<F> RecordHandler for F
where
    F: Fn(ContactRecord) + Send + Sync,
{
    fn handle(&self, record: ContactRecord) {
        self(record)
    }
}

/// Why a URL produced no records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Not an absolute http(s) URL
    InvalidUrl,
    /// robots.txt disallows the URL for the chosen user agent
    RobotsDisallowed,
    /// Non-200 response
    HttpStatus,
    /// 200 response that is not HTML
    NotHtml,
    /// Request timed out
    Timeout,
    /// Connection or protocol failure
    Network,
    /// Page parsed but held no contacts
    NoContacts,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "invalid_url",
            Self::RobotsDisallowed => "robots_disallowed",
            Self::HttpStatus => "http_status",
            Self::NotHtml => "not_html",
            Self::Timeout => "timeout",
            Self::Network => "network",
            Self::NoContacts => "no_contacts",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final state of a single URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlOutcome {
    /// Every extracted record was dispatched
    Recorded { dispatched: usize },
    /// Nothing was dispatched
    Skipped(SkipReason),
    /// Pause was raised mid-page; the rest of the page's records were dropped
    Interrupted { dispatched: usize },
}

impl UrlOutcome {
    /// Records handed to the handler for this URL
    pub fn dispatched(&self) -> usize {
        match self {
            Self::Recorded { dispatched } | Self::Interrupted { dispatched } => *dispatched,
            Self::Skipped(_) => 0,
        }
    }

    /// True if the page body was fetched and parsed
    fn fetched(&self) -> bool {
        !matches!(
            self,
            Self::Skipped(
                SkipReason::InvalidUrl
                    | SkipReason::RobotsDisallowed
                    | SkipReason::HttpStatus
                    | SkipReason::NotHtml
                    | SkipReason::Timeout
                    | SkipReason::Network
            )
        )
    }
}

/// Tally of one `crawl` call
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// URLs handed to the engine
    pub urls: usize,
    /// Pages fetched as HTML and parsed
    pub pages_fetched: usize,
    /// Records passed to the handler
    pub records_dispatched: usize,
    /// Pages cut short by a pause
    pub interrupted: usize,
    /// Skipped URLs grouped by reason
    pub skipped: HashMap<SkipReason, usize>,
}

impl CrawlReport {
    fn record(&mut self, outcome: UrlOutcome) {
        self.urls += 1;
        if outcome.fetched() {
            self.pages_fetched += 1;
        }
        self.records_dispatched += outcome.dispatched();
        match outcome {
            UrlOutcome::Skipped(reason) => *self.skipped.entry(reason).or_insert(0) += 1,
            UrlOutcome::Interrupted { .. } => self.interrupted += 1,
            UrlOutcome::Recorded { .. } => {}
        }
    }

    /// Number of URLs skipped for `reason`
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    /// Total skipped URLs
    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }
}

/// Concurrent page fetcher and contact extractor
///
/// The admission semaphore, robots cache and rate limiter live as long as
/// the engine and are shared by every `crawl` call.
pub struct CrawlEngine {
    client: Client,
    robots: RobotsCache,
    limiter: HostRateLimiter,
    admission: Arc<Semaphore>,
    agents: UserAgentPool,
    region: country::Id,
    pause_poll: Duration,
}

/// Default poll step while a fetch waits on a pause
const DEFAULT_PAUSE_POLL: Duration = Duration::from_millis(200);

impl CrawlEngine {
    /// Creates an engine from its parts
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client for page fetches
    /// * `robots` - robots.txt policy cache
    /// * `limiter` - per-host rate limiter
    /// * `concurrency` - maximum in-flight page fetches
    /// * `agents` - user agents rotated across requests
    /// * `region` - default region for phone numbers
    pub fn new(
        client: Client,
        robots: RobotsCache,
        limiter: HostRateLimiter,
        concurrency: usize,
        agents: UserAgentPool,
        region: country::Id,
    ) -> Self {
        Self {
            client,
            robots,
            limiter,
            admission: Arc::new(Semaphore::new(concurrency.max(1))),
            agents,
            region,
            pause_poll: DEFAULT_PAUSE_POLL,
        }
    }

    /// Sets how often a paused fetch re-checks the pause flag
    pub fn with_pause_poll(mut self, poll: Duration) -> Self {
        self.pause_poll = poll.max(Duration::from_millis(1));
        self
    }

    /// Builds an engine from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let crawler = &config.crawler;
        let client = build_http_client(crawler)?;
        let robots = RobotsCache::new(
            client.clone(),
            Duration::from_secs(crawler.robots_cache_ttl),
            Duration::from_secs(crawler.connect_timeout),
        );
        let region = crawler
            .default_region
            .parse::<country::Id>()
            .unwrap_or(DEFAULT_REGION);

        Ok(Self::new(
            client,
            robots,
            HostRateLimiter::new(crawler.per_host_rate_limit),
            crawler.global_concurrency as usize,
            UserAgentPool::from_config(&config.user_agent),
            region,
        )
        .with_pause_poll(Duration::from_millis(config.scheduler.pause_poll_ms)))
    }

    /// Number of free admission permits
    pub fn available_permits(&self) -> usize {
        self.admission.available_permits()
    }

    /// Crawls every URL and returns once all of them are done
    ///
    /// Records are handed to `handler` as soon as each page is extracted.
    /// While `pause` is set, fetches that have not started wait for a
    /// resume and a page being dispatched drops its remaining records.
    pub async fn crawl(
        &self,
        keyword: &str,
        urls: &[String],
        handler: &dyn RecordHandler,
        pause: &PauseSignal,
    ) -> CrawlReport {
        let outcomes = join_all(
            urls.iter()
                .map(|url| self.process_url(keyword, url, handler, pause)),
        )
        .await;

        let mut report = CrawlReport::default();
        for outcome in outcomes {
            report.record(outcome);
        }
        report
    }

    async fn process_url(
        &self,
        keyword: &str,
        url: &str,
        handler: &dyn RecordHandler,
        pause: &PauseSignal,
    ) -> UrlOutcome {
        let Some(parsed) = parse_http_url(url) else {
            tracing::debug!("Skipping {}: not an http(s) URL", url);
            return UrlOutcome::Skipped(SkipReason::InvalidUrl);
        };

        // The semaphore is never closed, so this always yields a permit.
        let _permit = self.admission.acquire().await.ok();

        if pause.is_paused() {
            tracing::debug!("Holding {} until resumed", url);
            pause.wait_while_paused(self.pause_poll).await;
        }

        let user_agent = self.agents.pick().to_string();

        if !self.robots.can_fetch(url, &user_agent).await {
            tracing::debug!("Skipping {}: disallowed by robots.txt", url);
            return UrlOutcome::Skipped(SkipReason::RobotsDisallowed);
        }

        if let Some(key) = host_key(&parsed) {
            self.limiter.acquire(&key).await;
        }

        let body = match fetch_page(&self.client, url, &user_agent).await {
            FetchResult::Success { body, .. } => body,
            FetchResult::HttpError { status_code } => {
                tracing::debug!("Skipping {}: HTTP {}", url, status_code);
                return UrlOutcome::Skipped(SkipReason::HttpStatus);
            }
            FetchResult::ContentMismatch { content_type } => {
                tracing::debug!("Skipping {}: content type '{}'", url, content_type);
                return UrlOutcome::Skipped(SkipReason::NotHtml);
            }
            FetchResult::Timeout => {
                tracing::debug!("Skipping {}: timed out", url);
                return UrlOutcome::Skipped(SkipReason::Timeout);
            }
            FetchResult::NetworkError { error } => {
                tracing::debug!("Skipping {}: {}", url, error);
                return UrlOutcome::Skipped(SkipReason::Network);
            }
        };

        let page = parse_page(&body);
        let contacts = extract_with_region(&page.corpus, self.region);
        if contacts.is_empty() {
            tracing::debug!("No contacts on {}", url);
            return UrlOutcome::Skipped(SkipReason::NoContacts);
        }

        let lang = classify_language(&body);
        let domain = site_domain(&parsed)
            .or_else(|| parsed.host_str().map(str::to_string))
            .unwrap_or_default();
        let title = page.title.unwrap_or_default();

        let total = contacts.len();
        let mut dispatched = 0;
        for (contact_type, contact_value) in contacts {
            if pause.is_paused() {
                tracing::debug!(
                    "Paused on {}; dropping {} remaining records",
                    url,
                    total - dispatched
                );
                return UrlOutcome::Interrupted { dispatched };
            }

            handler.handle(ContactRecord {
                keyword: keyword.to_string(),
                lang,
                contact_type,
                contact_value,
                source_url: url.to_string(),
                page_title: title.clone(),
                site_domain: domain.clone(),
            });
            dispatched += 1;
        }

        tracing::debug!("{} records from {}", dispatched, url);
        UrlOutcome::Recorded { dispatched }
    }
}
