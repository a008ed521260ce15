use crate::config::Config;
use crate::crawler::{DEFAULT_ACCEPT, DEFAULT_ACCEPT_LANGUAGE};
use crate::search::backend::SearchBackend;
use crate::search::engines::{Engine, EngineLimits, HtmlSearchBackend};
use crate::search::user_agent::UserAgentPool;
use futures::future::join_all;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of one gather call
#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    /// Deduplicated seeds, in backend order
    pub seeds: Vec<String>,
    /// Number of backends queried
    pub backends: usize,
    /// Names of backends that returned an error
    pub failed: Vec<&'static str>,
}

impl SeedReport {
    /// True when there was at least one backend and every one failed
    pub fn all_failed(&self) -> bool {
        self.backends > 0 && self.failed.len() == self.backends
    }
}

/// Queries every backend concurrently and merges their results
pub struct SeedGatherer {
    backends: Vec<Arc<dyn SearchBackend>>,
}

impl SeedGatherer {
    pub fn new(backends: Vec<Arc<dyn SearchBackend>>) -> Self {
        Self { backends }
    }

    /// Builds the configured HTML backends against their public hosts
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_search_client(config)?;
        let agents = UserAgentPool::from_config(&config.user_agent);
        let limits = EngineLimits {
            max_results: config.search.max_results_per_engine,
            max_pages: config.search.max_pages,
            redirect_timeout: Duration::from_secs(config.search.redirect_timeout),
        };

        let backends = config
            .search
            .engines
            .iter()
            .filter_map(|name| Engine::from_name(name))
            .map(|engine| {
                Arc::new(HtmlSearchBackend::new(
                    engine,
                    client.clone(),
                    agents.clone(),
                    limits.clone(),
                )) as Arc<dyn SearchBackend>
            })
            .collect();

        Ok(Self::new(backends))
    }

    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Returns the deduplicated seed URLs for `keyword`
    pub async fn gather(&self, keyword: &str) -> Vec<String> {
        self.gather_report(keyword).await.seeds
    }

    /// Like [`gather`](Self::gather), also reporting which backends failed
    pub async fn gather_report(&self, keyword: &str) -> SeedReport {
        let results = join_all(self.backends.iter().map(|backend| async move {
            (backend.name(), backend.search(keyword).await)
        }))
        .await;

        let mut report = SeedReport {
            backends: self.backends.len(),
            ..SeedReport::default()
        };
        let mut seen = HashSet::new();

        for (name, result) in results {
            match result {
                Ok(urls) => {
                    tracing::debug!("{} contributed {} urls", name, urls.len());
                    report
                        .seeds
                        .extend(urls.into_iter().filter(|url| seen.insert(url.clone())));
                }
                Err(e) => {
                    tracing::warn!("Search backend {} failed for {:?}: {}", name, keyword, e);
                    report.failed.push(name);
                }
            }
        }

        report
    }
}

/// HTTP client for search result pages and redirect resolution
pub fn build_search_client(config: &Config) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE));

    Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(config.crawler.request_timeout))
        .connect_timeout(Duration::from_secs(config.crawler.connect_timeout))
        .gzip(true)
        .brotli(true)
        .build()
}
