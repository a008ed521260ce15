//! HTML result-page backends
//!
//! Each engine is an HTML search page queried with a plain GET. Engines whose
//! result anchors point at their own click-tracking redirects (Baidu, Sogou)
//! have every candidate resolved to its final destination first.

use crate::search::backend::{SearchBackend, SearchError};
use crate::search::user_agent::UserAgentPool;
use crate::url::{is_on_domain, parse_http_url};
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

/// Names accepted in `search.engines`, in default merge order
pub const KNOWN_ENGINES: &[&str] = &["duckduckgo", "mojeek", "baidu", "sogou"];

/// Supported search engines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    DuckDuckGo,
    Mojeek,
    Baidu,
    Sogou,
}

impl Engine {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "duckduckgo" => Some(Self::DuckDuckGo),
            "mojeek" => Some(Self::Mojeek),
            "baidu" => Some(Self::Baidu),
            "sogou" => Some(Self::Sogou),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "duckduckgo",
            Self::Mojeek => "mojeek",
            Self::Baidu => "baidu",
            Self::Sogou => "sogou",
        }
    }

    /// Registrable domain whose links are dropped from results
    pub fn own_domain(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "duckduckgo.com",
            Self::Mojeek => "mojeek.com",
            Self::Baidu => "baidu.com",
            Self::Sogou => "sogou.com",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "https://duckduckgo.com",
            Self::Mojeek => "https://www.mojeek.com",
            Self::Baidu => "https://www.baidu.com",
            Self::Sogou => "https://www.sogou.com",
        }
    }

    /// CSS selector for result anchors
    fn result_selector(&self) -> &'static str {
        match self {
            Self::Baidu => "h3 a[href]",
            _ => "a[href]",
        }
    }

    fn resolves_redirects(&self) -> bool {
        matches!(self, Self::Baidu | Self::Sogou)
    }

    /// Builds the URL of result page `page` (zero-based)
    pub fn page_url(&self, base_url: &str, keyword: &str, page: u32) -> Result<Url, url::ParseError> {
        let base = base_url.trim_end_matches('/');
        match self {
            Self::DuckDuckGo => Url::parse_with_params(
                &format!("{}/html/", base),
                &[("q", keyword.to_string()), ("s", (page * 30).to_string())],
            ),
            Self::Mojeek => Url::parse_with_params(
                &format!("{}/search", base),
                &[("q", keyword.to_string()), ("s", (page * 10).to_string())],
            ),
            Self::Baidu => Url::parse_with_params(
                &format!("{}/s", base),
                &[("wd", keyword.to_string()), ("pn", (page * 10).to_string())],
            ),
            Self::Sogou => Url::parse_with_params(
                &format!("{}/web", base),
                &[("query", keyword.to_string()), ("page", (page + 1).to_string())],
            ),
        }
    }
}

/// Per-backend limits
#[derive(Debug, Clone)]
pub struct EngineLimits {
    pub max_results: usize,
    pub max_pages: u32,
    pub redirect_timeout: Duration,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            max_results: 30,
            max_pages: 3,
            redirect_timeout: Duration::from_secs(10),
        }
    }
}

/// A [`SearchBackend`] scraping one engine's HTML result pages
pub struct HtmlSearchBackend {
    engine: Engine,
    base_url: String,
    own_domain: String,
    client: Client,
    agents: UserAgentPool,
    limits: EngineLimits,
}

impl HtmlSearchBackend {
    pub fn new(engine: Engine, client: Client, agents: UserAgentPool, limits: EngineLimits) -> Self {
        Self {
            engine,
            base_url: engine.default_base_url().to_string(),
            own_domain: engine.own_domain().to_string(),
            client,
            agents,
            limits,
        }
    }

    /// Points the backend at another host (a mirror or a mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replaces the domain whose links are dropped from results
    ///
    /// Pair with [`with_base_url`](Self::with_base_url) so the engine's own
    /// navigation links on a mirror are still filtered.
    pub fn with_own_domain(mut self, domain: impl Into<String>) -> Self {
        self.own_domain = domain.into().trim().to_ascii_lowercase();
        self
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    async fn fetch_results_page(&self, url: &Url) -> Result<String, SearchError> {
        let response = self
            .client
            .get(url.as_str())
            .header(USER_AGENT, self.agents.pick())
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.text().await?),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                Err(SearchError::Blocked(self.engine.name()))
            }
            status => Err(SearchError::Status {
                engine: self.engine.name(),
                status: status.as_u16(),
            }),
        }
    }

    fn parse_links(&self, html: &str) -> Result<Vec<String>, SearchError> {
        let selector = Selector::parse(self.engine.result_selector()).map_err(|e| {
            SearchError::Parse {
                engine: self.engine.name(),
                message: format!("{:?}", e),
            }
        })?;

        let document = Html::parse_document(html);
        Ok(document
            .select(&selector)
            .filter_map(|a| a.value().attr("href"))
            .filter(|href| parse_http_url(href).is_some())
            .map(|href| href.trim().to_string())
            .collect())
    }

    /// Follows redirects from `url`, returning the original on any failure
    async fn resolve_redirect(&self, url: &str) -> String {
        let request = self
            .client
            .get(url)
            .header(USER_AGENT, self.agents.pick())
            .timeout(self.limits.redirect_timeout);

        match request.send().await {
            Ok(response) => response.url().to_string(),
            Err(e) => {
                tracing::debug!("Redirect resolution failed for {}: {}", url, e);
                url.to_string()
            }
        }
    }

    fn accept(&self, link: &str) -> bool {
        parse_http_url(link).is_some() && !is_on_domain(link, &self.own_domain)
    }
}

#[async_trait]
impl SearchBackend for HtmlSearchBackend {
    fn name(&self) -> &'static str {
        self.engine.name()
    }

    async fn search(&self, keyword: &str) -> Result<Vec<String>, SearchError> {
        let mut urls: Vec<String> = Vec::new();
        let mut last_error = None;
        let mut any_page_ok = false;

        for page in 0..self.limits.max_pages {
            let page_url = self
                .engine
                .page_url(&self.base_url, keyword, page)
                .map_err(|e| SearchError::Parse {
                    engine: self.engine.name(),
                    message: e.to_string(),
                })?;

            let html = match self.fetch_results_page(&page_url).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::debug!("{} page {} failed: {}", self.engine.name(), page + 1, e);
                    last_error = Some(e);
                    continue;
                }
            };
            any_page_ok = true;

            let links = self.parse_links(&html)?;
            if self.engine.resolves_redirects() {
                let resolved = join_all(links.iter().map(|link| self.resolve_redirect(link))).await;
                urls.extend(resolved.into_iter().filter(|link| self.accept(link)));
            } else {
                urls.extend(links.into_iter().filter(|link| self.accept(link)));
            }

            if urls.len() >= self.limits.max_results {
                break;
            }
        }

        if !any_page_ok {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        urls.truncate(self.limits.max_results);
        tracing::debug!("{} returned {} seeds for {:?}", self.engine.name(), urls.len(), keyword);
        Ok(urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_names_roundtrip() {
        for name in KNOWN_ENGINES {
            let engine = Engine::from_name(name).unwrap();
            assert_eq!(engine.name(), *name);
        }
        assert_eq!(Engine::from_name("Baidu"), Some(Engine::Baidu));
        assert_eq!(Engine::from_name("bing"), None);
    }

    #[test]
    fn test_page_urls() {
        let ddg = Engine::DuckDuckGo.page_url("https://duckduckgo.com", "acme corp", 1).unwrap();
        assert_eq!(ddg.as_str(), "https://duckduckgo.com/html/?q=acme+corp&s=30");

        let mojeek = Engine::Mojeek.page_url("https://www.mojeek.com/", "acme", 2).unwrap();
        assert_eq!(mojeek.as_str(), "https://www.mojeek.com/search?q=acme&s=20");

        let baidu = Engine::Baidu.page_url("https://www.baidu.com", "acme", 0).unwrap();
        assert_eq!(baidu.as_str(), "https://www.baidu.com/s?wd=acme&pn=0");

        let sogou = Engine::Sogou.page_url("https://www.sogou.com", "acme", 0).unwrap();
        assert_eq!(sogou.as_str(), "https://www.sogou.com/web?query=acme&page=1");
    }

    #[test]
    fn test_keyword_is_percent_encoded() {
        let url = Engine::Baidu.page_url("https://www.baidu.com", "联系 方式", 0).unwrap();
        assert!(url.as_str().starts_with("https://www.baidu.com/s?wd=%E8%81%94"));
        assert!(url.as_str().ends_with("&pn=0"));
    }

    #[test]
    fn test_parse_links_filters_non_http() {
        let backend = HtmlSearchBackend::new(
            Engine::Mojeek,
            Client::new(),
            UserAgentPool::new(vec!["TestBot/1.0".to_string()]),
            EngineLimits::default(),
        );
        let html = r#"
            <a href="https://acme.com/contact">a</a>
            <a href="/relative">b</a>
            <a href="mailto:x@y.com">c</a>
            <a href="https://www.mojeek.com/about">d</a>
        "#;
        let links = backend.parse_links(html).unwrap();
        assert_eq!(links, vec!["https://acme.com/contact", "https://www.mojeek.com/about"]);
        assert!(backend.accept(&links[0]));
        assert!(!backend.accept(&links[1]));
    }

    #[test]
    fn test_baidu_only_reads_heading_links() {
        let backend = HtmlSearchBackend::new(
            Engine::Baidu,
            Client::new(),
            UserAgentPool::new(vec!["TestBot/1.0".to_string()]),
            EngineLimits::default(),
        );
        let html = r#"
            <div><h3><a href="https://acme.cn/">result</a></h3></div>
            <div><a href="https://ads.example.com/">ad</a></div>
        "#;
        assert_eq!(backend.parse_links(html).unwrap(), vec!["https://acme.cn/"]);
    }

    #[test]
    fn test_own_domain_override() {
        let backend = HtmlSearchBackend::new(
            Engine::Sogou,
            Client::new(),
            UserAgentPool::new(vec!["TestBot/1.0".to_string()]),
            EngineLimits::default(),
        )
        .with_own_domain("Mirror.Example");
        assert!(!backend.accept("https://www.mirror.example/link?url=abc"));
        assert!(backend.accept("https://www.sogou.com/about"));
    }
}
