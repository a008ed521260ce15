use async_trait::async_trait;
use thiserror::Error;

/// Failure of a single search backend
///
/// Never fatal: the gatherer logs it and carries on with the other backends.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{engine} returned HTTP {status}")]
    Status { engine: &'static str, status: u16 },

    #[error("{0} refused the request (captcha or rate limit)")]
    Blocked(&'static str),

    #[error("Failed to build or parse {engine} results: {message}")]
    Parse {
        engine: &'static str,
        message: String,
    },
}

/// A source of seed URLs for a keyword
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Short lowercase backend name, as used in `search.engines`
    fn name(&self) -> &'static str;

    /// Returns candidate page URLs for `keyword`, in result order
    async fn search(&self, keyword: &str) -> Result<Vec<String>, SearchError>;
}
