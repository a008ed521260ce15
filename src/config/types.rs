use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for Contact Crawler
///
/// Every section and field has a default, so an empty TOML document is a
/// valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub search: SearchConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    pub scheduler: SchedulerConfig,
}

/// Fetch engine configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Total request timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Connection timeout, also used for robots.txt fetches (seconds)
    #[serde(rename = "connect-timeout")]
    pub connect_timeout: u64,

    /// Maximum requests per second to any single host
    #[serde(rename = "per-host-rate-limit")]
    pub per_host_rate_limit: f64,

    /// Maximum number of in-flight page fetches across all hosts
    #[serde(rename = "global-concurrency")]
    pub global_concurrency: u32,

    /// Maximum redirects followed for a single request
    #[serde(rename = "max-redirects")]
    pub max_redirects: u32,

    /// How long a fetched robots.txt stays valid (seconds)
    #[serde(rename = "robots-cache-ttl")]
    pub robots_cache_ttl: u64,

    /// Region used to interpret phone numbers without a country code
    #[serde(rename = "default-region")]
    pub default_region: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout: 15,
            connect_timeout: 10,
            per_host_rate_limit: 1.0,
            global_concurrency: 10,
            max_redirects: 10,
            robots_cache_ttl: 60 * 60,
            default_region: "CN".to_string(),
        }
    }
}

/// Seed discovery configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Result cap for each search backend
    #[serde(rename = "max-results-per-engine")]
    pub max_results_per_engine: usize,

    /// Result pages fetched per backend
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Timeout for resolving a redirect-wrapped result link (seconds)
    #[serde(rename = "redirect-timeout")]
    pub redirect_timeout: u64,

    /// Backends to query, in merge order
    pub engines: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results_per_engine: 30,
            max_pages: 3,
            redirect_timeout: 10,
            engines: vec![
                "duckduckgo".to_string(),
                "mojeek".to_string(),
                "baidu".to_string(),
                "sogou".to_string(),
            ],
        }
    }
}

/// Browser identities rotated across requests
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    pub agents: Vec<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            agents: vec![
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string(),
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15".to_string(),
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36".to_string(),
            ],
        }
    }
}

/// Output locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory holding the result files and the dedup database
    #[serde(rename = "data-dir")]
    pub data_dir: PathBuf,

    /// Directory receiving snapshot exports
    #[serde(rename = "export-dir")]
    pub export_dir: PathBuf,
}

impl OutputConfig {
    pub fn results_zh_path(&self) -> PathBuf {
        self.data_dir.join("results_zh.txt")
    }

    pub fn results_en_path(&self) -> PathBuf {
        self.data_dir.join("results_en.txt")
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("state.sqlite")
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            export_dir: PathBuf::from("export"),
        }
    }
}

/// Keyword scheduler behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Re-queue the last keyword when the scheduler goes idle
    #[serde(rename = "auto-loop")]
    pub auto_loop: bool,

    /// Delay before an idle scheduler re-queues the last keyword (seconds)
    #[serde(rename = "loop-interval")]
    pub loop_interval: u64,

    /// Sleep between dequeue attempts on an empty queue (milliseconds)
    #[serde(rename = "idle-wait-ms")]
    pub idle_wait_ms: u64,

    /// Sleep between pause flag checks (milliseconds)
    #[serde(rename = "pause-poll-ms")]
    pub pause_poll_ms: u64,

    /// Backoff after a failed cycle (milliseconds)
    #[serde(rename = "cycle-backoff-ms")]
    pub cycle_backoff_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            auto_loop: true,
            loop_interval: 60,
            idle_wait_ms: 300,
            pause_poll_ms: 200,
            cycle_backoff_ms: 500,
        }
    }
}
