//! Keyword scheduler
//!
//! Runs one gather-and-crawl cycle per keyword, driven by the shared
//! [`SchedulerState`]:
//! - While paused, nothing is dequeued and the active keyword is kept
//! - With no active keyword, the head of the queue becomes active
//! - A cycle gathers seeds for the active keyword and crawls them
//! - A failed cycle is logged and followed by a short backoff
//!
//! [`CrawlController`] is the control surface over the same state, and
//! [`spawn_auto_loop`] re-feeds the last keyword when the scheduler idles.

use crate::config::{OutputConfig, SchedulerConfig};
use crate::crawler::engine::{CrawlEngine, CrawlReport, RecordHandler};
use crate::output::export_snapshot;
use crate::search::SeedGatherer;
use crate::state::{SchedulerState, SchedulerStatus};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};

/// Errors that end a cycle early
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("every search backend failed for {keyword:?}")]
    NoSeeds { keyword: String },

    #[error("crawl task for {keyword:?} did not complete: {source}")]
    CrawlPanicked {
        keyword: String,
        #[source]
        source: JoinError,
    },
}

/// Result of one completed cycle
#[derive(Debug, Clone, Default)]
pub struct CycleSummary {
    pub keyword: String,
    pub seeds: usize,
    pub report: CrawlReport,
}

/// Drives gather-and-crawl cycles off the keyword queue
pub struct Scheduler {
    state: SchedulerState,
    gatherer: Arc<SeedGatherer>,
    engine: Arc<CrawlEngine>,
    handler: Arc<dyn RecordHandler>,
    config: SchedulerConfig,
    seed_limit: Option<usize>,
}

impl Scheduler {
    pub fn new(
        state: SchedulerState,
        gatherer: Arc<SeedGatherer>,
        engine: Arc<CrawlEngine>,
        handler: Arc<dyn RecordHandler>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            state,
            gatherer,
            engine,
            handler,
            config,
            seed_limit: None,
        }
    }

    /// Caps the number of seeds crawled per cycle
    pub fn with_seed_limit(mut self, limit: usize) -> Self {
        self.seed_limit = Some(limit);
        self
    }

    pub fn state(&self) -> &SchedulerState {
        &self.state
    }

    /// Gathers seeds for `keyword` and crawls them
    ///
    /// An empty seed set is a completed cycle with nothing crawled; only a
    /// cycle where every backend failed is an error. The crawl runs on its
    /// own task so a panic inside it surfaces as
    /// [`CycleError::CrawlPanicked`]. Dropping the returned future aborts
    /// that task.
    pub async fn run_cycle(&self, keyword: &str) -> Result<CycleSummary, CycleError> {
        tracing::info!("Gathering seeds for {:?}", keyword);
        let gathered = self.gatherer.gather_report(keyword).await;
        if gathered.all_failed() {
            return Err(CycleError::NoSeeds {
                keyword: keyword.to_string(),
            });
        }

        let mut seeds = gathered.seeds;
        if let Some(limit) = self.seed_limit {
            seeds.truncate(limit);
        }

        if seeds.is_empty() {
            tracing::info!("No seeds found for {:?}", keyword);
            return Ok(CycleSummary {
                keyword: keyword.to_string(),
                ..CycleSummary::default()
            });
        }

        tracing::info!("Crawling {} seeds for {:?}", seeds.len(), keyword);
        let seed_count = seeds.len();
        let engine = Arc::clone(&self.engine);
        let handler = Arc::clone(&self.handler);
        let pause = self.state.pause_signal();
        let task_keyword = keyword.to_string();

        let mut task = AbortOnDrop(tokio::spawn(async move {
            engine
                .crawl(&task_keyword, &seeds, handler.as_ref(), &pause)
                .await
        }));

        let report = (&mut task.0).await.map_err(|source| CycleError::CrawlPanicked {
            keyword: keyword.to_string(),
            source,
        })?;

        Ok(CycleSummary {
            keyword: keyword.to_string(),
            seeds: seed_count,
            report,
        })
    }

    /// Runs cycles until `shutdown` turns true or its sender is dropped
    ///
    /// A cycle in flight when shutdown arrives is aborted. A cycle that ends
    /// while paused keeps its keyword active until resumed.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let pause_poll = Duration::from_millis(self.config.pause_poll_ms);
        let idle_wait = Duration::from_millis(self.config.idle_wait_ms);
        let backoff = Duration::from_millis(self.config.cycle_backoff_ms);

        tracing::info!("Scheduler started");

        loop {
            if *shutdown.borrow() {
                break;
            }

            if self.state.is_paused() {
                if sleep_or_shutdown(pause_poll, &mut shutdown).await {
                    break;
                }
                continue;
            }

            let Some(keyword) = self.state.activate_next().await else {
                if sleep_or_shutdown(idle_wait, &mut shutdown).await {
                    break;
                }
                continue;
            };

            let result = tokio::select! {
                result = self.run_cycle(&keyword) => result,
                _ = wait_for_shutdown(&mut shutdown) => {
                    tracing::info!("Shutdown during cycle for {:?}", keyword);
                    break;
                }
            };

            let stop = match result {
                Ok(summary) => {
                    tracing::info!(
                        "Cycle for {:?} finished: {} seeds, {} pages fetched, {} records, {} skipped",
                        summary.keyword,
                        summary.seeds,
                        summary.report.pages_fetched,
                        summary.report.records_dispatched,
                        summary.report.total_skipped()
                    );
                    false
                }
                Err(e) => {
                    tracing::warn!("Cycle failed: {}", e);
                    sleep_or_shutdown(backoff, &mut shutdown).await
                }
            };

            if stop || hold_while_paused(&self.state, pause_poll, &mut shutdown).await {
                break;
            }
            self.state.finish_cycle(&keyword).await;
        }

        tracing::info!("Scheduler stopped");
    }
}

/// Aborts the wrapped task when dropped
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Waits out a pause; returns true if shutdown was signalled meanwhile
async fn hold_while_paused(
    state: &SchedulerState,
    poll: Duration,
    shutdown: &mut watch::Receiver<bool>,
) -> bool {
    while state.is_paused() {
        if sleep_or_shutdown(poll, shutdown).await {
            return true;
        }
    }
    false
}

/// Sleeps for `duration`; returns true if shutdown was signalled meanwhile
async fn sleep_or_shutdown(duration: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(duration) => false,
        _ = wait_for_shutdown(shutdown) => true,
    }
}

/// Resolves once the shutdown flag is set or the sender is gone
async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}

/// Cloneable control surface over a running scheduler
#[derive(Debug, Clone)]
pub struct CrawlController {
    state: SchedulerState,
    output: OutputConfig,
}

impl CrawlController {
    pub fn new(state: SchedulerState, output: OutputConfig) -> Self {
        Self { state, output }
    }

    pub async fn add_keyword(&self, keyword: &str) -> bool {
        self.state.add_keyword(keyword).await
    }

    pub async fn switch_keyword(&self, keyword: &str) -> bool {
        self.state.switch_keyword(keyword).await
    }

    pub fn pause(&self) {
        self.state.pause();
    }

    pub fn resume(&self) {
        self.state.resume();
    }

    pub async fn status(&self) -> SchedulerStatus {
        self.state.status().await
    }

    /// Writes a snapshot of both result files; returns its path
    pub fn export(&self) -> io::Result<PathBuf> {
        export_snapshot(&self.output)
    }
}

/// Re-queues the last completed keyword whenever the scheduler sits idle
///
/// Checks every `interval` until `shutdown` fires.
pub fn spawn_auto_loop(
    state: SchedulerState,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if sleep_or_shutdown(interval, &mut shutdown).await {
                break;
            }
            if let Some(keyword) = state.requeue_last_if_idle().await {
                tracing::info!("Auto-loop re-queued {:?}", keyword);
            }
        }
    })
}
