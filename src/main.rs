//! Contact Crawler main entry point
//!
//! This is the command-line interface for the keyword-driven contact crawler.

use anyhow::Context;
use clap::{Parser, Subcommand};
use contact_crawler::config::{load_config_or_default, Config};
use contact_crawler::crawler::{
    spawn_auto_loop, CrawlController, CrawlEngine, RecordHandler, Scheduler, SkipReason,
};
use contact_crawler::output::{
    export_snapshot, load_statistics, print_statistics, Persister, ResultWriter,
};
use contact_crawler::search::SeedGatherer;
use contact_crawler::state::SchedulerState;
use contact_crawler::storage::{open_storage, SqliteStorage};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

/// Seed cap for `start --demo`
const DEMO_SEED_LIMIT: usize = 10;

/// Contact Crawler: keyword-driven contact discovery
///
/// Gathers candidate pages for a keyword from several search engines, crawls
/// them politely, and records every contact identifier found on them.
#[derive(Parser, Debug)]
#[command(name = "contact-crawler")]
#[command(version = "1.0.0")]
#[command(about = "Keyword-driven contact crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one gather-and-crawl cycle for a keyword, then exit
    Start {
        /// Keyword to search for
        #[arg(short, long)]
        keyword: String,

        /// Crawl at most 10 seeds
        #[arg(long)]
        demo: bool,
    },

    /// Run the scheduler until Ctrl-C
    Run {
        /// Initial keywords, queued in order
        #[arg(short, long = "keyword", value_name = "KEYWORD")]
        keywords: Vec<String>,
    },

    /// Write a snapshot of the result files and print its path
    ExportNow,

    /// Show per-type contact counts from the database
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match load_config_or_default(cli.config.as_deref()) {
        Ok(config) => {
            match &cli.config {
                Some(path) => tracing::info!("Configuration loaded from {}", path.display()),
                None => tracing::info!("No config file given, using defaults"),
            }
            config
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    match cli.command {
        Command::Start { keyword, demo } => handle_start(config, &keyword, demo).await,
        Command::Run { keywords } => handle_run(config, keywords).await,
        Command::ExportNow => handle_export(&config),
        Command::Stats => handle_stats(&config),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("contact_crawler=info,warn"),
            1 => EnvFilter::new("contact_crawler=debug,info"),
            2 => EnvFilter::new("contact_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Builds the scheduler and its collaborators from the configuration
fn build_scheduler(config: &Config, state: SchedulerState) -> anyhow::Result<Scheduler> {
    let db_path = config.output.database_path();
    let storage = open_storage(&db_path)
        .with_context(|| format!("opening database {}", db_path.display()))?;
    let writer = ResultWriter::open(&config.output).with_context(|| {
        format!("opening result files in {}", config.output.data_dir.display())
    })?;
    let handler: Arc<dyn RecordHandler> =
        Arc::new(Persister::new(Arc::new(storage), Arc::new(writer)));

    let gatherer = SeedGatherer::from_config(config).context("building search client")?;
    tracing::info!("Search backends: {}", gatherer.backend_names().join(", "));
    let engine = CrawlEngine::from_config(config).context("building HTTP client")?;

    Ok(Scheduler::new(
        state,
        Arc::new(gatherer),
        Arc::new(engine),
        handler,
        config.scheduler.clone(),
    ))
}

/// Handles `start`: one cycle for a single keyword
async fn handle_start(config: Config, keyword: &str, demo: bool) -> anyhow::Result<()> {
    let mut scheduler = match build_scheduler(&config, SchedulerState::new()) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            tracing::error!("Failed to initialize crawler: {:#}", e);
            return Err(e);
        }
    };
    if demo {
        tracing::info!("Demo mode: crawling at most {} seeds", DEMO_SEED_LIMIT);
        scheduler = scheduler.with_seed_limit(DEMO_SEED_LIMIT);
    }

    let summary = scheduler.run_cycle(keyword).await?;
    let report = &summary.report;

    println!("=== Crawl Summary: {} ===\n", summary.keyword);
    println!("  Seeds crawled: {}", summary.seeds);
    println!("  Pages fetched: {}", report.pages_fetched);
    println!("  Records found: {}", report.records_dispatched);
    if report.interrupted > 0 {
        println!("  Pages interrupted: {}", report.interrupted);
    }
    for reason in [
        SkipReason::RobotsDisallowed,
        SkipReason::HttpStatus,
        SkipReason::NotHtml,
        SkipReason::Timeout,
        SkipReason::Network,
        SkipReason::NoContacts,
        SkipReason::InvalidUrl,
    ] {
        let count = report.skipped_for(reason);
        if count > 0 {
            println!("  Skipped ({}): {}", reason, count);
        }
    }

    Ok(())
}

/// Handles `run`: the scheduler loop plus the auto-loop feeder until Ctrl-C
async fn handle_run(config: Config, keywords: Vec<String>) -> anyhow::Result<()> {
    let state = SchedulerState::new();
    let scheduler = match build_scheduler(&config, state.clone()) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            tracing::error!("Failed to initialize crawler: {:#}", e);
            return Err(e);
        }
    };

    let controller = CrawlController::new(state.clone(), config.output.clone());
    for keyword in &keywords {
        if !controller.add_keyword(keyword).await {
            tracing::warn!("Ignoring blank keyword");
        }
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler_task = tokio::spawn(scheduler.run(shutdown_rx.clone()));

    let feeder = if config.scheduler.auto_loop {
        tracing::info!(
            "Auto-loop enabled, re-queueing every {}s when idle",
            config.scheduler.loop_interval
        );
        Some(spawn_auto_loop(
            state.clone(),
            Duration::from_secs(config.scheduler.loop_interval),
            shutdown_rx,
        ))
    } else {
        None
    };

    tokio::signal::ctrl_c().await.context("waiting for Ctrl-C")?;
    tracing::info!("Shutdown requested");

    let status = controller.status().await;
    tracing::info!(
        "Stopping with {} queued keywords (active: {:?})",
        status.queue_size,
        status.active_keyword
    );

    let _ = shutdown_tx.send(true);
    scheduler_task.await.context("scheduler task failed")?;
    if let Some(feeder) = feeder {
        feeder.await.context("auto-loop task failed")?;
    }

    Ok(())
}

/// Handles `export-now`
fn handle_export(config: &Config) -> anyhow::Result<()> {
    let path = export_snapshot(&config.output).context("exporting snapshot")?;
    println!("{}", path.display());
    Ok(())
}

/// Handles `stats`: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let path = config.output.database_path();
    println!("Database: {}\n", path.display());

    let storage = SqliteStorage::new(&path)?;
    let stats = load_statistics(&storage)?;
    print_statistics(&stats);

    Ok(())
}
