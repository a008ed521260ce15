//! Newline-delimited JSON result files
//!
//! Records go to `results_zh.txt` or `results_en.txt` by page language. Each
//! file has its own lock, so concurrent writers never interleave a line.

use crate::config::OutputConfig;
use crate::crawler::RecordHandler;
use crate::output::traits::{OutputError, OutputResult, RecordSink};
use crate::record::{ContactRecord, Language};
use crate::storage::DedupStore;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Appends records to the per-language result files
pub struct ResultWriter {
    zh: Mutex<File>,
    en: Mutex<File>,
}

impl ResultWriter {
    /// Opens both result files in append mode, creating the data dir
    pub fn open(config: &OutputConfig) -> OutputResult<Self> {
        std::fs::create_dir_all(&config.data_dir)?;
        Ok(Self {
            zh: Mutex::new(open_append(&config.results_zh_path())?),
            en: Mutex::new(open_append(&config.results_en_path())?),
        })
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

impl RecordSink for ResultWriter {
    fn write(&self, record: &ContactRecord) -> OutputResult<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let target = match record.lang {
            Language::Zh => &self.zh,
            Language::En => &self.en,
        };
        let mut file = target.lock().map_err(|_| OutputError::LockPoisoned)?;
        file.write_all(line.as_bytes())?;
        file.sync_data()?;
        Ok(())
    }
}

/// Crawl-engine handler that persists first-seen records
///
/// A record reaches the sink only if the store reports it as new. Store and
/// sink failures are logged and the record is dropped.
pub struct Persister {
    store: Arc<dyn DedupStore>,
    sink: Arc<dyn RecordSink>,
}

impl Persister {
    pub fn new(store: Arc<dyn DedupStore>, sink: Arc<dyn RecordSink>) -> Self {
        Self { store, sink }
    }

    /// Saves and writes `record`; returns whether it was new
    pub fn persist(&self, record: &ContactRecord) -> bool {
        match self.store.save(record) {
            Ok(true) => {
                if let Err(e) = self.sink.write(record) {
                    tracing::warn!(
                        "Failed to write {} {} to results: {}",
                        record.contact_type,
                        record.contact_value,
                        e
                    );
                }
                true
            }
            Ok(false) => {
                tracing::trace!(
                    "Duplicate {} {} on {}",
                    record.contact_type,
                    record.contact_value,
                    record.site_domain
                );
                false
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to store {} {}: {}",
                    record.contact_type,
                    record.contact_value,
                    e
                );
                false
            }
        }
    }
}

impl RecordHandler for Persister {
    fn handle(&self, record: ContactRecord) {
        if self.persist(&record) {
            tracing::info!(
                "New {} {} from {}",
                record.contact_type,
                record.contact_value,
                record.source_url
            );
        }
    }
}
