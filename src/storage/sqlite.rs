//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the DedupStore trait.

use crate::record::{ContactRecord, ContactType};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{DedupStore, StorageError, StorageResult};
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Opens or creates the database at `path`
    ///
    /// Missing parent directories are created.
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // WAL lets readers (stats) run while a crawl is writing
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory database (for testing)
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    /// Total number of stored contacts
    pub fn count_contacts(&self) -> StorageResult<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Number of stored contacts per type; types with no rows are absent
    pub fn count_by_type(&self) -> StorageResult<HashMap<ContactType, u64>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT contact_type, COUNT(*) FROM contacts GROUP BY contact_type")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut counts = HashMap::new();
        for row in rows {
            let (kind, count) = row?;
            match ContactType::from_db_string(&kind) {
                Some(kind) => {
                    counts.insert(kind, count as u64);
                }
                None => {
                    return Err(StorageError::Database(format!(
                        "Unknown contact type in database: {}",
                        kind
                    )))
                }
            }
        }

        Ok(counts)
    }

    /// Number of distinct sites with at least one contact
    pub fn count_sites(&self) -> StorageResult<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(DISTINCT site_domain) FROM contacts",
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

impl DedupStore for SqliteStorage {
    fn save(&self, record: &ContactRecord) -> StorageResult<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "INSERT INTO contacts
                (keyword, lang, contact_type, contact_value, source_url, page_title, site_domain)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(contact_type, contact_value, site_domain) DO NOTHING",
            params![
                record.keyword,
                record.lang.to_db_string(),
                record.contact_type.to_db_string(),
                record.contact_value,
                record.source_url,
                record.page_title,
                record.site_domain,
            ],
        )?;
        Ok(changed == 1)
    }
}
