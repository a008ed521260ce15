//! Database schema definitions
//!
//! This module contains the SQL schema for the contact dedup database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per unique contact on a site
CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY,
    keyword TEXT NOT NULL,
    lang TEXT NOT NULL,
    contact_type TEXT NOT NULL,
    contact_value TEXT NOT NULL,
    source_url TEXT NOT NULL,
    page_title TEXT NOT NULL DEFAULT '',
    site_domain TEXT NOT NULL,
    first_seen_utc TEXT DEFAULT (datetime('now')),
    UNIQUE(contact_type, contact_value, site_domain)
);

CREATE INDEX IF NOT EXISTS idx_contacts_keyword ON contacts(keyword);
CREATE INDEX IF NOT EXISTS idx_contacts_domain ON contacts(site_domain);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
