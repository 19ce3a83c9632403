//! Database migration runner.
//!
//! Migrations are executed in order on every [`crate::SqliteBackend`] open.
//! Each migration is guarded by the `user_version` pragma so it runs exactly
//! once.

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Current schema version. Bump this and add a new migration whenever the
/// schema changes.
const CURRENT_VERSION: u32 = 1;

const V001_SNAPSHOTS: &str = "
CREATE TABLE IF NOT EXISTS snapshots (
    store_name TEXT PRIMARY KEY,
    snapshot   TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";

/// Run all pending migrations against the open connection.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    tracing::info!(
        current_version = current,
        target_version = CURRENT_VERSION,
        "checking database migrations"
    );

    if current < 1 {
        tracing::info!("applying migration v001_snapshots");
        conn.execute_batch(V001_SNAPSHOTS)
            .map_err(|e| StoreError::Migration(e.to_string()))?;
        conn.pragma_update(None, "user_version", 1)?;
    }

    Ok(())
}
