//! Snapshot persistence backends.
//!
//! Each store serializes its entire state as one JSON document, keyed by
//! store name, and rewrites it wholesale after every mutation. The backend
//! behind that write is injectable: [`SqliteBackend`] for the application,
//! [`MemoryBackend`] for tests and ephemeral sessions.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use rusqlite::{params, Connection};

use crate::error::{Result, StoreError};
use crate::migrations;

/// Snapshot key for the recipe collection and like history.
pub const RECIPE_STORE_KEY: &str = "cocktail-recipes";

/// Snapshot key for the authentication session and local user registry.
pub const AUTH_STORE_KEY: &str = "cocktail-auth";

/// A durable key-value record per store: one snapshot, replaced on save.
pub trait SnapshotBackend: Send + Sync {
    fn load(&self, store: &str) -> Result<Option<String>>;
    fn save(&self, store: &str, snapshot: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// MemoryBackend
// ---------------------------------------------------------------------------

/// In-memory backend. Nothing survives the process; used by tests and by
/// sessions that opt out of durable storage.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotBackend for MemoryBackend {
    fn load(&self, store: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.get(store).cloned())
    }

    fn save(&self, store: &str, snapshot: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        entries.insert(store.to_string(), snapshot.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SqliteBackend
// ---------------------------------------------------------------------------

/// SQLite-backed snapshot table.
///
/// The database file lives in the platform-appropriate data directory:
/// - Linux:   `~/.local/share/cocktail-lab/cocktail-lab.db`
/// - macOS:   `~/Library/Application Support/com.kh.cocktail-lab/cocktail-lab.db`
/// - Windows: `{FOLDERID_RoamingAppData}\kh\cocktail-lab\data\cocktail-lab.db`
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Open (or create) the default application database.
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "kh", "cocktail-lab").ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        let db_path = data_dir.join("cocktail-lab.db");

        tracing::info!(path = %db_path.display(), "opening snapshot database");

        Self::open_at(&db_path)
    }

    /// Open (or create) a database at an explicit path.
    ///
    /// This is useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        migrations::run_migrations(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        let conn = self.conn.lock().ok()?;
        conn.path().map(PathBuf::from)
    }
}

impl SnapshotBackend for SqliteBackend {
    fn load(&self, store: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        match conn.query_row(
            "SELECT snapshot FROM snapshots WHERE store_name = ?1",
            params![store],
            |row| row.get::<_, String>(0),
        ) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(other) => Err(StoreError::Sqlite(other)),
        }
    }

    fn save(&self, store: &str, snapshot: &str) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        conn.execute(
            "INSERT OR REPLACE INTO snapshots (store_name, snapshot, updated_at)
             VALUES (?1, ?2, ?3)",
            params![store, snapshot, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}
