//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Name the backing store file and hand out short-lived connections.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write application data before migrations succeed.
//! - No connection outlives the operation that opened it.

use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// File name used when the caller does not pick a store location.
pub const DEFAULT_DB_FILE: &str = "inventario.db";

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Handle to the inventory database file.
///
/// Holds only the location; every call to [`Store::connect`] opens a fresh
/// connection that is closed when the returned value is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensures the schema exists. Safe to call on every startup.
    pub fn initialize(&self) -> DbResult<()> {
        let conn = self.connect()?;
        let categories = count_rows(&conn, "categories")?;
        let products = count_rows(&conn, "products")?;
        info!(
            "event=store_init module=db status=ok schema_version={} categories={} products={}",
            migrations::latest_version(),
            categories,
            products
        );
        Ok(())
    }

    /// Opens a configured connection (`foreign_keys=ON`, schema applied).
    pub fn connect(&self) -> DbResult<Connection> {
        open_db(&self.path)
    }
}

fn count_rows(conn: &Connection, table: &'static str) -> DbResult<i64> {
    let count = conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })?;
    Ok(count)
}
