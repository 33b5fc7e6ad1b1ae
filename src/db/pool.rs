//! SQLite connection pool on top of `r2d2`.

use crate::error::{AppError, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Pool of SQLite connections.
pub type ConnectionPool = r2d2::Pool<SqliteConnectionManager>;

/// A connection borrowed from the pool, returned when dropped.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

/// Opens and configures connections for the pool.
#[derive(Debug, Clone)]
pub struct SqliteConnectionManager {
    path: Option<PathBuf>,
}

impl SqliteConnectionManager {
    /// Manager for a database file.
    pub fn file(path: &Path) -> Self {
        Self {
            path: Some(path.to_path_buf()),
        }
    }

    /// Manager for a private in-memory database.
    pub fn memory() -> Self {
        Self { path: None }
    }
}

impl r2d2::ManageConnection for SqliteConnectionManager {
    type Connection = Connection;
    type Error = rusqlite::Error;

    fn connect(&self) -> std::result::Result<Connection, rusqlite::Error> {
        let conn = match &self.path {
            Some(path) => Connection::open(path)?,
            None => Connection::open_in_memory()?,
        };

        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        if self.path.is_some() {
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                row.get::<_, String>(0)
            })?;
        }

        Ok(conn)
    }

    fn is_valid(&self, conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
        conn.execute_batch("")
    }

    fn has_broken(&self, _conn: &mut Connection) -> bool {
        false
    }
}

/// Build a pool of `size` connections (at least one) to the database file.
pub fn open(path: &Path, size: usize) -> Result<ConnectionPool> {
    let size = u32::try_from(size.max(1)).unwrap_or(u32::MAX);

    let pool = r2d2::Pool::builder()
        .max_size(size)
        .connection_timeout(CHECKOUT_TIMEOUT)
        .build(SqliteConnectionManager::file(path))
        .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

    tracing::debug!(path = %path.display(), size, "Opened connection pool");
    Ok(pool)
}

/// Single in-memory connection (for testing).
///
/// Separate in-memory connections would each see their own empty database,
/// so this pool holds exactly one and never recycles it.
pub fn open_memory() -> Result<ConnectionPool> {
    r2d2::Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .test_on_check_out(false)
        .connection_timeout(CHECKOUT_TIMEOUT)
        .build(SqliteConnectionManager::memory())
        .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))
}
