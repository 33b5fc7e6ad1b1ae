//! Application state shared across handlers.

use crate::config::Config;
use crate::db::Database;
use crate::error::{AppError, Result};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Pooled database handle.
    pub db: Database,
}

impl AppState {
    /// Create new application state with database.
    pub fn new(config: Config, db: Database) -> Self {
        Self {
            config: Arc::new(config),
            db,
        }
    }

    /// Site title shown in page headers.
    pub fn site_title(&self) -> &str {
        &self.config.server.title
    }

    /// Run blocking database work off the async workers.
    pub async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(|e| AppError::Internal(format!("Database task failed: {}", e)))?
    }
}
