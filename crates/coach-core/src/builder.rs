//! Builder for the persistent store and its location.

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    error::{CoachError, Result},
    store::SqliteStore,
};

/// Resolves where the cache lives and opens it.
#[derive(Debug, Clone, Default)]
pub struct CoachBuilder {
    database_path: Option<PathBuf>,
}

impl CoachBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/coach/coach.db` or `~/.local/share/coach/coach.db`
    #[must_use]
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// The path the store will be opened at.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::XdgDirectory` if no default location can be
    /// determined.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Self::default_database_path(),
        }
    }

    /// Opens the store, creating its parent directory and schema.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::FileSystem` if the directory cannot be created
    /// and `CoachError::Database` if the database cannot be opened.
    pub async fn build_store(self) -> Result<SqliteStore> {
        let db_path = self.database_path()?;

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CoachError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        task::spawn_blocking(move || SqliteStore::open(&db_path))
            .await
            .map_err(|e| CoachError::Configuration {
                message: format!("Task join error: {e}"),
            })?
    }

    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("coach")
            .place_data_file("coach.db")
            .map_err(|e| CoachError::XdgDirectory(e.to_string()))
    }
}
