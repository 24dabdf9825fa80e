//! Builder for creating and configuring Toolkit instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Toolkit;
use crate::{
    catalog::Catalog,
    db::Database,
    error::{Result, ToolkitError},
};

/// Builder for creating and configuring Toolkit instances.
#[derive(Debug, Clone)]
pub struct ToolkitBuilder {
    database_path: Option<PathBuf>,
}

impl ToolkitBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/tcof/tcof.db` or `~/.local/share/tcof/tcof.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured toolkit instance.
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::FileSystem` if the database path is invalid
    /// Returns `ToolkitError::Database` if database initialization fails
    pub async fn build(self) -> Result<Toolkit> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ToolkitError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), ToolkitError>(())
        })
        .await
        .map_err(|e| ToolkitError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        let catalog = Catalog::load()?;

        Ok(Toolkit::new(db_path, catalog))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("tcof")
            .place_data_file("tcof.db")
            .map_err(|e| ToolkitError::XdgDirectory(e.to_string()))
    }
}

impl Default for ToolkitBuilder {
    fn default() -> Self {
        Self::new()
    }
}
