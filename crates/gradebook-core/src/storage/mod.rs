mod config;
pub mod database;
pub mod json_store;

pub use config::{Config, GradesConfig, StorageBackend, StorageConfig};
pub use database::GradeDb;
pub use json_store::JsonFileStore;

use std::path::PathBuf;

use crate::error::{PersistenceError, Result};
use crate::sync::{GradebookSession, TreeStore};

/// Returns the data directory, creating it if needed.
///
/// `GRADEBOOK_HOME` overrides the location entirely. Otherwise the directory
/// is `~/.config/gradebook[-dev]/`; set GRADEBOOK_ENV=dev to use the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("GRADEBOOK_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("GRADEBOOK_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("gradebook-dev")
            } else {
                base_dir.join("gradebook")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Open the store selected in `config`.
///
/// # Errors
/// Returns an error if the data directory or the database cannot be opened.
pub fn open_store(config: &Config) -> Result<Box<dyn TreeStore>, PersistenceError> {
    let dir = data_dir().map_err(|e| PersistenceError::load("data directory unavailable", e))?;
    let store: Box<dyn TreeStore> = match config.storage.backend {
        StorageBackend::Sqlite => Box::new(GradeDb::open_at(dir.join("gradebook.db"))?),
        StorageBackend::Json => Box::new(JsonFileStore::new(dir.join("grades.json"))),
    };
    Ok(store)
}

/// Load the config, open the configured store and read the persisted tree.
///
/// # Errors
/// Returns [`CoreError::Config`](crate::CoreError::Config) if the config
/// cannot be loaded, and [`CoreError::Persistence`](crate::CoreError::Persistence)
/// if the store cannot be opened or holds an invalid tree.
pub fn open_session() -> Result<(GradebookSession<Box<dyn TreeStore>>, Config)> {
    let config = Config::load()?;
    let store = open_store(&config)?;
    let mut session = GradebookSession::new(store, config.edit_rules());
    session.reload()?;
    Ok((session, config))
}
