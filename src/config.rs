// src/config.rs
//
// Storage configuration
//
// One root directory holding the two logical areas:
// - catalog:  movies, actors, directors, categories, tags, movie libraries
// - accounts: users
//
// Path structure: {DATA_DIR}/movielib/{movies_info,users_data}

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

pub const DATA_DIR_VAR: &str = "MOVIELIB_DATA_DIR";
pub const CATALOG_DIR_VAR: &str = "MOVIELIB_CATALOG_DIR";
pub const ACCOUNTS_DIR_VAR: &str = "MOVIELIB_ACCOUNTS_DIR";

const APP_DIR: &str = "movielib";
const CATALOG_SUBDIR: &str = "movies_info";
const ACCOUNTS_SUBDIR: &str = "users_data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub catalog_dir: PathBuf,
    pub accounts_dir: PathBuf,
}

impl StorageConfig {
    /// Standard layout under an explicit root
    pub fn at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            catalog_dir: root.join(CATALOG_SUBDIR),
            accounts_dir: root.join(ACCOUNTS_SUBDIR),
        }
    }

    /// Reads the layout from the environment, falling back to the platform data directory
    pub fn from_env() -> AppResult<Self> {
        let root = match env::var(DATA_DIR_VAR) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::data_dir()
                .ok_or_else(|| {
                    AppError::Other("Could not determine app data directory".to_string())
                })?
                .join(APP_DIR),
        };

        let mut config = Self::at(root);
        if let Ok(dir) = env::var(CATALOG_DIR_VAR) {
            config.catalog_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var(ACCOUNTS_DIR_VAR) {
            config.accounts_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    /// Creates both directories if missing
    pub fn ensure_dirs(&self) -> AppResult<()> {
        std::fs::create_dir_all(&self.catalog_dir)?;
        std::fs::create_dir_all(&self.accounts_dir)?;
        Ok(())
    }
}
