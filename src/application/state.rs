// src/application/state.rs

use std::sync::Arc;

use log::info;

use crate::config::StorageConfig;
use crate::error::AppResult;
use crate::repositories::{JsonFileStore, RecordStore};
use crate::services::{AccountService, CatalogService};

/// Application state: one store shared by the catalog and the accounts.
/// Built once at start-up by the binary.
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub catalog: CatalogService,
    pub accounts: AccountService,
}

impl AppState {
    /// Opens the file store under `config` and loads everything from it
    pub fn open(config: StorageConfig) -> AppResult<Self> {
        info!(
            "Opening catalog at {} and accounts at {}",
            config.catalog_dir.display(),
            config.accounts_dir.display()
        );
        let store: Arc<dyn RecordStore> = Arc::new(JsonFileStore::open(config)?);
        Self::with_store(store)
    }

    pub fn with_store(store: Arc<dyn RecordStore>) -> AppResult<Self> {
        let catalog = CatalogService::load(store.clone())?;
        let mut accounts = AccountService::load(store.clone())?;
        accounts.configure_movie_libraries();

        Ok(Self {
            store,
            catalog,
            accounts,
        })
    }
}
