// src/repositories/memory_store.rs

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{AppError, AppResult};

use super::record_store::RecordStore;
use super::resource::Resource;

/// Volatile store keeping each resource as a string in memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    resources: RwLock<HashMap<Resource, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw contents as last written, empty resources included
    pub fn contents(&self, resource: Resource) -> Option<String> {
        self.resources
            .read()
            .ok()
            .and_then(|resources| resources.get(&resource).cloned())
    }
}

fn poisoned() -> AppError {
    AppError::Other("In-memory store lock poisoned".to_string())
}

impl RecordStore for InMemoryStore {
    fn read(&self, resource: Resource) -> AppResult<Option<String>> {
        let resources = self.resources.read().map_err(|_| poisoned())?;
        Ok(resources
            .get(&resource)
            .filter(|contents| !contents.is_empty())
            .cloned())
    }

    fn write(&self, resource: Resource, contents: &str) -> AppResult<()> {
        let mut resources = self.resources.write().map_err(|_| poisoned())?;
        resources.insert(resource, contents.to_string());
        Ok(())
    }

    fn clear(&self, resource: Resource) -> AppResult<()> {
        let mut resources = self.resources.write().map_err(|_| poisoned())?;
        resources.insert(resource, String::new());
        Ok(())
    }
}
