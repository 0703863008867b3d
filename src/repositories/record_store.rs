// src/repositories/record_store.rs
//
// Record Store
//
// CRITICAL RULES:
// - Stores are DUMB: raw text in, raw text out
// - Absent or zero-length resources load as empty collections
// - Malformed content is a ReadFailure naming the resource
// - Every save replaces the whole collection

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{AppError, AppResult};

use super::resource::Resource;

/// Raw storage medium keyed by resource name
#[cfg_attr(test, mockall::automock)]
pub trait RecordStore: Send + Sync {
    /// Contents of the resource, None when it does not exist or is empty
    fn read(&self, resource: Resource) -> AppResult<Option<String>>;

    /// Replaces the resource contents
    fn write(&self, resource: Resource, contents: &str) -> AppResult<()>;

    /// Truncates the resource to zero length
    fn clear(&self, resource: Resource) -> AppResult<()>;
}

/// Loads every record of a collection resource
pub fn load_collection<T>(store: &dyn RecordStore, resource: Resource) -> AppResult<Vec<T>>
where
    T: DeserializeOwned,
{
    let contents = store.read(resource).map_err(|e| AppError::ReadFailure {
        resource: resource.file_name().to_string(),
        reason: e.to_string(),
    })?;

    let contents = match contents {
        Some(contents) if !contents.trim().is_empty() => contents,
        _ => {
            debug!("{} is absent or empty, starting with no records", resource);
            return Ok(Vec::new());
        }
    };

    let records: Vec<T> = serde_json::from_str(&contents).map_err(|e| AppError::ReadFailure {
        resource: resource.file_name().to_string(),
        reason: e.to_string(),
    })?;

    debug!("Loaded {} records from {}", records.len(), resource);
    Ok(records)
}

/// Serializes the full collection and overwrites the resource
pub fn save_collection<T>(store: &dyn RecordStore, resource: Resource, records: &[T]) -> AppResult<()>
where
    T: Serialize,
{
    let description = || format!("{} records to {}", records.len(), resource);

    let contents = serde_json::to_string_pretty(records).map_err(|e| AppError::WriteFailure {
        description: description(),
        reason: e.to_string(),
    })?;

    store
        .write(resource, &contents)
        .map_err(|e| AppError::WriteFailure {
            description: description(),
            reason: e.to_string(),
        })?;

    debug!("Saved {}", description());
    Ok(())
}
