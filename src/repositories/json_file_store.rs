// src/repositories/json_file_store.rs
//
// File-backed record store
//
// One JSON file per resource under the catalog or accounts directory.
// Writes go to a sibling temp file first and are renamed into place.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::debug;

use crate::config::StorageConfig;
use crate::error::AppResult;

use super::record_store::RecordStore;
use super::resource::{Resource, StorageArea};

pub struct JsonFileStore {
    config: StorageConfig,
}

impl JsonFileStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Creates the directories, then the store
    pub fn open(config: StorageConfig) -> AppResult<Self> {
        config.ensure_dirs()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn path_for(&self, resource: Resource) -> PathBuf {
        let dir = match resource.area() {
            StorageArea::Catalog => &self.config.catalog_dir,
            StorageArea::Accounts => &self.config.accounts_dir,
        };
        dir.join(resource.file_name())
    }
}

impl RecordStore for JsonFileStore {
    fn read(&self, resource: Resource) -> AppResult<Option<String>> {
        let path = self.path_for(resource);
        match fs::read_to_string(&path) {
            Ok(contents) if contents.is_empty() => Ok(None),
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, resource: Resource, contents: &str) -> AppResult<()> {
        let path = self.path_for(resource);
        let staging = path.with_extension("JSON.tmp");

        fs::write(&staging, contents)?;
        fs::rename(&staging, &path)?;

        debug!("Wrote {} bytes to {:?}", contents.len(), path);
        Ok(())
    }

    fn clear(&self, resource: Resource) -> AppResult<()> {
        fs::write(self.path_for(resource), "")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tag;
    use crate::error::AppError;
    use crate::repositories::{load_collection, save_collection};

    fn store() -> (tempfile::TempDir, JsonFileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(StorageConfig::at(dir.path())).unwrap();
        (dir, store)
    }

    #[test]
    fn test_users_and_catalog_use_separate_directories() {
        let (_dir, store) = store();
        assert!(store
            .path_for(Resource::Users)
            .starts_with(&store.config().accounts_dir));
        assert!(store
            .path_for(Resource::MovieLibraries)
            .starts_with(&store.config().catalog_dir));
    }

    #[test]
    fn test_missing_file_reads_none() {
        let (_dir, store) = store();
        assert_eq!(store.read(Resource::Movies).unwrap(), None);
    }

    #[test]
    fn test_write_replaces_whole_file() {
        let (_dir, store) = store();
        save_collection(&store, Resource::Tags, &[Tag::new(1, "a"), Tag::new(2, "b")]).unwrap();
        save_collection(&store, Resource::Tags, &[Tag::new(3, "c")]).unwrap();

        let tags: Vec<Tag> = load_collection(&store, Resource::Tags).unwrap();
        assert_eq!(tags, vec![Tag::new(3, "c")]);
        assert!(!store.path_for(Resource::Tags).with_extension("JSON.tmp").exists());
    }

    #[test]
    fn test_clear_leaves_zero_length_file() {
        let (_dir, store) = store();
        save_collection(&store, Resource::Tags, &[Tag::new(1, "a")]).unwrap();
        store.clear(Resource::Tags).unwrap();

        let path = store.path_for(Resource::Tags);
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
        assert!(load_collection::<Tag>(&store, Resource::Tags).unwrap().is_empty());
    }

    #[test]
    fn test_corrupted_file_is_read_failure() {
        let (_dir, store) = store();
        fs::write(store.path_for(Resource::Movies), "not json at all").unwrap();

        let err = load_collection::<crate::domain::Movie>(&store, Resource::Movies).unwrap_err();
        assert!(
            matches!(err, AppError::ReadFailure { ref resource, .. } if resource == "Movie.JSON")
        );
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(StorageConfig::at(dir.path().join("missing")));
        let err = save_collection(&store, Resource::Tags, &[Tag::new(1, "a")]).unwrap_err();
        assert!(matches!(err, AppError::WriteFailure { .. }));
    }
}
