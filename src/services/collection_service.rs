// src/services/collection_service.rs
//
// Collection Service - per-type facade over one loaded collection
//
// CRITICAL RULES:
// - Loaded once, mutated in place, persisted back as a whole
// - Lookups by ID return the first match, absence is not an error
// - Deleting an absent ID is a no-op

use std::sync::Arc;

use log::debug;

use crate::domain::{Actor, Category, Director, EntityId, Movie, MovieLibrary, Tag};
use crate::error::AppResult;
use crate::repositories::{load_collection, save_collection, Record, RecordStore};

pub type MovieService = CollectionService<Movie>;
pub type ActorService = CollectionService<Actor>;
pub type DirectorService = CollectionService<Director>;
pub type CategoryService = CollectionService<Category>;
pub type TagService = CollectionService<Tag>;
pub type MovieLibraryService = CollectionService<MovieLibrary>;

pub struct CollectionService<T: Record> {
    store: Arc<dyn RecordStore>,
    records: Vec<T>,
}

impl<T: Record> CollectionService<T> {
    /// Loads the collection from its resource
    pub fn load(store: Arc<dyn RecordStore>) -> AppResult<Self> {
        let records = load_collection(store.as_ref(), T::RESOURCE)?;
        Ok(Self { store, records })
    }

    /// Wraps records already in memory
    pub fn with_records(store: Arc<dyn RecordStore>, records: Vec<T>) -> Self {
        Self { store, records }
    }

    pub fn find_by_id(&self, id: EntityId) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn find_by_id_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.records.iter_mut().find(|record| record.id() == id)
    }

    /// Exact match on the record's display field
    pub fn find_by_name(&self, name: &str) -> Vec<T> {
        self.records
            .iter()
            .filter(|record| record.display_name() == name)
            .cloned()
            .collect()
    }

    /// Removes every record with this ID. Returns how many were removed.
    pub fn delete(&mut self, id: EntityId) -> usize {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        let removed = before - self.records.len();
        if removed > 0 {
            debug!("Removed {} record(s) with ID {} from {}", removed, id, T::RESOURCE);
        }
        removed
    }

    /// Snapshot of the collection, not a live view
    pub fn get_all(&self) -> Vec<T> {
        self.records.clone()
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.find_by_id(id).is_some()
    }

    pub fn insert(&mut self, record: T) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes the whole collection back to its resource
    pub fn persist(&self) -> AppResult<()> {
        save_collection(self.store.as_ref(), T::RESOURCE, &self.records)
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<T> {
        &mut self.records
    }
}
