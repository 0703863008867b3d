// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Stores are DUMB data mappers
// - NO business logic
// - NO invariant enforcement beyond what deserialization checks
// - NO cross-resource calls
// - Whole-collection reads and writes only

pub mod json_file_store;
pub mod memory_store;
pub mod record_store;
pub mod resource;

pub use json_file_store::JsonFileStore;
pub use memory_store::InMemoryStore;
pub use record_store::{load_collection, save_collection, RecordStore};
pub use resource::{Record, Resource, StorageArea};

#[cfg(test)]
pub use record_store::MockRecordStore;
