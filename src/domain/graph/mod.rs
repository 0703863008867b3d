//! Resolved relationship graph
//!
//! Pure value objects produced by graph resolution. The ID arrays stored on
//! records stay authoritative; everything here is derived and never persisted.

pub mod value_objects;

pub use value_objects::{CatalogGraph, MovieLinks, Relation, ResolutionReport, UnresolvedReference};
