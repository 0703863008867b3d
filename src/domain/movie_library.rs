// src/domain/movie_library.rs
//
// Movie Library Entity
//
// A user's personal list of favourite movies.
//
// CRITICAL INVARIANTS:
// - Exists only when its owner explicitly created it
// - At most one per user (enforced by the account service)
// - Owner is referenced by ID; the user holds the reverse link

use serde::{Deserialize, Serialize};

use crate::domain::identity::{is_reference, EntityId, Identified};
use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieLibrary {
    /// Internal immutable identifier
    id: EntityId,

    pub title: String,

    /// The owning user
    #[serde(rename = "userID")]
    owner_id: EntityId,

    /// Favourite movies, in the order they were added
    #[serde(rename = "favoritefilmsID", default)]
    movie_ids: Vec<EntityId>,
}

impl MovieLibrary {
    pub fn new(id: EntityId, title: impl Into<String>, owner_id: EntityId) -> Self {
        Self {
            id,
            title: title.into(),
            owner_id,
            movie_ids: Vec::new(),
        }
    }

    pub fn owner_id(&self) -> EntityId {
        self.owner_id
    }

    pub fn movie_ids(&self) -> &[EntityId] {
        &self.movie_ids
    }

    pub fn add_movie(&mut self, movie_id: EntityId) {
        self.movie_ids.push(movie_id);
    }

    pub fn contains(&self, movie_id: EntityId) -> bool {
        self.movie_ids.contains(&movie_id)
    }

    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }
}

impl Identified for MovieLibrary {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Validates MovieLibrary invariants
pub fn validate_movie_library(library: &MovieLibrary) -> DomainResult<()> {
    if !is_reference(library.owner_id) {
        return Err(DomainError::InvariantViolation(format!(
            "Movie library {} has no owner",
            library.id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_is_persisted() {
        let mut library = MovieLibrary::new(12, "Weekend", 77);
        library.add_movie(3);

        let json = serde_json::to_string(&library).unwrap();
        let back: MovieLibrary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.owner_id(), 77);
        assert_eq!(back.movie_ids(), &[3]);
    }

    #[test]
    fn test_library_without_owner_is_invalid() {
        let library = MovieLibrary::new(12, "Orphan", 0);
        assert!(validate_movie_library(&library).is_err());
        assert!(validate_movie_library(&MovieLibrary::new(12, "Mine", 5)).is_ok());
    }
}
