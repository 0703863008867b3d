use serde::{Deserialize, Serialize};

use crate::domain::identity::{EntityId, Identified};

/// A film in the catalog.
/// The ID arrays are the source of truth for its relations; resolved views are
/// derived from them and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Internal immutable identifier
    #[serde(rename = "ID")]
    id: EntityId,

    /// Display title
    pub name: String,

    pub release_year: i32,

    pub rating: f64,

    pub description: String,

    #[serde(rename = "actorsID", default)]
    pub actor_ids: Vec<EntityId>,

    #[serde(rename = "directorsID", default)]
    pub director_ids: Vec<EntityId>,

    #[serde(rename = "categoriesID", default)]
    pub category_ids: Vec<EntityId>,

    #[serde(rename = "tagsID", default)]
    pub tag_ids: Vec<EntityId>,
}

impl Movie {
    pub fn new(id: EntityId, name: impl Into<String>, release_year: i32) -> Self {
        Self {
            id,
            name: name.into(),
            release_year,
            rating: 0.0,
            description: String::new(),
            actor_ids: Vec::new(),
            director_ids: Vec::new(),
            category_ids: Vec::new(),
            tag_ids: Vec::new(),
        }
    }

    pub fn with_actors(mut self, ids: impl IntoIterator<Item = EntityId>) -> Self {
        self.actor_ids = ids.into_iter().collect();
        self
    }

    pub fn with_directors(mut self, ids: impl IntoIterator<Item = EntityId>) -> Self {
        self.director_ids = ids.into_iter().collect();
        self
    }

    pub fn with_categories(mut self, ids: impl IntoIterator<Item = EntityId>) -> Self {
        self.category_ids = ids.into_iter().collect();
        self
    }

    pub fn with_tags(mut self, ids: impl IntoIterator<Item = EntityId>) -> Self {
        self.tag_ids = ids.into_iter().collect();
        self
    }

    pub fn set_rating(&mut self, rating: f64) {
        self.rating = rating;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Appends a tag reference. Returns false if the tag was already present.
    pub fn add_tag(&mut self, tag_id: EntityId) -> bool {
        if self.tag_ids.contains(&tag_id) {
            return false;
        }
        self.tag_ids.push(tag_id);
        true
    }
}

impl Identified for Movie {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl std::fmt::Display for Movie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.release_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_id_arrays_default_to_empty() {
        let json = r#"{"ID": 4, "name": "Heat", "releaseYear": 1995, "rating": 8.3, "description": ""}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id(), 4);
        assert!(movie.actor_ids.is_empty());
        assert!(movie.tag_ids.is_empty());
    }

    #[test]
    fn test_reads_legacy_field_names() {
        let json = r#"{
            "ID": 1, "name": "Alien", "releaseYear": 1979, "rating": 8.5,
            "description": "In space", "actorsID": [2, 3, 0], "directorsID": [1],
            "categoriesID": [5], "tagsID": []
        }"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.actor_ids, vec![2, 3, 0]);
        assert_eq!(movie.director_ids, vec![1]);
        assert_eq!(movie.category_ids, vec![5]);
    }

    #[test]
    fn test_add_tag_is_idempotent() {
        let mut movie = Movie::new(1, "Alien", 1979);
        assert!(movie.add_tag(7));
        assert!(!movie.add_tag(7));
        assert_eq!(movie.tag_ids, vec![7]);
    }
}
