// src/domain/category.rs
//
// Category Entity
//
// Categories are purely organizational. The movie collection shown for a
// category is resolved from the movies' category ID arrays; `movie_ids` is the
// category's own declared list and is persisted as-is.

use serde::{Deserialize, Serialize};

use crate::domain::identity::{EntityId, Identified};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Internal immutable identifier
    #[serde(rename = "ID")]
    id: EntityId,

    pub name: String,

    #[serde(rename = "filmscollectionID", default)]
    pub movie_ids: Vec<EntityId>,
}

impl Category {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            movie_ids: Vec::new(),
        }
    }
}

impl Identified for Category {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
