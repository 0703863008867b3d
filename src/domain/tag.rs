// src/domain/tag.rs

use serde::{Deserialize, Serialize};

use crate::domain::identity::{EntityId, Identified};

/// Free-text note attached to movies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "ID")]
    id: EntityId,
    pub note: String,
}

impl Tag {
    pub fn new(id: EntityId, note: impl Into<String>) -> Self {
        Self {
            id,
            note: note.into(),
        }
    }
}

impl Identified for Tag {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.note)
    }
}
