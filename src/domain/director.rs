// src/domain/director.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::identity::{EntityId, Identified};

/// A director. Like actors, the filmography is derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    #[serde(rename = "ID")]
    id: EntityId,
    pub firstname: String,
    pub lastname: String,
    pub birthday: NaiveDate,
    pub country: String,
}

impl Director {
    pub fn new(
        id: EntityId,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        birthday: NaiveDate,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id,
            firstname: firstname.into(),
            lastname: lastname.into(),
            birthday,
            country: country.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

impl Identified for Director {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl std::fmt::Display for Director {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_name())
    }
}
