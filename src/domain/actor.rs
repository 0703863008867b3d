// src/domain/actor.rs
//
// Actor Entity
//
// Filmography is a derived view built by graph resolution from the movies'
// actor ID arrays. It is never stored on the actor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::identity::{EntityId, Identified};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Internal immutable identifier
    #[serde(rename = "ID")]
    id: EntityId,

    pub firstname: String,

    pub lastname: String,

    /// Stored as yyyy-MM-dd
    pub birthday: NaiveDate,

    pub country: String,
}

impl Actor {
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

impl Identified for Actor {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_birthday_uses_iso_date() {
        let actor = Actor::new(
            3,
            "Sigourney",
            "Weaver",
            NaiveDate::from_ymd_opt(1949, 10, 8).unwrap(),
            "USA",
        );
        let json = serde_json::to_value(&actor).unwrap();
        assert_eq!(json["birthday"], "1949-10-08");
        assert_eq!(json["ID"], 3);
    }

    #[test]
    fn test_legacy_filmography_field_is_ignored() {
        let json = r#"{"ID": 9, "firstname": "Al", "lastname": "Pacino",
            "filmography": null, "filmographyID": [1, 2],
            "birthday": "1940-04-25", "country": "USA"}"#;
        let actor: Actor = serde_json::from_str(json).unwrap();
        assert_eq!(actor.id(), 9);
        assert_eq!(actor.full_name(), "Al Pacino");
    }
}
