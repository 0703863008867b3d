// src/repositories/resource.rs
//
// Named resources and the record types stored in them

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{
    Actor, Category, Director, Identified, Movie, MovieLibrary, Tag, User,
};

/// Which logical directory a resource lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageArea {
    Catalog,
    Accounts,
}

/// One resource per record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Movies,
    Actors,
    Directors,
    Categories,
    Tags,
    MovieLibraries,
    Users,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::Movies,
        Resource::Actors,
        Resource::Directors,
        Resource::Categories,
        Resource::Tags,
        Resource::MovieLibraries,
        Resource::Users,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Resource::Movies => "Movie.JSON",
            Resource::Actors => "Actor.JSON",
            Resource::Directors => "Director.JSON",
            Resource::Categories => "Category.JSON",
            Resource::Tags => "Tag.JSON",
            Resource::MovieLibraries => "MovieLibrary.JSON",
            Resource::Users => "User.JSON",
        }
    }

    pub fn area(&self) -> StorageArea {
        match self {
            Resource::Users => StorageArea::Accounts,
            Resource::Movies
            | Resource::Actors
            | Resource::Directors
            | Resource::Categories
            | Resource::Tags
            | Resource::MovieLibraries => StorageArea::Catalog,
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// A record type persisted as one element of a named collection resource
pub trait Record: Identified + Clone + Serialize + DeserializeOwned {
    const RESOURCE: Resource;

    /// The field matched exactly by name lookups
    fn display_name(&self) -> &str;
}

impl Record for Movie {
    const RESOURCE: Resource = Resource::Movies;

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Record for Actor {
    const RESOURCE: Resource = Resource::Actors;

    fn display_name(&self) -> &str {
        &self.firstname
    }
}

impl Record for Director {
    const RESOURCE: Resource = Resource::Directors;

    fn display_name(&self) -> &str {
        &self.firstname
    }
}

impl Record for Category {
    const RESOURCE: Resource = Resource::Categories;

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Record for Tag {
    const RESOURCE: Resource = Resource::Tags;

    fn display_name(&self) -> &str {
        &self.note
    }
}

impl Record for MovieLibrary {
    const RESOURCE: Resource = Resource::MovieLibraries;

    fn display_name(&self) -> &str {
        &self.title
    }
}

impl Record for User {
    const RESOURCE: Resource = Resource::Users;

    fn display_name(&self) -> &str {
        self.username()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_users_live_in_accounts_area() {
        for resource in Resource::ALL {
            let expected = if resource == Resource::Users {
                StorageArea::Accounts
            } else {
                StorageArea::Catalog
            };
            assert_eq!(resource.area(), expected, "{}", resource);
        }
    }
}
