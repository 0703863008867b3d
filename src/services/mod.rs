// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod account_service;
pub mod catalog_service;
pub mod collection_service;
pub mod resolution_service;
pub mod user_service;


// Re-export all services and their types
pub use collection_service::{
    ActorService,
    CategoryService,
    CollectionService,
    DirectorService,
    MovieLibraryService,
    MovieService,
    TagService,
};

pub use user_service::UserService;

pub use resolution_service::{
    link_libraries,
    resolve_catalog,
    CatalogSnapshot,
};

pub use catalog_service::CatalogService;

pub use account_service::{
    AccountService,
    LibraryUpdate,
    Session,
    ID_RANGE,
};
