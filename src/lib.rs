// src/lib.rs
// MovieLib - flat-file movie catalog with user libraries
//
// Architecture:
// - Domain-centric: records, validation and the derived graph live in `domain`
// - Stores are dumb: whole JSON collections in, whole JSON collections out
// - Relations are stored as ID arrays and resolved in memory after loading
// - Explicit: no implicit persistence, callers decide when to write
// - Application Layer: composition root and error boundary

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod logging;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_account,
    validate_email,
    validate_movie_library,
    validate_password,
    validate_username,
    // Catalog
    Actor,
    Category,
    Director,
    Movie,
    Tag,
    // Accounts
    Credentials,
    MovieLibrary,
    NewAccount,
    Role,
    User,
    // Identity
    EntityId,
    Identified,
    // Validation
    ErrorTemplate,
    FieldRules,
    ValidationErrors,
    // Graph
    CatalogGraph,
    MovieLinks,
    Relation,
    ResolutionReport,
    UnresolvedReference,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use domain::{DomainError, DomainResult};
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Configuration
// ============================================================================

pub use config::StorageConfig;

// ============================================================================
// PUBLIC API - Record Store
// ============================================================================

pub use repositories::{
    load_collection,
    save_collection,
    InMemoryStore,
    JsonFileStore,
    Record,
    RecordStore,
    Resource,
    StorageArea,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    // Collections
    ActorService,
    CategoryService,
    CollectionService,
    DirectorService,
    MovieLibraryService,
    MovieService,
    TagService,
    UserService,
    // Resolution
    link_libraries,
    resolve_catalog,
    CatalogSnapshot,
    // Catalog
    CatalogService,
    // Accounts
    AccountService,
    LibraryUpdate,
    Session,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse, ErrorType};
