// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod actor;
pub mod category;
pub mod director;
pub mod graph;
pub mod identity;
pub mod movie;
pub mod movie_library;
pub mod tag;
pub mod user;
pub mod validation;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use identity::{EntityId, Identified, PADDING_ID};

// Catalog
pub use actor::Actor;
pub use category::Category;
pub use director::Director;
pub use movie::Movie;
pub use tag::Tag;

// Accounts
pub use movie_library::{validate_movie_library, MovieLibrary};
pub use user::{Credentials, NewAccount, Role, User};

// Validation
pub use validation::{
    validate_account, validate_email, validate_password, validate_username, ErrorTemplate,
    FieldRules, ValidationErrors,
};

// Graph
pub use graph::{CatalogGraph, MovieLinks, Relation, ResolutionReport, UnresolvedReference};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    /// Field validation failed; carries every accumulated message
    #[error("Invalid arguments: {0}")]
    InvalidArguments(ValidationErrors),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Credential error: {0}")]
    Credentials(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
