// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The resource exists but its content is not a collection of the requested record type
    #[error("Failed to read resource {resource}: {reason}")]
    ReadFailure { resource: String, reason: String },

    /// Persisting a whole collection failed
    #[error("Failed to write {description}: {reason}")]
    WriteFailure { description: String, reason: String },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// Accumulated validation messages, when this error is a field validation failure
    pub fn invalid_arguments(&self) -> Option<&[String]> {
        match self {
            AppError::Domain(DomainError::InvalidArguments(errors)) => Some(errors.messages()),
            _ => None,
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
