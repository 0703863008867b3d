// src/application/error_handling.rs
//
// Error Handling at the application boundary
//
// ARCHITECTURE:
// - Maps internal errors → user-facing responses
// - Provides one consistent error format for any front end
// - Validation failures carry every accumulated message
// - Storage faults are logged in full, shown in summary

use log::error;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::error::AppError;

/// Standard error response for a front end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<Vec<String>>,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Record or account not found
    NotFound,

    /// Invalid input, one message per failed check
    Validation,

    /// Username already taken
    Conflict,

    /// Session may not perform the operation
    PermissionDenied,

    /// Reading or writing a resource failed
    Storage,

    /// Other/unknown error
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<Vec<String>>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound(what) => Self::not_found(&what),

            AppError::AlreadyExists(what) => {
                Self::new(ErrorType::Conflict, format!("{} already exists", what), None)
            }

            AppError::PermissionDenied(reason) => {
                Self::new(ErrorType::PermissionDenied, reason, None)
            }

            AppError::Domain(DomainError::InvalidArguments(errors)) => Self::new(
                ErrorType::Validation,
                "Invalid arguments",
                Some(errors.messages().to_vec()),
            ),

            AppError::Domain(DomainError::NotFound(what)) => Self::not_found(&what),

            AppError::Domain(domain_error) => Self::new(
                ErrorType::Validation,
                "Domain rule violated",
                Some(vec![domain_error.to_string()]),
            ),

            AppError::ReadFailure { resource, reason } => {
                error!("Read failure on {}: {}", resource, reason);
                Self::new(
                    ErrorType::Storage,
                    format!("Could not read {}", resource),
                    Some(vec![reason]),
                )
            }

            AppError::WriteFailure { description, reason } => {
                error!("Write failure ({}): {}", description, reason);
                Self::new(
                    ErrorType::Storage,
                    format!("Could not write {}", description),
                    Some(vec![reason]),
                )
            }

            AppError::Io(io_error) => {
                error!("IO error: {:?}", io_error);
                Self::new(
                    ErrorType::Storage,
                    "File system operation failed",
                    Some(vec![io_error.to_string()]),
                )
            }

            AppError::Serialization(serde_error) => {
                error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Other(message) => {
                error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }

    /// Create validation error
    pub fn validation(messages: Vec<String>) -> Self {
        Self::new(ErrorType::Validation, "Invalid arguments", Some(messages))
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource), None)
    }
}

/// Helper trait to convert Results to a serialized ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| {
            let error_response = ErrorResponse::from_app_error(e);
            serde_json::to_string(&error_response).unwrap_or_else(|_| "Internal error".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validate_account;

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(AppError::NotFound("user 7".to_string()));
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "user 7 not found");
    }

    #[test]
    fn test_validation_carries_every_message() {
        let errors = validate_account("ab", "bad", "weak").unwrap_err();
        let count = errors.len();
        let error = ErrorResponse::from_app_error(DomainError::InvalidArguments(errors).into());

        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.details.map(|d| d.len()), Some(count));
    }

    #[test]
    fn test_write_failure_is_storage() {
        let error = ErrorResponse::from_app_error(AppError::WriteFailure {
            description: "3 records to Movie.JSON".to_string(),
            reason: "disk full".to_string(),
        });
        assert_eq!(error.error_type, ErrorType::Storage);
        assert_eq!(error.details, Some(vec!["disk full".to_string()]));
    }

    #[test]
    fn test_conflict_and_permission() {
        let conflict = ErrorResponse::from_app_error(AppError::AlreadyExists("username 'x'".into()));
        assert_eq!(conflict.error_type, ErrorType::Conflict);

        let denied = ErrorResponse::from_app_error(AppError::PermissionDenied("admins only".into()));
        assert_eq!(denied.error_type, ErrorType::PermissionDenied);
    }

    #[test]
    fn test_serialization() {
        let result: Result<(), AppError> = Err(AppError::NotFound("Movie 3".to_string()));
        let json = result.to_error_response().unwrap_err();
        assert!(json.contains("not_found"));
        assert!(json.contains("Movie 3 not found"));
    }
}
