//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Message not found: {0}")]
    MessageNotFound(Uuid),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MessageNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let id = Uuid::nil();
        assert_eq!(DomainError::MessageNotFound(id).code(), "UNKNOWN_MESSAGE");
        assert_eq!(
            DomainError::ValidationError("bad".to_string()).code(),
            "VALIDATION_ERROR"
        );
    }

    #[test]
    fn test_classification() {
        let id = Uuid::nil();
        assert!(DomainError::MessageNotFound(id).is_not_found());
        assert!(!DomainError::DatabaseError("x".to_string()).is_not_found());
        assert!(DomainError::ValidationError("x".to_string()).is_validation());
    }
}
