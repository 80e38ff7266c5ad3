//! # Error Types
//!
//! Validation errors for catalog-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core (this file)                                              │
//! │  └── ValidationError  - Bad user input (price, numbers, empty fields)  │
//! │                                                                         │
//! │  catalog-db                                                            │
//! │  └── DbError          - NotFound vs storage failures                   │
//! │                                                                         │
//! │  catalog-rpc                                                           │
//! │  └── RpcError         - Mapped onto tonic::Status                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Input validation errors.
///
/// Raised while turning console lines or RPC fields into domain values,
/// before anything reaches the database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Price text is not a decimal with at most two fractional digits.
    #[error("invalid price '{value}': {reason}")]
    InvalidPrice { value: String, reason: String },

    /// Integer field could not be parsed.
    #[error("{field} must be a whole number, got '{value}'")]
    InvalidNumber { field: String, value: String },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "model".to_string(),
        };
        assert_eq!(err.to_string(), "model is required");

        let err = ValidationError::InvalidNumber {
            field: "stock".to_string(),
            value: "ten".to_string(),
        };
        assert_eq!(err.to_string(), "stock must be a whole number, got 'ten'");
    }
}
