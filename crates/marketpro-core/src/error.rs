//! # Error Types
//!
//! The error taxonomy here is deliberately narrow: almost every store
//! operation is a total function over in-memory data, and not-found
//! conditions (unknown invoice id, unknown barcode) are silent no-ops by
//! contract, not failures. What remains is input validation.
//!
//! ```text
//! ValidationError (this crate)  →  StoreError (marketpro-store)  →  Frontend
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation failures.
///
/// Validation is additive: the tolerant success-path contracts of the
/// store operations are unchanged, but callers that want early feedback
/// (and the one mandatory check, installment amount > 0) go through these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. barcode with illegal characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. username already taken).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "amount".to_string(),
        };
        assert_eq!(err.to_string(), "amount must be positive");

        let err = ValidationError::Duplicate {
            field: "username".to_string(),
            value: "admin".to_string(),
        };
        assert_eq!(err.to_string(), "username 'admin' already exists");
    }
}
