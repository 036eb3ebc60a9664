//! # Error Types
//!
//! Validation errors raised by sellerdb-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sellerdb-core errors (this file)                                      │
//! │  └── ValidationError  - Caller precondition failures                   │
//! │                                                                         │
//! │  sellerdb-db errors (separate crate)                                   │
//! │  └── DbError          - Validation | Integrity | Store                 │
//! │                                                                         │
//! │  Flow: ValidationError → DbError::Validation → caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending field or value in the message
//! 3. Raised before any statement reaches the store

use thiserror::Error;

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet the repository's
/// preconditions. They are always detected before the store is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required text field is missing or blank.
    #[error("{field} cannot be null or empty")]
    Required { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// Identifier is not a valid persisted id (must be > 0).
    #[error("Invalid Id: {id}")]
    InvalidId { id: i64 },

    /// A referenced entity is absent (e.g. a department that was never
    /// persisted and therefore has no id).
    #[error("{field} cannot be null")]
    MissingReference { field: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates a MustBePositive error for the given field.
    pub fn must_be_positive(field: impl Into<String>) -> Self {
        ValidationError::MustBePositive {
            field: field.into(),
        }
    }

    /// Creates a MissingReference error for the given field.
    pub fn missing_reference(field: impl Into<String>) -> Self {
        ValidationError::MissingReference {
            field: field.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
