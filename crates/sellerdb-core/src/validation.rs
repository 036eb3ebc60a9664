//! # Validation Module
//!
//! Precondition checks run by the repositories before any statement is
//! sent to the store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (before the store is touched)                    │
//! │  ├── Blank names / emails                                              │
//! │  ├── Non-positive ids and salaries                                     │
//! │  └── Missing department reference                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints → DbError::Integrity                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sellerdb_core::validation::{validate_id, validate_name};
//!
//! validate_id(3).unwrap();
//! validate_name("Department name", "Music").unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{Department, Seller};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates that a text field is not blank.
///
/// ## Example
/// ```rust
/// use sellerdb_core::validation::validate_name;
///
/// assert!(validate_name("Seller name", "Alex").is_ok());
/// assert!(validate_name("Seller name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }

    Ok(())
}

/// Validates an id passed to a lookup, update or delete.
///
/// ## Rules
/// - Must be > 0 (SQLite generated keys start at 1)
pub fn validate_id(id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::InvalidId { id });
    }

    Ok(())
}

/// Validates a base salary.
///
/// ## Rules
/// - Must be strictly positive
/// - NaN is rejected
pub fn validate_base_salary(salary: f64) -> ValidationResult<()> {
    // Written as a negated comparison so NaN fails too.
    if !(salary > 0.0) {
        return Err(ValidationError::must_be_positive("Base salary"));
    }

    Ok(())
}

/// Validates that a department reference points at a persisted row and
/// returns its id.
pub fn validate_department_ref(department: &Department) -> ValidationResult<i64> {
    match department.id {
        Some(id) if id > 0 => Ok(id),
        Some(id) => Err(ValidationError::InvalidId { id }),
        None => Err(ValidationError::missing_reference("Department")),
    }
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates a department before insert or update.
pub fn validate_department(department: &Department) -> ValidationResult<()> {
    validate_name("Department name", &department.name)
}

/// Validates a seller before insert or update.
///
/// ## Rules
/// - Name non-blank
/// - Email non-blank
/// - Department persisted
/// - Base salary > 0
///
/// ## Returns
/// The department id to bind as `DepartmentId`.
pub fn validate_seller(seller: &Seller) -> ValidationResult<i64> {
    validate_name("Seller name", &seller.name)?;
    validate_name("Seller email", &seller.email)?;
    let department_id = validate_department_ref(&seller.department)?;
    validate_base_salary(seller.base_salary)?;

    Ok(department_id)
}

// =============================================================================
// Unit Tests
// =============================================================================
