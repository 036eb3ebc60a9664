//! # Database Error Types
//!
//! Error types for repository operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError (sellerdb-core) ──► DbError::Validation               │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ├── FOREIGN KEY constraint ──► DbError::Integrity                │
//! │       └── anything else ──────────► DbError::Store                     │
//! │                                                                         │
//! │  Zero rows affected ──────────────► DbError::Integrity                 │
//! │  Rollback itself failed ──────────► DbError::RollbackFailed            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sellerdb_core::ValidationError;
use thiserror::Error;

/// Coarse classification of a [`DbError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller precondition violated; the store was never touched.
    Validation,
    /// Referential integrity or row-count consistency violated.
    Integrity,
    /// Any other failure reported by the driver.
    Store,
}

/// Repository operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Input rejected before any statement was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Referential-integrity or logical-consistency violation.
    ///
    /// ## When This Occurs
    /// - Deleting a department still referenced by a seller
    /// - Inserting a seller whose department does not exist
    /// - Zero rows affected where exactly one was expected
    #[error("Integrity violation: {message}")]
    Integrity { message: String },

    /// Query or execution failure not classified as an integrity violation.
    #[error("Store error: {0}")]
    Store(String),

    /// Rolling back a failed transaction failed as well.
    ///
    /// The original failure is only kept as text.
    #[error("Error trying to rollback! Caused by: {cause} (original failure: {original})")]
    RollbackFailed { cause: String, original: String },

    /// Opening the connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Creating the tables failed.
    #[error("Schema setup failed: {0}")]
    SchemaFailed(String),
}

impl DbError {
    /// Creates an Integrity error.
    pub fn integrity(message: impl Into<String>) -> Self {
        DbError::Integrity {
            message: message.into(),
        }
    }

    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::Validation(_) => ErrorKind::Validation,
            DbError::Integrity { .. } => ErrorKind::Integrity,
            DbError::Store(_)
            | DbError::RollbackFailed { .. }
            | DbError::ConnectionFailed(_)
            | DbError::SchemaFailed(_) => ErrorKind::Store,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub fn is_integrity(&self) -> bool {
        self.kind() == ErrorKind::Integrity
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database (FK violation) → DbError::Integrity
/// sqlx::Error::Database (other)        → DbError::Store
/// Other                                → DbError::Store
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite reports "FOREIGN KEY constraint failed"
                if db_err.is_foreign_key_violation() || msg.contains("FOREIGN KEY constraint failed")
                {
                    DbError::Integrity {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::Store(msg.to_string())
                }
            }

            _ => DbError::Store(err.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err: DbError = ValidationError::InvalidId { id: 0 }.into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.is_validation());

        assert_eq!(DbError::integrity("Id not found").kind(), ErrorKind::Integrity);
        assert_eq!(DbError::Store("disk I/O error".into()).kind(), ErrorKind::Store);
        assert_eq!(
            DbError::RollbackFailed {
                cause: "connection lost".into(),
                original: "disk full".into()
            }
            .kind(),
            ErrorKind::Store
        );
    }

    #[test]
    fn test_rollback_failure_embeds_original_message() {
        let err = DbError::RollbackFailed {
            cause: "connection lost".into(),
            original: "disk full".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("connection lost"));
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err: DbError = ValidationError::required("Department name").into();
        assert_eq!(err.to_string(), "Department name cannot be null or empty");
    }

    #[test]
    fn test_non_database_sqlx_error_is_store() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.kind(), ErrorKind::Store);
    }
}
