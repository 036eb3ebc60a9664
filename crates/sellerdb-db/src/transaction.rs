//! # Transaction Completion
//!
//! Every mutating repository call follows the same shape:
//!
//! ```text
//! let mut tx = conn.begin().await?;
//! let outcome = write(&mut tx, ...).await;   // one statement
//! transaction::finish(tx, outcome).await     // commit or rollback
//! ```
//!
//! ## Rollback Rules
//! - Success → commit; a commit failure surfaces as `DbError::Store`
//! - Failure → rollback, then the original typed error is returned
//! - Rollback fails too → `DbError::RollbackFailed` carrying both messages
//!
//! An uncommitted `sqlx::Transaction` also rolls back when dropped, which
//! covers early returns and cancellation.

use sqlx::{Sqlite, Transaction};
use tracing::{error, warn};

use crate::error::{DbError, DbResult};

/// Commits `tx` if `outcome` is `Ok`, otherwise rolls it back.
pub(crate) async fn finish<T>(tx: Transaction<'_, Sqlite>, outcome: DbResult<T>) -> DbResult<T> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => rollback(tx, err).await,
    }
}

async fn rollback<T>(tx: Transaction<'_, Sqlite>, err: DbError) -> DbResult<T> {
    match tx.rollback().await {
        Ok(()) => {
            warn!(error = %err, "Transaction rolled back");
            Err(err)
        }
        Err(rollback_err) => {
            error!(error = %err, rollback_error = %rollback_err, "Rollback failed");
            Err(DbError::RollbackFailed {
                cause: rollback_err.to_string(),
                original: err.to_string(),
            })
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
