//! # Schema Bootstrap
//!
//! Creates the two tables the repositories read and write.
//!
//! ```text
//! ┌──────────────────────┐          ┌──────────────────────────────┐
//! │ department           │          │ seller                       │
//! │ ──────────────────── │          │ ──────────────────────────── │
//! │ Id   INTEGER PK  ◄───┼──────────┼─ DepartmentId INTEGER FK     │
//! │ Name TEXT            │          │ Id, Name, Email              │
//! └──────────────────────┘          │ BirthDate DATE               │
//!                                   │ BaseSalary REAL              │
//!                                   └──────────────────────────────┘
//! ```
//!
//! Every statement is `IF NOT EXISTS`, so applying twice is harmless.
//! There is no versioning: changing a table means changing this file.

use sqlx::SqliteConnection;
use tracing::info;

use crate::error::{DbError, DbResult};

/// Table definitions, applied in order.
const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS department (
        Id   INTEGER PRIMARY KEY AUTOINCREMENT,
        Name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS seller (
        Id           INTEGER PRIMARY KEY AUTOINCREMENT,
        Name         TEXT NOT NULL,
        Email        TEXT NOT NULL,
        BirthDate    DATE NOT NULL,
        BaseSalary   REAL NOT NULL,
        DepartmentId INTEGER NOT NULL REFERENCES department (Id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_seller_department ON seller (DepartmentId)",
];

/// Creates the tables if they don't exist yet.
///
/// ## Example
/// ```rust,ignore
/// schema::apply(&mut conn).await?;
/// ```
pub async fn apply(conn: &mut SqliteConnection) -> DbResult<()> {
    info!("Creating tables");

    for statement in STATEMENTS {
        sqlx::query(statement)
            .execute(&mut *conn)
            .await
            .map_err(|e| DbError::SchemaFailed(e.to_string()))?;
    }

    info!(statements = STATEMENTS.len(), "Schema ready");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::{ConnectOptions, sqlite::SqliteConnectOptions};
    use std::str::FromStr;

    async fn memory_connection() -> SqliteConnection {
        SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .connect()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_apply_is_idempotent() {
        let mut conn = memory_connection().await;

        apply(&mut conn).await.unwrap();
        apply(&mut conn).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('department', 'seller') ORDER BY name",
        )
        .fetch_all(&mut conn)
        .await
        .unwrap();

        assert_eq!(tables, vec!["department".to_string(), "seller".to_string()]);
    }
}
