//! # Department Repository
//!
//! CRUD operations against the `department` table.
//!
//! ## Update Contract
//! `update(id, &department)` writes `department.name` into the row
//! identified by `id`. The object's own `id` field is ignored, which keeps
//! "which row" separate from "what changes".
//!
//! ## Transactions
//! `insert`, `update` and `delete_by_id` each run one statement inside
//! their own transaction, rolled back on any failure. Reads run directly
//! on the connection.

use sqlx::{Connection, FromRow, SqliteConnection};
use tracing::debug;

use crate::connection::SharedConnection;
use crate::error::{DbError, DbResult};
use crate::transaction;
use sellerdb_core::validation::{validate_department, validate_id};
use sellerdb_core::Department;

/// Row shape of `SELECT * FROM department`.
#[derive(Debug, FromRow)]
#[sqlx(rename_all = "PascalCase")]
struct DepartmentRow {
    id: i64,
    name: String,
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Department::new(Some(row.id), row.name)
    }
}

/// Repository for department database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.departments();
///
/// let mut music = Department::new(None, "Music");
/// repo.insert(&mut music).await?;            // music.id is now Some(..)
///
/// repo.update(music.id.unwrap(), &Department::new(None, "Sound")).await?;
/// let all = repo.find_all().await?;          // ordered by name
/// ```
#[derive(Debug, Clone)]
pub struct DepartmentRepository {
    conn: SharedConnection,
}

impl DepartmentRepository {
    /// Creates a new DepartmentRepository.
    pub fn new(conn: SharedConnection) -> Self {
        DepartmentRepository { conn }
    }

    /// Inserts a department and writes the generated id back into it.
    ///
    /// ## Returns
    /// * `Ok(())` - `department.id` now holds the generated key
    /// * `Err(DbError::Validation)` - Blank name, nothing was sent
    /// * `Err(DbError::Integrity)` - The store reported zero rows affected
    pub async fn insert(&self, department: &mut Department) -> DbResult<()> {
        validate_department(department)?;

        debug!(name = %department.name, "Inserting department");

        let mut conn = self.conn.lock().await;
        let mut tx = conn.begin().await?;
        let outcome = insert_row(&mut tx, &department.name).await;
        let id = transaction::finish(tx, outcome).await?;

        department.id = Some(id);
        debug!(id, "Department inserted");
        Ok(())
    }

    /// Renames the department with the given id.
    ///
    /// ## Arguments
    /// * `id` - Row to update
    /// * `department` - Source of the new name; its `id` is not used
    ///
    /// ## Returns
    /// * `Err(DbError::Validation)` - id <= 0 or blank name
    /// * `Err(DbError::Integrity)` - No department with that id
    pub async fn update(&self, id: i64, department: &Department) -> DbResult<()> {
        validate_id(id)?;
        validate_department(department)?;

        debug!(id, name = %department.name, "Updating department");

        let mut conn = self.conn.lock().await;
        let mut tx = conn.begin().await?;
        let outcome = update_row(&mut tx, id, &department.name).await;
        transaction::finish(tx, outcome).await
    }

    /// Deletes a department by id.
    ///
    /// ## Returns
    /// * `Err(DbError::Validation)` - id <= 0
    /// * `Err(DbError::Integrity)` - No such row, or sellers still reference it
    pub async fn delete_by_id(&self, id: i64) -> DbResult<()> {
        validate_id(id)?;

        debug!(id, "Deleting department");

        let mut conn = self.conn.lock().await;
        let mut tx = conn.begin().await?;
        let outcome = delete_row(&mut tx, id).await;
        transaction::finish(tx, outcome).await
    }

    /// Gets a department by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Department))` - Department found
    /// * `Ok(None)` - No row with that id
    /// * `Err(DbError::Validation)` - id <= 0, no query issued
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Department>> {
        validate_id(id)?;

        let mut conn = self.conn.lock().await;
        let row = sqlx::query_as::<_, DepartmentRow>("SELECT * FROM department WHERE Id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(row.map(Department::from))
    }

    /// Lists every department ordered by name.
    pub async fn find_all(&self) -> DbResult<Vec<Department>> {
        let mut conn = self.conn.lock().await;
        let rows = sqlx::query_as::<_, DepartmentRow>("SELECT * FROM department ORDER BY Name")
            .fetch_all(&mut *conn)
            .await?;

        debug!(count = rows.len(), "Listed departments");
        Ok(rows.into_iter().map(Department::from).collect())
    }

    /// Counts departments (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let mut conn = self.conn.lock().await;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM department")
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }
}

async fn insert_row(conn: &mut SqliteConnection, name: &str) -> DbResult<i64> {
    let result = sqlx::query("INSERT INTO department (Name) VALUES (?)")
        .bind(name)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::integrity("Unexpected error! No rows affected!"));
    }

    Ok(result.last_insert_rowid())
}

async fn update_row(conn: &mut SqliteConnection, id: i64, name: &str) -> DbResult<()> {
    let result = sqlx::query("UPDATE department SET Name = ? WHERE Id = ?")
        .bind(name)
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::integrity(format!("Department id not found: {}", id)));
    }

    Ok(())
}

async fn delete_row(conn: &mut SqliteConnection, id: i64) -> DbResult<()> {
    let result = sqlx::query("DELETE FROM department WHERE Id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::integrity(format!("Department id not found: {}", id)));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
