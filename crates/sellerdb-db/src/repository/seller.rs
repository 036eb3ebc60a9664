//! # Seller Repository
//!
//! CRUD operations against the `seller` table. Every read joins
//! `department`, so returned sellers carry a fully populated department.
//!
//! ## Department De-duplication
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │               One Department instance per id, per call                  │
//! │                                                                         │
//! │  Joined rows (ORDER BY seller.Name)       HashMap<i64, Arc<Department>> │
//! │  ─────────────────────────────────        ───────────────────────────── │
//! │  Alex   | DepartmentId=2 | Electronics ──► miss → insert 2              │
//! │  Bob    | DepartmentId=1 | Computers   ──► miss → insert 1              │
//! │  Donald | DepartmentId=2 | Electronics ──► hit  → reuse Arc for 2       │
//! │                                                                         │
//! │  Alex.department and Donald.department are the same Arc.               │
//! │  The map lives for one call only; nothing is cached across calls.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::{Connection, FromRow, SqliteConnection};
use tracing::debug;

use crate::connection::SharedConnection;
use crate::error::{DbError, DbResult};
use crate::transaction;
use sellerdb_core::validation::{validate_department_ref, validate_id, validate_seller};
use sellerdb_core::{Department, Seller};

const FIND_BY_ID: &str = r#"
    SELECT seller.*, department.Name AS DepName
    FROM seller INNER JOIN department
    ON seller.DepartmentId = department.Id
    WHERE seller.Id = ?
"#;

const FIND_ALL: &str = r#"
    SELECT seller.*, department.Name AS DepName
    FROM seller INNER JOIN department
    ON seller.DepartmentId = department.Id
    ORDER BY seller.Name
"#;

const FIND_BY_DEPARTMENT: &str = r#"
    SELECT seller.*, department.Name AS DepName
    FROM seller INNER JOIN department
    ON seller.DepartmentId = department.Id
    WHERE seller.DepartmentId = ?
    ORDER BY seller.Name
"#;

/// Row shape of the seller/department join.
#[derive(Debug, FromRow)]
#[sqlx(rename_all = "PascalCase")]
struct SellerRow {
    id: i64,
    name: String,
    email: String,
    birth_date: NaiveDate,
    base_salary: f64,
    department_id: i64,
    #[sqlx(rename = "DepName")]
    department_name: String,
}

impl SellerRow {
    fn department(&self) -> Department {
        Department::new(Some(self.department_id), self.department_name.clone())
    }

    fn into_seller(self, department: Arc<Department>) -> Seller {
        Seller::new(
            Some(self.id),
            self.name,
            self.email,
            self.birth_date,
            self.base_salary,
            department,
        )
    }
}

/// Builds sellers in row order, sharing one `Arc<Department>` per
/// department id.
fn assemble(rows: Vec<SellerRow>) -> Vec<Seller> {
    let mut departments: HashMap<i64, Arc<Department>> = HashMap::new();

    rows.into_iter()
        .map(|row| {
            let department = departments
                .entry(row.department_id)
                .or_insert_with(|| Arc::new(row.department()))
                .clone();
            row.into_seller(department)
        })
        .collect()
}

/// Repository for seller database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.sellers();
///
/// let sellers = repo.find_by_department(&computers).await?;
/// let everyone = repo.find_all().await?;
/// ```
#[derive(Debug, Clone)]
pub struct SellerRepository {
    conn: SharedConnection,
}

impl SellerRepository {
    /// Creates a new SellerRepository.
    pub fn new(conn: SharedConnection) -> Self {
        SellerRepository { conn }
    }

    /// Inserts a seller and writes the generated id back into it.
    ///
    /// ## Validation (before any statement)
    /// - Name and email non-blank
    /// - Department persisted (has an id)
    /// - Base salary > 0
    ///
    /// ## Returns
    /// * `Err(DbError::Integrity)` - The department id doesn't exist
    pub async fn insert(&self, seller: &mut Seller) -> DbResult<()> {
        let department_id = validate_seller(seller)?;

        debug!(name = %seller.name, department_id, "Inserting seller");

        let mut conn = self.conn.lock().await;
        let mut tx = conn.begin().await?;
        let outcome = insert_row(&mut tx, seller, department_id).await;
        let id = transaction::finish(tx, outcome).await?;

        seller.id = Some(id);
        debug!(id, "Seller inserted");
        Ok(())
    }

    /// Overwrites every column of the seller with the given id.
    ///
    /// ## Arguments
    /// * `id` - Row to update
    /// * `seller` - New values; its `id` is not used
    ///
    /// ## Returns
    /// * `Err(DbError::Validation)` - Invalid id or seller fields
    /// * `Err(DbError::Integrity)` - No seller with that id, or unknown department
    pub async fn update(&self, id: i64, seller: &Seller) -> DbResult<()> {
        validate_id(id)?;
        let department_id = validate_seller(seller)?;

        debug!(id, department_id, "Updating seller");

        let mut conn = self.conn.lock().await;
        let mut tx = conn.begin().await?;
        let outcome = update_row(&mut tx, id, seller, department_id).await;
        transaction::finish(tx, outcome).await
    }

    /// Deletes a seller by id.
    pub async fn delete_by_id(&self, id: i64) -> DbResult<()> {
        validate_id(id)?;

        debug!(id, "Deleting seller");

        let mut conn = self.conn.lock().await;
        let mut tx = conn.begin().await?;
        let outcome = delete_row(&mut tx, id).await;
        transaction::finish(tx, outcome).await
    }

    /// Gets a seller, with its department, by id.
    ///
    /// ## Returns
    /// * `Ok(None)` - No seller with that id
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Seller>> {
        validate_id(id)?;

        let mut conn = self.conn.lock().await;
        let row = sqlx::query_as::<_, SellerRow>(FIND_BY_ID)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(row.map(|row| {
            let department = Arc::new(row.department());
            row.into_seller(department)
        }))
    }

    /// Lists every seller ordered by name.
    pub async fn find_all(&self) -> DbResult<Vec<Seller>> {
        let mut conn = self.conn.lock().await;
        let rows = sqlx::query_as::<_, SellerRow>(FIND_ALL)
            .fetch_all(&mut *conn)
            .await?;

        debug!(count = rows.len(), "Listed sellers");
        Ok(assemble(rows))
    }

    /// Lists the sellers of one department ordered by name.
    ///
    /// ## Returns
    /// * `Ok(vec![])` - The department has no sellers (or doesn't exist)
    /// * `Err(DbError::Validation)` - The department was never persisted
    pub async fn find_by_department(&self, department: &Department) -> DbResult<Vec<Seller>> {
        let department_id = validate_department_ref(department)?;

        let mut conn = self.conn.lock().await;
        let rows = sqlx::query_as::<_, SellerRow>(FIND_BY_DEPARTMENT)
            .bind(department_id)
            .fetch_all(&mut *conn)
            .await?;

        if rows.is_empty() {
            debug!(department_id, "No sellers found for department");
        }

        Ok(assemble(rows))
    }

    /// Counts sellers (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let mut conn = self.conn.lock().await;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM seller")
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }
}

async fn insert_row(conn: &mut SqliteConnection, seller: &Seller, department_id: i64) -> DbResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO seller (Name, Email, BirthDate, BaseSalary, DepartmentId)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(seller.name.as_str())
    .bind(seller.email.as_str())
    .bind(seller.birth_date)
    .bind(seller.base_salary)
    .bind(department_id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::integrity("Unexpected error! No rows affected!"));
    }

    Ok(result.last_insert_rowid())
}

async fn update_row(
    conn: &mut SqliteConnection,
    id: i64,
    seller: &Seller,
    department_id: i64,
) -> DbResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE seller
        SET Name = ?, Email = ?, BirthDate = ?, BaseSalary = ?, DepartmentId = ?
        WHERE Id = ?
        "#,
    )
    .bind(seller.name.as_str())
    .bind(seller.email.as_str())
    .bind(seller.birth_date)
    .bind(seller.base_salary)
    .bind(department_id)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::integrity(format!(
            "No rows affected. Seller id may not exist: {}",
            id
        )));
    }

    Ok(())
}

async fn delete_row(conn: &mut SqliteConnection, id: i64) -> DbResult<()> {
    let result = sqlx::query("DELETE FROM seller WHERE Id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::integrity(format!("Seller id not found: {}", id)));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::{Database, DbConfig};

    struct Fixture {
        db: Database,
        computers: Arc<Department>,
        electronics: Arc<Department>,
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn add_department(db: &Database, name: &str) -> Arc<Department> {
        let mut department = Department::new(None, name);
        db.departments().insert(&mut department).await.unwrap();
        Arc::new(department)
    }

    async fn add_seller(db: &Database, name: &str, salary: f64, department: &Arc<Department>) -> Seller {
        let email = format!("{}@gmail.com", name.to_lowercase().replace(' ', "."));
        let mut seller = Seller::new(None, name, email, date(1990, 1, 15), salary, department.clone());
        db.sellers().insert(&mut seller).await.unwrap();
        seller
    }

    /// Two departments; Electronics has two sellers, Computers one.
    async fn setup() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let computers = add_department(&db, "Computers").await;
        let electronics = add_department(&db, "Electronics").await;

        add_seller(&db, "Donald Blue", 2200.0, &electronics).await;
        add_seller(&db, "Bob Brown", 1000.0, &computers).await;
        add_seller(&db, "Alex Green", 3900.0, &electronics).await;

        Fixture {
            db,
            computers,
            electronics,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id_joins_department() {
        let fx = setup().await;
        let repo = fx.db.sellers();

        let mut greg = Seller::new(
            None,
            "Greg",
            "greg@gmail.com",
            date(1988, 9, 9),
            4000.0,
            fx.computers.clone(),
        );
        repo.insert(&mut greg).await.unwrap();

        let found = repo.find_by_id(greg.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(found.name, "Greg");
        assert_eq!(found.email, "greg@gmail.com");
        assert_eq!(found.birth_date, date(1988, 9, 9));
        assert_eq!(found.base_salary, 4000.0);
        assert_eq!(*found.department, *fx.computers);
        assert_eq!(found.department.name, "Computers");
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_none() {
        let fx = setup().await;

        assert!(fx.db.sellers().find_by_id(999_999).await.unwrap().is_none());
        assert!(fx.db.sellers().find_by_id(0).await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_find_by_department_filters_and_orders() {
        let fx = setup().await;

        let sellers = fx.db.sellers().find_by_department(&fx.electronics).await.unwrap();

        let names: Vec<&str> = sellers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alex Green", "Donald Blue"]);
        for seller in &sellers {
            assert_eq!(seller.department.id, fx.electronics.id);
            assert_eq!(seller.department.name, fx.electronics.name);
        }
    }

    #[tokio::test]
    async fn test_find_by_department_shares_department_instance() {
        let fx = setup().await;

        let sellers = fx.db.sellers().find_by_department(&fx.electronics).await.unwrap();

        assert_eq!(sellers.len(), 2);
        assert!(Arc::ptr_eq(&sellers[0].department, &sellers[1].department));
    }

    #[tokio::test]
    async fn test_find_all_orders_and_shares_departments() {
        let fx = setup().await;

        let sellers = fx.db.sellers().find_all().await.unwrap();

        let names: Vec<&str> = sellers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alex Green", "Bob Brown", "Donald Blue"]);

        let alex = &sellers[0];
        let bob = &sellers[1];
        let donald = &sellers[2];
        assert!(Arc::ptr_eq(&alex.department, &donald.department));
        assert!(!Arc::ptr_eq(&alex.department, &bob.department));
    }

    #[tokio::test]
    async fn test_departments_are_not_shared_across_calls() {
        let fx = setup().await;
        let repo = fx.db.sellers();

        let first = repo.find_all().await.unwrap();
        let second = repo.find_all().await.unwrap();

        assert!(!Arc::ptr_eq(&first[0].department, &second[0].department));
    }

    #[tokio::test]
    async fn test_find_by_department_rejects_transient_department() {
        let fx = setup().await;

        let transient = Department::new(None, "Nowhere");
        let err = fx.db.sellers().find_by_department(&transient).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_find_by_department_without_sellers_is_empty() {
        let fx = setup().await;
        let empty = add_department(&fx.db, "Books").await;

        assert!(fx.db.sellers().find_by_department(&empty).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_sellers_are_rejected_before_store() {
        let fx = setup().await;
        let repo = fx.db.sellers();
        let valid = Seller::new(None, "Martha", "martha@gmail.com", date(1991, 3, 3), 3000.0, fx.computers.clone());

        let mut blank_name = valid.clone();
        blank_name.name = String::new();
        let mut blank_email = valid.clone();
        blank_email.email = " ".to_string();
        let mut no_salary = valid.clone();
        no_salary.base_salary = 0.0;
        let mut transient_department = valid.clone();
        transient_department.department = Arc::new(Department::new(None, "Unsaved"));

        for mut seller in [blank_name, blank_email, no_salary, transient_department] {
            let err = repo.insert(&mut seller).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "{}", seller);
            assert!(seller.id.is_none());
        }

        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_invalid_updates_leave_row_untouched() {
        let fx = setup().await;
        let repo = fx.db.sellers();
        let bob = repo
            .find_by_department(&fx.computers)
            .await
            .unwrap()
            .remove(0);
        let id = bob.id.unwrap();

        let mut blank_name = bob.clone();
        blank_name.name = "  ".to_string();
        let mut blank_email = bob.clone();
        blank_email.email = String::new();
        let mut negative_salary = bob.clone();
        negative_salary.base_salary = -10.0;

        for seller in [blank_name, blank_email, negative_salary] {
            let err = repo.update(id, &seller).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "{}", seller);
        }
        assert!(repo.update(0, &bob).await.unwrap_err().is_validation());
        assert!(repo.update(-7, &bob).await.unwrap_err().is_validation());

        let stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Bob Brown");
        assert_eq!(stored.email, bob.email);
        assert_eq!(stored.base_salary, 1000.0);
    }

    #[tokio::test]
    async fn test_insert_with_unknown_department_is_integrity_error() {
        let fx = setup().await;
        let repo = fx.db.sellers();

        let phantom = Arc::new(Department::new(Some(777), "Phantom"));
        let mut seller = Seller::new(None, "Lost", "lost@gmail.com", date(1999, 9, 9), 1500.0, phantom);

        let err = repo.insert(&mut seller).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Integrity);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_update_moves_seller_to_other_department() {
        let fx = setup().await;
        let repo = fx.db.sellers();

        let bob = repo
            .find_by_department(&fx.computers)
            .await
            .unwrap()
            .into_iter()
            .next()
            .unwrap();
        let id = bob.id.unwrap();

        let mut changed = bob.clone();
        changed.name = "Martha Waine".to_string();
        changed.base_salary = 4500.5;
        changed.department = fx.electronics.clone();
        repo.update(id, &changed).await.unwrap();

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.name, "Martha Waine");
        assert_eq!(found.base_salary, 4500.5);
        assert_eq!(*found.department, *fx.electronics);
        assert!(repo.find_by_department(&fx.computers).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_seller_is_integrity_error() {
        let fx = setup().await;
        let ghost = Seller::new(None, "Ghost", "ghost@gmail.com", date(1970, 1, 1), 10.0, fx.computers.clone());

        let err = fx.db.sellers().update(555, &ghost).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Integrity);
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let fx = setup().await;
        let repo = fx.db.sellers();
        let target = repo.find_all().await.unwrap().remove(0);
        let id = target.id.unwrap();

        repo.delete_by_id(id).await.unwrap();

        assert!(repo.find_by_id(id).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 2);
        assert!(repo.delete_by_id(id).await.unwrap_err().is_integrity());
        assert!(repo.delete_by_id(-1).await.unwrap_err().is_validation());
    }
}
