//! # Domain Types
//!
//! The two entities persisted by sellerdb.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────────┐                    │
//! │  │   Department    │◄───────│       Seller        │                    │
//! │  │  ─────────────  │ shared │  ─────────────────  │                    │
//! │  │  id (Option)    │  Arc   │  id (Option)        │                    │
//! │  │  name           │        │  name, email        │                    │
//! │  └─────────────────┘        │  birth_date         │                    │
//! │                             │  base_salary        │                    │
//! │                             │  department         │                    │
//! │                             └─────────────────────┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is `None` until the row is inserted; the store's generated key is
//! written back by the repository. Equality and hashing use `id` only.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Department
// =============================================================================

/// A department sellers belong to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Department {
    /// Generated key, `None` until persisted.
    pub id: Option<i64>,

    /// Display name.
    pub name: String,
}

impl Department {
    /// Creates a department.
    ///
    /// ## Example
    /// ```rust
    /// use sellerdb_core::Department;
    ///
    /// let music = Department::new(None, "Music");
    /// assert!(music.id.is_none());
    /// ```
    pub fn new(id: Option<i64>, name: impl Into<String>) -> Self {
        Department {
            id,
            name: name.into(),
        }
    }

    /// Returns true once the department carries a generated id.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl PartialEq for Department {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Department {}

impl Hash for Department {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Department [id={}, name={}]", DisplayId(self.id), self.name)
    }
}

// =============================================================================
// Seller
// =============================================================================

/// A seller employed by a department.
///
/// The department is shared: sellers loaded by one query that belong to
/// the same department point at the same `Arc<Department>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seller {
    /// Generated key, `None` until persisted.
    pub id: Option<i64>,

    pub name: String,

    pub email: String,

    pub birth_date: NaiveDate,

    /// Monthly base salary. Must be > 0 to be persisted.
    pub base_salary: f64,

    pub department: Arc<Department>,
}

impl Seller {
    /// Creates a seller.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::Arc;
    /// use chrono::NaiveDate;
    /// use sellerdb_core::{Department, Seller};
    ///
    /// let books = Arc::new(Department::new(Some(3), "Books"));
    /// let greg = Seller::new(
    ///     None,
    ///     "Greg",
    ///     "greg@gmail.com",
    ///     NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
    ///     4000.0,
    ///     books,
    /// );
    /// assert_eq!(greg.department.id, Some(3));
    /// ```
    pub fn new(
        id: Option<i64>,
        name: impl Into<String>,
        email: impl Into<String>,
        birth_date: NaiveDate,
        base_salary: f64,
        department: Arc<Department>,
    ) -> Self {
        Seller {
            id,
            name: name.into(),
            email: email.into(),
            birth_date,
            base_salary,
            department,
        }
    }
}

impl PartialEq for Seller {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Seller {}

impl Hash for Seller {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Seller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Seller [id={}, name={}, email={}, birthDate={}, baseSalary={:.2}, department={}]",
            DisplayId(self.id),
            self.name,
            self.email,
            self.birth_date,
            self.base_salary,
            self.department
        )
    }
}

/// Renders an optional id as the number or `null`.
struct DisplayId(Option<i64>);

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{}", id),
            None => f.write_str("null"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn birth_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(1985, 11, 3).unwrap()
    }

    #[test]
    fn test_department_equality_uses_id() {
        let a = Department::new(Some(1), "Computers");
        let b = Department::new(Some(1), "Renamed");
        let c = Department::new(Some(2), "Computers");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_department_hash_matches_equality() {
        let mut set = HashSet::new();
        set.insert(Department::new(Some(4), "Books"));
        set.insert(Department::new(Some(4), "Books (copy)"));

        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_department_display() {
        let dep = Department::new(Some(2), "Electronics");
        assert_eq!(dep.to_string(), "Department [id=2, name=Electronics]");

        let transient = Department::new(None, "Music");
        assert_eq!(transient.to_string(), "Department [id=null, name=Music]");
        assert!(!transient.is_persisted());
    }

    #[test]
    fn test_seller_display() {
        let dep = Arc::new(Department::new(Some(1), "Computers"));
        let seller = Seller::new(Some(7), "Bob", "bob@gmail.com", birth_date(), 3000.0, dep);

        assert_eq!(
            seller.to_string(),
            "Seller [id=7, name=Bob, email=bob@gmail.com, birthDate=1985-11-03, \
             baseSalary=3000.00, department=Department [id=1, name=Computers]]"
        );
    }

    #[test]
    fn test_seller_serializes_department_inline() {
        let dep = Arc::new(Department::new(Some(1), "Computers"));
        let seller = Seller::new(Some(7), "Bob", "bob@gmail.com", birth_date(), 3000.0, dep);

        let json = serde_json::to_value(&seller).unwrap();
        assert_eq!(json["department"]["name"], "Computers");
        assert_eq!(json["birth_date"], "1985-11-03");
    }
}
