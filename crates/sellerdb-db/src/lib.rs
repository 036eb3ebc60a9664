//! # sellerdb-db: Database Layer for sellerdb
//!
//! Data access for departments and sellers over one SQLite connection,
//! using sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        sellerdb Data Flow                               │
//! │                                                                         │
//! │  Caller (demo binary, tests, ...)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   sellerdb-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │    Schema    │  │   │
//! │  │   │(connection.rs)│    │                │    │  (schema.rs) │  │   │
//! │  │   │               │    │ DepartmentRepo │    │              │  │   │
//! │  │   │ one shared    │◄───│ SellerRepo     │    │ department   │  │   │
//! │  │   │ connection    │    │                │    │ seller       │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (file or :memory:)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`connection`] - Configuration, connection provider, repository factory
//! - [`schema`] - Table creation
//! - `transaction` - Commit / rollback handling for writes
//! - [`error`] - Database error types
//! - [`repository`] - Department and seller repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sellerdb_core::Department;
//! use sellerdb_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("sellers.db")).await?;
//!
//! let mut books = Department::new(None, "Books");
//! db.departments().insert(&mut books).await?;
//!
//! for seller in db.sellers().find_by_department(&books).await? {
//!     println!("{}", seller);
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod connection;
pub mod error;
pub mod repository;
pub mod schema;
pub(crate) mod transaction;

// =============================================================================
// Re-exports
// =============================================================================

pub use connection::{Database, DbConfig, SharedConnection};
pub use error::{DbError, DbResult, ErrorKind};

// Repository re-exports for convenience
pub use repository::department::DepartmentRepository;
pub use repository::seller::SellerRepository;
