//! # Repository Module
//!
//! Repository implementations for sellerdb.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Caller                                                                │
//! │       │  db.sellers().find_by_department(&dep)                          │
//! │       ▼                                                                 │
//! │  SellerRepository / DepartmentRepository                               │
//! │  ├── insert(&self, &mut entity)                                        │
//! │  ├── update(&self, id, &entity)                                        │
//! │  ├── delete_by_id(&self, id)                                           │
//! │  ├── find_by_id(&self, id)                                             │
//! │  └── find_all(&self)                                                   │
//! │       │  Parameterized SQL on the shared connection                    │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`DepartmentRepository`](department::DepartmentRepository) - `department` table
//! - [`SellerRepository`](seller::SellerRepository) - `seller` joined with `department`

pub mod department;
pub mod seller;
