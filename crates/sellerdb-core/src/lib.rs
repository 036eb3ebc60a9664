//! # sellerdb-core: Entities and Validation for sellerdb
//!
//! This crate holds the two persisted entities and the rules checked
//! before either is written. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        sellerdb Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    demo binary (sellerdb-db)                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 sellerdb-db (Repositories)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ sellerdb-core (THIS CRATE) ★                      │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐                 │   │
//! │  │   │   types   │  │ validation │  │   error   │                 │   │
//! │  │   │Department │  │   rules    │  │Validation │                 │   │
//! │  │   │  Seller   │  │   checks   │  │   Error   │                 │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Department and Seller
//! - [`error`] - Validation error type
//! - [`validation`] - Precondition checks

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use types::*;
