//! Optima Storage Layer
//!
//! Persistence for institution fee profiles and saved operations. The
//! calculation engine never touches storage; callers load a profile, run the
//! engine, and hand the resulting operation back here.
//!
//! # Features
//!
//! - **Institution registry**: list load/save, upsert with validation,
//!   lookup by id or name, and a sample profile served until the first save
//! - **Operation history**: newest-first log with lookup and deletion
//! - **Multiple Backends**: redb (default) and in-memory adapters
//!
//! # Example
//!
//! ```rust,ignore
//! use optima_storage::{RedbStorage, StorageAdapter};
//!
//! let storage = RedbStorage::open("./optima.redb")?;
//! let institution = storage.require_institution("Banco Exemplo S.A.")?;
//! let history = storage.load_operations()?;
//! ```
//!
//! # Storage Backends
//!
//! ## RedbStorage (Default)
//!
//! Uses [redb](https://crates.io/crates/redb), a pure-Rust embedded database
//! with ACID transactions.
//!
//! ## InMemoryStorage
//!
//! Fast, non-persistent storage for testing.

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod adapter;
mod error;
mod memory;
mod redb;
mod seed;

pub use adapter::{StorageAdapter, StorageStats};
pub use error::{StorageError, StorageResult};
pub use memory::InMemoryStorage;
pub use crate::redb::RedbStorage;
pub use seed::{default_institution, default_institutions, DEFAULT_INSTITUTION_ID};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::adapter::{StorageAdapter, StorageStats};
    pub use crate::error::{StorageError, StorageResult};
    pub use crate::memory::InMemoryStorage;
    pub use crate::redb::RedbStorage;
}
