//! Redb-based storage backend.
//!
//! This module provides a persistent storage implementation using redb,
//! a pure-Rust embedded database with ACID transactions.

mod storage;

pub use storage::RedbStorage;
