//! Storage adapter trait definition.
//!
//! This module defines the `StorageAdapter` trait that every backend
//! implements, plus the institution registry helpers built on top of it.

use optima_core::types::{FinancialInstitution, Operation};
use serde::Serialize;

use crate::error::{StorageError, StorageResult};
use crate::seed::default_institutions;

/// Core storage adapter trait.
///
/// Institutions are stored as one list, the way a profile editor saves
/// them. Operations are an append-at-front log read newest first.
///
/// # Example
///
/// ```rust
/// use optima_storage::{InMemoryStorage, StorageAdapter};
///
/// let storage = InMemoryStorage::new();
///
/// // Nothing saved yet: the sample institution is served
/// let institutions = storage.load_institutions().unwrap();
/// assert_eq!(institutions[0].name, "Banco Exemplo S.A.");
/// ```
pub trait StorageAdapter: Send + Sync {
    /// Returns the backend name for logging.
    fn backend_name(&self) -> &'static str;

    /// Checks if the storage is healthy and accessible.
    fn is_healthy(&self) -> bool;

    // =========================================================================
    // INSTITUTIONS
    // =========================================================================

    /// Returns the saved institution list, or `None` if no list was ever saved.
    fn load_saved_institutions(&self) -> StorageResult<Option<Vec<FinancialInstitution>>>;

    /// Replaces the whole institution list.
    fn save_institutions(&self, institutions: &[FinancialInstitution]) -> StorageResult<()>;

    /// Returns the institution list, seeded with the sample profile when
    /// nothing was ever saved.
    ///
    /// An explicitly saved empty list stays empty.
    fn load_institutions(&self) -> StorageResult<Vec<FinancialInstitution>> {
        Ok(self
            .load_saved_institutions()?
            .unwrap_or_else(default_institutions))
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Returns all saved operations, newest first.
    fn load_operations(&self) -> StorageResult<Vec<Operation>>;

    /// Saves an operation at the front of the history.
    ///
    /// An operation with an id already present replaces the old record.
    fn save_operation(&self, operation: &Operation) -> StorageResult<()>;

    /// Deletes an operation by id. Returns true if something was removed.
    fn delete_operation(&self, id: &str) -> StorageResult<bool>;

    /// Retrieves one operation by id.
    fn get_operation(&self, id: &str) -> StorageResult<Option<Operation>> {
        Ok(self.load_operations()?.into_iter().find(|op| op.id == id))
    }

    // =========================================================================
    // REGISTRY HELPERS
    // =========================================================================

    /// Finds an institution by id, then by case-insensitive name.
    fn find_institution(&self, key: &str) -> StorageResult<Option<FinancialInstitution>> {
        let institutions = self.load_institutions()?;
        if let Some(found) = institutions.iter().find(|i| i.id == key) {
            return Ok(Some(found.clone()));
        }
        let wanted = key.trim().to_lowercase();
        Ok(institutions
            .into_iter()
            .find(|i| i.name.trim().to_lowercase() == wanted))
    }

    /// Validates and stores a profile.
    ///
    /// A profile with an empty id gets a fresh one and is appended; otherwise
    /// the profile with the same id is replaced, or the profile is appended.
    /// Returns the stored profile.
    fn upsert_institution(
        &self,
        mut institution: FinancialInstitution,
    ) -> StorageResult<FinancialInstitution> {
        institution.validate()?;
        if institution.id.trim().is_empty() {
            institution.id = uuid::Uuid::new_v4().to_string();
        }

        let mut institutions = self.load_institutions()?;
        match institutions.iter_mut().find(|i| i.id == institution.id) {
            Some(existing) => *existing = institution.clone(),
            None => institutions.push(institution.clone()),
        }
        self.save_institutions(&institutions)?;
        Ok(institution)
    }

    /// Removes an institution by id.
    ///
    /// Saved operations keep their snapshotted institution name.
    fn delete_institution(&self, id: &str) -> StorageResult<bool> {
        let mut institutions = self.load_institutions()?;
        let before = institutions.len();
        institutions.retain(|i| i.id != id);
        if institutions.len() == before {
            return Ok(false);
        }
        self.save_institutions(&institutions)?;
        Ok(true)
    }

    /// Like [`find_institution`](Self::find_institution) but fails when
    /// nothing matches.
    fn require_institution(&self, key: &str) -> StorageResult<FinancialInstitution> {
        self.find_institution(key)?
            .ok_or_else(|| StorageError::not_found("Institution", key))
    }

    // =========================================================================
    // MAINTENANCE
    // =========================================================================

    /// Returns storage statistics.
    fn stats(&self) -> StorageResult<StorageStats>;
}

/// Storage statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    /// Number of institutions stored (zero while only the seed is served).
    pub institution_count: usize,
    /// Number of operations stored.
    pub operation_count: usize,
    /// Database file size in bytes (if applicable).
    pub file_size_bytes: Option<u64>,
}
