//! In-memory storage adapter for testing and ephemeral sessions.

use std::sync::RwLock;

use optima_core::types::{FinancialInstitution, Operation};

use crate::adapter::{StorageAdapter, StorageStats};
use crate::error::{StorageError, StorageResult};

/// In-memory storage adapter.
///
/// Data lives only as long as the value. Useful for tests and for the CLI's
/// `memory` backend.
#[derive(Default)]
pub struct InMemoryStorage {
    institutions: RwLock<Option<Vec<FinancialInstitution>>>,
    operations: RwLock<Vec<Operation>>,
}

impl InMemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all data, including the "ever saved" marker for institutions.
    pub fn clear(&self) {
        if let Ok(mut institutions) = self.institutions.write() {
            *institutions = None;
        }
        if let Ok(mut operations) = self.operations.write() {
            operations.clear();
        }
    }
}

impl StorageAdapter for InMemoryStorage {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn is_healthy(&self) -> bool {
        self.institutions.read().is_ok() && self.operations.read().is_ok()
    }

    fn load_saved_institutions(&self) -> StorageResult<Option<Vec<FinancialInstitution>>> {
        Ok(self.institutions.read().map_err(StorageError::lock)?.clone())
    }

    fn save_institutions(&self, institutions: &[FinancialInstitution]) -> StorageResult<()> {
        *self.institutions.write().map_err(StorageError::lock)? = Some(institutions.to_vec());
        Ok(())
    }

    fn load_operations(&self) -> StorageResult<Vec<Operation>> {
        Ok(self.operations.read().map_err(StorageError::lock)?.clone())
    }

    fn save_operation(&self, operation: &Operation) -> StorageResult<()> {
        let mut operations = self.operations.write().map_err(StorageError::lock)?;
        operations.retain(|op| op.id != operation.id);
        operations.insert(0, operation.clone());
        log::info!(
            "saved operation {} for '{}' (net {})",
            operation.id,
            operation.institution_name,
            operation.net_total
        );
        Ok(())
    }

    fn delete_operation(&self, id: &str) -> StorageResult<bool> {
        let mut operations = self.operations.write().map_err(StorageError::lock)?;
        let before = operations.len();
        operations.retain(|op| op.id != id);
        let removed = operations.len() != before;
        if removed {
            log::info!("deleted operation {id}");
        }
        Ok(removed)
    }

    fn stats(&self) -> StorageResult<StorageStats> {
        let institution_count = self
            .institutions
            .read()
            .map_err(StorageError::lock)?
            .as_ref()
            .map_or(0, Vec::len);
        let operation_count = self.operations.read().map_err(StorageError::lock)?.len();

        Ok(StorageStats {
            institution_count,
            operation_count,
            file_size_bytes: None,
        })
    }
}
