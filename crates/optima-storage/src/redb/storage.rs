//! RedbStorage implementation.
//!
//! Implements the StorageAdapter trait using redb as the underlying database.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use optima_core::types::{FinancialInstitution, Operation};
use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};

use crate::adapter::{StorageAdapter, StorageStats};
use crate::error::StorageResult;

// Table definitions
const COLLECTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("collections");
const OPERATIONS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("operations");
const OPERATION_INDEX_TABLE: TableDefinition<&str, u64> = TableDefinition::new("operation_index");

const INSTITUTIONS_KEY: &str = "institutions";

/// Redb-based storage adapter.
///
/// Institutions are kept as a single JSON list. Operations are keyed by an
/// increasing sequence number so that reverse iteration yields newest first;
/// a secondary table maps operation ids to their sequence.
///
/// # Example
///
/// ```rust,ignore
/// use optima_storage::{RedbStorage, StorageAdapter};
///
/// let storage = RedbStorage::open("./optima.redb")?;
/// assert!(storage.is_healthy());
/// ```
pub struct RedbStorage {
    db: Arc<Database>,
    path: PathBuf,
}

impl RedbStorage {
    /// Opens or creates a database at the given path.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Database::create(&path)?;
        let storage = Self {
            db: Arc::new(db),
            path,
        };
        storage.initialize_tables()?;
        log::debug!("opened redb storage at {}", storage.path.display());
        Ok(storage)
    }

    /// Path of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Initializes all required tables.
    fn initialize_tables(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;
            let _ = write_txn.open_table(OPERATIONS_TABLE)?;
            let _ = write_txn.open_table(OPERATION_INDEX_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl StorageAdapter for RedbStorage {
    fn backend_name(&self) -> &'static str {
        "redb"
    }

    fn is_healthy(&self) -> bool {
        self.db.begin_read().is_ok()
    }

    fn load_saved_institutions(&self) -> StorageResult<Option<Vec<FinancialInstitution>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COLLECTIONS_TABLE)?;

        match table.get(INSTITUTIONS_KEY)? {
            Some(data) => Ok(Some(serde_json::from_slice(data.value())?)),
            None => Ok(None),
        }
    }

    fn save_institutions(&self, institutions: &[FinancialInstitution]) -> StorageResult<()> {
        let data = serde_json::to_vec(institutions)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(COLLECTIONS_TABLE)?;
            table.insert(INSTITUTIONS_KEY, data.as_slice())?;
        }
        write_txn.commit()?;

        log::info!("saved {} institution profiles", institutions.len());
        Ok(())
    }

    fn load_operations(&self) -> StorageResult<Vec<Operation>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(OPERATIONS_TABLE)?;

        let mut operations = Vec::with_capacity(table.len()? as usize);
        for entry in table.iter()?.rev() {
            let (_, data) = entry?;
            operations.push(serde_json::from_slice(data.value())?);
        }
        Ok(operations)
    }

    fn save_operation(&self, operation: &Operation) -> StorageResult<()> {
        let data = serde_json::to_vec(operation)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(OPERATIONS_TABLE)?;
            let mut index = write_txn.open_table(OPERATION_INDEX_TABLE)?;

            let previous = index.get(operation.id.as_str())?.map(|seq| seq.value());
            if let Some(seq) = previous {
                table.remove(seq)?;
            }

            let next = table.last()?.map_or(0, |(seq, _)| seq.value() + 1);
            table.insert(next, data.as_slice())?;
            index.insert(operation.id.as_str(), next)?;
        }
        write_txn.commit()?;

        log::info!(
            "saved operation {} for '{}' (net {})",
            operation.id,
            operation.institution_name,
            operation.net_total
        );
        Ok(())
    }

    fn delete_operation(&self, id: &str) -> StorageResult<bool> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(OPERATIONS_TABLE)?;
            let mut index = write_txn.open_table(OPERATION_INDEX_TABLE)?;

            let seq = index.remove(id)?.map(|seq| seq.value());
            match seq {
                Some(seq) => {
                    table.remove(seq)?;
                    true
                }
                None => false,
            }
        };
        write_txn.commit()?;

        if removed {
            log::info!("deleted operation {id}");
        }
        Ok(removed)
    }

    fn get_operation(&self, id: &str) -> StorageResult<Option<Operation>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(OPERATION_INDEX_TABLE)?;
        let Some(seq) = index.get(id)?.map(|seq| seq.value()) else {
            return Ok(None);
        };

        let table = read_txn.open_table(OPERATIONS_TABLE)?;
        match table.get(seq)? {
            Some(data) => Ok(Some(serde_json::from_slice(data.value())?)),
            None => Ok(None),
        }
    }

    fn stats(&self) -> StorageResult<StorageStats> {
        let institution_count = self.load_saved_institutions()?.map_or(0, |list| list.len());

        let read_txn = self.db.begin_read()?;
        let operation_count = {
            let table = read_txn.open_table(OPERATIONS_TABLE)?;
            table.len()? as usize
        };

        Ok(StorageStats {
            institution_count,
            operation_count,
            file_size_bytes: std::fs::metadata(&self.path).ok().map(|m| m.len()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use optima_core::types::OperationDetails;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn create_test_storage() -> (RedbStorage, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let storage = RedbStorage::open(dir.path().join("test.redb")).unwrap();
        (storage, dir)
    }

    fn operation(id: &str) -> Operation {
        Operation {
            id: id.to_string(),
            date: Utc::now(),
            reference_date: None,
            institution_name: "Banco Um".to_string(),
            gross_total: dec!(1000),
            net_total: dec!(950),
            discount_total: dec!(50),
            titles_count: 1,
            details: OperationDetails::default(),
        }
    }

    #[test]
    fn test_backend_name_and_health() {
        let (storage, _dir) = create_test_storage();
        assert_eq!(storage.backend_name(), "redb");
        assert!(storage.is_healthy());
    }

    #[test]
    fn test_institutions_seed_then_saved() {
        let (storage, _dir) = create_test_storage();
        assert!(storage.load_saved_institutions().unwrap().is_none());
        assert_eq!(storage.load_institutions().unwrap()[0].id, "default-1");

        let inst = FinancialInstitution::new("b1", "Banco Um");
        storage.save_institutions(&[inst.clone()]).unwrap();
        assert_eq!(storage.load_institutions().unwrap(), vec![inst]);
    }

    #[test]
    fn test_operations_order_and_replace() {
        let (storage, _dir) = create_test_storage();
        storage.save_operation(&operation("a")).unwrap();
        storage.save_operation(&operation("b")).unwrap();
        storage.save_operation(&operation("a")).unwrap();

        let ids: Vec<String> = storage
            .load_operations()
            .unwrap()
            .into_iter()
            .map(|op| op.id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_get_and_delete_operation() {
        let (storage, _dir) = create_test_storage();
        storage.save_operation(&operation("a")).unwrap();

        assert_eq!(storage.get_operation("a").unwrap().unwrap().id, "a");
        assert!(storage.delete_operation("a").unwrap());
        assert!(!storage.delete_operation("a").unwrap());
        assert!(storage.get_operation("a").unwrap().is_none());
        assert!(storage.load_operations().unwrap().is_empty());
    }

    #[test]
    fn test_stats() {
        let (storage, _dir) = create_test_storage();
        storage.save_operation(&operation("a")).unwrap();

        let stats = storage.stats().unwrap();
        assert_eq!(stats.operation_count, 1);
        assert_eq!(stats.institution_count, 0);
        assert!(stats.file_size_bytes.unwrap_or(0) > 0);
    }
}
