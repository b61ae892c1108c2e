//! store::memory
//!
//! In-memory property store.
//!
//! Used as the local half of tests and as a scratch store. Supports a
//! read-only mode and failure injection so callers can exercise every error
//! path of the metadata operations without touching the file system.

use std::collections::HashSet;

use super::sets::PropertySets;
use super::traits::{PropertyStoreReader, PropertyStoreWriter, StoreError};
use crate::core::types::{FormatId, PropertyKey};
use crate::core::variant::PropValue;

/// Property store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sets: PropertySets,
    read_only: bool,
    writes: usize,
    commits: usize,
    faults: Faults,
}

#[derive(Debug, Clone, Default)]
struct Faults {
    enumerate: bool,
    get: HashSet<PropertyKey>,
    set: HashSet<PropertyKey>,
    delete: HashSet<FormatId>,
    commit: bool,
}

impl MemoryStore {
    /// Create an empty, writable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every write from now on.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Make `count` and `key_at` fail.
    pub fn fail_enumerate(mut self) -> Self {
        self.faults.enumerate = true;
        self
    }

    /// Make reading `key` fail.
    pub fn fail_get(mut self, key: PropertyKey) -> Self {
        self.faults.get.insert(key);
        self
    }

    /// Make writing `key` fail.
    pub fn fail_set(mut self, key: PropertyKey) -> Self {
        self.faults.set.insert(key);
        self
    }

    /// Make deleting the set `fmtid` fail.
    pub fn fail_delete(mut self, fmtid: FormatId) -> Self {
        self.faults.delete.insert(fmtid);
        self
    }

    /// Make `commit` fail.
    pub fn fail_commit(mut self) -> Self {
        self.faults.commit = true;
        self
    }

    /// Number of successful `set_value` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Number of successful `commit` calls.
    pub fn commits(&self) -> usize {
        self.commits
    }

    pub fn sets(&self) -> &PropertySets {
        &self.sets
    }

    fn injected(what: &str) -> StoreError {
        StoreError::Rejected(format!("injected {what} failure"))
    }
}

impl PropertyStoreReader for MemoryStore {
    fn count(&self) -> Result<usize, StoreError> {
        if self.faults.enumerate {
            return Err(Self::injected("enumerate"));
        }
        Ok(self.sets.len())
    }

    fn key_at(&self, index: usize) -> Result<PropertyKey, StoreError> {
        if self.faults.enumerate {
            return Err(Self::injected("enumerate"));
        }
        self.sets
            .key_at(index)
            .ok_or_else(|| StoreError::IndexOutOfRange {
                index,
                count: self.sets.len(),
            })
    }

    fn get_value(&self, key: &PropertyKey) -> Result<PropValue, StoreError> {
        if self.faults.get.contains(key) {
            return Err(Self::injected("read"));
        }
        Ok(self.sets.get(key).cloned().unwrap_or_else(PropValue::empty))
    }

    fn format_ids(&self) -> Result<Vec<FormatId>, StoreError> {
        if self.faults.enumerate {
            return Err(Self::injected("enumerate"));
        }
        Ok(self.sets.format_ids())
    }
}

impl PropertyStoreWriter for MemoryStore {
    fn set_value(&mut self, key: &PropertyKey, value: PropValue) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        if self.faults.set.contains(key) {
            return Err(Self::injected("write"));
        }
        self.sets.set(key, value);
        self.writes += 1;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        if self.faults.commit {
            return Err(Self::injected("commit"));
        }
        self.commits += 1;
        Ok(())
    }

    fn delete_format_id(&mut self, fmtid: &FormatId) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        if self.faults.delete.contains(fmtid) {
            return Err(Self::injected("delete"));
        }
        self.sets.remove_set(fmtid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::variant::Scalar;

    fn key(pid: u32) -> PropertyKey {
        PropertyKey::new(FormatId::from_u128(1), pid)
    }

    #[test]
    fn missing_key_reads_as_empty() {
        let store = MemoryStore::new();
        assert!(store.get_value(&key(1)).unwrap().is_empty());
    }

    #[test]
    fn key_at_past_end_fails() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.key_at(0),
            Err(StoreError::IndexOutOfRange { index: 0, count: 0 })
        ));
    }

    #[test]
    fn read_only_rejects_writes() {
        let mut store = MemoryStore::new().read_only();
        let result = store.set_value(&key(1), PropValue::Single(Scalar::I4(1)));
        assert!(matches!(result, Err(StoreError::ReadOnly)));
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn injected_faults_fire() {
        let mut store = MemoryStore::new()
            .fail_set(key(2))
            .fail_commit()
            .fail_get(key(3));
        store
            .set_value(&key(1), PropValue::Single(Scalar::I4(1)))
            .unwrap();
        assert!(store
            .set_value(&key(2), PropValue::Single(Scalar::I4(1)))
            .is_err());
        assert!(store.get_value(&key(3)).is_err());
        assert!(store.commit().is_err());
        assert_eq!(store.writes(), 1);
        assert_eq!(store.commits(), 0);
    }

    #[test]
    fn boxed_store_forwards() {
        let mut store: Box<dyn PropertyStoreWriter> = Box::new(MemoryStore::new());
        store
            .set_value(&key(5), PropValue::string("x").unwrap())
            .unwrap();
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.format_ids().unwrap(), vec![FormatId::from_u128(1)]);
    }
}
