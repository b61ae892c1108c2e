//! store::sidecar
//!
//! File-backed property store.
//!
//! # Storage
//!
//! - Property sets for `<dir>/<name>` are kept in `<dir>/.filemeta/<name>.json`
//! - The target's own content is never touched
//! - All writes are atomic (write to temp file, then rename)
//! - A store with no properties left removes its sidecar file
//!
//! # Modes
//!
//! A [`StoreMode::ReadWrite`] handle holds an exclusive [`StoreLock`] for its
//! whole lifetime; a second writer fails with [`StoreError::Locked`].
//! [`StoreMode::Read`] handles take no lock and reject every write.
//!
//! Values written with `set_value` stay cached until `commit`. Dropping a
//! handle without committing discards them. `delete_format_id` is persisted
//! immediately.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use super::lock::{LockError, StoreLock};
use super::provider::StoreMode;
use super::sets::{PropertySets, PropertySetsFile};
use super::traits::{PropertyStoreReader, PropertyStoreWriter, StoreError};
use crate::core::paths::SidecarPaths;
use crate::core::types::{FormatId, PropertyKey};
use crate::core::variant::PropValue;

/// Property store persisted in a JSON sidecar file.
#[derive(Debug)]
pub struct SidecarStore {
    paths: SidecarPaths,
    mode: StoreMode,
    sets: PropertySets,
    dirty: bool,
    lock: Option<StoreLock>,
}

impl SidecarStore {
    /// Open the store attached to `target`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if `target` does not exist
    /// - [`StoreError::NotAFile`] if `target` is not a regular file
    /// - [`StoreError::Locked`] if another writer holds the store
    /// - [`StoreError::Corrupt`] if the sidecar cannot be parsed
    pub fn open(target: &Path, mode: StoreMode) -> Result<Self, StoreError> {
        let metadata = fs::metadata(target).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound(target.to_path_buf()),
            _ => StoreError::Io(e),
        })?;
        if !metadata.is_file() {
            return Err(StoreError::NotAFile(target.to_path_buf()));
        }

        let paths = SidecarPaths::for_target(target);

        let lock = match mode {
            StoreMode::ReadWrite => {
                Some(StoreLock::acquire(&paths.lock_path()).map_err(|e| match e {
                    LockError::AlreadyLocked => StoreError::Locked,
                    other => StoreError::Io(std::io::Error::other(other.to_string())),
                })?)
            }
            StoreMode::Read => None,
        };

        let sets = Self::load(&paths)?;

        Ok(Self {
            paths,
            mode,
            sets,
            dirty: false,
            lock,
        })
    }

    /// True if `set_value` has been called since the last commit.
    pub fn has_pending_writes(&self) -> bool {
        self.dirty
    }

    fn load(paths: &SidecarPaths) -> Result<PropertySets, StoreError> {
        let path = paths.sidecar_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PropertySets::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };

        PropertySetsFile::parse(&content).map_err(|message| StoreError::Corrupt { path, message })
    }

    fn ensure_writable(&self) -> Result<(), StoreError> {
        match self.mode {
            StoreMode::ReadWrite => Ok(()),
            StoreMode::Read => Err(StoreError::ReadOnly),
        }
    }

    /// Write the current sets to disk, or remove the sidecar if empty.
    fn persist(&self) -> Result<(), StoreError> {
        let path = self.paths.sidecar_path();

        if self.sets.is_empty() {
            return match fs::remove_file(&path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(StoreError::Io(e)),
            };
        }

        fs::create_dir_all(self.paths.dir())?;

        let content = PropertySetsFile::new(self.sets.clone())
            .to_json()
            .map_err(StoreError::Rejected)?;

        let temp_path = self.paths.temp_path();
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &path)?;
        Ok(())
    }
}

impl PropertyStoreReader for SidecarStore {
    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.sets.len())
    }

    fn key_at(&self, index: usize) -> Result<PropertyKey, StoreError> {
        self.sets
            .key_at(index)
            .ok_or_else(|| StoreError::IndexOutOfRange {
                index,
                count: self.sets.len(),
            })
    }

    fn get_value(&self, key: &PropertyKey) -> Result<PropValue, StoreError> {
        Ok(self.sets.get(key).cloned().unwrap_or_else(PropValue::empty))
    }

    fn format_ids(&self) -> Result<Vec<FormatId>, StoreError> {
        Ok(self.sets.format_ids())
    }
}

impl PropertyStoreWriter for SidecarStore {
    fn set_value(&mut self, key: &PropertyKey, value: PropValue) -> Result<(), StoreError> {
        self.ensure_writable()?;
        self.sets.set(key, value);
        self.dirty = true;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        self.ensure_writable()?;
        self.persist()?;
        self.dirty = false;
        Ok(())
    }

    fn delete_format_id(&mut self, fmtid: &FormatId) -> Result<(), StoreError> {
        self.ensure_writable()?;
        if self.sets.remove_set(fmtid) {
            self.persist()?;
            self.dirty = false;
        }
        Ok(())
    }
}

impl Drop for SidecarStore {
    fn drop(&mut self) {
        // Release first so the lock file is gone before the directory check
        drop(self.lock.take());
        let _ = fs::remove_dir(self.paths.dir());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::variant::Scalar;
    use tempfile::TempDir;

    fn target(temp: &TempDir) -> std::path::PathBuf {
        let path = temp.path().join("doc.txt");
        fs::write(&path, "content").unwrap();
        path
    }

    fn key(pid: u32) -> PropertyKey {
        PropertyKey::new(FormatId::from_u128(0xABCD), pid)
    }

    #[test]
    fn open_missing_target_fails() {
        let temp = TempDir::new().unwrap();
        let result = SidecarStore::open(&temp.path().join("nope"), StoreMode::Read);
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn open_directory_fails() {
        let temp = TempDir::new().unwrap();
        let result = SidecarStore::open(temp.path(), StoreMode::Read);
        assert!(matches!(result, Err(StoreError::NotAFile(_))));
    }

    #[test]
    fn writes_persist_only_on_commit() {
        let temp = TempDir::new().unwrap();
        let file = target(&temp);

        {
            let mut store = SidecarStore::open(&file, StoreMode::ReadWrite).unwrap();
            store
                .set_value(&key(2), PropValue::string("draft").unwrap())
                .unwrap();
            assert!(store.has_pending_writes());
        }
        let store = SidecarStore::open(&file, StoreMode::Read).unwrap();
        assert_eq!(store.count().unwrap(), 0);
        drop(store);

        {
            let mut store = SidecarStore::open(&file, StoreMode::ReadWrite).unwrap();
            store
                .set_value(&key(2), PropValue::Single(Scalar::I4(42)))
                .unwrap();
            store.commit().unwrap();
        }
        let store = SidecarStore::open(&file, StoreMode::Read).unwrap();
        assert_eq!(
            store.get_value(&key(2)).unwrap(),
            PropValue::Single(Scalar::I4(42))
        );
        assert_eq!(fs::read_to_string(&file).unwrap(), "content");
    }

    #[test]
    fn second_writer_is_locked_out() {
        let temp = TempDir::new().unwrap();
        let file = target(&temp);

        let _first = SidecarStore::open(&file, StoreMode::ReadWrite).unwrap();
        let second = SidecarStore::open(&file, StoreMode::ReadWrite);
        assert!(matches!(second, Err(StoreError::Locked)));

        // Readers are not blocked
        assert!(SidecarStore::open(&file, StoreMode::Read).is_ok());
    }

    #[test]
    fn read_mode_rejects_writes_and_creates_nothing() {
        let temp = TempDir::new().unwrap();
        let file = target(&temp);

        let mut store = SidecarStore::open(&file, StoreMode::Read).unwrap();
        assert!(matches!(
            store.set_value(&key(1), PropValue::string("x").unwrap()),
            Err(StoreError::ReadOnly)
        ));
        assert!(matches!(store.commit(), Err(StoreError::ReadOnly)));
        drop(store);
        assert!(!temp.path().join(".filemeta").exists());
    }

    #[test]
    fn deleting_last_set_removes_sidecar() {
        let temp = TempDir::new().unwrap();
        let file = target(&temp);
        let paths = SidecarPaths::for_target(&file);

        let mut store = SidecarStore::open(&file, StoreMode::ReadWrite).unwrap();
        store
            .set_value(&key(1), PropValue::string("x").unwrap())
            .unwrap();
        store.commit().unwrap();
        assert!(paths.sidecar_path().exists());

        store.delete_format_id(&FormatId::from_u128(0xABCD)).unwrap();
        assert!(!paths.sidecar_path().exists());
        drop(store);
        assert!(!paths.dir().exists());
    }

    #[test]
    fn corrupt_sidecar_is_reported() {
        let temp = TempDir::new().unwrap();
        let file = target(&temp);
        let paths = SidecarPaths::for_target(&file);
        fs::create_dir_all(paths.dir()).unwrap();
        fs::write(paths.sidecar_path(), "{ not json").unwrap();

        let result = SidecarStore::open(&file, StoreMode::Read);
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }
}
