//! store::filesystem
//!
//! Read-only store exposing the basic properties the file system reports
//! for a file: display name, size, attributes and timestamps.
//!
//! Chained under a sidecar store, this gives the full "shell" view of a
//! file used by `--explorer` exports. Values are captured when the store is
//! opened. Timestamps the platform cannot report are left out.

use std::fs::{self, Metadata};
use std::io::ErrorKind;
use std::path::Path;

use super::traits::{PropertyStoreReader, StoreError};
use crate::core::schema::{
    PKEY_DATE_ACCESSED, PKEY_DATE_CREATED, PKEY_DATE_MODIFIED, PKEY_FILE_ATTRIBUTES,
    PKEY_ITEM_NAME_DISPLAY, PKEY_SIZE,
};
use crate::core::types::{FormatId, PropertyKey};
use crate::core::variant::{filetime_from_system_time, PropValue, Scalar};

pub const FILE_ATTRIBUTE_READONLY: u32 = 0x01;
pub const FILE_ATTRIBUTE_HIDDEN: u32 = 0x02;
pub const FILE_ATTRIBUTE_ARCHIVE: u32 = 0x20;

/// Snapshot of a file's file-system properties.
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    properties: Vec<(PropertyKey, PropValue)>,
}

impl FileSystemStore {
    /// Capture the properties of `target`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if `target` does not exist
    /// - [`StoreError::NotAFile`] if `target` is not a regular file
    pub fn open(target: &Path) -> Result<Self, StoreError> {
        let metadata = fs::metadata(target).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound(target.to_path_buf()),
            _ => StoreError::Io(e),
        })?;
        if !metadata.is_file() {
            return Err(StoreError::NotAFile(target.to_path_buf()));
        }

        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut properties = vec![
            (
                PKEY_ITEM_NAME_DISPLAY,
                PropValue::Single(Scalar::LpWStr(name.clone())),
            ),
            (PKEY_SIZE, PropValue::Single(Scalar::Ui8(metadata.len()))),
            (
                PKEY_FILE_ATTRIBUTES,
                PropValue::Single(Scalar::Ui4(file_attributes(&metadata, &name))),
            ),
        ];

        let times = [
            (PKEY_DATE_MODIFIED, metadata.modified()),
            (PKEY_DATE_CREATED, metadata.created()),
            (PKEY_DATE_ACCESSED, metadata.accessed()),
        ];
        for (key, time) in times {
            if let Some(ticks) = time.ok().and_then(filetime_from_system_time) {
                properties.push((key, PropValue::Single(Scalar::FileTime(ticks))));
            }
        }

        Ok(Self { properties })
    }
}

#[cfg(windows)]
fn file_attributes(metadata: &Metadata, _name: &str) -> u32 {
    use std::os::windows::fs::MetadataExt;
    metadata.file_attributes()
}

#[cfg(not(windows))]
fn file_attributes(metadata: &Metadata, name: &str) -> u32 {
    let mut attributes = FILE_ATTRIBUTE_ARCHIVE;
    if metadata.permissions().readonly() {
        attributes |= FILE_ATTRIBUTE_READONLY;
    }
    if name.starts_with('.') {
        attributes |= FILE_ATTRIBUTE_HIDDEN;
    }
    attributes
}

impl PropertyStoreReader for FileSystemStore {
    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.properties.len())
    }

    fn key_at(&self, index: usize) -> Result<PropertyKey, StoreError> {
        self.properties
            .get(index)
            .map(|(key, _)| *key)
            .ok_or(StoreError::IndexOutOfRange {
                index,
                count: self.properties.len(),
            })
    }

    fn get_value(&self, key: &PropertyKey) -> Result<PropValue, StoreError> {
        Ok(self
            .properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .unwrap_or_else(PropValue::empty))
    }

    fn format_ids(&self) -> Result<Vec<FormatId>, StoreError> {
        let mut ids: Vec<FormatId> = Vec::new();
        for (key, _) in &self.properties {
            if !ids.contains(&key.fmtid) {
                ids.push(key.fmtid);
            }
        }
        Ok(ids)
    }
}
