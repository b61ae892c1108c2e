//! store::traits
//!
//! Property-set store capability.
//!
//! # Design
//!
//! A store is a flat, enumerable collection of typed values addressed by
//! [`PropertyKey`]. The metadata operations only ever talk to a store
//! through these traits, and never open or close one themselves.
//!
//! - [`PropertyStoreReader`] - count, enumerate and read
//! - [`PropertyStoreWriter`] - set, commit and drop whole property sets
//!
//! Reading a key the store does not hold is not an error: it yields the
//! empty value. Setting the empty value removes the property.
//!
//! The conversion hooks (`format_for_display`, `coerce`, `name_for_key`)
//! have default implementations backed by [`crate::core::variant`] and
//! [`crate::core::schema`]; a store overrides them only when it has its
//! own rules.
//!
//! # Example
//!
//! ```
//! use filemeta::core::types::{FormatId, PropertyKey};
//! use filemeta::core::variant::PropValue;
//! use filemeta::store::{MemoryStore, PropertyStoreReader, PropertyStoreWriter};
//!
//! let mut store = MemoryStore::new();
//! let key = PropertyKey::new(FormatId::from_u128(1), 2);
//! store.set_value(&key, PropValue::string("hello").unwrap()).unwrap();
//! store.commit().unwrap();
//!
//! assert_eq!(store.count().unwrap(), 1);
//! assert_eq!(store.key_at(0).unwrap(), key);
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::core::schema;
use crate::core::types::{FormatId, PropertyKey};
use crate::core::variant::{self, PropValue, VariantError};
use crate::core::vartype::VarType;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The target file does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The target exists but is not a regular file.
    #[error("not a file: {}", .0.display())]
    NotAFile(PathBuf),

    /// Another process holds the store open for writing.
    #[error("store is locked by another process")]
    Locked,

    /// The store was opened for reading only.
    #[error("store is read-only")]
    ReadOnly,

    /// Enumeration index past the end of the store.
    #[error("index {index} is out of range (count {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// The store refused a value.
    #[error("value rejected: {0}")]
    Rejected(String),

    /// The operation is not available on this store.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Persisted store data could not be parsed.
    #[error("corrupt store '{}': {message}", path.display())]
    Corrupt { path: PathBuf, message: String },

    #[error("store i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read side of a property-set store.
pub trait PropertyStoreReader {
    /// Number of properties in the store.
    fn count(&self) -> Result<usize, StoreError>;

    /// The key at `index` in the store's native enumeration order.
    fn key_at(&self, index: usize) -> Result<PropertyKey, StoreError>;

    /// The value stored under `key`, or the empty value if there is none.
    fn get_value(&self, key: &PropertyKey) -> Result<PropValue, StoreError>;

    /// Every property set present, in enumeration order.
    fn format_ids(&self) -> Result<Vec<FormatId>, StoreError>;

    /// Render `value` for display. Vectors join their elements with `"; "`.
    fn format_for_display(
        &self,
        _key: &PropertyKey,
        value: &PropValue,
    ) -> Result<String, VariantError> {
        variant::format_for_display(value)
    }

    /// Convert `value` to the type code `target`.
    fn coerce(&self, value: &PropValue, target: VarType) -> Result<PropValue, VariantError> {
        value.coerce(target)
    }

    /// Human-readable name for `key`, if one is known.
    fn name_for_key(&self, key: &PropertyKey) -> Option<String> {
        schema::canonical_name(key).map(str::to_string)
    }
}

/// Write side of a property-set store.
///
/// Writes may be cached until [`commit`](PropertyStoreWriter::commit).
pub trait PropertyStoreWriter: PropertyStoreReader {
    /// Store `value` under `key`, replacing any previous value.
    fn set_value(&mut self, key: &PropertyKey, value: PropValue) -> Result<(), StoreError>;

    /// Persist every cached write.
    fn commit(&mut self) -> Result<(), StoreError>;

    /// Remove a whole property set.
    fn delete_format_id(&mut self, fmtid: &FormatId) -> Result<(), StoreError>;
}

impl<T: PropertyStoreReader + ?Sized> PropertyStoreReader for Box<T> {
    fn count(&self) -> Result<usize, StoreError> {
        (**self).count()
    }

    fn key_at(&self, index: usize) -> Result<PropertyKey, StoreError> {
        (**self).key_at(index)
    }

    fn get_value(&self, key: &PropertyKey) -> Result<PropValue, StoreError> {
        (**self).get_value(key)
    }

    fn format_ids(&self) -> Result<Vec<FormatId>, StoreError> {
        (**self).format_ids()
    }

    fn format_for_display(
        &self,
        key: &PropertyKey,
        value: &PropValue,
    ) -> Result<String, VariantError> {
        (**self).format_for_display(key, value)
    }

    fn coerce(&self, value: &PropValue, target: VarType) -> Result<PropValue, VariantError> {
        (**self).coerce(value, target)
    }

    fn name_for_key(&self, key: &PropertyKey) -> Option<String> {
        (**self).name_for_key(key)
    }
}

impl<T: PropertyStoreWriter + ?Sized> PropertyStoreWriter for Box<T> {
    fn set_value(&mut self, key: &PropertyKey, value: PropValue) -> Result<(), StoreError> {
        (**self).set_value(key, value)
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        (**self).commit()
    }

    fn delete_format_id(&mut self, fmtid: &FormatId) -> Result<(), StoreError> {
        (**self).delete_format_id(fmtid)
    }
}
