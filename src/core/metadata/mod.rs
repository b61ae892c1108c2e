//! core::metadata
//!
//! Metadata operations over a property-set store.
//!
//! # Operations
//!
//! - [`export`] - store to [`MetadataDocument`](crate::core::document::MetadataDocument)
//! - [`import`] - document to store, with a final commit
//! - [`is_metadata_present`] / [`delete_all`] - presence check and removal
//!
//! Every operation works on a store handle owned by the caller and never
//! opens or closes one itself. All of them stop at the first failure.
//!
//! # Example
//!
//! ```
//! use filemeta::core::metadata::{export, import};
//! use filemeta::core::types::{FormatId, PropertyKey};
//! use filemeta::core::variant::PropValue;
//! use filemeta::store::{MemoryStore, PropertyStoreReader, PropertyStoreWriter};
//!
//! let mut source = MemoryStore::new();
//! let key = PropertyKey::new(FormatId::from_u128(0x1234), 3);
//! source.set_value(&key, PropValue::string("Hello").unwrap()).unwrap();
//!
//! let doc = export(&source).unwrap();
//!
//! let mut target = MemoryStore::new();
//! import(&doc, &mut target).unwrap();
//! assert_eq!(target.get_value(&key).unwrap(), source.get_value(&key).unwrap());
//! ```

mod export;
mod import;
mod presence;

pub use export::export;
pub use import::import;
pub use presence::{delete_all, is_metadata_present};
