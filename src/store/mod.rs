//! store
//!
//! Property-set store capability and its backends.
//!
//! # Architecture
//!
//! Metadata operations read and write property sets through the
//! [`PropertyStoreReader`] / [`PropertyStoreWriter`] traits, which have
//! several implementations:
//!
//! - [`SidecarStore`]: persisted in `<dir>/.filemeta/<name>.json` (default)
//! - [`MemoryStore`]: in memory, with failure injection for tests
//! - [`FileSystemStore`]: read-only view of file-system properties
//! - [`ChainedStore`]: a local store layered over a secondary one
//!
//! # Provider Selection
//!
//! Use [`provider`] to open the store attached to a file:
//!
//! ```no_run
//! use filemeta::store::{provider, PropertyStoreReader, StoreMode};
//! use std::path::Path;
//!
//! let store = provider().open(Path::new("report.txt"), StoreMode::Read)?;
//! println!("{} properties", store.count()?);
//! # Ok::<(), filemeta::store::StoreError>(())
//! ```

mod chained;
mod filesystem;
pub mod lock;
mod memory;
mod provider;
pub mod sets;
mod sidecar;
mod traits;

pub use chained::ChainedStore;
pub use filesystem::FileSystemStore;
pub use memory::MemoryStore;
pub use provider::{provider, SidecarProvider, StoreMode, StoreProvider};
pub use sidecar::SidecarStore;
pub use traits::{PropertyStoreReader, PropertyStoreWriter, StoreError};
