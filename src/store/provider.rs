//! store::provider
//!
//! Opening stores for target files.
//!
//! Callers never construct a backend directly: they ask a [`StoreProvider`]
//! for a handle. [`provider`] returns the process-wide default, resolved on
//! first use and shared afterwards.

use std::path::Path;
use std::sync::OnceLock;

use super::sidecar::SidecarStore;
use super::traits::{PropertyStoreWriter, StoreError};

/// How a store is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    /// Shared, read-only access.
    Read,
    /// Exclusive access with writes.
    ReadWrite,
}

/// Opens the store attached to a target file.
pub trait StoreProvider: Send + Sync {
    /// Open the store for `target`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the target is missing, is not a file, or
    /// is already opened for writing elsewhere.
    fn open(&self, target: &Path, mode: StoreMode)
        -> Result<Box<dyn PropertyStoreWriter>, StoreError>;

    /// Short name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Provider backed by [`SidecarStore`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SidecarProvider;

impl StoreProvider for SidecarProvider {
    fn open(
        &self,
        target: &Path,
        mode: StoreMode,
    ) -> Result<Box<dyn PropertyStoreWriter>, StoreError> {
        Ok(Box::new(SidecarStore::open(target, mode)?))
    }

    fn name(&self) -> &'static str {
        "sidecar"
    }
}

static DEFAULT_PROVIDER: OnceLock<SidecarProvider> = OnceLock::new();

/// The process-wide default provider.
pub fn provider() -> &'static dyn StoreProvider {
    DEFAULT_PROVIDER.get_or_init(SidecarProvider::default)
}
