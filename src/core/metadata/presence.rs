//! core::metadata::presence
//!
//! Checking for and removing a store's metadata.

use crate::core::error::MetaError;
use crate::store::{PropertyStoreReader, PropertyStoreWriter};

/// True if the store holds at least one property.
///
/// A store that cannot be opened never reaches this function: callers see
/// that as their own open error, distinct from `Ok(false)`.
pub fn is_metadata_present<S: PropertyStoreReader + ?Sized>(store: &S) -> Result<bool, MetaError> {
    Ok(store.count().map_err(MetaError::Enumerate)? > 0)
}

/// Remove every property set from the store. Returns the number of sets
/// removed.
///
/// # Errors
///
/// Returns `MetaError::PropertyDelete` naming the first set that could not
/// be removed; later sets are left in place.
pub fn delete_all<S: PropertyStoreWriter + ?Sized>(store: &mut S) -> Result<usize, MetaError> {
    let format_ids = store.format_ids().map_err(MetaError::Enumerate)?;
    for format_id in &format_ids {
        store
            .delete_format_id(format_id)
            .map_err(|source| MetaError::PropertyDelete {
                format_id: *format_id,
                source,
            })?;
    }
    Ok(format_ids.len())
}
