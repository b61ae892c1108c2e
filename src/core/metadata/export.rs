//! core::metadata::export
//!
//! Build a [`MetadataDocument`] from a store.
//!
//! # Algorithm
//!
//! 1. Enumerate every key (count, then fetch each by index)
//! 2. Sort by [`PropertyKey`] so each format id forms one contiguous run,
//!    dropping keys reported twice by a chained store
//! 3. Start a new group whenever the format id changes
//! 4. Read each value and render it: vectors through the store's display
//!    formatter, scalars by coercion to a string
//!
//! Sorting stands in for per-set enumeration, which the store capability
//! does not offer. Any read or render failure aborts the export.

use crate::core::document::{MetadataDocument, PropertyEntry, PropertySetGroup};
use crate::core::error::MetaError;
use crate::core::schema;
use crate::core::types::{FormatId, PropertyKey};
use crate::core::variant::{PropValue, VariantError};
use crate::core::vartype::VarType;
use crate::store::PropertyStoreReader;

/// Export every property in `store`.
///
/// # Errors
///
/// - `MetaError::Enumerate` if the keys cannot be listed
/// - `MetaError::PropertyRead` if a value cannot be read
/// - `MetaError::ValueFormat` if a value cannot be rendered as text
pub fn export<S: PropertyStoreReader + ?Sized>(store: &S) -> Result<MetadataDocument, MetaError> {
    let count = store.count().map_err(MetaError::Enumerate)?;
    let mut keys = (0..count)
        .map(|index| store.key_at(index))
        .collect::<Result<Vec<_>, _>>()
        .map_err(MetaError::Enumerate)?;
    keys.sort();
    keys.dedup();

    let mut doc = MetadataDocument::default();
    let mut current: Option<FormatId> = None;
    for key in keys {
        if current != Some(key.fmtid) {
            current = Some(key.fmtid);
            doc.groups.push(PropertySetGroup {
                format_id: Some(key.fmtid.to_string()),
                description: schema::describe_format_id(&key.fmtid).map(str::to_string),
                entries: Vec::new(),
            });
        }

        let entry = export_entry(store, &key)?;
        if let Some(group) = doc.groups.last_mut() {
            group.entries.push(entry);
        }
    }

    Ok(doc)
}

fn export_entry<S: PropertyStoreReader + ?Sized>(
    store: &S,
    key: &PropertyKey,
) -> Result<PropertyEntry, MetaError> {
    let value = store
        .get_value(key)
        .map_err(|source| MetaError::PropertyRead { key: *key, source })?;
    let vt = value.vt();

    let text = render(store, key, &value, vt)
        .map_err(|source| MetaError::ValueFormat { key: *key, source })?;

    Ok(PropertyEntry {
        name: store.name_for_key(key),
        // Signed, so ids at 0x8000_0000 and above read back as the same 32 bits
        id: Some((key.pid as i32).to_string()),
        type_label: Some(vt.label()),
        type_id: Some(vt.0.to_string()),
        value: Some(text),
    })
}

fn render<S: PropertyStoreReader + ?Sized>(
    store: &S,
    key: &PropertyKey,
    value: &PropValue,
    vt: VarType,
) -> Result<String, VariantError> {
    if vt.is_vector() {
        return store.format_for_display(key, value);
    }
    match store.coerce(value, VarType::LPWSTR)? {
        PropValue::Single(scalar) => scalar.to_text(),
        other => store.format_for_display(key, &other),
    }
}
