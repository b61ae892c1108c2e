//! core::metadata::import
//!
//! Write a [`MetadataDocument`] into a store.
//!
//! Each entry is validated, rebuilt as a string value (split back into
//! elements for vector types), coerced to its declared type and written.
//! The store is committed once every entry has been written.
//!
//! The first failure aborts the import. Entries already written are left to
//! the store: they are not persisted unless the caller commits later.
//!
//! `Id` and `TypeId` are read leniently: leading whitespace and sign, then
//! leading digits, with trailing text ignored and no digits reading as 0.
//! Names, type labels and descriptions are never read.

use crate::core::document::{MetadataDocument, PropertyEntry, PropertySetGroup};
use crate::core::error::MetaError;
use crate::core::strings::{parse_leading_int, split_vector};
use crate::core::types::{FormatId, PropertyKey};
use crate::core::variant::PropValue;
use crate::core::vartype::VarType;
use crate::store::PropertyStoreWriter;

/// Import `doc` into `store` and commit. Returns the number of values
/// written.
///
/// # Errors
///
/// - `MetaError::DocumentFormat` for a missing or malformed `FormatID`, or
///   an entry without `Id`, `TypeId` or a value
/// - `MetaError::ValueInit` if the value text cannot form a string value
/// - `MetaError::ValueCoerce` if the text does not fit the declared type
/// - `MetaError::PropertyWrite` if the store rejects a value
/// - `MetaError::Commit` if the final commit fails
pub fn import<S: PropertyStoreWriter + ?Sized>(
    doc: &MetadataDocument,
    store: &mut S,
) -> Result<usize, MetaError> {
    let mut written = 0;
    for group in &doc.groups {
        let fmtid = group_format_id(group)?;
        for entry in &group.entries {
            import_entry(fmtid, entry, store)?;
            written += 1;
        }
    }

    store.commit().map_err(MetaError::Commit)?;
    Ok(written)
}

fn group_format_id(group: &PropertySetGroup) -> Result<FormatId, MetaError> {
    let raw = group.format_id.as_deref().ok_or_else(|| {
        MetaError::DocumentFormat("<Storage> element has no FormatID attribute".to_string())
    })?;
    FormatId::parse(raw).map_err(|e| MetaError::DocumentFormat(e.to_string()))
}

fn import_entry<S: PropertyStoreWriter + ?Sized>(
    fmtid: FormatId,
    entry: &PropertyEntry,
    store: &mut S,
) -> Result<(), MetaError> {
    let missing = |what: &str| {
        MetaError::DocumentFormat(format!("property {} has no {}", entry.label(), what))
    };
    let id = entry.id.as_deref().ok_or_else(|| missing("Id attribute"))?;
    let type_id = entry
        .type_id
        .as_deref()
        .ok_or_else(|| missing("TypeId attribute"))?;
    let text = entry.value.as_deref().ok_or_else(|| missing("<Value> element"))?;

    // Negative ids keep their 32-bit pattern
    let key = PropertyKey::new(fmtid, parse_leading_int(id) as u32);
    let vt = VarType(parse_leading_int(type_id) as u16);

    let value = if vt.is_vector() {
        PropValue::string_vector(split_vector(text))
    } else {
        PropValue::string(text)
    }
    .map_err(|source| MetaError::ValueInit {
        entry: entry.label(),
        source,
    })?;

    let value = store
        .coerce(&value, vt)
        .map_err(|source| MetaError::ValueCoerce {
            entry: entry.label(),
            source,
        })?;

    store
        .set_value(&key, value)
        .map_err(|source| MetaError::PropertyWrite {
            entry: entry.label(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::variant::Scalar;
    use crate::store::{MemoryStore, PropertyStoreReader};

    const FMTID: &str = "{F29F85E0-4FF9-1068-AB91-08002B27B3D9}";

    fn entry(id: &str, type_id: &str, value: &str) -> PropertyEntry {
        PropertyEntry {
            name: None,
            id: Some(id.into()),
            type_label: None,
            type_id: Some(type_id.into()),
            value: Some(value.into()),
        }
    }

    fn doc(entries: Vec<PropertyEntry>) -> MetadataDocument {
        MetadataDocument {
            groups: vec![PropertySetGroup {
                format_id: Some(FMTID.into()),
                description: None,
                entries,
            }],
        }
    }

    fn key(pid: u32) -> PropertyKey {
        PropertyKey::new(FormatId::parse(FMTID).unwrap(), pid)
    }

    #[test]
    fn writes_typed_values_and_commits() {
        let mut store = MemoryStore::new();
        let written = import(
            &doc(vec![entry("3", "31", "Hello"), entry("7", "3", "42")]),
            &mut store,
        )
        .unwrap();

        assert_eq!(written, 2);
        assert_eq!(store.commits(), 1);
        assert_eq!(store.get_value(&key(3)).unwrap(), PropValue::string("Hello").unwrap());
        assert_eq!(store.get_value(&key(7)).unwrap(), PropValue::Single(Scalar::I4(42)));
    }

    #[test]
    fn vectors_are_split_with_one_space_stripped() {
        let mut store = MemoryStore::new();
        import(&doc(vec![entry("5", "4127", "a; b;  c")]), &mut store).unwrap();
        assert_eq!(
            store.get_value(&key(5)).unwrap(),
            PropValue::string_vector(["a", "b", " c"]).unwrap()
        );
    }

    #[test]
    fn numeric_vectors_are_coerced_element_wise() {
        let mut store = MemoryStore::new();
        import(&doc(vec![entry("5", "4099", "1; 2; 3")]), &mut store).unwrap();
        assert_eq!(
            store.get_value(&key(5)).unwrap(),
            PropValue::Vector {
                element: VarType::I4,
                items: vec![Scalar::I4(1), Scalar::I4(2), Scalar::I4(3)],
            }
        );
    }

    #[test]
    fn empty_document_still_commits() {
        let mut store = MemoryStore::new();
        let written = import(&MetadataDocument::default(), &mut store).unwrap();
        assert_eq!(written, 0);
        assert_eq!(store.writes(), 0);
        assert_eq!(store.commits(), 1);
    }

    #[test]
    fn missing_id_names_the_entry_and_stops() {
        let mut store = MemoryStore::new();
        let mut broken = entry("4", "31", "x");
        broken.id = None;
        broken.name = Some("System.Author".into());

        let err = import(
            &doc(vec![entry("3", "31", "first"), broken, entry("5", "31", "never")]),
            &mut store,
        )
        .unwrap_err();

        assert!(matches!(err, MetaError::DocumentFormat(_)));
        assert!(err.to_string().contains("System.Author"));
        assert!(err.to_string().contains("Id"));
        assert_eq!(store.writes(), 1);
        assert_eq!(store.commits(), 0);
        assert!(store.get_value(&key(5)).unwrap().is_empty());
    }

    #[test]
    fn missing_type_id_and_value_are_rejected() {
        let mut no_type = entry("3", "31", "x");
        no_type.type_id = None;
        let err = import(&doc(vec![no_type]), &mut MemoryStore::new()).unwrap_err();
        assert!(err.to_string().contains("with Id 3"));
        assert!(err.to_string().contains("TypeId"));

        let mut no_value = entry("3", "31", "x");
        no_value.value = None;
        let err = import(&doc(vec![no_value]), &mut MemoryStore::new()).unwrap_err();
        assert!(err.to_string().contains("Value"));
    }

    #[test]
    fn bad_format_id_is_rejected() {
        let mut bad = doc(vec![entry("3", "31", "x")]);
        bad.groups[0].format_id = Some("not-a-guid".into());
        let err = import(&bad, &mut MemoryStore::new()).unwrap_err();
        assert!(matches!(err, MetaError::DocumentFormat(_)));

        bad.groups[0].format_id = None;
        let err = import(&bad, &mut MemoryStore::new()).unwrap_err();
        assert!(err.to_string().contains("FormatID"));
    }

    #[test]
    fn lenient_ids_keep_leading_digits() {
        let mut store = MemoryStore::new();
        import(&doc(vec![entry("12abc", "3junk", "9")]), &mut store).unwrap();
        assert_eq!(store.get_value(&key(12)).unwrap(), PropValue::Single(Scalar::I4(9)));
    }

    #[test]
    fn malformed_value_fails_coercion() {
        let err = import(&doc(vec![entry("7", "3", "forty-two")]), &mut MemoryStore::new())
            .unwrap_err();
        assert!(matches!(err, MetaError::ValueCoerce { .. }));
    }

    #[test]
    fn embedded_nul_fails_initialisation() {
        let err = import(&doc(vec![entry("7", "31", "a\0b")]), &mut MemoryStore::new())
            .unwrap_err();
        assert!(matches!(err, MetaError::ValueInit { .. }));
    }

    #[test]
    fn store_rejection_and_commit_failure_are_distinct() {
        let mut read_only = MemoryStore::new().read_only();
        let err = import(&doc(vec![entry("3", "31", "x")]), &mut read_only).unwrap_err();
        assert!(matches!(err, MetaError::PropertyWrite { .. }));

        let mut failing = MemoryStore::new().fail_commit();
        let err = import(&doc(vec![entry("3", "31", "x")]), &mut failing).unwrap_err();
        assert!(matches!(err, MetaError::Commit(_)));
    }
}
