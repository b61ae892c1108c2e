//! Export/import behaviour through the library API.
//!
//! These tests drive the core operations against in-memory and sidecar
//! stores without going through the binary.

use filemeta::core::document::{xml, MetadataDocument, PropertyEntry, PropertySetGroup};
use filemeta::core::error::MetaError;
use filemeta::core::metadata;
use filemeta::core::schema::{FMTID_DOC_SUMMARY_INFORMATION, FMTID_SUMMARY_INFORMATION};
use filemeta::core::types::{FormatId, PropertyKey};
use filemeta::core::variant::{PropValue, Scalar};
use filemeta::core::vartype::VarType;
use filemeta::store::{MemoryStore, PropertyStoreWriter, SidecarStore, StoreMode};
use tempfile::TempDir;

const SUMMARY: &str = "{F29F85E0-4FF9-1068-AB91-08002B27B3D9}";

fn entry(id: Option<&str>, type_id: &str, value: &str) -> PropertyEntry {
    PropertyEntry {
        id: id.map(str::to_string),
        type_id: Some(type_id.to_string()),
        value: Some(value.to_string()),
        ..Default::default()
    }
}

fn scenario() -> MetadataDocument {
    MetadataDocument {
        groups: vec![PropertySetGroup {
            format_id: Some(SUMMARY.to_string()),
            description: None,
            entries: vec![entry(Some("3"), "31", "Hello"), entry(Some("7"), "3", "42")],
        }],
    }
}

#[test]
fn scenario_imports_typed_values() {
    let mut store = MemoryStore::new();
    let written = metadata::import(&scenario(), &mut store).unwrap();

    assert_eq!(written, 2);
    assert_eq!(store.commits(), 1);
    assert_eq!(
        store
            .sets()
            .get(&PropertyKey::new(FMTID_SUMMARY_INFORMATION, 3)),
        Some(&PropValue::Single(Scalar::LpWStr("Hello".to_string())))
    );
    assert_eq!(
        store
            .sets()
            .get(&PropertyKey::new(FMTID_SUMMARY_INFORMATION, 7)),
        Some(&PropValue::Single(Scalar::I4(42)))
    );
}

#[test]
fn scenario_exports_with_labels_and_names() {
    let mut store = MemoryStore::new();
    metadata::import(&scenario(), &mut store).unwrap();

    let doc = metadata::export(&store).unwrap();
    assert_eq!(doc.groups.len(), 1);
    let group = &doc.groups[0];
    assert_eq!(group.format_id.as_deref(), Some(SUMMARY));
    assert_eq!(group.description.as_deref(), Some("SummaryInformation"));

    let subject = &group.entries[0];
    assert_eq!(subject.name.as_deref(), Some("System.Subject"));
    assert_eq!(subject.id.as_deref(), Some("3"));
    assert_eq!(subject.type_label.as_deref(), Some("VT_LPWSTR"));
    assert_eq!(subject.type_id.as_deref(), Some("31"));
    assert_eq!(subject.value.as_deref(), Some("Hello"));

    let number = &group.entries[1];
    assert_eq!(number.id.as_deref(), Some("7"));
    assert_eq!(number.type_label.as_deref(), Some("VT_I4"));
    assert_eq!(number.value.as_deref(), Some("42"));
}

#[test]
fn import_stops_at_first_bad_entry() {
    let mut doc = scenario();
    doc.groups[0].entries.insert(1, entry(None, "31", "orphan"));

    let mut store = MemoryStore::new();
    let err = metadata::import(&doc, &mut store).unwrap_err();

    assert!(matches!(err, MetaError::DocumentFormat(_)));
    assert!(err.to_string().contains("has no Id attribute"));
    assert_eq!(err.status_code(), 1465);
    assert_eq!(store.writes(), 1);
    assert_eq!(store.commits(), 0);
}

#[test]
fn import_reports_values_that_do_not_fit_their_type() {
    let doc = MetadataDocument {
        groups: vec![PropertySetGroup {
            format_id: Some(SUMMARY.to_string()),
            description: None,
            entries: vec![entry(Some("7"), "3", "forty-two")],
        }],
    };

    let err = metadata::import(&doc, &mut MemoryStore::new()).unwrap_err();
    assert!(matches!(err, MetaError::ValueCoerce { .. }));
    assert_eq!(err.status_code(), 1);
}

#[test]
fn import_requires_a_format_id() {
    let mut doc = scenario();
    doc.groups[0].format_id = None;
    let err = metadata::import(&doc, &mut MemoryStore::new()).unwrap_err();
    assert!(matches!(err, MetaError::DocumentFormat(_)));

    doc.groups[0].format_id = Some("not-a-guid".to_string());
    let err = metadata::import(&doc, &mut MemoryStore::new()).unwrap_err();
    assert!(matches!(err, MetaError::DocumentFormat(_)));
}

#[test]
fn empty_store_exports_empty_document() {
    let doc = metadata::export(&MemoryStore::new()).unwrap();
    assert!(doc.is_empty());
    assert_eq!(xml::to_xml(&doc).unwrap(), "<Metadata/>\n");
}

#[test]
fn export_groups_by_format_id_in_key_order() {
    let mut store = MemoryStore::new();
    let values = [
        (FMTID_SUMMARY_INFORMATION, 4),
        (FMTID_DOC_SUMMARY_INFORMATION, 2),
        (FMTID_SUMMARY_INFORMATION, 2),
        (FMTID_DOC_SUMMARY_INFORMATION, 5),
    ];
    for (fmtid, pid) in values {
        store
            .set_value(&PropertyKey::new(fmtid, pid), PropValue::string("x").unwrap())
            .unwrap();
    }

    let doc = metadata::export(&store).unwrap();
    assert_eq!(doc.groups.len(), 2);
    assert_eq!(doc.entry_count(), 4);

    let ids: Vec<FormatId> = doc
        .groups
        .iter()
        .map(|g| FormatId::parse(g.format_id.as_deref().unwrap()).unwrap())
        .collect();
    assert!(ids[0] < ids[1]);

    for group in &doc.groups {
        let pids: Vec<u32> = group
            .entries
            .iter()
            .map(|e| e.id.as_deref().unwrap().parse().unwrap())
            .collect();
        assert_eq!(pids.len(), 2);
        assert_eq!(pids[0], 2);
        assert!(pids[0] < pids[1]);
    }
}

#[test]
fn vectors_survive_export_and_import() {
    let key = PropertyKey::new(FMTID_SUMMARY_INFORMATION, 5);
    let mut source = MemoryStore::new();
    source
        .set_value(&key, PropValue::string_vector(["alpha", "beta gamma"]).unwrap())
        .unwrap();

    let doc = metadata::export(&source).unwrap();
    let exported = &doc.groups[0].entries[0];
    assert_eq!(exported.type_label.as_deref(), Some("VT_LPWSTR | VT_VECTOR"));
    assert_eq!(
        exported.type_id.as_deref(),
        Some(VarType::LPWSTR.vector_of().0.to_string().as_str())
    );
    assert_eq!(exported.value.as_deref(), Some("alpha; beta gamma"));

    let mut target = MemoryStore::new();
    metadata::import(&doc, &mut target).unwrap();
    assert_eq!(target.sets().get(&key), source.sets().get(&key));
}

#[test]
fn xml_text_round_trips_through_a_store() {
    let text = xml::to_xml(&scenario()).unwrap();
    let parsed = xml::from_xml(&text).unwrap();

    let mut store = MemoryStore::new();
    metadata::import(&parsed, &mut store).unwrap();
    let exported = metadata::export(&store).unwrap();

    let again = xml::from_xml(&xml::to_xml(&exported).unwrap()).unwrap();
    assert_eq!(again, exported);
}

#[test]
fn sidecar_store_persists_between_handles() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("report.txt");
    std::fs::write(&target, "contents").unwrap();

    {
        let mut store = SidecarStore::open(&target, StoreMode::ReadWrite).unwrap();
        metadata::import(&scenario(), &mut store).unwrap();
    }

    let store = SidecarStore::open(&target, StoreMode::Read).unwrap();
    assert!(metadata::is_metadata_present(&store).unwrap());
    let doc = metadata::export(&store).unwrap();
    assert_eq!(doc.entry_count(), 2);
    assert_eq!(doc.groups[0].entries[0].value.as_deref(), Some("Hello"));
}

#[test]
fn delete_all_clears_every_set() {
    let mut store = MemoryStore::new();
    metadata::import(&scenario(), &mut store).unwrap();
    store
        .set_value(
            &PropertyKey::new(FMTID_DOC_SUMMARY_INFORMATION, 2),
            PropValue::string("Reports").unwrap(),
        )
        .unwrap();

    let removed = metadata::delete_all(&mut store).unwrap();
    assert_eq!(removed, 2);
    assert!(!metadata::is_metadata_present(&store).unwrap());
}

#[test]
fn high_property_ids_survive_export_and_import() {
    let locale = PropertyKey::new(FMTID_SUMMARY_INFORMATION, 0x8000_0000);
    let behavior = PropertyKey::new(FMTID_SUMMARY_INFORMATION, 0x8000_0003);
    let mut source = MemoryStore::new();
    source
        .set_value(&locale, PropValue::string("en-US").unwrap())
        .unwrap();
    source
        .set_value(&behavior, PropValue::Single(Scalar::Ui4(1)))
        .unwrap();

    let doc = metadata::export(&source).unwrap();
    let parsed = xml::from_xml(&xml::to_xml(&doc).unwrap()).unwrap();
    let mut target = MemoryStore::new();
    metadata::import(&parsed, &mut target).unwrap();

    assert_eq!(target.sets().keys().count(), 2);
    assert_eq!(target.sets().get(&locale), source.sets().get(&locale));
    assert_eq!(target.sets().get(&behavior), source.sets().get(&behavior));
}

#[test]
fn non_finite_floats_are_refused_and_sidecar_stays_readable() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("report.txt");
    std::fs::write(&target, "contents").unwrap();

    {
        let mut store = SidecarStore::open(&target, StoreMode::ReadWrite).unwrap();
        metadata::import(&scenario(), &mut store).unwrap();
    }

    for (type_id, text) in [("5", "NaN"), ("5", "inf"), ("4", "-inf"), ("4", "1e39")] {
        let doc = MetadataDocument {
            groups: vec![PropertySetGroup {
                format_id: Some(SUMMARY.to_string()),
                description: None,
                entries: vec![entry(Some("2"), "31", "Title"), entry(Some("40"), type_id, text)],
            }],
        };
        let mut store = SidecarStore::open(&target, StoreMode::ReadWrite).unwrap();
        let err = metadata::import(&doc, &mut store).unwrap_err();
        assert!(matches!(err, MetaError::ValueCoerce { .. }), "{text}");
    }

    let store = SidecarStore::open(&target, StoreMode::Read).unwrap();
    let doc = metadata::export(&store).unwrap();
    assert_eq!(doc.entry_count(), 2);
}
