//! store::sets
//!
//! Ordered in-memory property sets, shared by the memory and sidecar
//! stores.
//!
//! # Enumeration order
//!
//! Sets enumerate in the order they were first written, and properties
//! within a set in the order they were first written. Replacing a value
//! keeps its position. This is the "native" order the exporter sees before
//! it sorts.
//!
//! # Persisted form
//!
//! [`PropertySetsFile`] is the self-describing JSON envelope written to
//! sidecar files:
//!
//! ```json
//! {
//!   "kind": "filemeta.property-sets",
//!   "schema_version": 1,
//!   "sets": [ { "fmtid": "{...}", "properties": [ { "pid": 2, "value": ... } ] } ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::core::types::{FormatId, PropertyKey};
use crate::core::variant::PropValue;

/// The kind identifier for persisted property sets.
pub const PROPERTY_SETS_KIND: &str = "filemeta.property-sets";

/// Current persisted schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// One stored property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoredProperty {
    pub pid: u32,
    pub value: PropValue,
}

/// One property set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertySet {
    pub fmtid: FormatId,
    pub properties: Vec<StoredProperty>,
}

/// All property sets of one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertySets {
    sets: Vec<PropertySet>,
}

impl PropertySets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of properties across all sets.
    pub fn len(&self) -> usize {
        self.sets.iter().map(|s| s.properties.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// The key at `index` in enumeration order.
    pub fn key_at(&self, index: usize) -> Option<PropertyKey> {
        self.keys().nth(index)
    }

    /// Every key in enumeration order.
    pub fn keys(&self) -> impl Iterator<Item = PropertyKey> + '_ {
        self.sets.iter().flat_map(|set| {
            set.properties
                .iter()
                .map(move |p| PropertyKey::new(set.fmtid, p.pid))
        })
    }

    pub fn get(&self, key: &PropertyKey) -> Option<&PropValue> {
        self.sets
            .iter()
            .find(|s| s.fmtid == key.fmtid)?
            .properties
            .iter()
            .find(|p| p.pid == key.pid)
            .map(|p| &p.value)
    }

    /// Store `value` under `key`. The empty value removes the property, and
    /// a set left with no properties is dropped.
    pub fn set(&mut self, key: &PropertyKey, value: PropValue) {
        if value.is_empty() {
            self.remove(key);
            return;
        }

        let set = match self.sets.iter().position(|s| s.fmtid == key.fmtid) {
            Some(i) => &mut self.sets[i],
            None => {
                self.sets.push(PropertySet {
                    fmtid: key.fmtid,
                    properties: Vec::new(),
                });
                let last = self.sets.len() - 1;
                &mut self.sets[last]
            }
        };

        match set.properties.iter_mut().find(|p| p.pid == key.pid) {
            Some(existing) => existing.value = value,
            None => set.properties.push(StoredProperty {
                pid: key.pid,
                value,
            }),
        }
    }

    /// Remove one property. Returns whether it was present.
    pub fn remove(&mut self, key: &PropertyKey) -> bool {
        let Some(i) = self.sets.iter().position(|s| s.fmtid == key.fmtid) else {
            return false;
        };
        let before = self.sets[i].properties.len();
        self.sets[i].properties.retain(|p| p.pid != key.pid);
        let removed = self.sets[i].properties.len() != before;
        if self.sets[i].properties.is_empty() {
            self.sets.remove(i);
        }
        removed
    }

    /// Remove a whole set. Returns whether it was present.
    pub fn remove_set(&mut self, fmtid: &FormatId) -> bool {
        let before = self.sets.len();
        self.sets.retain(|s| s.fmtid != *fmtid);
        self.sets.len() != before
    }

    pub fn format_ids(&self) -> Vec<FormatId> {
        self.sets.iter().map(|s| s.fmtid).collect()
    }
}

/// Versioned envelope for persisted property sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertySetsFile {
    pub kind: String,
    pub schema_version: u32,
    pub sets: PropertySets,
}

impl PropertySetsFile {
    pub fn new(sets: PropertySets) -> Self {
        Self {
            kind: PROPERTY_SETS_KIND.to_string(),
            schema_version: SCHEMA_VERSION,
            sets,
        }
    }

    /// Parse and validate persisted property sets.
    pub fn parse(json: &str) -> Result<PropertySets, String> {
        let file: PropertySetsFile = serde_json::from_str(json).map_err(|e| e.to_string())?;
        if file.kind != PROPERTY_SETS_KIND {
            return Err(format!(
                "invalid kind '{}', expected '{}'",
                file.kind, PROPERTY_SETS_KIND
            ));
        }
        if file.schema_version != SCHEMA_VERSION {
            return Err(format!(
                "unsupported schema version {}, supported: {}",
                file.schema_version, SCHEMA_VERSION
            ));
        }
        Ok(file.sets)
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::variant::Scalar;

    fn key(set: u128, pid: u32) -> PropertyKey {
        PropertyKey::new(FormatId::from_u128(set), pid)
    }

    fn int(v: i32) -> PropValue {
        PropValue::Single(Scalar::I4(v))
    }

    #[test]
    fn enumerates_in_insertion_order() {
        let mut sets = PropertySets::new();
        sets.set(&key(2, 9), int(1));
        sets.set(&key(1, 4), int(2));
        sets.set(&key(2, 3), int(3));

        let keys: Vec<_> = sets.keys().collect();
        assert_eq!(keys, vec![key(2, 9), key(2, 3), key(1, 4)]);
        assert_eq!(sets.len(), 3);
        assert_eq!(sets.key_at(2), Some(key(1, 4)));
        assert_eq!(sets.key_at(3), None);
    }

    #[test]
    fn replace_keeps_position() {
        let mut sets = PropertySets::new();
        sets.set(&key(1, 1), int(1));
        sets.set(&key(1, 2), int(2));
        sets.set(&key(1, 1), int(10));
        assert_eq!(sets.key_at(0), Some(key(1, 1)));
        assert_eq!(sets.get(&key(1, 1)), Some(&int(10)));
    }

    #[test]
    fn empty_value_removes_and_prunes_set() {
        let mut sets = PropertySets::new();
        sets.set(&key(1, 1), int(1));
        sets.set(&key(1, 1), PropValue::empty());
        assert!(sets.is_empty());
        assert!(sets.format_ids().is_empty());
    }

    #[test]
    fn remove_set_drops_all_properties() {
        let mut sets = PropertySets::new();
        sets.set(&key(1, 1), int(1));
        sets.set(&key(1, 2), int(2));
        sets.set(&key(2, 1), int(3));
        assert!(sets.remove_set(&FormatId::from_u128(1)));
        assert!(!sets.remove_set(&FormatId::from_u128(1)));
        assert_eq!(sets.len(), 1);
    }

    #[test]
    fn file_envelope_round_trips() {
        let mut sets = PropertySets::new();
        sets.set(&key(1, 2), PropValue::string("x").unwrap());
        let json = PropertySetsFile::new(sets.clone()).to_json().unwrap();
        assert!(json.contains(PROPERTY_SETS_KIND));
        assert_eq!(PropertySetsFile::parse(&json).unwrap(), sets);
    }

    #[test]
    fn file_envelope_rejects_wrong_kind_and_version() {
        let wrong_kind = r#"{"kind":"other","schema_version":1,"sets":[]}"#;
        assert!(PropertySetsFile::parse(wrong_kind)
            .unwrap_err()
            .contains("invalid kind"));

        let wrong_version = r#"{"kind":"filemeta.property-sets","schema_version":9,"sets":[]}"#;
        assert!(PropertySetsFile::parse(wrong_version)
            .unwrap_err()
            .contains("unsupported schema version"));
    }
}
