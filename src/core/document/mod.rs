//! core::document
//!
//! The metadata document: the exchange format between a store and a file.
//!
//! # Structure
//!
//! A [`MetadataDocument`] is an ordered list of [`PropertySetGroup`]s, one
//! per format id, each holding ordered [`PropertyEntry`]s. Every field is
//! kept in its string form and is optional at this level: the importer
//! decides which ones are required, so a document parsed from a file can
//! describe exactly what it is missing.
//!
//! Only `FormatID`, `Id`, `TypeId` and the value are authoritative. Names,
//! type labels and descriptions are for people reading the file.
//!
//! # Submodules
//!
//! - [`xml`] - XML serialization
//! - [`encoding`] - UTF-16LE file encoding with legacy ASCII input

pub mod encoding;
pub mod xml;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::error::MetaError;

/// An exported or to-be-imported set of properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataDocument {
    pub groups: Vec<PropertySetGroup>,
}

/// All entries of one property set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySetGroup {
    /// Braced GUID of the set.
    pub format_id: Option<String>,
    /// Well-known name of the set, informational only.
    pub description: Option<String>,
    pub entries: Vec<PropertyEntry>,
}

/// One property in string form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyEntry {
    pub name: Option<String>,
    /// Property id, decimal.
    pub id: Option<String>,
    /// Symbolic type label, informational only.
    pub type_label: Option<String>,
    /// Type code, decimal.
    pub type_id: Option<String>,
    pub value: Option<String>,
}

impl MetadataDocument {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of entries across all groups.
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }
}

impl PropertyEntry {
    /// How error messages refer to this entry: by name, else by id.
    pub fn label(&self) -> String {
        match (&self.name, &self.id) {
            (Some(name), _) => name.clone(),
            (None, Some(id)) => format!("with Id {id}"),
            (None, None) => "without Name or Id".to_string(),
        }
    }
}

/// Read and parse a document file.
///
/// # Errors
///
/// - `MetaError::FileNotFound` if `path` does not exist
/// - `MetaError::Io` for other read failures
/// - `MetaError::DocumentFormat` for undecodable or malformed content
pub fn read_file(path: &Path) -> Result<MetadataDocument, MetaError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => MetaError::FileNotFound(path.to_path_buf()),
        _ => MetaError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    let text = encoding::decode(&bytes)?;
    xml::from_xml(&text)
}

/// Serialize a document and write it as UTF-16LE with a byte-order mark.
pub fn write_file(path: &Path, doc: &MetadataDocument) -> Result<(), MetaError> {
    let text = xml::to_xml(doc)?;
    fs::write(path, encoding::encode_utf16le(&text)).map_err(|e| MetaError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> MetadataDocument {
        MetadataDocument {
            groups: vec![PropertySetGroup {
                format_id: Some("{F29F85E0-4FF9-1068-AB91-08002B27B3D9}".into()),
                description: Some("SummaryInformation".into()),
                entries: vec![PropertyEntry {
                    name: Some("System.Title".into()),
                    id: Some("2".into()),
                    type_label: Some("VT_LPWSTR".into()),
                    type_id: Some("31".into()),
                    value: Some("Größe & <Maß>".into()),
                }],
            }],
        }
    }

    #[test]
    fn file_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.metadata.xml");

        write_file(&path, &sample()).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xFE]);

        assert_eq!(read_file(&path).unwrap(), sample());
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let result = read_file(&temp.path().join("absent.xml"));
        assert!(matches!(result, Err(MetaError::FileNotFound(_))));
    }

    #[test]
    fn reads_legacy_ascii_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("legacy.xml");
        fs::write(
            &path,
            "<Metadata>\r\n\t<Storage FormatID=\"{F29F85E0-4FF9-1068-AB91-08002B27B3D9}\">\r\n\
             \t\t<Property Id=\"2\" TypeId=\"31\">\r\n\t\t\t<Value>Old</Value>\r\n\
             \t\t</Property>\r\n\t</Storage>\r\n</Metadata>\r\n",
        )
        .unwrap();

        let doc = read_file(&path).unwrap();
        assert_eq!(doc.entry_count(), 1);
        assert_eq!(doc.groups[0].entries[0].value.as_deref(), Some("Old"));
    }

    #[test]
    fn entry_label_prefers_name() {
        let mut entry = PropertyEntry {
            id: Some("7".into()),
            ..Default::default()
        };
        assert_eq!(entry.label(), "with Id 7");
        entry.name = Some("System.Author".into());
        assert_eq!(entry.label(), "System.Author");
    }
}
