//! core::schema
//!
//! Well-known property sets and canonical property names.
//!
//! Names are documentation only: the exporter writes them into the `Name`
//! attribute so a document is readable, and the importer ignores them.

use super::types::{FormatId, PropertyKey};

/// `SummaryInformation` property set.
pub const FMTID_SUMMARY_INFORMATION: FormatId =
    FormatId::from_u128(0xF29F85E0_4FF9_1068_AB91_08002B27B3D9);

/// `DocumentSummaryInformation` property set.
pub const FMTID_DOC_SUMMARY_INFORMATION: FormatId =
    FormatId::from_u128(0xD5CDD502_2E9C_101B_9397_08002B2CF9AE);

/// User-defined properties, stored as the second section of the
/// `DocumentSummaryInformation` stream.
pub const FMTID_USER_DEFINED_PROPERTIES: FormatId =
    FormatId::from_u128(0xD5CDD505_2E9C_101B_9397_08002B2CF9AE);

/// Basic file-system properties reported by the shell.
pub const FMTID_STORAGE: FormatId = FormatId::from_u128(0xB725F130_47EF_101A_A5F1_02608C9EEBAC);

/// Software properties.
pub const FMTID_SOFTWARE: FormatId = FormatId::from_u128(0x0CEF7D53_FA64_11D1_A203_0000F81FEDEE);

pub const PKEY_ITEM_NAME_DISPLAY: PropertyKey = PropertyKey::new(FMTID_STORAGE, 10);
pub const PKEY_SIZE: PropertyKey = PropertyKey::new(FMTID_STORAGE, 12);
pub const PKEY_FILE_ATTRIBUTES: PropertyKey = PropertyKey::new(FMTID_STORAGE, 13);
pub const PKEY_DATE_MODIFIED: PropertyKey = PropertyKey::new(FMTID_STORAGE, 14);
pub const PKEY_DATE_CREATED: PropertyKey = PropertyKey::new(FMTID_STORAGE, 15);
pub const PKEY_DATE_ACCESSED: PropertyKey = PropertyKey::new(FMTID_STORAGE, 16);

/// Reports which handler produced a file's properties.
pub const PKEY_SOFTWARE_PRODUCT_NAME: PropertyKey = PropertyKey::new(FMTID_SOFTWARE, 7);

/// Value reported for [`PKEY_SOFTWARE_PRODUCT_NAME`] on files we handle.
pub const PRODUCT_NAME: &str = "FileMetadata";

/// Human-readable description of a property set, for the three sets that
/// have one.
pub fn describe_format_id(fmtid: &FormatId) -> Option<&'static str> {
    match *fmtid {
        FMTID_SUMMARY_INFORMATION => Some("SummaryInformation"),
        FMTID_DOC_SUMMARY_INFORMATION => Some("DocumentSummaryInformation"),
        FMTID_USER_DEFINED_PROPERTIES => Some("UserDefined"),
        _ => None,
    }
}

/// Canonical name of a property, if it is a well-known one.
pub fn canonical_name(key: &PropertyKey) -> Option<&'static str> {
    let name = match (key.fmtid, key.pid) {
        (FMTID_SUMMARY_INFORMATION, pid) => match pid {
            2 => "System.Title",
            3 => "System.Subject",
            4 => "System.Author",
            5 => "System.Keywords",
            6 => "System.Comment",
            7 => "System.Document.Template",
            8 => "System.Document.LastAuthor",
            9 => "System.Document.RevisionNumber",
            10 => "System.Document.TotalEditingTime",
            11 => "System.Document.DatePrinted",
            12 => "System.Document.DateCreated",
            13 => "System.Document.DateSaved",
            14 => "System.Document.PageCount",
            15 => "System.Document.WordCount",
            16 => "System.Document.CharacterCount",
            18 => "System.ApplicationName",
            19 => "System.Document.Security",
            _ => return None,
        },
        (FMTID_DOC_SUMMARY_INFORMATION, pid) => match pid {
            2 => "System.Category",
            3 => "System.Document.PresentationFormat",
            4 => "System.Document.ByteCount",
            5 => "System.Document.LineCount",
            6 => "System.Document.ParagraphCount",
            7 => "System.Document.SlideCount",
            8 => "System.Document.NoteCount",
            9 => "System.Document.HiddenSlideCount",
            10 => "System.Document.MultimediaClipCount",
            14 => "System.Document.Manager",
            15 => "System.Company",
            26 => "System.ContentType",
            27 => "System.ContentStatus",
            28 => "System.Language",
            29 => "System.Document.Version",
            _ => return None,
        },
        (FMTID_STORAGE, pid) => match pid {
            10 => "System.ItemNameDisplay",
            12 => "System.Size",
            13 => "System.FileAttributes",
            14 => "System.DateModified",
            15 => "System.DateCreated",
            16 => "System.DateAccessed",
            _ => return None,
        },
        (FMTID_SOFTWARE, 7) => "System.Software.ProductName",
        _ => return None,
    };
    Some(name)
}
