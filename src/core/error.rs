//! core::error
//!
//! Error taxonomy for metadata operations.
//!
//! Every failure aborts the current export, import or delete and carries
//! enough context (key, format id, entry or node) to report a readable
//! message. [`MetaError::status_code`] gives the machine-usable side: a
//! Win32-compatible status, used by the CLI as its exit code.

use std::path::PathBuf;

use thiserror::Error;

use super::types::{FormatId, PropertyKey};
use super::variant::VariantError;
use crate::store::StoreError;

pub const ERROR_INVALID_FUNCTION: i32 = 1;
pub const ERROR_FILE_NOT_FOUND: i32 = 2;
pub const ERROR_WRITE_FAULT: i32 = 29;
pub const ERROR_INVALID_PARAMETER: i32 = 87;
pub const ERROR_OPEN_FAILED: i32 = 110;
pub const ERROR_XML_PARSE_ERROR: i32 = 1465;
pub const ERROR_UNKNOWN_PROPERTY: i32 = 1608;

/// Errors from metadata operations.
#[derive(Debug, Error)]
pub enum MetaError {
    #[error("cannot open metadata store for '{}': {source}", path.display())]
    StoreOpen { path: PathBuf, source: StoreError },

    #[error("invalid metadata document: {0}")]
    DocumentFormat(String),

    #[error("cannot enumerate properties: {0}")]
    Enumerate(StoreError),

    #[error("cannot read property {key}: {source}")]
    PropertyRead { key: PropertyKey, source: StoreError },

    #[error("cannot write property {entry}: {source}")]
    PropertyWrite { entry: String, source: StoreError },

    #[error("cannot delete property set {format_id}: {source}")]
    PropertyDelete {
        format_id: FormatId,
        source: StoreError,
    },

    #[error("cannot format value of property {key}: {source}")]
    ValueFormat {
        key: PropertyKey,
        source: VariantError,
    },

    #[error("cannot initialise value of property {entry}: {source}")]
    ValueInit {
        entry: String,
        source: VariantError,
    },

    #[error("cannot convert value of property {entry}: {source}")]
    ValueCoerce {
        entry: String,
        source: VariantError,
    },

    #[error("cannot commit metadata: {0}")]
    Commit(StoreError),

    #[error("cannot find file \"{}\"", .0.display())]
    FileNotFound(PathBuf),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl MetaError {
    /// Win32-compatible status code for this error.
    pub fn status_code(&self) -> i32 {
        match self {
            MetaError::StoreOpen { .. } | MetaError::Enumerate(_) | MetaError::Commit(_) => {
                ERROR_OPEN_FAILED
            }
            MetaError::DocumentFormat(_) => ERROR_XML_PARSE_ERROR,
            MetaError::PropertyRead { .. }
            | MetaError::PropertyWrite { .. }
            | MetaError::PropertyDelete { .. } => ERROR_UNKNOWN_PROPERTY,
            MetaError::ValueFormat { .. }
            | MetaError::ValueInit { .. }
            | MetaError::ValueCoerce { .. } => ERROR_INVALID_FUNCTION,
            MetaError::FileNotFound(_) => ERROR_FILE_NOT_FOUND,
            MetaError::InvalidArgument(_) => ERROR_INVALID_PARAMETER,
            MetaError::Io { .. } => ERROR_WRITE_FAULT,
        }
    }
}
