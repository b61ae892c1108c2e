//! core::types
//!
//! Strong types for property-set identities.
//!
//! # Types
//!
//! - [`FormatId`] - 128-bit identifier of a property set (FMTID)
//! - [`PropertyKey`] - `(format id, property id)` pair naming one property
//!
//! # Ordering
//!
//! Keys order by format id first, then by property id. Format ids compare
//! field by field (`Data1`, `Data2`, `Data3`, `Data4`), most significant
//! first. The exporter relies on this to bring every property of a set into
//! one contiguous run.
//!
//! # Examples
//!
//! ```
//! use filemeta::core::types::{FormatId, PropertyKey};
//!
//! let fmtid = FormatId::parse("{F29F85E0-4FF9-1068-AB91-08002B27B3D9}").unwrap();
//! let title = PropertyKey::new(fmtid, 2);
//! let subject = PropertyKey::new(fmtid, 3);
//! assert!(title < subject);
//!
//! // Bare GUIDs are not format id strings
//! assert!(FormatId::parse("F29F85E0-4FF9-1068-AB91-08002B27B3D9").is_err());
//! ```

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid format id: {0}")]
    InvalidFormatId(String),
}

/// Identifier of a property set.
///
/// Rendered and parsed in the registry form
/// `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}` (upper-case on output, either
/// case on input).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FormatId(Uuid);

impl FormatId {
    /// Wrap a raw 128-bit value, most significant field first.
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Parse a braced format id string.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidFormatId` unless the input is a hyphenated
    /// GUID enclosed in braces.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let inner = s
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or_else(|| TypeError::InvalidFormatId(format!("'{s}' is not enclosed in braces")))?;

        if inner.len() != 36 {
            return Err(TypeError::InvalidFormatId(format!(
                "'{s}' is not a hyphenated GUID"
            )));
        }

        Uuid::try_parse(inner)
            .map(Self)
            .map_err(|e| TypeError::InvalidFormatId(format!("'{s}': {e}")))
    }

    /// The underlying GUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Ord for FormatId {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a1, a2, a3, a4) = self.0.as_fields();
        let (b1, b2, b3, b4) = other.0.as_fields();
        a1.cmp(&b1)
            .then(a2.cmp(&b2))
            .then(a3.cmp(&b3))
            .then(a4.cmp(b4))
    }
}

impl PartialOrd for FormatId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Uuid> for FormatId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl TryFrom<String> for FormatId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<FormatId> for String {
    fn from(id: FormatId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0.braced())
    }
}

/// One property within a store.
///
/// Field order matters: the derived ordering compares `fmtid` before `pid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyKey {
    /// Property set the property belongs to.
    pub fmtid: FormatId,
    /// Property id within the set.
    pub pid: u32,
}

impl PropertyKey {
    /// Create a key.
    pub const fn new(fmtid: FormatId, pid: u32) -> Self {
        Self { fmtid, pid }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.fmtid, self.pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMMARY: &str = "{F29F85E0-4FF9-1068-AB91-08002B27B3D9}";

    #[test]
    fn format_id_round_trips_upper_case() {
        let id = FormatId::parse(SUMMARY).unwrap();
        assert_eq!(id.to_string(), SUMMARY);

        let lower = FormatId::parse(&SUMMARY.to_lowercase()).unwrap();
        assert_eq!(lower, id);
        assert_eq!(lower.to_string(), SUMMARY);
    }

    #[test]
    fn format_id_rejects_malformed() {
        assert!(FormatId::parse("").is_err());
        assert!(FormatId::parse("{}").is_err());
        assert!(FormatId::parse("{F29F85E04FF91068AB9108002B27B3D9}").is_err());
        assert!(FormatId::parse("{F29F85E0-4FF9-1068-AB91-08002B27B3D9").is_err());
        assert!(FormatId::parse("{G29F85E0-4FF9-1068-AB91-08002B27B3D9}").is_err());
    }

    #[test]
    fn format_id_orders_by_fields() {
        let low = FormatId::from_u128(0x00000001_FFFF_FFFF_FFFF_FFFFFFFFFFFF);
        let high = FormatId::from_u128(0x00000002_0000_0000_0000_000000000000);
        assert!(low < high);

        // Differences in Data4 alone still separate the ids
        let a = FormatId::from_u128(0xD5CDD502_2E9C_101B_9397_08002B2CF9AE);
        let b = FormatId::from_u128(0xD5CDD502_2E9C_101B_9397_08002B2CF9AF);
        assert!(a < b);
    }

    #[test]
    fn property_key_orders_format_then_pid() {
        let a = FormatId::from_u128(1);
        let b = FormatId::from_u128(2);
        let mut keys = vec![
            PropertyKey::new(b, 1),
            PropertyKey::new(a, 7),
            PropertyKey::new(a, 3),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                PropertyKey::new(a, 3),
                PropertyKey::new(a, 7),
                PropertyKey::new(b, 1),
            ]
        );
    }

    #[test]
    fn format_id_serde_uses_braced_string() {
        let id = FormatId::parse(SUMMARY).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{SUMMARY}\""));
        let parsed: FormatId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
