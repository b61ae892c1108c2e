//! core::vartype
//!
//! Variant type codes and their symbolic labels.
//!
//! A type code is a 16-bit value: the low 12 bits name the base type, the
//! high bits are orthogonal modifiers (`VECTOR`, `ARRAY`, `BYREF`,
//! `RESERVED`). Codes match the `VARENUM` values used by property-set
//! storage, so documents exchanged with other File Meta builds agree on
//! every `TypeId`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A variant type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VarType(pub u16);

impl VarType {
    pub const EMPTY: VarType = VarType(0);
    pub const NULL: VarType = VarType(1);
    pub const I2: VarType = VarType(2);
    pub const I4: VarType = VarType(3);
    pub const R4: VarType = VarType(4);
    pub const R8: VarType = VarType(5);
    pub const CY: VarType = VarType(6);
    pub const DATE: VarType = VarType(7);
    pub const BSTR: VarType = VarType(8);
    pub const ERROR: VarType = VarType(10);
    pub const BOOL: VarType = VarType(11);
    pub const VARIANT: VarType = VarType(12);
    pub const DECIMAL: VarType = VarType(14);
    pub const I1: VarType = VarType(16);
    pub const UI1: VarType = VarType(17);
    pub const UI2: VarType = VarType(18);
    pub const UI4: VarType = VarType(19);
    pub const I8: VarType = VarType(20);
    pub const UI8: VarType = VarType(21);
    pub const INT: VarType = VarType(22);
    pub const UINT: VarType = VarType(23);
    pub const VOID: VarType = VarType(24);
    pub const SAFEARRAY: VarType = VarType(27);
    pub const USERDEFINED: VarType = VarType(29);
    pub const LPSTR: VarType = VarType(30);
    pub const LPWSTR: VarType = VarType(31);
    pub const RECORD: VarType = VarType(36);
    pub const FILETIME: VarType = VarType(64);
    pub const BLOB: VarType = VarType(65);
    pub const STREAM: VarType = VarType(66);
    pub const STORAGE: VarType = VarType(67);
    pub const STREAMED_OBJECT: VarType = VarType(68);
    pub const STORED_OBJECT: VarType = VarType(69);
    pub const BLOB_OBJECT: VarType = VarType(70);
    pub const CF: VarType = VarType(71);
    pub const CLSID: VarType = VarType(72);

    /// Modifier: counted vector of the base type.
    pub const VECTOR: u16 = 0x1000;
    /// Modifier: safe array of the base type.
    pub const ARRAY: u16 = 0x2000;
    /// Modifier: by-reference value.
    pub const BYREF: u16 = 0x4000;
    /// Modifier: reserved bit.
    pub const RESERVED: u16 = 0x8000;
    /// Mask selecting the base type.
    pub const TYPEMASK: u16 = 0x0FFF;

    /// The base type with every modifier stripped.
    pub const fn base(self) -> VarType {
        VarType(self.0 & Self::TYPEMASK)
    }

    pub const fn is_vector(self) -> bool {
        self.0 & Self::VECTOR != 0
    }

    pub const fn is_array(self) -> bool {
        self.0 & Self::ARRAY != 0
    }

    pub const fn is_byref(self) -> bool {
        self.0 & Self::BYREF != 0
    }

    pub const fn is_reserved(self) -> bool {
        self.0 & Self::RESERVED != 0
    }

    /// This type with the vector modifier added.
    pub const fn vector_of(self) -> VarType {
        VarType(self.0 | Self::VECTOR)
    }

    /// True for the three string base types.
    pub fn is_string(self) -> bool {
        matches!(self.base(), Self::BSTR | Self::LPSTR | Self::LPWSTR)
    }

    /// Render the symbolic label, e.g. `VT_LPWSTR | VT_VECTOR`.
    ///
    /// Every input yields a non-empty label: unrecognised base codes render
    /// as `Unknown (<n>)`.
    pub fn label(self) -> String {
        let mut label = match base_name(self.base()) {
            Some(name) => name.to_string(),
            None => format!("Unknown ({})", self.base().0),
        };

        if self.is_vector() {
            label.push_str(" | VT_VECTOR");
        }
        if self.is_array() {
            label.push_str(" | VT_ARRAY");
        }
        if self.is_reserved() {
            label.push_str(" | VT_RESERVED");
        }

        label
    }
}

/// Canonical name of a base type, if it is one the label table knows.
fn base_name(base: VarType) -> Option<&'static str> {
    let name = match base {
        VarType::EMPTY => "VT_EMPTY",
        VarType::NULL => "VT_NULL",
        VarType::I2 => "VT_I2",
        VarType::I4 => "VT_I4",
        VarType::I8 => "VT_I8",
        VarType::UI2 => "VT_UI2",
        VarType::UI4 => "VT_UI4",
        VarType::UI8 => "VT_UI8",
        VarType::R4 => "VT_R4",
        VarType::R8 => "VT_R8",
        VarType::CY => "VT_CY",
        VarType::DATE => "VT_DATE",
        VarType::BSTR => "VT_BSTR",
        VarType::ERROR => "VT_ERROR",
        VarType::BOOL => "VT_BOOL",
        VarType::VARIANT => "VT_VARIANT",
        VarType::DECIMAL => "VT_DECIMAL",
        VarType::I1 => "VT_I1",
        VarType::UI1 => "VT_UI1",
        VarType::INT => "VT_INT",
        VarType::UINT => "VT_UINT",
        VarType::VOID => "VT_VOID",
        VarType::SAFEARRAY => "VT_SAFEARRAY",
        VarType::USERDEFINED => "VT_USERDEFINED",
        VarType::LPSTR => "VT_LPSTR",
        VarType::LPWSTR => "VT_LPWSTR",
        VarType::RECORD => "VT_RECORD",
        VarType::FILETIME => "VT_FILETIME",
        VarType::BLOB => "VT_BLOB",
        VarType::STREAM => "VT_STREAM",
        VarType::STORAGE => "VT_STORAGE",
        VarType::STREAMED_OBJECT => "VT_STREAMED_OBJECT",
        VarType::STORED_OBJECT => "VT_STORED_OBJECT",
        VarType::BLOB_OBJECT => "VT_BLOB_OBJECT",
        VarType::CF => "VT_CF",
        VarType::CLSID => "VT_CLSID",
        _ => return None,
    };
    Some(name)
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<u16> for VarType {
    fn from(code: u16) -> Self {
        VarType(code)
    }
}
