//! core::variant
//!
//! Typed property values and the conversions between them.
//!
//! # Model
//!
//! A [`PropValue`] is either a single [`Scalar`] or a vector of scalars that
//! share one element type. Values cross the document boundary only in their
//! string form; the typed form lives inside stores.
//!
//! # Conversions
//!
//! - [`PropValue::coerce`] converts between type codes. It is strict:
//!   malformed text, out-of-range numbers and unsupported pairs all fail.
//! - [`format_for_display`] renders a value for people. Vectors become
//!   their elements joined by `"; "`.
//!
//! Dates (`DATE`, `FILETIME`) render as `YYYY/MM/DD:HH:MM:SS.fff` in UTC.
//!
//! ```
//! use filemeta::core::variant::PropValue;
//! use filemeta::core::vartype::VarType;
//!
//! let text = PropValue::string("42").unwrap();
//! let number = text.coerce(VarType::I4).unwrap();
//! assert_eq!(number.vt(), VarType::I4);
//! assert_eq!(number.coerce(VarType::LPWSTR).unwrap(), text);
//! ```

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::strings;
use super::vartype::VarType;

/// Errors from building or converting values.
#[derive(Debug, Error, PartialEq)]
pub enum VariantError {
    /// No conversion exists between the two types.
    #[error("cannot convert {from} to {to}")]
    Unsupported { from: VarType, to: VarType },

    /// Text could not be read as the target type.
    #[error("cannot read '{text}' as {to}: {reason}")]
    Parse {
        text: String,
        to: VarType,
        reason: String,
    },

    /// A number does not fit the target type.
    #[error("value {value} is out of range for {to}")]
    OutOfRange { value: String, to: VarType },

    /// String values cannot contain NUL characters.
    #[error("string contains an embedded NUL character")]
    EmbeddedNul,
}

/// A single typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Scalar {
    Empty,
    Null,
    I1(i8),
    I2(i16),
    I4(i32),
    I8(i64),
    Ui1(u8),
    Ui2(u16),
    Ui4(u32),
    Ui8(u64),
    Int(i32),
    Uint(u32),
    R4(f32),
    R8(f64),
    /// Currency, scaled by 10 000.
    Cy(i64),
    /// OLE automation date: days since 1899-12-30.
    Date(f64),
    Bool(bool),
    /// 32-bit status code.
    Error(i32),
    Bstr(String),
    LpStr(String),
    LpWStr(String),
    /// 100ns ticks since 1601-01-01 UTC.
    FileTime(u64),
    Clsid(Uuid),
    Blob(Vec<u8>),
}

/// A property value: one scalar or a vector of scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropValue {
    Single(Scalar),
    Vector { element: VarType, items: Vec<Scalar> },
}

impl Scalar {
    /// The type code of this scalar.
    pub fn vt(&self) -> VarType {
        match self {
            Scalar::Empty => VarType::EMPTY,
            Scalar::Null => VarType::NULL,
            Scalar::I1(_) => VarType::I1,
            Scalar::I2(_) => VarType::I2,
            Scalar::I4(_) => VarType::I4,
            Scalar::I8(_) => VarType::I8,
            Scalar::Ui1(_) => VarType::UI1,
            Scalar::Ui2(_) => VarType::UI2,
            Scalar::Ui4(_) => VarType::UI4,
            Scalar::Ui8(_) => VarType::UI8,
            Scalar::Int(_) => VarType::INT,
            Scalar::Uint(_) => VarType::UINT,
            Scalar::R4(_) => VarType::R4,
            Scalar::R8(_) => VarType::R8,
            Scalar::Cy(_) => VarType::CY,
            Scalar::Date(_) => VarType::DATE,
            Scalar::Bool(_) => VarType::BOOL,
            Scalar::Error(_) => VarType::ERROR,
            Scalar::Bstr(_) => VarType::BSTR,
            Scalar::LpStr(_) => VarType::LPSTR,
            Scalar::LpWStr(_) => VarType::LPWSTR,
            Scalar::FileTime(_) => VarType::FILETIME,
            Scalar::Clsid(_) => VarType::CLSID,
            Scalar::Blob(_) => VarType::BLOB,
        }
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Bstr(s) | Scalar::LpStr(s) | Scalar::LpWStr(s) => Some(s),
            _ => None,
        }
    }

    /// Canonical string form of this scalar.
    ///
    /// # Errors
    ///
    /// Blobs have no string form.
    pub fn to_text(&self) -> Result<String, VariantError> {
        let text = match self {
            Scalar::Empty | Scalar::Null => String::new(),
            Scalar::I1(v) => v.to_string(),
            Scalar::I2(v) => v.to_string(),
            Scalar::I4(v) | Scalar::Int(v) | Scalar::Error(v) => v.to_string(),
            Scalar::I8(v) => v.to_string(),
            Scalar::Ui1(v) => v.to_string(),
            Scalar::Ui2(v) => v.to_string(),
            Scalar::Ui4(v) | Scalar::Uint(v) => v.to_string(),
            Scalar::Ui8(v) => v.to_string(),
            Scalar::R4(v) => v.to_string(),
            Scalar::R8(v) => v.to_string(),
            Scalar::Cy(v) => currency_to_text(*v),
            Scalar::Bool(v) => if *v { "TRUE" } else { "FALSE" }.to_string(),
            Scalar::Bstr(s) | Scalar::LpStr(s) | Scalar::LpWStr(s) => s.clone(),
            Scalar::Date(days) => format_datetime(ole_date_to_datetime(*days).ok_or_else(
                || VariantError::OutOfRange {
                    value: days.to_string(),
                    to: VarType::LPWSTR,
                },
            )?),
            Scalar::FileTime(ticks) => format_datetime(filetime_to_datetime(*ticks).ok_or_else(
                || VariantError::OutOfRange {
                    value: ticks.to_string(),
                    to: VarType::LPWSTR,
                },
            )?),
            Scalar::Clsid(id) => format!("{:X}", id.braced()),
            Scalar::Blob(_) => {
                return Err(VariantError::Unsupported {
                    from: VarType::BLOB,
                    to: VarType::LPWSTR,
                })
            }
        };
        Ok(text)
    }

    /// Convert this scalar to the base type `target`.
    pub fn coerce(&self, target: VarType) -> Result<Scalar, VariantError> {
        let target = target.base();
        let from = self.vt();

        if from == target {
            return Ok(self.clone());
        }
        if target.is_string() {
            return Ok(string_scalar(target, self.to_text()?));
        }
        if let Some(text) = self.as_text() {
            return parse_scalar(text, target);
        }
        if target == VarType::EMPTY {
            return Ok(Scalar::Empty);
        }
        if let (Some(number), true) = (self.as_number(), is_numeric(target)) {
            return number_to_scalar(number, target);
        }

        match (self, target) {
            (Scalar::Date(days), VarType::FILETIME) => ole_date_to_datetime(*days)
                .and_then(datetime_to_filetime)
                .map(Scalar::FileTime)
                .ok_or_else(|| VariantError::OutOfRange {
                    value: days.to_string(),
                    to: target,
                }),
            (Scalar::FileTime(ticks), VarType::DATE) => filetime_to_datetime(*ticks)
                .map(|dt| Scalar::Date(datetime_to_ole_date(dt)))
                .ok_or_else(|| VariantError::OutOfRange {
                    value: ticks.to_string(),
                    to: target,
                }),
            _ => Err(VariantError::Unsupported { from, to: target }),
        }
    }

    fn as_number(&self) -> Option<Number> {
        let number = match self {
            Scalar::I1(v) => Number::Int(i128::from(*v)),
            Scalar::I2(v) => Number::Int(i128::from(*v)),
            Scalar::I4(v) | Scalar::Int(v) | Scalar::Error(v) => Number::Int(i128::from(*v)),
            Scalar::I8(v) => Number::Int(i128::from(*v)),
            Scalar::Ui1(v) => Number::Int(i128::from(*v)),
            Scalar::Ui2(v) => Number::Int(i128::from(*v)),
            Scalar::Ui4(v) | Scalar::Uint(v) => Number::Int(i128::from(*v)),
            Scalar::Ui8(v) => Number::Int(i128::from(*v)),
            Scalar::R4(v) => Number::Float(f64::from(*v)),
            Scalar::R8(v) => Number::Float(*v),
            Scalar::Cy(v) if v % 10_000 == 0 => Number::Int(i128::from(v / 10_000)),
            Scalar::Cy(v) => Number::Float(*v as f64 / 10_000.0),
            Scalar::Bool(v) => Number::Int(i128::from(*v)),
            _ => return None,
        };
        Some(number)
    }
}

impl PropValue {
    /// The empty value, returned by stores for absent properties.
    pub fn empty() -> Self {
        PropValue::Single(Scalar::Empty)
    }

    /// A `VT_LPWSTR` value.
    ///
    /// # Errors
    ///
    /// Returns `VariantError::EmbeddedNul` if `s` contains a NUL character.
    pub fn string(s: impl Into<String>) -> Result<Self, VariantError> {
        let s = s.into();
        check_nul(&s)?;
        Ok(PropValue::Single(Scalar::LpWStr(s)))
    }

    /// A `VT_LPWSTR | VT_VECTOR` value.
    pub fn string_vector<I, S>(items: I) -> Result<Self, VariantError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = items
            .into_iter()
            .map(|s| {
                let s = s.into();
                check_nul(&s)?;
                Ok(Scalar::LpWStr(s))
            })
            .collect::<Result<Vec<_>, VariantError>>()?;
        Ok(PropValue::Vector {
            element: VarType::LPWSTR,
            items,
        })
    }

    /// The type code, including the vector modifier for vectors.
    pub fn vt(&self) -> VarType {
        match self {
            PropValue::Single(scalar) => scalar.vt(),
            PropValue::Vector { element, .. } => element.base().vector_of(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PropValue::Single(Scalar::Empty))
    }

    /// Convert to the type code `target`.
    ///
    /// # Errors
    ///
    /// - `VariantError::Unsupported` for array or by-reference targets, for
    ///   scalar/vector mismatches, and for pairs with no conversion
    /// - `VariantError::Parse` / `VariantError::OutOfRange` when text or
    ///   numbers do not fit the target
    pub fn coerce(&self, target: VarType) -> Result<PropValue, VariantError> {
        if target.is_array() || target.is_byref() {
            return Err(VariantError::Unsupported {
                from: self.vt(),
                to: target,
            });
        }

        match (self, target.is_vector()) {
            (PropValue::Single(scalar), false) => Ok(PropValue::Single(scalar.coerce(target)?)),
            (PropValue::Vector { items, .. }, true) => {
                let element = target.base();
                let items = items
                    .iter()
                    .map(|item| item.coerce(element))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(PropValue::Vector { element, items })
            }
            (PropValue::Single(scalar), true) if scalar.as_text().is_some() => {
                let element = target.base();
                Ok(PropValue::Vector {
                    element,
                    items: vec![scalar.coerce(element)?],
                })
            }
            _ => Err(VariantError::Unsupported {
                from: self.vt(),
                to: target,
            }),
        }
    }
}

impl From<Scalar> for PropValue {
    fn from(scalar: Scalar) -> Self {
        PropValue::Single(scalar)
    }
}

/// Render a value for display: scalars in canonical form, vectors as their
/// elements joined by `"; "`.
pub fn format_for_display(value: &PropValue) -> Result<String, VariantError> {
    match value {
        PropValue::Single(scalar) => scalar.to_text(),
        PropValue::Vector { items, .. } => {
            let parts = items
                .iter()
                .map(Scalar::to_text)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(strings::join_vector(&parts))
        }
    }
}

fn check_nul(s: &str) -> Result<(), VariantError> {
    if s.contains('\0') {
        Err(VariantError::EmbeddedNul)
    } else {
        Ok(())
    }
}

fn string_scalar(target: VarType, text: String) -> Scalar {
    match target.base() {
        VarType::BSTR => Scalar::Bstr(text),
        VarType::LPSTR => Scalar::LpStr(text),
        _ => Scalar::LpWStr(text),
    }
}

// =============================================================================
// Numbers
// =============================================================================

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i128),
    Float(f64),
}

fn is_numeric(vt: VarType) -> bool {
    matches!(
        vt.base(),
        VarType::I1
            | VarType::I2
            | VarType::I4
            | VarType::I8
            | VarType::UI1
            | VarType::UI2
            | VarType::UI4
            | VarType::UI8
            | VarType::INT
            | VarType::UINT
            | VarType::R4
            | VarType::R8
            | VarType::CY
            | VarType::BOOL
            | VarType::ERROR
    )
}

fn number_to_scalar(number: Number, target: VarType) -> Result<Scalar, VariantError> {
    let out_of_range = |value: String| VariantError::OutOfRange { value, to: target };

    // Stored floats must stay finite: the sidecar JSON has no NaN or infinity
    match target {
        VarType::R4 => {
            let v = match number {
                Number::Int(v) => v as f32,
                Number::Float(v) => v as f32,
            };
            return if v.is_finite() {
                Ok(Scalar::R4(v))
            } else {
                Err(out_of_range(number_text(number)))
            };
        }
        VarType::R8 => {
            let v = match number {
                Number::Int(v) => v as f64,
                Number::Float(v) => v,
            };
            return if v.is_finite() {
                Ok(Scalar::R8(v))
            } else {
                Err(out_of_range(number_text(number)))
            };
        }
        VarType::CY => {
            return match number {
                Number::Int(v) => v
                    .checked_mul(10_000)
                    .and_then(|c| i64::try_from(c).ok())
                    .map(Scalar::Cy)
                    .ok_or_else(|| out_of_range(v.to_string())),
                Number::Float(v) => {
                    let scaled = (v * 10_000.0).round();
                    if scaled.is_finite() && scaled >= i64::MIN as f64 && scaled <= i64::MAX as f64
                    {
                        Ok(Scalar::Cy(scaled as i64))
                    } else {
                        Err(out_of_range(v.to_string()))
                    }
                }
            }
        }
        VarType::BOOL => {
            return Ok(Scalar::Bool(match number {
                Number::Int(v) => v != 0,
                Number::Float(v) => v != 0.0,
            }))
        }
        _ => {}
    }

    let int = match number {
        Number::Int(v) => v,
        Number::Float(v) => {
            if !v.is_finite() || v.fract() != 0.0 || v.abs() > 1e38 {
                return Err(out_of_range(v.to_string()));
            }
            v as i128
        }
    };

    let fits = |ok: bool, scalar: Scalar| {
        if ok {
            Ok(scalar)
        } else {
            Err(out_of_range(int.to_string()))
        }
    };

    match target {
        VarType::I1 => fits(i8::try_from(int).is_ok(), Scalar::I1(int as i8)),
        VarType::I2 => fits(i16::try_from(int).is_ok(), Scalar::I2(int as i16)),
        VarType::I4 => fits(i32::try_from(int).is_ok(), Scalar::I4(int as i32)),
        VarType::INT => fits(i32::try_from(int).is_ok(), Scalar::Int(int as i32)),
        VarType::I8 => fits(i64::try_from(int).is_ok(), Scalar::I8(int as i64)),
        VarType::UI1 => fits(u8::try_from(int).is_ok(), Scalar::Ui1(int as u8)),
        VarType::UI2 => fits(u16::try_from(int).is_ok(), Scalar::Ui2(int as u16)),
        VarType::UI4 => fits(u32::try_from(int).is_ok(), Scalar::Ui4(int as u32)),
        VarType::UINT => fits(u32::try_from(int).is_ok(), Scalar::Uint(int as u32)),
        VarType::UI8 => fits(u64::try_from(int).is_ok(), Scalar::Ui8(int as u64)),
        // Status codes are 32-bit patterns: accept either signed or unsigned spelling
        VarType::ERROR => fits(
            i32::try_from(int).is_ok() || u32::try_from(int).is_ok(),
            Scalar::Error(int as u32 as i32),
        ),
        _ => Err(VariantError::Unsupported {
            from: VarType::I8,
            to: target,
        }),
    }
}

fn number_text(number: Number) -> String {
    match number {
        Number::Int(v) => v.to_string(),
        Number::Float(v) => v.to_string(),
    }
}

fn parse_int(text: &str) -> Option<i128> {
    let t = text.trim();
    let (negative, body) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t.strip_prefix('+').unwrap_or(t)),
    };
    let magnitude = match body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        Some(hex) => i128::from_str_radix(hex, 16).ok()?,
        None => {
            if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            body.parse::<i128>().ok()?
        }
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn currency_to_text(value: i64) -> String {
    let negative = value < 0;
    let magnitude = i128::from(value).abs();
    let whole = magnitude / 10_000;
    let frac = magnitude % 10_000;

    let mut text = if negative { "-".to_string() } else { String::new() };
    text.push_str(&whole.to_string());
    if frac != 0 {
        let digits = format!("{frac:04}");
        text.push('.');
        text.push_str(digits.trim_end_matches('0'));
    }
    text
}

fn parse_currency(text: &str) -> Option<i64> {
    let t = text.trim();
    let (negative, body) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t.strip_prefix('+').unwrap_or(t)),
    };
    let (whole, frac) = body.split_once('.').unwrap_or((body, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut scaled: i128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    scaled = scaled.checked_mul(10_000)?;

    let mut frac_digits: Vec<u8> = frac.bytes().map(|b| b - b'0').collect();
    let round_up = frac_digits.len() > 4 && frac_digits[4] >= 5;
    frac_digits.resize(4, 0);
    let frac_value = frac_digits
        .iter()
        .fold(0i128, |acc, d| acc * 10 + i128::from(*d));
    scaled += frac_value + i128::from(round_up);

    if negative {
        scaled = -scaled;
    }
    i64::try_from(scaled).ok()
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "-1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Read `text` as a scalar of base type `target`.
fn parse_scalar(text: &str, target: VarType) -> Result<Scalar, VariantError> {
    let parse_error = |reason: &str| VariantError::Parse {
        text: text.to_string(),
        to: target,
        reason: reason.to_string(),
    };

    match target {
        VarType::EMPTY => Ok(Scalar::Empty),
        VarType::NULL => Ok(Scalar::Null),
        VarType::BSTR | VarType::LPSTR | VarType::LPWSTR => {
            Ok(string_scalar(target, text.to_string()))
        }
        VarType::R4 => match text.trim().parse::<f32>() {
            Ok(v) if v.is_finite() => Ok(Scalar::R4(v)),
            Ok(_) => Err(parse_error("not a finite number")),
            Err(e) => Err(parse_error(&e.to_string())),
        },
        VarType::R8 => match text.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Scalar::R8(v)),
            Ok(_) => Err(parse_error("not a finite number")),
            Err(e) => Err(parse_error(&e.to_string())),
        },
        VarType::CY => parse_currency(text)
            .map(Scalar::Cy)
            .ok_or_else(|| parse_error("not a currency amount")),
        VarType::BOOL => parse_bool(text)
            .map(Scalar::Bool)
            .ok_or_else(|| parse_error("not a boolean")),
        VarType::DATE => parse_datetime(text)
            .map(|dt| Scalar::Date(datetime_to_ole_date(dt)))
            .ok_or_else(|| parse_error("not a date")),
        VarType::FILETIME => {
            let dt = parse_datetime(text).ok_or_else(|| parse_error("not a date"))?;
            datetime_to_filetime(dt)
                .map(Scalar::FileTime)
                .ok_or_else(|| parse_error("date is before 1601"))
        }
        VarType::CLSID => {
            let t = text.trim();
            let inner = t
                .strip_prefix('{')
                .and_then(|rest| rest.strip_suffix('}'))
                .unwrap_or(t);
            Uuid::try_parse(inner)
                .map(Scalar::Clsid)
                .map_err(|e| parse_error(&e.to_string()))
        }
        vt if is_numeric(vt) => {
            let int = parse_int(text).ok_or_else(|| parse_error("not an integer"))?;
            number_to_scalar(Number::Int(int), vt)
        }
        _ => Err(VariantError::Unsupported {
            from: VarType::LPWSTR,
            to: target,
        }),
    }
}

// =============================================================================
// Dates
// =============================================================================

const DISPLAY_DATE_FORMAT: &str = "%Y/%m/%d:%H:%M:%S%.3f";

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Seconds between 1601-01-01 and 1970-01-01.
const FILETIME_UNIX_OFFSET_SECS: i64 = 11_644_473_600;

const TICKS_PER_SEC: i64 = 10_000_000;

fn ole_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Parse the display format, RFC 3339, or `YYYY-MM-DD[ HH:MM:SS]`.
fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let t = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Some(dt.naive_utc());
    }

    const DATETIME_FORMATS: [&str; 6] = [
        "%Y/%m/%d:%H:%M:%S%.f",
        "%Y/%m/%d:%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
    ];
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(t, format) {
            return Some(dt);
        }
    }

    for format in ["%Y/%m/%d", "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(t, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// OLE dates keep the time of day as a positive fraction even for days
/// before the epoch: -1.25 is 1899-12-29 06:00.
///
/// Between -1 and 0 the whole part is -0, so -0.5 and 0.5 name the same
/// instant (1899-12-30 12:00). The text form cannot tell them apart and
/// always reads back as the positive value.
fn ole_date_to_datetime(days: f64) -> Option<NaiveDateTime> {
    if !days.is_finite() || days.abs() > 3_000_000.0 {
        return None;
    }
    let whole = days.trunc();
    let millis = ((days - whole).abs() * MILLIS_PER_DAY).round() as i64;
    ole_epoch()
        .checked_add_signed(Duration::days(whole as i64))?
        .checked_add_signed(Duration::milliseconds(millis))
}

fn datetime_to_ole_date(dt: NaiveDateTime) -> f64 {
    let epoch = ole_epoch();
    let days = (dt.date() - epoch.date()).num_days();
    let midnight = dt.date().and_hms_opt(0, 0, 0).unwrap_or(dt);
    let fraction = (dt - midnight).num_milliseconds() as f64 / MILLIS_PER_DAY;
    if days >= 0 {
        days as f64 + fraction
    } else {
        days as f64 - fraction
    }
}

fn filetime_to_datetime(ticks: u64) -> Option<NaiveDateTime> {
    let ticks = i64::try_from(ticks).ok()?;
    let secs = ticks / TICKS_PER_SEC - FILETIME_UNIX_OFFSET_SECS;
    let nanos = (ticks % TICKS_PER_SEC) * 100;
    DateTime::from_timestamp(secs, nanos as u32).map(|dt| dt.naive_utc())
}

fn datetime_to_filetime(dt: NaiveDateTime) -> Option<u64> {
    let utc = dt.and_utc();
    let secs = utc.timestamp().checked_add(FILETIME_UNIX_OFFSET_SECS)?;
    let ticks = secs
        .checked_mul(TICKS_PER_SEC)?
        .checked_add(i64::from(utc.timestamp_subsec_nanos() / 100))?;
    u64::try_from(ticks).ok()
}

/// Convert a system time to FILETIME ticks.
pub fn filetime_from_system_time(time: std::time::SystemTime) -> Option<u64> {
    let dt: DateTime<chrono::Utc> = time.into();
    datetime_to_filetime(dt.naive_utc())
}
