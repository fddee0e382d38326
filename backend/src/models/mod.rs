//! Domain models for the roster tool.
//!
//! - [`Record`] - One character: ordered field name to JSON value mapping
//! - [`Collection`] - The ordered roster of records
//! - [`FieldValue`] - Typed view of a stored value (text, number or error marker)
//! - [`FieldKind`] - Which sanitizer applies to a field
//! - [`SanitizeError`] - Tagged validation failure

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::NormalizeError;

/// One character record. Keys keep their insertion order.
pub type Record = Map<String, Value>;

/// The roster handled by a session.
pub type Collection = Vec<Record>;

/// Marker stored in a text field that held non-alphabetic characters.
pub const NOT_APPLICABLE: &str = "N/A";

// =============================================================================
// Sanitize Errors
// =============================================================================

/// Why a raw value was rejected by a sanitizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum SanitizeError {
    /// The value contains characters other than digits (and one separator).
    #[error("invalid characters")]
    NonNumeric,

    /// The value is a negative number.
    #[error("negative value")]
    Negative,

    /// The value passed the character check but could not be converted.
    #[error("conversion failure")]
    ConversionFailure,

    /// Free text that is not purely alphabetic.
    #[error("not applicable")]
    NotApplicable,
}

impl SanitizeError {
    /// Sentinel written to files for numeric failures.
    ///
    /// `NotApplicable` has no numeric code; it is stored as [`NOT_APPLICABLE`].
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::NonNumeric => Some(-1),
            Self::Negative => Some(-2),
            Self::ConversionFailure => Some(-3),
            Self::NotApplicable => None,
        }
    }

    /// Recover the error from a stored numeric sentinel.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(Self::NonNumeric),
            -2 => Some(Self::Negative),
            -3 => Some(Self::ConversionFailure),
            _ => None,
        }
    }

    /// Stored representation of this error inside a record.
    pub fn to_value(&self) -> Value {
        match self.code() {
            Some(code) => Value::from(code),
            None => Value::String(NOT_APPLICABLE.to_string()),
        }
    }
}

// =============================================================================
// Field Kind
// =============================================================================

/// Sanitizer selector for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Integer,
    Float,
    #[serde(rename = "string")]
    Text,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "string",
        }
    }
}

impl FromStr for FieldKind {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "integer" | "entero" => Ok(Self::Integer),
            "float" | "flotante" => Ok(Self::Float),
            "string" | "text" => Ok(Self::Text),
            other => Err(NormalizeError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Field Value
// =============================================================================

/// Typed view of a value stored in a [`Record`].
///
/// Stored sentinels (`-1`, `-2`, `-3`, `"N/A"`) are read back as
/// [`FieldValue::Invalid`], so a normalized record never loses the
/// distinction between a valid value and a rejected one.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Invalid(SanitizeError),
}

impl FieldValue {
    /// Numeric interpretation used for ordering. Error sentinels order by code.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Invalid(e) => e.code().map(|c| c as f64),
            Self::Text(_) => None,
        }
    }

    /// Text interpretation used for ordering.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Invalid(SanitizeError::NotApplicable) => Some(NOT_APPLICABLE),
            _ => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Ordinary value ordering: numbers before text, numbers numerically,
    /// text by bytes.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self
                .as_text()
                .unwrap_or_default()
                .cmp(other.as_text().unwrap_or_default()),
        }
    }
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) if s == NOT_APPLICABLE => Self::Invalid(SanitizeError::NotApplicable),
            Value::String(s) => Self::Text(s.clone()),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    SanitizeError::from_code(i)
                        .map(Self::Invalid)
                        .unwrap_or(Self::Integer(i))
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::Bool(b) => Self::Text(b.to_string()),
            Value::Null => Self::Text(String::new()),
            other => Self::Text(other.to_string()),
        }
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Text(s) => Value::String(s),
            FieldValue::Integer(i) => Value::from(i),
            FieldValue::Float(f) => Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or_else(|| SanitizeError::ConversionFailure.to_value()),
            FieldValue::Invalid(e) => e.to_value(),
        }
    }
}

impl<T> From<Result<T, SanitizeError>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(result: Result<T, SanitizeError>) -> Self {
        match result {
            Ok(v) => v.into(),
            Err(e) => Self::Invalid(e),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Floats always carry a decimal point (`2.0`, not `2`) so a CSV round trip
/// keeps them recognisable.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Invalid(e) => match e.code() {
                Some(code) => write!(f, "{}", code),
                None => f.write_str(NOT_APPLICABLE),
            },
        }
    }
}

/// Display a stored JSON value the way it is written to CSV and listings.
pub fn display_value(value: &Value) -> String {
    FieldValue::from(value).to_string()
}
