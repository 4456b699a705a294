use serde::{Deserialize, Serialize};

/// A loosely-typed attribute value as stored by the catalog.
///
/// Bundle attribute codes (`price_view`, `sku_type`, link `price_type`, ...)
/// arrive as booleans, integers, floats or numeric strings depending on which
/// layer produced the record. The value is kept as-is for passthrough and
/// interpreted on demand with [`AttributeValue::is_truthy`] and
/// [`AttributeValue::canonical`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl AttributeValue {
    /// Boolean interpretation of the stored value.
    ///
    /// `false`, `0`, `0.0`, `""` and `"0"` are false; everything else is true.
    /// A missing value is false as well, see [`is_truthy`].
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            AttributeValue::Bool(b) => *b,
            AttributeValue::Int(i) => *i != 0,
            AttributeValue::Float(f) => *f != 0.0,
            AttributeValue::Text(s) => !(s.is_empty() || s == "0"),
        }
    }

    /// Canonical string form used when comparing against enum table values.
    ///
    /// `true`/`false` become `"1"`/`"0"`, integral floats drop their fraction
    /// (`1.0` becomes `"1"`), and strings are trimmed.
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            AttributeValue::Bool(true) => "1".to_string(),
            AttributeValue::Bool(false) => "0".to_string(),
            AttributeValue::Int(i) => i.to_string(),
            AttributeValue::Float(f) => canonical_float(*f),
            AttributeValue::Text(s) => s.trim().to_string(),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn canonical_float(f: f64) -> String {
    if f.fract() == 0.0 && f.is_finite() && f.abs() < 9.0e15 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

/// Truthiness of an optional attribute; a missing value is false.
#[must_use]
pub fn is_truthy(value: Option<&AttributeValue>) -> bool {
    value.is_some_and(AttributeValue::is_truthy)
}
