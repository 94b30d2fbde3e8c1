//! Scalar values produced by coercion
//!
//! Query parameters arrive as strings. Coercion turns the ones that
//! unambiguously spell a boolean or a number into typed values; everything
//! else stays a string.

use serde::Serialize;
use serde_json::{Number as JsonNumber, Value as JsonValue};
use std::fmt;

/// Largest integer an `f64` represents exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A coerced query value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Boolean value (`true` / `false`, case-insensitive)
    Bool(bool),
    /// Numeric value, always parsed as floating point
    Number(f64),
    /// Anything that was not coerced
    String(String),
}

impl Scalar {
    /// Create a new string value
    pub fn string(s: impl Into<String>) -> Self {
        Scalar::String(s.into())
    }

    /// Returns the string slice when this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number when this is a numeric value
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean when this is a boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "boolean",
            Scalar::Number(_) => "number",
            Scalar::String(_) => "string",
        }
    }

    /// Convert to a JSON value.
    ///
    /// Integral numbers inside the exactly-representable range become JSON
    /// integers so that `5` is emitted as `5` rather than `5.0`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Scalar::Bool(b) => JsonValue::Bool(*b),
            Scalar::Number(n) => number_to_json(*n),
            Scalar::String(s) => JsonValue::String(s.clone()),
        }
    }
}

fn number_to_json(n: f64) -> JsonValue {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        #[allow(clippy::cast_possible_truncation)]
        return JsonValue::Number(JsonNumber::from(n as i64));
    }
    JsonNumber::from_f64(n).map_or(JsonValue::Null, JsonValue::Number)
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Number(n) => number_to_json(*n).serialize(serializer),
            Scalar::String(s) => serializer.serialize_str(s),
        }
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Number(f64::from(n))
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}
