//! Value type coercion
//!
//! Turns raw parameter strings into booleans or numbers when the whole string
//! spells one, and leaves everything else untouched.

use crate::value::Scalar;

/// Coercion switches for raw string values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coercer {
    /// Coerce `true` / `false` (any case) into booleans
    pub to_boolean: bool,
    /// Coerce fully numeric strings into numbers
    pub to_number: bool,
}

impl Default for Coercer {
    fn default() -> Self {
        Self {
            to_boolean: true,
            to_number: true,
        }
    }
}

impl Coercer {
    /// Create a coercer with the given switches
    pub fn new(to_boolean: bool, to_number: bool) -> Self {
        Self {
            to_boolean,
            to_number,
        }
    }

    /// Coercer that never converts anything
    pub fn disabled() -> Self {
        Self::new(false, false)
    }

    /// Coerce a raw string into a boolean, a number, or leave it as a string
    pub fn coerce(&self, raw: &str) -> Scalar {
        if self.to_boolean {
            if raw.eq_ignore_ascii_case("true") {
                return Scalar::Bool(true);
            }
            if raw.eq_ignore_ascii_case("false") {
                return Scalar::Bool(false);
            }
        }

        if self.to_number {
            if let Some(n) = parse_number(raw) {
                return Scalar::Number(n);
            }
        }

        Scalar::String(raw.to_string())
    }
}

/// Parse a string as a number only if the entire string is numeric.
///
/// Surrounding ASCII whitespace is ignored. The first character after an
/// optional sign must be a decimal digit, which rejects `inf`, `NaN` and
/// `.5`. Prefix-numeric strings such as `12abc` are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_matches(|c: char| c.is_ascii_whitespace());
    let digits = trimmed
        .strip_prefix(['+', '-'])
        .unwrap_or(trimmed);

    if !digits.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Whether the entire string is numeric under [`parse_number`]
pub fn is_numeric(raw: &str) -> bool {
    parse_number(raw).is_some()
}
