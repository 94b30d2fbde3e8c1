//! Key rules: allow/deny listing, aliasing and key-shape validation
//!
//! These run before any value is looked at. A key rejected here never reaches
//! the output, and custom hooks are only consulted for keys that pass.

use crate::error::Result;
use crate::query::ARRAY_SUFFIX;
use indexmap::{IndexMap, IndexSet};
use regex::{Regex, RegexBuilder};

/// Default pattern for single-valued keys
pub const DEFAULT_KEY_PATTERN: &str = r"^[a-zæøå0-9_.\-]+$";

/// Default pattern matching any character not allowed in values
pub const DEFAULT_VALUE_PATTERN: &str = r"[^a-zæøå0-9_.* \-]";

/// Default pattern for multi-valued keys
pub const DEFAULT_ARRAY_PATTERN: &str = r"^[a-zæøå0-9_.\-]+(\[\])?$";

/// Compile a pattern case-insensitively
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}

/// Why a key was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Not on a non-empty allow-list
    NotWhitelisted,
    /// On the deny-list
    Blacklisted,
    /// Failed the key-shape pattern
    BadShape,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::NotWhitelisted => write!(f, "not whitelisted"),
            Rejection::Blacklisted => write!(f, "blacklisted"),
            Rejection::BadShape => write!(f, "key shape rejected"),
        }
    }
}

/// Key filtering and renaming rules
#[derive(Debug, Clone)]
pub struct KeyRules {
    pub(crate) alias: IndexMap<String, String>,
    pub(crate) blacklist: IndexSet<String>,
    pub(crate) whitelist: IndexSet<String>,
    pub(crate) key_pattern: Regex,
    pub(crate) value_pattern: Regex,
    pub(crate) array_pattern: Regex,
}

impl Default for KeyRules {
    fn default() -> Self {
        Self {
            alias: IndexMap::new(),
            blacklist: IndexSet::new(),
            whitelist: IndexSet::new(),
            key_pattern: default_regex(DEFAULT_KEY_PATTERN),
            value_pattern: default_regex(DEFAULT_VALUE_PATTERN),
            array_pattern: default_regex(DEFAULT_ARRAY_PATTERN),
        }
    }
}

#[allow(clippy::expect_used)]
fn default_regex(pattern: &str) -> Regex {
    compile_pattern(pattern).expect("built-in pattern compiles")
}

impl KeyRules {
    /// Strip the `[]` suffix from multi-valued keys
    pub fn normalize(key: &str, is_array: bool) -> &str {
        if is_array {
            key.strip_suffix(ARRAY_SUFFIX).unwrap_or(key)
        } else {
            key
        }
    }

    /// Run allow-list, deny-list, alias and shape checks in that order.
    ///
    /// `key` must already be normalized. Returns the canonical key the value
    /// is stored under.
    pub fn admit<'a>(
        &'a self,
        key: &'a str,
        is_array: bool,
    ) -> std::result::Result<&'a str, Rejection> {
        if !self.whitelist.is_empty() && !self.whitelist.contains(key) {
            return Err(Rejection::NotWhitelisted);
        }

        if self.blacklist.contains(key) {
            return Err(Rejection::Blacklisted);
        }

        let key = self.alias.get(key).map_or(key, String::as_str);

        let pattern = if is_array {
            &self.array_pattern
        } else {
            &self.key_pattern
        };
        if !pattern.is_match(key) {
            return Err(Rejection::BadShape);
        }

        Ok(key)
    }

    /// Whether a value contains characters outside the value pattern
    pub fn has_unsafe_chars(&self, value: &str) -> bool {
        self.value_pattern.is_match(value)
    }

    /// Alias target for a key, if any
    pub fn alias_for(&self, key: &str) -> Option<&str> {
        self.alias.get(key).map(String::as_str)
    }
}
