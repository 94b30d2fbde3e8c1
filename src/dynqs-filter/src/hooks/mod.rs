//! Custom per-key hooks
//!
//! A hook replaces all default handling for one query key: no coercion, no
//! operator parsing. It receives the raw value and returns what, if anything,
//! should be stored in the output filter. The assembler merges the result.
//!
//! Three built-in range hooks (`after`, `before`, `between`) live in [`date`].

use crate::output::FieldFilter;
use crate::query::QueryValue;
use std::collections::HashMap;
use std::sync::Arc;

pub mod date;

pub use date::{parse_date, range_hook, to_iso_string, RangeKind};

/// Error a hook may report; it aborts the whole parse
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of a hook invocation
pub type HookResult = std::result::Result<Option<Emitted>, HookError>;

/// Hook implementation
pub type CustomHook = Arc<dyn Fn(&QueryValue) -> HookResult + Send + Sync>;

/// Field filter produced by a hook
#[derive(Debug, Clone, PartialEq)]
pub struct Emitted {
    /// Output field to store under; may differ from the query key
    pub field: String,
    /// Filter to store
    pub filter: FieldFilter,
}

impl Emitted {
    /// Create a new emitted entry
    pub fn new(field: impl Into<String>, filter: impl Into<FieldFilter>) -> Self {
        Self {
            field: field.into(),
            filter: filter.into(),
        }
    }
}

/// Registry of hooks keyed by (aliased) query key
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: HashMap<String, CustomHook>,
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&str> = self.hooks.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("HookRegistry").field("keys", &keys).finish()
    }
}

impl HookRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook, replacing any earlier one for the key
    pub fn register(&mut self, key: impl Into<String>, hook: CustomHook) {
        self.hooks.insert(key.into(), hook);
    }

    /// Check if a hook exists for the key
    pub fn has_hook(&self, key: &str) -> bool {
        self.hooks.contains_key(key)
    }

    /// Get the hook for a key
    pub fn get(&self, key: &str) -> Option<&CustomHook> {
        self.hooks.get(key)
    }

    /// Get the number of registered hooks
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no hooks are registered
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynqs_parser::Scalar;

    #[test]
    fn test_register_and_call() {
        let mut registry = HookRegistry::new();
        registry.register(
            "upper",
            Arc::new(|value: &QueryValue| -> HookResult {
                Ok(value
                    .as_str()
                    .map(|s| Emitted::new("name", Scalar::string(s.to_uppercase()))))
            }),
        );

        assert!(registry.has_hook("upper"));
        assert!(!registry.has_hook("lower"));
        assert_eq!(registry.len(), 1);

        let hook = registry.get("upper").unwrap();
        let emitted = hook(&QueryValue::from("abc")).unwrap().unwrap();
        assert_eq!(emitted, Emitted::new("name", Scalar::string("ABC")));
        assert!(hook(&QueryValue::from(["a"])).unwrap().is_none());
    }

    #[test]
    fn test_debug_lists_keys() {
        let mut registry = HookRegistry::new();
        registry.register("b", range_hook(RangeKind::After, "b"));
        registry.register("a", range_hook(RangeKind::Before, "a"));
        assert_eq!(format!("{registry:?}"), "HookRegistry { keys: [\"a\", \"b\"] }");
    }
}
