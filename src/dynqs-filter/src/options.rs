//! Parser configuration
//!
//! [`Options`] is immutable once built. Build it programmatically with
//! [`OptionsBuilder`], or deserialize an [`OptionsConfig`] (for example from
//! TOML) and convert it.

use crate::error::{Error, Result};
use crate::hooks::{range_hook, CustomHook, HookRegistry, RangeKind};
use crate::keys::{
    compile_pattern, KeyRules, DEFAULT_ARRAY_PATTERN, DEFAULT_KEY_PATTERN, DEFAULT_VALUE_PATTERN,
};
use dynqs_parser::{Coercer, OperatorSet, DEFAULT_TOKENS};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Immutable parser configuration
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub(crate) ops: OperatorSet,
    pub(crate) keys: KeyRules,
    pub(crate) custom: HookRegistry,
    pub(crate) coercer: Coercer,
}

impl Options {
    /// Start building a configuration from defaults
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Recognised operator tokens
    pub fn ops(&self) -> &OperatorSet {
        &self.ops
    }

    /// Key filtering and renaming rules
    pub fn keys(&self) -> &KeyRules {
        &self.keys
    }

    /// Registered custom hooks
    pub fn custom(&self) -> &HookRegistry {
        &self.custom
    }

    /// Value coercion switches
    pub fn coercer(&self) -> &Coercer {
        &self.coercer
    }
}

/// Builder for [`Options`]
#[derive(Debug, Clone, Default)]
pub struct OptionsBuilder {
    ops: Option<OperatorSet>,
    alias: IndexMap<String, String>,
    blacklist: IndexSet<String>,
    whitelist: IndexSet<String>,
    custom: HookRegistry,
    to_boolean: Option<bool>,
    to_number: Option<bool>,
    key_pattern: Option<String>,
    value_pattern: Option<String>,
    array_pattern: Option<String>,
}

impl OptionsBuilder {
    /// Replace the recognised operator tokens
    #[must_use]
    pub fn ops<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ops = Some(OperatorSet::new(tokens));
        self
    }

    /// Rename query key `from` to output field `to`
    #[must_use]
    pub fn alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.alias.insert(from.into(), to.into());
        self
    }

    /// Drop a key
    #[must_use]
    pub fn blacklist(mut self, key: impl Into<String>) -> Self {
        self.blacklist.insert(key.into());
        self
    }

    /// Allow a key; once any key is allowed, all others are dropped
    #[must_use]
    pub fn whitelist(mut self, key: impl Into<String>) -> Self {
        self.whitelist.insert(key.into());
        self
    }

    /// Register a custom hook for a query key
    #[must_use]
    pub fn custom(mut self, key: impl Into<String>, hook: CustomHook) -> Self {
        self.custom.register(key, hook);
        self
    }

    /// Register a built-in date range hook for `key`, writing to `field`
    #[must_use]
    pub fn range_hook(
        self,
        key: impl Into<String>,
        kind: RangeKind,
        field: impl Into<String>,
    ) -> Self {
        self.custom(key, range_hook(kind, field))
    }

    /// Toggle boolean coercion
    #[must_use]
    pub fn to_boolean(mut self, enabled: bool) -> Self {
        self.to_boolean = Some(enabled);
        self
    }

    /// Toggle number coercion
    #[must_use]
    pub fn to_number(mut self, enabled: bool) -> Self {
        self.to_number = Some(enabled);
        self
    }

    /// Pattern single-valued keys must match
    #[must_use]
    pub fn key_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.key_pattern = Some(pattern.into());
        self
    }

    /// Pattern matching characters considered unsafe in values
    #[must_use]
    pub fn value_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.value_pattern = Some(pattern.into());
        self
    }

    /// Pattern multi-valued keys must match
    #[must_use]
    pub fn array_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.array_pattern = Some(pattern.into());
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<Options> {
        let pattern = |custom: Option<String>, default: &str| {
            compile_pattern(custom.as_deref().unwrap_or(default))
        };

        let keys = KeyRules {
            alias: self.alias,
            blacklist: self.blacklist,
            whitelist: self.whitelist,
            key_pattern: pattern(self.key_pattern, DEFAULT_KEY_PATTERN)?,
            value_pattern: pattern(self.value_pattern, DEFAULT_VALUE_PATTERN)?,
            array_pattern: pattern(self.array_pattern, DEFAULT_ARRAY_PATTERN)?,
        };

        Ok(Options {
            ops: self.ops.unwrap_or_default(),
            keys,
            custom: self.custom,
            coercer: Coercer::new(
                self.to_boolean.unwrap_or(true),
                self.to_number.unwrap_or(true),
            ),
        })
    }
}

/// Coercion switches as they appear in configuration files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StringConfig {
    /// Coerce `true` / `false`
    pub to_boolean: bool,
    /// Coerce numeric strings
    pub to_number: bool,
}

impl Default for StringConfig {
    fn default() -> Self {
        Self {
            to_boolean: true,
            to_number: true,
        }
    }
}

/// Hook declaration in a configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HookSpec {
    /// Shorthand `after = "createdAt"`: the key names the range kind and
    /// the string names the output field
    Field(String),
    /// Explicit `{ kind = "after", field = "createdAt" }`; `field`
    /// defaults to the query key
    Range {
        /// Range kind
        kind: RangeKind,
        /// Output field
        #[serde(default)]
        field: Option<String>,
    },
}

impl HookSpec {
    /// Resolve the range kind and output field for a query key
    pub fn resolve(&self, key: &str) -> Result<(RangeKind, String)> {
        match self {
            HookSpec::Field(field) => {
                let kind = key.parse::<RangeKind>().map_err(|_| {
                    Error::config(format!(
                        "hook '{key}' uses the field shorthand, which is only valid for \
                         'after', 'before' and 'between'"
                    ))
                })?;
                Ok((kind, field.clone()))
            }
            HookSpec::Range { kind, field } => {
                Ok((*kind, field.clone().unwrap_or_else(|| key.to_string())))
            }
        }
    }
}

/// Serializable mirror of [`Options`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionsConfig {
    /// Recognised operator tokens
    pub ops: Vec<String>,
    /// Key renames
    pub alias: IndexMap<String, String>,
    /// Dropped keys
    pub blacklist: Vec<String>,
    /// Allowed keys (empty allows all)
    pub whitelist: Vec<String>,
    /// Date range hooks by query key
    pub custom: IndexMap<String, HookSpec>,
    /// Coercion switches
    pub string: StringConfig,
    /// Pattern for single-valued keys
    pub key_regex: Option<String>,
    /// Pattern for unsafe value characters
    pub val_regex: Option<String>,
    /// Pattern for multi-valued keys
    pub arr_regex: Option<String>,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            ops: DEFAULT_TOKENS.iter().map(|t| (*t).to_string()).collect(),
            alias: IndexMap::new(),
            blacklist: Vec::new(),
            whitelist: Vec::new(),
            custom: IndexMap::new(),
            string: StringConfig::default(),
            key_regex: None,
            val_regex: None,
            arr_regex: None,
        }
    }
}

impl OptionsConfig {
    /// Convert into a builder so callers can add programmatic hooks
    pub fn into_builder(self) -> Result<OptionsBuilder> {
        let mut builder = Options::builder()
            .ops(self.ops)
            .to_boolean(self.string.to_boolean)
            .to_number(self.string.to_number);

        for (from, to) in self.alias {
            builder = builder.alias(from, to);
        }
        for key in self.blacklist {
            builder = builder.blacklist(key);
        }
        for key in self.whitelist {
            builder = builder.whitelist(key);
        }
        for (key, spec) in &self.custom {
            let (kind, field) = spec.resolve(key)?;
            builder = builder.range_hook(key.clone(), kind, field);
        }
        if let Some(pattern) = self.key_regex {
            builder = builder.key_pattern(pattern);
        }
        if let Some(pattern) = self.val_regex {
            builder = builder.value_pattern(pattern);
        }
        if let Some(pattern) = self.arr_regex {
            builder = builder.array_pattern(pattern);
        }

        Ok(builder)
    }

    /// Build immutable options
    pub fn build(self) -> Result<Options> {
        self.into_builder()?.build()
    }
}

impl TryFrom<OptionsConfig> for Options {
    type Error = Error;

    fn try_from(config: OptionsConfig) -> Result<Self> {
        config.build()
    }
}
