//! Operator vocabulary
//!
//! [`Operator`] is the closed set of condition names understood by the
//! document-database client. [`OperatorSet`] is the configurable, ordered set
//! of operator tokens recognised at the start of a query value.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Condition operator emitted in the output filter.
///
/// The serialized names are a wire contract with the database client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Equal
    Eq,
    /// Not equal
    Ne,
    /// Greater than
    Gt,
    /// Greater than or equal
    Ge,
    /// Less than
    Lt,
    /// Less than or equal
    Le,
    /// String prefix match
    BeginsWith,
    /// Substring or set membership
    Contains,
    /// Value is one of a list
    In,
    /// Negated `contains`, accumulated as a list in array context
    NotContains,
    /// Attribute existence check
    NotNull,
}

impl Operator {
    /// All operators, in declaration order
    pub const ALL: [Operator; 11] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Gt,
        Operator::Ge,
        Operator::Lt,
        Operator::Le,
        Operator::BeginsWith,
        Operator::Contains,
        Operator::In,
        Operator::NotContains,
        Operator::NotNull,
    ];

    /// Wire name of the operator
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Gt => "gt",
            Operator::Ge => "ge",
            Operator::Lt => "lt",
            Operator::Le => "le",
            Operator::BeginsWith => "begins_with",
            Operator::Contains => "contains",
            Operator::In => "in",
            Operator::NotContains => "not_contains",
            Operator::NotNull => "not_null",
        }
    }

    /// Whether values for this operator accumulate into a list across
    /// array elements instead of overwriting each other
    pub fn is_list(self) -> bool {
        matches!(self, Operator::In | Operator::NotContains)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("unknown operator '{s}'"))
    }
}

/// Sentinel token enabling array membership (`in`) handling
pub const IN_TOKEN: &str = "in";

/// Sentinel token kept in the default list; it never matches a value prefix
pub const NULL_TOKEN: &str = "null";

/// Default operator tokens
pub const DEFAULT_TOKENS: [&str; 7] = ["!", "^", "$", ">", "<", IN_TOKEN, NULL_TOKEN];

/// Ordered set of recognised operator tokens.
///
/// Single-character entries are matched against the first character of a
/// value. The multi-character sentinels `in` and `null` never match a
/// character; they switch array membership and existence handling on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorSet {
    tokens: IndexSet<String>,
}

impl Default for OperatorSet {
    fn default() -> Self {
        Self::new(DEFAULT_TOKENS)
    }
}

impl OperatorSet {
    /// Build a set from tokens, keeping first-seen order
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the exact token is configured
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Whether the first character of `value` is a configured token
    pub fn recognizes(&self, value: &str) -> bool {
        value.chars().next().is_some_and(|c| {
            let mut buf = [0u8; 4];
            self.tokens.contains(c.encode_utf8(&mut buf) as &str)
        })
    }

    /// Whether array values are aggregated at all
    pub fn allows_in(&self) -> bool {
        self.contains(IN_TOKEN)
    }

    /// Iterate tokens in configured order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Number of configured tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no tokens are configured
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for OperatorSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
