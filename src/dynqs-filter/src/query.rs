//! Input query mapping
//!
//! A [`Query`] is the already-decoded form of a URL query string: an ordered
//! mapping from parameter name to a single value or a list of values.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// Suffix conventionally marking a multi-valued parameter
pub const ARRAY_SUFFIX: &str = "[]";

/// Value of one query parameter
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// Single-valued parameter
    String(String),
    /// Multi-valued parameter, in the order the values appeared
    Array(Vec<String>),
    /// Anything else (only reachable through JSON input). Default handling
    /// skips it; custom hooks still receive it.
    Other(JsonValue),
}

impl QueryValue {
    /// Whether this is a multi-valued parameter
    pub fn is_array(&self) -> bool {
        matches!(self, QueryValue::Array(_))
    }

    /// The single string value, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Textual form used by hooks that expect a single string.
    ///
    /// Numbers and booleans from JSON input are rendered as text; arrays and
    /// objects have no textual form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            QueryValue::String(s) => Some(s.clone()),
            QueryValue::Other(JsonValue::Number(n)) => Some(n.to_string()),
            QueryValue::Other(JsonValue::Bool(b)) => Some(b.to_string()),
            _ => None,
        }
    }

    fn from_json(value: JsonValue) -> Self {
        match value {
            JsonValue::String(s) => QueryValue::String(s),
            JsonValue::Array(items) => {
                let texts: Option<Vec<String>> = items.iter().map(json_scalar_text).collect();
                match texts {
                    Some(texts) => QueryValue::Array(texts),
                    None => QueryValue::Other(JsonValue::Array(items)),
                }
            }
            other => QueryValue::Other(other),
        }
    }
}

fn json_scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::String(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        QueryValue::String(s)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::Array(values)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        QueryValue::Array(values.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for QueryValue {
    fn from(values: [&str; N]) -> Self {
        QueryValue::Array(values.iter().map(|s| (*s).to_string()).collect())
    }
}

/// Ordered mapping of parameter name to value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    params: IndexMap<String, QueryValue>,
}

impl Query {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter, returning the builder
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.params.insert(key.into(), value.into());
    }

    /// Build a query from decoded `(name, value)` pairs.
    ///
    /// Names ending in `[]` always produce arrays. A plain name seen more than
    /// once is promoted to an array of all its values.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params: IndexMap<String, QueryValue> = IndexMap::new();

        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();
            let is_array_key = key.ends_with(ARRAY_SUFFIX);

            match params.get_mut(&key) {
                Some(QueryValue::Array(values)) => values.push(value),
                Some(existing) => {
                    let first = std::mem::replace(existing, QueryValue::Array(Vec::new()));
                    if let (QueryValue::String(first), QueryValue::Array(values)) = (first, existing)
                    {
                        values.push(first);
                        values.push(value);
                    }
                }
                None if is_array_key => {
                    params.insert(key, QueryValue::Array(vec![value]));
                }
                None => {
                    params.insert(key, QueryValue::String(value));
                }
            }
        }

        Self { params }
    }

    /// Decode an `application/x-www-form-urlencoded` query string.
    ///
    /// A leading `?` is ignored.
    pub fn from_query_string(input: &str) -> Self {
        let input = input.strip_prefix('?').unwrap_or(input);
        Self::from_pairs(url::form_urlencoded::parse(input.as_bytes()))
    }

    /// Build a query from a JSON object.
    ///
    /// Strings stay strings, arrays of scalars become arrays of their text,
    /// and everything else is kept as [`QueryValue::Other`]. Returns `None`
    /// when the input is not an object.
    pub fn from_json(value: JsonValue) -> Option<Self> {
        match value {
            JsonValue::Object(map) => Some(Self {
                params: map
                    .into_iter()
                    .map(|(k, v)| (k, QueryValue::from_json(v)))
                    .collect(),
            }),
            _ => None,
        }
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.params.get(key)
    }

    /// Iterate parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the query has no parameters
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
