//! Output filter types
//!
//! The assembled filter maps each canonical field name either to a bare value
//! (implicit equality) or to a [`Condition`] holding one or more operator
//! buckets.

use dynqs_parser::{Operator, Scalar};
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Value held under one operator of a condition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Operand {
    /// Single value
    Scalar(Scalar),
    /// Values accumulated across array elements (`in`, `not_contains`)
    List(Vec<Scalar>),
}

impl Operand {
    /// Convert to a JSON value
    pub fn to_json(&self) -> JsonValue {
        match self {
            Operand::Scalar(s) => s.to_json(),
            Operand::List(items) => JsonValue::Array(items.iter().map(Scalar::to_json).collect()),
        }
    }
}

impl From<Scalar> for Operand {
    fn from(s: Scalar) -> Self {
        Operand::Scalar(s)
    }
}

/// Operator buckets for one field, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Condition {
    buckets: IndexMap<Operator, Operand>,
}

impl Condition {
    /// Create an empty condition
    pub fn new() -> Self {
        Self::default()
    }

    /// Condition with a single operator bucket
    pub fn single(operator: Operator, value: impl Into<Scalar>) -> Self {
        let mut condition = Self::new();
        condition.set(operator, value);
        condition
    }

    /// Set an operator to a single value, replacing whatever was there
    pub fn set(&mut self, operator: Operator, value: impl Into<Scalar>) {
        self.buckets
            .insert(operator, Operand::Scalar(value.into()));
    }

    /// Append a value to an operator's list.
    ///
    /// A scalar already stored under the operator is replaced by a new list.
    pub fn push(&mut self, operator: Operator, value: impl Into<Scalar>) {
        let value = value.into();
        match self.buckets.get_mut(&operator) {
            Some(Operand::List(items)) => items.push(value),
            _ => {
                self.buckets.insert(operator, Operand::List(vec![value]));
            }
        }
    }

    /// Builder form of [`Condition::set`]
    #[must_use]
    pub fn with(mut self, operator: Operator, value: impl Into<Scalar>) -> Self {
        self.set(operator, value);
        self
    }

    /// Look up an operator bucket
    pub fn get(&self, operator: Operator) -> Option<&Operand> {
        self.buckets.get(&operator)
    }

    /// Iterate buckets in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (Operator, &Operand)> {
        self.buckets.iter().map(|(op, v)| (*op, v))
    }

    /// Number of operator buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether the condition holds no buckets
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Convert to a JSON object keyed by operator wire names
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.buckets
                .iter()
                .map(|(op, v)| (op.as_str().to_string(), v.to_json()))
                .collect(),
        )
    }
}

impl Serialize for Condition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (op, value) in &self.buckets {
            map.serialize_entry(op.as_str(), value)?;
        }
        map.end()
    }
}

/// Filter for one field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldFilter {
    /// Bare value, meaning equality
    Value(Scalar),
    /// Operator condition
    Condition(Condition),
}

impl FieldFilter {
    /// The condition, if this is not a bare value
    pub fn as_condition(&self) -> Option<&Condition> {
        match self {
            FieldFilter::Condition(c) => Some(c),
            FieldFilter::Value(_) => None,
        }
    }

    /// The bare value, if any
    pub fn as_value(&self) -> Option<&Scalar> {
        match self {
            FieldFilter::Value(v) => Some(v),
            FieldFilter::Condition(_) => None,
        }
    }

    /// Convert to a JSON value
    pub fn to_json(&self) -> JsonValue {
        match self {
            FieldFilter::Value(v) => v.to_json(),
            FieldFilter::Condition(c) => c.to_json(),
        }
    }
}

impl From<Condition> for FieldFilter {
    fn from(c: Condition) -> Self {
        FieldFilter::Condition(c)
    }
}

impl From<Scalar> for FieldFilter {
    fn from(v: Scalar) -> Self {
        FieldFilter::Value(v)
    }
}

/// The assembled filter: canonical field name to field filter
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Filter {
    fields: IndexMap<String, FieldFilter>,
}

impl Filter {
    /// Create an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a field filter, replacing any earlier entry for the field
    pub fn insert(&mut self, field: impl Into<String>, filter: impl Into<FieldFilter>) {
        self.fields.insert(field.into(), filter.into());
    }

    /// Look up a field
    pub fn get(&self, field: &str) -> Option<&FieldFilter> {
        self.fields.get(field)
    }

    /// Whether a field is present
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldFilter)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the filter is empty
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert to a JSON object
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl IntoIterator for Filter {
    type Item = (String, FieldFilter);
    type IntoIter = indexmap::map::IntoIter<String, FieldFilter>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
