//! Attribute bags: the per-overlap mapping of field names to values.
//!
//! Values are resolved once, when the bag is built, into a [`FieldValue`]:
//! either a single scalar or an ordered list of scalars. Rendering never has
//! to inspect the shape of a value again.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::VartabError;
use crate::Result;

/// A single annotation value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A string or number, kept in its display form
    Scalar(String),
    /// An ordered list of scalars, rendered comma-joined
    Sequence(Vec<String>),
}

impl FieldValue {
    /// Resolve a JSON value for `field`.
    ///
    /// Returns `Ok(None)` for `null`, which marks the field as not defined.
    /// Objects and nested lists are rejected with
    /// [`VartabError::InvalidFieldValue`].
    pub fn from_json(field: &str, value: &Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Array(items) => {
                let mut elements = Vec::with_capacity(items.len());
                for item in items {
                    match scalar_text(item) {
                        Some(text) => elements.push(text),
                        None => {
                            return Err(VartabError::InvalidFieldValue {
                                field: field.to_string(),
                                found: format!("list containing {}", json_kind(item)),
                            })
                        }
                    }
                }
                Ok(Some(FieldValue::Sequence(elements)))
            }
            other => match scalar_text(other) {
                Some(text) => Ok(Some(FieldValue::Scalar(text))),
                None => Err(VartabError::InvalidFieldValue {
                    field: field.to_string(),
                    found: json_kind(other).to_string(),
                }),
            },
        }
    }

    /// Whether this value is a sequence.
    pub fn is_sequence(&self) -> bool {
        matches!(self, FieldValue::Sequence(_))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Scalar(s) => f.write_str(s),
            FieldValue::Sequence(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Scalar(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Scalar(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::Sequence(items)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::Sequence(items.into_iter().map(String::from).collect())
    }
}

macro_rules! scalar_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FieldValue {
                fn from(n: $t) -> Self {
                    FieldValue::Scalar(n.to_string())
                }
            }
        )*
    };
}

scalar_from_number!(i32, i64, u32, u64, f64);

/// Display form of a JSON scalar, or `None` for non-scalars.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Field name to value mapping for one variant-allele/feature overlap.
///
/// Keys are compared as exact strings; no case normalisation happens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeBag {
    fields: BTreeMap<String, FieldValue>,
}

impl AttributeBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bag from a JSON object.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            VartabError::InvalidRecord(format!("expected an object, found {}", json_kind(value)))
        })?;

        let mut bag = Self::new();
        for (name, raw) in object {
            if let Some(value) = FieldValue::from_json(name, raw)? {
                bag.fields.insert(name.clone(), value);
            }
        }
        Ok(bag)
    }

    /// Parse a bag from JSON text (one record).
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json(&value)
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Remove a field, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for AttributeBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = Self::new();
        for (name, value) in iter {
            bag.insert(name, value);
        }
        bag
    }
}

impl<'a> IntoIterator for &'a AttributeBag {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl<'de> Deserialize<'de> for AttributeBag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        AttributeBag::from_json(&value).map_err(serde::de::Error::custom)
    }
}
