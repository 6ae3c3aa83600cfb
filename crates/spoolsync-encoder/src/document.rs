//! Ordered vendor profile documents
//!
//! The consuming application expects most values wrapped in single-element
//! lists; a handful of bookkeeping keys are plain strings. Keys keep their
//! insertion order through serialization so repeated encodings of the same
//! record are byte-identical.

use serde_json::{Map, Value};

/// An ordered JSON document in the vendor profile format
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDocument {
    fields: Map<String, Value>,
}

impl ProfileDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value using the vendor's single-element list wrapping
    pub fn push_value<S: Into<String>>(&mut self, key: &str, value: S) {
        self.fields.insert(
            key.to_string(),
            Value::Array(vec![Value::String(value.into())]),
        );
    }

    /// Append a multi-element list value
    pub fn push_list<I, S>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.insert(
            key.to_string(),
            Value::Array(values.into_iter().map(|v| Value::String(v.into())).collect()),
        );
    }

    /// Append an unwrapped plain string value
    pub fn push_plain<S: Into<String>>(&mut self, key: &str, value: S) {
        self.fields
            .insert(key.to_string(), Value::String(value.into()));
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Whether the document contains a key
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of keys in the document
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the document is empty
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Serialize to pretty-printed JSON with keys in insertion order
    pub fn to_json_pretty(&self) -> String {
        // String-valued maps cannot fail to serialize
        serde_json::to_string_pretty(&self.fields).expect("profile document serializes to JSON")
    }
}
