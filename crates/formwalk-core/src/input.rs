//! # Form Input — Decoding Submissions
//!
//! Builds the raw input map a form is validated against. The core never
//! sees transport details; it only needs the decoded tree. Three sources
//! are supported:
//!
//! - flat `(name, value)` pairs with bracket names, as produced by an
//!   HTML form ([`FormInput::from_pairs`]);
//! - an `application/x-www-form-urlencoded` body
//!   ([`FormInput::from_urlencoded`]);
//! - a JSON object ([`FormInput::from_json`]).

use serde_json::Value;

use crate::error::FormwalkError;
use crate::map::{Entry, NestedMap};
use crate::path::FieldPath;

/// The raw submission: string leaves under bracket-path keys.
pub type FormInput = NestedMap<String>;

impl NestedMap<String> {
    /// Build input from `(name, value)` pairs.
    ///
    /// `name[]` appends at the next integer key; repeated literal names
    /// overwrite. Pairs with an empty name are skipped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut input = Self::new();
        for (name, value) in pairs {
            let path = FieldPath::parse(name.as_ref());
            if path.is_empty() {
                continue;
            }
            input.write_value(&path, value.into());
        }
        input
    }

    /// Decode an urlencoded body.
    pub fn from_urlencoded(body: &str) -> Self {
        Self::from_pairs(url::form_urlencoded::parse(body.trim().as_bytes()))
    }

    /// Convert a JSON object.
    ///
    /// Arrays become maps keyed `"0"`, `"1"`, …; numbers are stringified,
    /// `true` is `"1"`, `false` and `null` are `""`.
    ///
    /// # Errors
    ///
    /// Returns [`FormwalkError::InvalidInput`] if `value` is not an object.
    pub fn from_json(value: Value) -> Result<Self, FormwalkError> {
        let Value::Object(fields) = value else {
            return Err(FormwalkError::InvalidInput(
                "submission root must be an object".to_string(),
            ));
        };
        Ok(object_map(fields))
    }

    /// String leaf at `path`.
    pub fn text_at(&self, path: &FieldPath) -> Option<&str> {
        self.value_at(path).map(String::as_str)
    }
}

fn json_entry(value: Value) -> Entry<String> {
    match value {
        Value::Null => Entry::Value(String::new()),
        Value::Bool(true) => Entry::Value("1".to_string()),
        Value::Bool(false) => Entry::Value(String::new()),
        Value::Number(n) => Entry::Value(n.to_string()),
        Value::String(s) => Entry::Value(s),
        Value::Array(items) => {
            let mut map = NestedMap::new();
            for (i, item) in items.into_iter().enumerate() {
                map.insert(i.to_string(), json_entry(item));
            }
            Entry::Map(map)
        }
        Value::Object(fields) => Entry::Map(object_map(fields)),
    }
}

fn object_map(fields: serde_json::Map<String, Value>) -> NestedMap<String> {
    let mut map = NestedMap::new();
    for (key, item) in fields {
        map.insert(key, json_entry(item));
    }
    map
}
