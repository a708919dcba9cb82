//! Declarative checks for configuration documents.
//!
//! Each check inspects one node of a [`serde_json::Value`] tree and fails with
//! the first [`SchemaError`] it finds. Plugins compose these checks in their
//! `validate_schema` hook; the order in which they are called decides which
//! violation is reported when a node is wrong in more than one way.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::SchemaError;

/// Runtime type of a configuration value, as far as validation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Mapping,
}

impl ValueType {
    /// Returns the type of `value`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Boolean,
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Mapping,
        }
    }

    /// Same as [`ValueType::of`], treating an absent value as `Null`.
    pub fn of_optional(value: Option<&Value>) -> Self {
        value.map(Self::of).unwrap_or(ValueType::Null)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            ValueType::Null => "null",
            ValueType::Boolean => "a boolean",
            ValueType::Number => "a number",
            ValueType::String => "a string",
            ValueType::Array => "an array",
            ValueType::Mapping => "a mapping",
        };
        f.write_str(description)
    }
}

/// Fails with [`SchemaError::MissingKey`] naming the first key of `required`
/// that `node` does not define.
pub fn expect_required_keys(required: &[&str], node: &Map<String, Value>) -> Result<(), SchemaError> {
    match required.iter().find(|key| !node.contains_key(**key)) {
        Some(key) => Err(SchemaError::MissingKey {
            key: key.to_string(),
            node: render(node),
        }),
        None => Ok(()),
    }
}

/// Fails with [`SchemaError::UnknownKey`] naming the first key of `node`, in
/// document order, that is not listed in `allowed`.
pub fn reject_extraneous_keys(allowed: &[&str], node: &Map<String, Value>) -> Result<(), SchemaError> {
    match node.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(SchemaError::UnknownKey {
            key: key.clone(),
            node: render(node),
        }),
        None => Ok(()),
    }
}

/// Accepts a boolean or an absent flag for `{namespace}.enabled`.
pub fn expect_enabled_config(namespace: &str, value: Option<&Value>) -> Result<(), SchemaError> {
    match ValueType::of_optional(value) {
        ValueType::Boolean | ValueType::Null => Ok(()),
        actual => Err(SchemaError::WrongType {
            key: format!("{}.enabled", namespace),
            expected: ValueType::Boolean.to_string(),
            actual: actual.to_string(),
            node: None,
        }),
    }
}

/// Requires `value` to be a sequence with at least one item and returns it.
pub fn expect_array_with_items<'a>(
    key: &str,
    value: Option<&'a Value>,
    node: &Map<String, Value>,
) -> Result<&'a Vec<Value>, SchemaError> {
    expect_type(key, value, ValueType::Array, Some(node))?;

    match value {
        Some(Value::Array(items)) if !items.is_empty() => Ok(items),
        _ => Err(SchemaError::EmptyArray {
            key: key.to_string(),
            node: render(node),
        }),
    }
}

/// Fails with [`SchemaError::WrongType`] unless `value` has the `expected`
/// type. `context` is the enclosing node, included in the error message.
pub fn expect_type(
    key: &str,
    value: Option<&Value>,
    expected: ValueType,
    context: Option<&Map<String, Value>>,
) -> Result<(), SchemaError> {
    let actual = ValueType::of_optional(value);
    if actual == expected {
        return Ok(());
    }

    Err(SchemaError::WrongType {
        key: key.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
        node: context.and_then(render),
    })
}

/// Requires `value` to be a mapping and returns it.
pub fn expect_mapping<'a>(
    key: &str,
    value: Option<&'a Value>,
    context: Option<&Map<String, Value>>,
) -> Result<&'a Map<String, Value>, SchemaError> {
    match value {
        Some(Value::Object(map)) => Ok(map),
        other => Err(SchemaError::WrongType {
            key: key.to_string(),
            expected: ValueType::Mapping.to_string(),
            actual: ValueType::of_optional(other).to_string(),
            node: context.and_then(render),
        }),
    }
}

fn render(node: &Map<String, Value>) -> Option<String> {
    serde_json::to_string_pretty(node).ok()
}
