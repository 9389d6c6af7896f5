//! Display properties attached to a snapshot.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named display property with an opaque value.
///
/// The value may be any JSON shape, or absent. Absent is stored as `null`, so
/// there is exactly one way to say it and it survives serialization.
/// Consumers should not assume a schema; [`display_value`](Self::display_value)
/// is the safe way to show it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePropertySnapshot {
    name: String,

    #[serde(default)]
    value: Value,
}

impl ResourcePropertySnapshot {
    pub fn new(name: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.unwrap_or(Value::Null),
        }
    }

    /// Convenience for the common case of a present value.
    pub fn with_value(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(name, Some(value.into()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value, or `None` when absent (`null`).
    pub fn value(&self) -> Option<&Value> {
        match &self.value {
            Value::Null => None,
            other => Some(other),
        }
    }

    /// Stringify the value without assuming its shape.
    ///
    /// Strings are shown bare, other scalars by their JSON text, arrays and
    /// objects as compact JSON. Absent and `null` both show as empty.
    pub fn display_value(&self) -> String {
        match &self.value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
