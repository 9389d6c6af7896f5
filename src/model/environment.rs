//! Environment variables visible to a resource.

use serde::{Deserialize, Serialize};

/// An environment variable as seen on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentVariableSnapshot {
    name: String,

    /// Absent means unset or redacted, which is not the same as empty.
    #[serde(default)]
    value: Option<String>,

    /// Declared by the resource definition rather than inherited.
    is_from_spec: bool,
}

impl EnvironmentVariableSnapshot {
    pub fn new(name: impl Into<String>, value: Option<String>, is_from_spec: bool) -> Self {
        Self {
            name: name.into(),
            value,
            is_from_spec,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_from_spec(&self) -> bool {
        self.is_from_spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_differs_from_empty() {
        let unset = EnvironmentVariableSnapshot::new("TOKEN", None, true);
        let empty = EnvironmentVariableSnapshot::new("TOKEN", Some(String::new()), true);
        assert_ne!(unset, empty);
        assert_eq!(unset.value(), None);
        assert_eq!(empty.value(), Some(""));
    }

    #[test]
    fn wire_names_are_camel_case() {
        let var = EnvironmentVariableSnapshot::new("PATH", Some("/bin".into()), false);
        let json = serde_json::to_value(&var).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "PATH", "value": "/bin", "isFromSpec": false })
        );
    }
}
