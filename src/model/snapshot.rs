//! Resource snapshot: everything observable about a resource at one moment.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{EnvironmentVariableSnapshot, ResourcePropertySnapshot, ResourceState, UrlSnapshot};

/// An immutable, point-in-time description of a resource.
///
/// A snapshot is never changed in place. A state transition produces a new
/// snapshot through the consuming `with_*` methods, so the previous value
/// can still be read (or diffed against) alongside the new one.
///
/// Sequences keep insertion order; it drives display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSnapshot {
    resource_type: String,

    properties: Vec<ResourcePropertySnapshot>,

    /// Absent when unknown or not yet created.
    #[serde(default)]
    creation_timestamp: Option<Timestamp>,

    /// Absent until the state has been determined.
    #[serde(default)]
    state: Option<ResourceState>,

    /// Absent while running, or when the exit code is unknown.
    #[serde(default)]
    exit_code: Option<i32>,

    #[serde(default)]
    environment_variables: Vec<EnvironmentVariableSnapshot>,

    #[serde(default)]
    urls: Vec<UrlSnapshot>,
}

impl ResourceSnapshot {
    /// A snapshot with only the required fields set.
    pub fn new(
        resource_type: impl Into<String>,
        properties: Vec<ResourcePropertySnapshot>,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            properties,
            creation_timestamp: None,
            state: None,
            exit_code: None,
            environment_variables: Vec::new(),
            urls: Vec::new(),
        }
    }

    // ── Accessors ──

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn properties(&self) -> &[ResourcePropertySnapshot] {
        &self.properties
    }

    pub fn creation_timestamp(&self) -> Option<Timestamp> {
        self.creation_timestamp
    }

    pub fn state(&self) -> Option<&ResourceState> {
        self.state.as_ref()
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub fn environment_variables(&self) -> &[EnvironmentVariableSnapshot] {
        &self.environment_variables
    }

    pub fn urls(&self) -> &[UrlSnapshot] {
        &self.urls
    }

    /// First property with the given name, if any.
    pub fn property(&self, name: &str) -> Option<&ResourcePropertySnapshot> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Whether the current state is terminal. No state is not terminal.
    pub fn is_terminal(&self) -> bool {
        self.state.as_ref().is_some_and(ResourceState::is_terminal)
    }

    // ── Copy-with-changes ──

    #[must_use]
    pub fn with_properties(self, properties: Vec<ResourcePropertySnapshot>) -> Self {
        Self { properties, ..self }
    }

    #[must_use]
    pub fn with_creation_timestamp(self, creation_timestamp: impl Into<Option<Timestamp>>) -> Self {
        Self {
            creation_timestamp: creation_timestamp.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_state(self, state: impl Into<Option<ResourceState>>) -> Self {
        Self {
            state: state.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_exit_code(self, exit_code: impl Into<Option<i32>>) -> Self {
        Self {
            exit_code: exit_code.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_environment_variables(
        self,
        environment_variables: Vec<EnvironmentVariableSnapshot>,
    ) -> Self {
        Self {
            environment_variables,
            ..self
        }
    }

    #[must_use]
    pub fn with_urls(self, urls: Vec<UrlSnapshot>) -> Self {
        Self { urls, ..self }
    }
}
