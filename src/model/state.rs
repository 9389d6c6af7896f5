//! Resource state: a free-text state name plus an optional style hint.

use serde::{Deserialize, Serialize};

use super::states;

/// The current state of a resource, e.g. `Running` styled as `success`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceState {
    text: String,

    /// Absent means neutral styling.
    #[serde(default)]
    style: Option<String>,
}

impl ResourceState {
    /// A state with no style hint.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    /// A state with a style hint, usually one of [`super::styles`].
    pub fn styled(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Some(style.into()),
        }
    }

    /// Build a state from a bare, possibly absent, string.
    ///
    /// `Some("Running")` gives an unstyled `Running` state; `None` gives no state.
    pub fn from_text(text: Option<&str>) -> Option<Self> {
        text.map(Self::new)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Whether this state is one of [`states::TERMINAL`].
    pub fn is_terminal(&self) -> bool {
        states::is_terminal(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::styles;

    #[test]
    fn from_text_present() {
        let state = ResourceState::from_text(Some("Running")).unwrap();
        assert_eq!(state.text(), "Running");
        assert_eq!(state.style(), None);
    }

    #[test]
    fn from_text_absent() {
        assert_eq!(ResourceState::from_text(None), None);
    }

    #[test]
    fn custom_text_is_kept_verbatim() {
        let state = ResourceState::styled("Draining", styles::WARN);
        assert_eq!(state.text(), "Draining");
        assert_eq!(state.style(), Some("warn"));
        assert!(!state.is_terminal());
    }

    #[test]
    fn style_participates_in_equality() {
        assert_ne!(
            ResourceState::new("Running"),
            ResourceState::styled("Running", styles::SUCCESS)
        );
    }

    #[test]
    fn style_may_be_omitted_on_the_wire() {
        let state: ResourceState = serde_json::from_str(r#"{"text":"Exited"}"#).unwrap();
        assert_eq!(state, ResourceState::new("Exited"));
        assert!(state.is_terminal());
    }

    #[test]
    fn text_is_required_on_the_wire() {
        let err = serde_json::from_str::<ResourceState>(r#"{"style":"info"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `text`"));
    }
}
