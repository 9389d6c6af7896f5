//! URLs exposed by a resource.

use serde::{Deserialize, Serialize};

/// A named URL exposed by a resource.
///
/// The URL text is carried as-is; nothing here parses or validates it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlSnapshot {
    name: String,
    url: String,

    /// Not meant for user-facing display.
    is_internal: bool,
}

impl UrlSnapshot {
    pub fn new(name: impl Into<String>, url: impl Into<String>, is_internal: bool) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            is_internal,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_internal(&self) -> bool {
        self.is_internal
    }
}
