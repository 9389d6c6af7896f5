//! Plain-text rendering of snapshots for terminal display.
//!
//! The renderer never switches over the state catalogue: any state text
//! prints verbatim, and the style hint is shown as a bracketed suffix.

use std::fmt::Write;

use crate::model::{ResourceSnapshot, ResourceState};

/// What to include when rendering a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Include URLs marked internal.
    pub show_internal_urls: bool,

    /// Include environment variables not declared by the resource definition.
    pub show_inherited_env: bool,
}

/// Render a state as `Text [style]`, or `unknown` when absent.
pub fn state(state: Option<&ResourceState>) -> String {
    match state {
        Some(s) => match s.style() {
            Some(style) => format!("{} [{style}]", s.text()),
            None => s.text().to_string(),
        },
        None => "unknown".to_string(),
    }
}

/// Render a full snapshot as a multi-line block.
pub fn snapshot(snapshot: &ResourceSnapshot, options: &RenderOptions) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}  {}", snapshot.resource_type(), state(snapshot.state()));
    if let Some(created) = snapshot.creation_timestamp() {
        let _ = writeln!(out, "  created: {created}");
    }
    if let Some(code) = snapshot.exit_code() {
        let _ = writeln!(out, "  exit code: {code}");
    }

    if !snapshot.properties().is_empty() {
        out.push_str("properties:\n");
        let width = snapshot
            .properties()
            .iter()
            .map(|p| p.name().chars().count())
            .max()
            .unwrap_or(0);
        for prop in snapshot.properties() {
            let _ = writeln!(out, "  {:<width$}  {}", prop.name(), prop.display_value());
        }
    }

    let urls: Vec<_> = snapshot
        .urls()
        .iter()
        .filter(|u| options.show_internal_urls || !u.is_internal())
        .collect();
    if !urls.is_empty() {
        out.push_str("urls:\n");
        for url in urls {
            let marker = if url.is_internal() { " (internal)" } else { "" };
            let _ = writeln!(out, "  {}  {}{marker}", url.name(), url.url());
        }
    }

    let env: Vec<_> = snapshot
        .environment_variables()
        .iter()
        .filter(|e| options.show_inherited_env || e.is_from_spec())
        .collect();
    if !env.is_empty() {
        out.push_str("env:\n");
        for var in env {
            let _ = writeln!(out, "  {}={}", var.name(), var.value().unwrap_or("<unset>"));
        }
    }

    out
}

/// One-line summary for history listings.
pub fn history_line(index: usize, snapshot: &ResourceSnapshot) -> String {
    let created = snapshot
        .creation_timestamp()
        .map_or_else(|| "-".to_string(), |t| t.to_string());
    let mut line = format!("{index:>4}  {created}  {}", state(snapshot.state()));
    if let Some(code) = snapshot.exit_code() {
        let _ = write!(line, "  exit {code}");
    }
    line
}
