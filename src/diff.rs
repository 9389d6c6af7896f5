//! Before/after comparison of two snapshots of the same resource.
//!
//! Pure: reads two snapshots, reports what differs. Sequence entries are
//! matched by name and occurrence, so duplicate names pair up in order.

use std::fmt;

use jiff::Timestamp;

use crate::model::{ResourceSnapshot, ResourceState};

/// Which named sequence of a snapshot an entry change belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Properties,
    EnvironmentVariables,
    Urls,
}

impl Section {
    fn label(self) -> &'static str {
        match self {
            Section::Properties => "property",
            Section::EnvironmentVariables => "env",
            Section::Urls => "url",
        }
    }
}

/// What happened to a named entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryChange {
    Added,
    Removed,
    Changed,
}

/// A single difference between two snapshots.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    ResourceType {
        before: String,
        after: String,
    },

    State {
        before: Option<ResourceState>,
        after: Option<ResourceState>,
    },

    ExitCode {
        before: Option<i32>,
        after: Option<i32>,
    },

    CreationTimestamp {
        before: Option<Timestamp>,
        after: Option<Timestamp>,
    },

    Entry {
        section: Section,
        name: String,
        change: EntryChange,
    },

    /// Same entries, different order.
    Reordered { section: Section },
}

/// Compare two snapshots. Empty when they are equal.
pub fn diff(before: &ResourceSnapshot, after: &ResourceSnapshot) -> Vec<Change> {
    let mut changes = Vec::new();

    if before.resource_type() != after.resource_type() {
        changes.push(Change::ResourceType {
            before: before.resource_type().to_string(),
            after: after.resource_type().to_string(),
        });
    }
    if before.state() != after.state() {
        changes.push(Change::State {
            before: before.state().cloned(),
            after: after.state().cloned(),
        });
    }
    if before.exit_code() != after.exit_code() {
        changes.push(Change::ExitCode {
            before: before.exit_code(),
            after: after.exit_code(),
        });
    }
    if before.creation_timestamp() != after.creation_timestamp() {
        changes.push(Change::CreationTimestamp {
            before: before.creation_timestamp(),
            after: after.creation_timestamp(),
        });
    }

    diff_entries(
        Section::Properties,
        before.properties(),
        after.properties(),
        |p| p.name(),
        &mut changes,
    );
    diff_entries(
        Section::EnvironmentVariables,
        before.environment_variables(),
        after.environment_variables(),
        |e| e.name(),
        &mut changes,
    );
    diff_entries(
        Section::Urls,
        before.urls(),
        after.urls(),
        |u| u.name(),
        &mut changes,
    );

    changes
}

/// Key each entry by `(name, nth occurrence of that name)`.
fn keyed<'a, T>(items: &'a [T], name: impl Fn(&T) -> &str) -> Vec<((&'a str, usize), &'a T)> {
    let mut out: Vec<((&'a str, usize), &'a T)> = Vec::with_capacity(items.len());
    for item in items {
        let n = name(item);
        let occurrence = out.iter().filter(|((k, _), _)| *k == n).count();
        out.push(((n, occurrence), item));
    }
    out
}

fn diff_entries<T: PartialEq>(
    section: Section,
    before: &[T],
    after: &[T],
    name: impl Fn(&T) -> &str,
    changes: &mut Vec<Change>,
) {
    if before == after {
        return;
    }
    if is_permutation(before, after) {
        changes.push(Change::Reordered { section });
        return;
    }

    let old = keyed(before, &name);
    let new = keyed(after, &name);

    for (key, item) in &old {
        match new.iter().find(|(k, _)| k == key) {
            None => changes.push(entry(section, key.0, EntryChange::Removed)),
            Some((_, other)) if other != item => {
                changes.push(entry(section, key.0, EntryChange::Changed));
            }
            Some(_) => {}
        }
    }
    for (key, _) in &new {
        if !old.iter().any(|(k, _)| k == key) {
            changes.push(entry(section, key.0, EntryChange::Added));
        }
    }
}

/// Whether `after` holds exactly the items of `before`, in any order.
fn is_permutation<T: PartialEq>(before: &[T], after: &[T]) -> bool {
    if before.len() != after.len() {
        return false;
    }
    let mut used = vec![false; after.len()];
    before.iter().all(|item| {
        let slot = (0..after.len()).find(|&i| !used[i] && after[i] == *item);
        match slot {
            Some(i) => {
                used[i] = true;
                true
            }
            None => false,
        }
    })
}

fn entry(section: Section, name: &str, change: EntryChange) -> Change {
    Change::Entry {
        section,
        name: name.to_string(),
        change,
    }
}

fn state_text(state: Option<&ResourceState>) -> String {
    match state {
        Some(s) => match s.style() {
            Some(style) => format!("{} ({style})", s.text()),
            None => s.text().to_string(),
        },
        None => "-".to_string(),
    }
}

fn optional<T: fmt::Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "-".to_string(), ToString::to_string)
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::ResourceType { before, after } => write!(f, "type: {before} -> {after}"),
            Change::State { before, after } => write!(
                f,
                "state: {} -> {}",
                state_text(before.as_ref()),
                state_text(after.as_ref())
            ),
            Change::ExitCode { before, after } => write!(
                f,
                "exit code: {} -> {}",
                optional(before.as_ref()),
                optional(after.as_ref())
            ),
            Change::CreationTimestamp { before, after } => write!(
                f,
                "created: {} -> {}",
                optional(before.as_ref()),
                optional(after.as_ref())
            ),
            Change::Entry {
                section,
                name,
                change,
            } => {
                let sign = match change {
                    EntryChange::Added => '+',
                    EntryChange::Removed => '-',
                    EntryChange::Changed => '~',
                };
                write!(f, "{sign} {} {name}", section.label())
            }
            Change::Reordered { section } => write!(f, "{} order changed", section.label()),
        }
    }
}
