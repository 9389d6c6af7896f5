//! Local persistence for resource snapshot history.
//!
//! Each resource gets its own directory under the log root:
//!
//! ```text
//! <root>/<resource-name>/
//!   snapshots.jsonl    # Append-only, one snapshot per line
//! ```
//!
//! Append order is the only ordering the log keeps. It does not compare
//! timestamps or reject out-of-order snapshots.

use std::{fs, io, path::PathBuf};

// Traits must be in scope for `.lines()` on BufReader and `.write_all()` on File.
use io::{BufRead, Write};

use tracing::{debug, warn};

use crate::model::ResourceSnapshot;

const SNAPSHOTS_FILE: &str = "snapshots.jsonl";

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("invalid resource name: {0:?}")]
    InvalidName(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// File-based, append-only snapshot history.
pub struct SnapshotLog {
    root: PathBuf,
}

impl SnapshotLog {
    /// Opens a log rooted at the given directory, creating it if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The default log root: `~/.berth/resources/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".berth").join("resources"))
    }

    /// Appends a snapshot to a resource's history, creating the resource on first use.
    pub fn append(&self, name: &str, snapshot: &ResourceSnapshot) -> Result<()> {
        let dir = self.resource_dir(name)?;
        fs::create_dir_all(&dir)?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(SNAPSHOTS_FILE))?;
        let mut line = serde_json::to_string(snapshot)?;
        line.push('\n');
        file.write_all(line.as_bytes())?;
        debug!(resource = name, state = ?snapshot.state().map(|s| s.text()), "appended snapshot");
        Ok(())
    }

    /// Loads a resource's full history, oldest first.
    pub fn load(&self, name: &str) -> Result<Vec<ResourceSnapshot>> {
        let path = self.resource_dir(name)?.join(SNAPSHOTS_FILE);
        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::ResourceNotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let reader = io::BufReader::new(file);
        let mut snapshots = Vec::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                warn!(resource = name, line = number + 1, "skipping blank line");
                continue;
            }
            snapshots.push(serde_json::from_str(&line)?);
        }
        debug!(resource = name, count = snapshots.len(), "loaded history");
        Ok(snapshots)
    }

    /// The most recent snapshot for a resource.
    pub fn latest(&self, name: &str) -> Result<ResourceSnapshot> {
        self.load(name)?
            .pop()
            .ok_or_else(|| StorageError::ResourceNotFound(name.to_string()))
    }

    /// Names of all resources with a history, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(names),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let entry = entry?;
            if entry.path().join(SNAPSHOTS_FILE).is_file()
                && let Some(name) = entry.file_name().to_str()
            {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Resource names map to a single directory under the root.
    fn resource_dir(&self, name: &str) -> Result<PathBuf> {
        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\']);
        if !valid {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::model::{ResourcePropertySnapshot, ResourceState, states, styles};

    fn test_log() -> (TempDir, SnapshotLog) {
        let dir = TempDir::new().unwrap();
        let log = SnapshotLog::new(dir.path().join("resources")).unwrap();
        (dir, log)
    }

    fn running() -> ResourceSnapshot {
        ResourceSnapshot::new(
            "container",
            vec![ResourcePropertySnapshot::with_value("image", "redis:7")],
        )
        .with_state(ResourceState::styled(states::RUNNING, styles::SUCCESS))
    }

    #[test]
    fn append_and_load_in_order() {
        let (_dir, log) = test_log();
        let first = running();
        let second = first
            .clone()
            .with_state(ResourceState::styled(states::EXITED, styles::ERROR))
            .with_exit_code(1);

        log.append("cache", &first).unwrap();
        log.append("cache", &second).unwrap();

        assert_eq!(log.load("cache").unwrap(), vec![first, second.clone()]);
        assert_eq!(log.latest("cache").unwrap(), second);
    }

    #[test]
    fn null_property_value_survives_the_log() {
        let (_dir, log) = test_log();
        let snapshot = ResourceSnapshot::new(
            "container",
            vec![
                ResourcePropertySnapshot::with_value("x", serde_json::Value::Null),
                ResourcePropertySnapshot::new("y", None),
            ],
        );
        log.append("web", &snapshot).unwrap();
        assert_eq!(log.latest("web").unwrap(), snapshot);
    }

    #[test]
    fn load_unknown_resource_fails() {
        let (_dir, log) = test_log();
        let err = log.load("nope").unwrap_err();
        assert!(matches!(err, StorageError::ResourceNotFound(name) if name == "nope"));
    }

    #[test]
    fn invalid_names_are_rejected() {
        let (_dir, log) = test_log();
        for name in ["", ".", "..", "a/b", "a\\b"] {
            let err = log.append(name, &running()).unwrap_err();
            assert!(matches!(err, StorageError::InvalidName(_)), "{name:?}");
        }
    }

    #[test]
    fn list_is_sorted_and_ignores_stray_dirs() {
        let (dir, log) = test_log();
        log.append("web", &running()).unwrap();
        log.append("api", &running()).unwrap();
        fs::create_dir_all(dir.path().join("resources").join("empty")).unwrap();

        assert_eq!(log.list().unwrap(), ["api", "web"]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let (dir, log) = test_log();
        log.append("web", &running()).unwrap();
        let path = dir.path().join("resources").join("web").join(SNAPSHOTS_FILE);
        let mut file = fs::OpenOptions::new().append(true).open(path).unwrap();
        file.write_all(b"\n").unwrap();

        assert_eq!(log.load("web").unwrap().len(), 1);
    }
}
