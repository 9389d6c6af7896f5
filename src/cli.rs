//! CLI interface for Berth.
//!
//! Every subcommand is non-interactive: arguments in, plain text out.
//! Snapshot files are JSON documents in the wire shape of
//! [`ResourceSnapshot`](crate::model::ResourceSnapshot).

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::diff;
use crate::model::ResourceSnapshot;
use crate::render::{self, RenderOptions};
use crate::storage::{SnapshotLog, StorageError};

/// Exit status of `berth terminal` when the resource is still active.
const EXIT_ACTIVE: u8 = 2;

/// Berth: record and inspect resource snapshots.
#[derive(Debug, Parser)]
#[command(name = "berth", version)]
pub struct Cli {
    /// Snapshot log root. Overrides `BERTH_LOG_ROOT` and `log-root` in config.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Include internal URLs when rendering.
    #[arg(long, global = true)]
    internal: bool,

    /// Include inherited environment variables when rendering.
    #[arg(long, global = true)]
    inherited: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a snapshot file.
    Show {
        /// Path to a snapshot JSON file.
        file: PathBuf,
    },

    /// Append a snapshot file to a resource's history.
    Record {
        /// Resource name.
        resource: String,

        /// Path to a snapshot JSON file.
        file: PathBuf,
    },

    /// List a resource's recorded snapshots, oldest first.
    History {
        /// Resource name.
        resource: String,
    },

    /// Render the latest snapshot of one resource, or of every resource.
    Status {
        /// Resource name. All resources when omitted.
        resource: Option<String>,
    },

    /// Show what changed between a resource's last two snapshots.
    Diff {
        /// Resource name.
        resource: String,
    },

    /// Report whether a resource has reached a terminal state.
    ///
    /// Exits 0 when terminal, 2 when still active.
    Terminal {
        /// Resource name.
        resource: String,
    },
}

/// Run a parsed command, returning an error message on failure.
pub fn run(cli: Cli, config: &Config) -> Result<ExitCode, String> {
    let mut options = config.render_options();
    options.show_internal_urls |= cli.internal;
    options.show_inherited_env |= cli.inherited;
    let root = cli.root.as_deref();

    match cli.command {
        Command::Show { file } => print!("{}", cmd_show(&file, &options)?),
        Command::Record { resource, file } => {
            cmd_record(&open_log(config, root)?, &resource, &file)?;
        }
        Command::History { resource } => {
            print!("{}", cmd_history(&open_log(config, root)?, &resource)?);
        }
        Command::Status { resource } => {
            let log = open_log(config, root)?;
            print!("{}", cmd_status(&log, resource.as_deref(), &options)?);
        }
        Command::Diff { resource } => {
            print!("{}", cmd_diff(&open_log(config, root)?, &resource)?);
        }
        Command::Terminal { resource } => {
            if !cmd_terminal(&open_log(config, root)?, &resource)? {
                println!("active");
                return Ok(ExitCode::from(EXIT_ACTIVE));
            }
            println!("terminal");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn open_log(config: &Config, root: Option<&Path>) -> Result<SnapshotLog, String> {
    let root = config
        .resolve_log_root(root)
        .ok_or("could not determine home directory; pass --root")?;
    debug!(root = %root.display(), "opening snapshot log");
    SnapshotLog::new(&root)
        .map_err(|e| format!("failed to open snapshot log at {}: {e}", root.display()))
}

/// Read and parse a snapshot file.
fn read_snapshot(file: &Path) -> Result<ResourceSnapshot, String> {
    let json =
        fs::read_to_string(file).map_err(|e| format!("failed to read {}: {e}", file.display()))?;
    serde_json::from_str(&json).map_err(|e| format!("invalid snapshot in {}: {e}", file.display()))
}

fn cmd_show(file: &Path, options: &RenderOptions) -> Result<String, String> {
    let snapshot = read_snapshot(file)?;
    Ok(render::snapshot(&snapshot, options))
}

fn cmd_record(log: &SnapshotLog, resource: &str, file: &Path) -> Result<(), String> {
    let snapshot = read_snapshot(file)?;
    log.append(resource, &snapshot)
        .map_err(|e| format!("failed to record snapshot: {e}"))?;
    info!(resource, state = %render::state(snapshot.state()), "recorded snapshot");
    Ok(())
}

fn cmd_history(log: &SnapshotLog, resource: &str) -> Result<String, String> {
    let snapshots = log.load(resource).map_err(|e| e.to_string())?;
    let mut out = String::new();
    for (index, snapshot) in snapshots.iter().enumerate() {
        out.push_str(&render::history_line(index, snapshot));
        out.push('\n');
    }
    Ok(out)
}

fn cmd_status(
    log: &SnapshotLog,
    resource: Option<&str>,
    options: &RenderOptions,
) -> Result<String, String> {
    let mut out = String::new();

    if let Some(name) = resource {
        let snapshot = log.latest(name).map_err(|e| e.to_string())?;
        let _ = writeln!(out, "== {name}");
        out.push_str(&render::snapshot(&snapshot, options));
        return Ok(out);
    }

    for name in log.list().map_err(|e| e.to_string())? {
        let snapshot = match log.latest(&name) {
            Ok(snapshot) => snapshot,
            Err(StorageError::ResourceNotFound(_)) => {
                warn!(resource = %name, "no snapshots recorded, skipping");
                continue;
            }
            Err(e) => return Err(e.to_string()),
        };
        let _ = writeln!(out, "== {name}");
        out.push_str(&render::snapshot(&snapshot, options));
    }
    Ok(out)
}

fn cmd_diff(log: &SnapshotLog, resource: &str) -> Result<String, String> {
    let snapshots = log.load(resource).map_err(|e| e.to_string())?;
    let [.., before, after] = snapshots.as_slice() else {
        return Err(format!("{resource} has fewer than two snapshots"));
    };

    let changes = diff::diff(before, after);
    if changes.is_empty() {
        return Ok("no changes\n".to_string());
    }
    Ok(changes.iter().map(|c| format!("{c}\n")).collect())
}

fn cmd_terminal(log: &SnapshotLog, resource: &str) -> Result<bool, String> {
    let snapshot = log.latest(resource).map_err(|e| e.to_string())?;
    Ok(snapshot.is_terminal())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::model::{ResourcePropertySnapshot, ResourceState, states, styles};

    fn write_snapshot(dir: &TempDir, file: &str, snapshot: &ResourceSnapshot) -> PathBuf {
        let path = dir.path().join(file);
        fs::write(&path, serde_json::to_string_pretty(snapshot).unwrap()).unwrap();
        path
    }

    fn running() -> ResourceSnapshot {
        ResourceSnapshot::new(
            "container",
            vec![ResourcePropertySnapshot::with_value("image", "nginx:latest")],
        )
        .with_state(ResourceState::styled(states::RUNNING, styles::SUCCESS))
    }

    fn exited() -> ResourceSnapshot {
        running()
            .with_state(ResourceState::styled(states::EXITED, styles::ERROR))
            .with_exit_code(1)
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["berth", "status", "web", "--root", "/tmp/x", "--internal"])
            .unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/x")));
        assert!(cli.internal);
        assert!(matches!(cli.command, Command::Status { resource: Some(ref r) } if r == "web"));
    }

    #[test]
    fn record_then_inspect() {
        let dir = TempDir::new().unwrap();
        let log = SnapshotLog::new(dir.path().join("log")).unwrap();
        let first = write_snapshot(&dir, "a.json", &running());
        let second = write_snapshot(&dir, "b.json", &exited());

        cmd_record(&log, "web", &first).unwrap();
        assert!(!cmd_terminal(&log, "web").unwrap());

        cmd_record(&log, "web", &second).unwrap();
        assert!(cmd_terminal(&log, "web").unwrap());

        assert_eq!(
            cmd_diff(&log, "web").unwrap(),
            "state: Running (success) -> Exited (error)\nexit code: - -> 1\n"
        );
        assert_eq!(
            cmd_history(&log, "web").unwrap(),
            "   0  -  Running [success]\n   1  -  Exited [error]  exit 1\n"
        );
        assert!(
            cmd_status(&log, None, &RenderOptions::default())
                .unwrap()
                .starts_with("== web\ncontainer  Exited [error]\n")
        );
    }

    #[test]
    fn status_skips_resources_without_snapshots() {
        let dir = TempDir::new().unwrap();
        let log = SnapshotLog::new(dir.path().join("log")).unwrap();
        let file = write_snapshot(&dir, "a.json", &running());
        cmd_record(&log, "web", &file).unwrap();

        let empty = dir.path().join("log").join("idle");
        fs::create_dir_all(&empty).unwrap();
        fs::write(empty.join("snapshots.jsonl"), "\n\n").unwrap();

        let text = cmd_status(&log, None, &RenderOptions::default()).unwrap();
        assert!(text.starts_with("== web\ncontainer  Running [success]\n"));
        assert!(!text.contains("idle"));

        // Asking for it by name still reports the problem.
        assert!(cmd_status(&log, Some("idle"), &RenderOptions::default()).is_err());
    }

    #[test]
    fn diff_needs_two_snapshots() {
        let dir = TempDir::new().unwrap();
        let log = SnapshotLog::new(dir.path().join("log")).unwrap();
        let file = write_snapshot(&dir, "a.json", &running());
        cmd_record(&log, "web", &file).unwrap();

        let err = cmd_diff(&log, "web").unwrap_err();
        assert!(err.contains("fewer than two"));
    }

    #[test]
    fn record_rejects_incomplete_snapshot() {
        let dir = TempDir::new().unwrap();
        let log = SnapshotLog::new(dir.path().join("log")).unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"properties": []}"#).unwrap();

        let err = cmd_record(&log, "web", &path).unwrap_err();
        assert!(err.contains("missing field `resourceType`"));
        assert!(log.list().unwrap().is_empty());
    }

    #[test]
    fn show_renders_file() {
        let dir = TempDir::new().unwrap();
        let file = write_snapshot(&dir, "a.json", &exited());
        let text = cmd_show(&file, &RenderOptions::default()).unwrap();
        assert_eq!(
            text,
            "container  Exited [error]\n  exit code: 1\nproperties:\n  image  nginx:latest\n"
        );
    }
}
