//! Well-known resource state names.
//!
//! Advisory, not exhaustive: `ResourceState::text` accepts any string.

pub const HIDDEN: &str = "Hidden";
pub const STARTING: &str = "Starting";
pub const RUNNING: &str = "Running";
pub const FAILED_TO_START: &str = "FailedToStart";
pub const STOPPING: &str = "Stopping";
pub const EXITED: &str = "Exited";
pub const FINISHED: &str = "Finished";
pub const WAITING: &str = "Waiting";

/// States after which a resource is not expected to transition further.
pub const TERMINAL: [&str; 3] = [FINISHED, FAILED_TO_START, EXITED];

/// Whether `text` names a terminal state.
///
/// Exact, case-sensitive membership in [`TERMINAL`].
pub fn is_terminal(text: &str) -> bool {
    TERMINAL.iter().any(|t| *t == text)
}
