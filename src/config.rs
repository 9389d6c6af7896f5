//! Berth configuration.
//!
//! Loaded from `~/.berth/config.toml`. Every key is optional and a missing
//! file means defaults.

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::{Deserialize, Serialize};

use crate::render::RenderOptions;

/// Environment variable that overrides `log-root`.
pub const LOG_ROOT_ENV: &str = "BERTH_LOG_ROOT";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Berth configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Where snapshot histories are kept.
    /// Defaults to `~/.berth/resources`.
    pub log_root: Option<PathBuf>,

    pub show_internal_urls: bool,

    pub show_inherited_env: bool,
}

impl Config {
    /// Load config from `~/.berth/config.toml`, or defaults if there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The config file path: `~/.berth/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".berth").join("config.toml"))
    }

    /// Resolve the log root: explicit flag, then `BERTH_LOG_ROOT`, then
    /// `log-root`, then the built-in default.
    pub fn resolve_log_root(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        self.resolve_log_root_with(explicit, env::var(LOG_ROOT_ENV).ok())
    }

    /// [`resolve_log_root`](Self::resolve_log_root) with the environment
    /// value supplied by the caller. An empty value counts as unset.
    pub fn resolve_log_root_with(
        &self,
        explicit: Option<&Path>,
        env_root: Option<String>,
    ) -> Option<PathBuf> {
        if let Some(root) = explicit {
            return Some(root.to_path_buf());
        }

        if let Some(root) = env_root
            && !root.is_empty()
        {
            return Some(PathBuf::from(root));
        }

        self.log_root
            .clone()
            .or_else(crate::storage::SnapshotLog::default_root)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_internal_urls: self.show_internal_urls,
            show_inherited_env: self.show_inherited_env,
        }
    }
}
