//! Configuration management for routescope.
//!
//! Settings are resolved in layers, later layers winning:
//!
//! 1. Built-in defaults
//! 2. `routescope.yaml` (or an explicit `--config` file)
//! 3. Environment variables (`ROUTESCOPE_GRAPH_FILE`, `ROUTESCOPE_MAX_PATHS`,
//!    `ROUTESCOPE_MAX_DEPTH`)
//! 4. Command-line flags (applied by the CLI)
//!
//! A relative `graph-file` in a config file resolves against that file's
//! directory; from the environment or `--graph` it resolves against the
//! working directory.
//!
//! ```yaml
//! graph-file: graph.json
//! limits:
//!   max-paths: 10000
//!   max-depth: 12
//! ```

use crate::error::{Error, Result};
use crate::finder::{DEFAULT_MAX_PATHS, SearchLimits};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "routescope.yaml";

/// Graph document used when nothing else is configured
pub const DEFAULT_GRAPH_FILE: &str = "graph.json";

/// Environment variable overriding the graph document path
pub const ENV_GRAPH_FILE: &str = "ROUTESCOPE_GRAPH_FILE";

/// Environment variable overriding the path cap
pub const ENV_MAX_PATHS: &str = "ROUTESCOPE_MAX_PATHS";

/// Environment variable overriding the depth cap
pub const ENV_MAX_DEPTH: &str = "ROUTESCOPE_MAX_DEPTH";

/// Configuration file structure for routescope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Path to the graph document
    pub graph_file: PathBuf,

    /// Path search bounds
    pub limits: LimitsConfig,
}

/// Limits section.
///
/// `max-paths: 0` disables the path cap; an unset value keeps the default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct LimitsConfig {
    /// Maximum number of paths to collect per query
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_paths: Option<usize>,

    /// Maximum path length in edges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graph_file: PathBuf::from(DEFAULT_GRAPH_FILE),
            limits: LimitsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// A relative `graph-file` set in the file is taken relative to the
    /// file's own directory.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        let value: serde_yaml::Value = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        if value.is_null() {
            return Ok(Self::default());
        }
        let sets_graph_file = value.get("graph-file").is_some();
        let mut config: Self = serde_yaml::from_value(value)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        if sets_graph_file && config.graph_file.is_relative() {
            if let Some(dir) = path.parent() {
                config.graph_file = dir.join(&config.graph_file);
            }
        }
        Ok(config)
    }

    /// Resolve configuration from an optional explicit file, the working
    /// directory and the process environment.
    ///
    /// An explicit file must exist; the implicit `routescope.yaml` is
    /// optional.
    pub async fn resolve(explicit: Option<&Path>, working_dir: &Path) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::load(path).await?,
            None => {
                let implicit = working_dir.join(CONFIG_FILE_NAME);
                if fs::try_exists(&implicit).await? {
                    tracing::debug!(path = %implicit.display(), "Using config file");
                    Self::load(&implicit).await?
                } else {
                    Self::default()
                }
            }
        };
        Ok(config.with_env_overrides(|key| env::var(key).ok()))
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// Unparsable numbers are ignored with a warning.
    #[must_use]
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_GRAPH_FILE).filter(|s| !s.is_empty()) {
            self.graph_file = PathBuf::from(path);
        }
        if let Some(max) = parse_env_number(&lookup, ENV_MAX_PATHS) {
            self.limits.max_paths = Some(max);
        }
        if let Some(max) = parse_env_number(&lookup, ENV_MAX_DEPTH) {
            self.limits.max_depth = Some(max);
        }
        self
    }

    /// Search limits described by this configuration.
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            max_paths: match self.limits.max_paths {
                None => Some(DEFAULT_MAX_PATHS),
                Some(0) => None,
                Some(max) => Some(max),
            },
            max_depth: self.limits.max_depth,
        }
    }
}

fn parse_env_number<F>(lookup: &F, key: &str) -> Option<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).filter(|s| !s.is_empty())?;
    match value.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!(
                env_var = key,
                value = %value,
                "Invalid value (expected a non-negative integer), ignoring"
            );
            None
        }
    }
}
