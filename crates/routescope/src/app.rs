//! Application context for CLI command execution.
//!
//! [`App`] resolves configuration, loads the graph once and hands out
//! [`PathEngine`]s bound to that snapshot.
//!
//! # Example
//!
//! ```no_run
//! use routescope::app::{App, AppOptions};
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new("."), &AppOptions::default()).await?;
//!     println!("{} nodes", app.graph().node_count());
//!     Ok(())
//! }
//! ```

use crate::config::Config;
use crate::engine::PathEngine;
use crate::error::Result;
use crate::store::{FileSource, Graph, GraphSource, GraphStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Settings supplied on the command line. Each one overrides the
/// configuration file and environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppOptions {
    /// Explicit configuration file
    pub config_file: Option<PathBuf>,

    /// Graph document path
    pub graph_file: Option<PathBuf>,

    /// Path cap (`0` disables it)
    pub max_paths: Option<usize>,

    /// Depth cap in edges
    pub max_depth: Option<usize>,
}

/// Application context for CLI operations.
#[derive(Debug)]
pub struct App {
    config: Config,
    graph_path: PathBuf,
    store: GraphStore,
    graph: Arc<Graph>,
}

impl App {
    /// Create an App from the given working directory.
    ///
    /// A relative `--config` path and a relative `--graph` path are resolved
    /// against `working_dir`; a relative `graph-file` inside a config file is
    /// resolved against that file's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration file cannot be read or parsed
    /// - The graph document cannot be read or parsed
    pub async fn from_directory(working_dir: &Path, options: &AppOptions) -> Result<Self> {
        let config_file = options.config_file.as_ref().map(|path| working_dir.join(path));
        let mut config = Config::resolve(config_file.as_deref(), working_dir).await?;

        if let Some(graph_file) = &options.graph_file {
            config.graph_file.clone_from(graph_file);
        }
        if options.max_paths.is_some() {
            config.limits.max_paths = options.max_paths;
        }
        if options.max_depth.is_some() {
            config.limits.max_depth = options.max_depth;
        }

        let graph_path = working_dir.join(&config.graph_file);
        let source = FileSource::new(&graph_path);
        let store = GraphStore::new();
        let graph = store.load(&source).await?;

        tracing::debug!(
            graph = %source.location(),
            limits = ?config.search_limits(),
            "Application ready"
        );

        Ok(Self {
            config,
            graph_path,
            store,
            graph,
        })
    }

    /// A query engine over the loaded graph.
    pub fn engine(&self) -> PathEngine {
        PathEngine::new(Arc::clone(&self.graph), self.config.search_limits())
    }

    /// The loaded graph.
    pub fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    /// The store holding the graph snapshot.
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Resolved configuration, CLI overrides included.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Location of the graph document.
    pub fn graph_path(&self) -> &Path {
        &self.graph_path
    }
}
