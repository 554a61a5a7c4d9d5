//! Graph store: load-once access to the component graph.
//!
//! The store reads a graph document from a [`GraphSource`] the first time it
//! is asked for, and hands out the same `Arc<Graph>` forever after. The
//! guarded initialization means concurrent first callers share a single read
//! and parse.
//!
//! # Example
//!
//! ```no_run
//! use routescope::store::{FileSource, GraphStore};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let store = GraphStore::new();
//!     let graph = store.load(&FileSource::new("graph.json")).await?;
//!     println!("{} nodes", graph.node_count());
//!     Ok(())
//! }
//! ```

mod document;
mod graph;

use crate::domain::GraphDocument;
use crate::error::LoadError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

pub use document::LoadWarning;
pub use graph::Graph;

/// Somewhere a graph document can be read from.
#[async_trait]
pub trait GraphSource: Send + Sync {
    /// Human-readable location, used in errors and logs.
    fn location(&self) -> String;

    /// Read the raw document.
    async fn read(&self) -> std::io::Result<String>;
}

/// A graph document on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl GraphSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn read(&self) -> std::io::Result<String> {
        tokio::fs::read_to_string(&self.path).await
    }
}

/// Parse a graph document from JSON text and build the graph.
///
/// `location` only labels the error.
pub fn parse_graph(location: &str, content: &str) -> Result<Graph, LoadError> {
    let doc: GraphDocument =
        serde_json::from_str(content).map_err(|source| LoadError::Parse {
            location: location.to_string(),
            source,
        })?;
    Ok(Graph::from_document(doc))
}

/// Owner of the process-wide graph snapshot.
#[derive(Debug, Default)]
pub struct GraphStore {
    cell: OnceCell<Arc<Graph>>,
}

impl GraphStore {
    /// Create an empty store. Nothing is read until [`GraphStore::load`].
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Create a store that is already loaded with `graph`.
    pub fn with_graph(graph: Graph) -> Self {
        Self {
            cell: OnceCell::new_with(Some(Arc::new(graph))),
        }
    }

    /// Load the graph from `source`, or return the cached snapshot.
    ///
    /// Only the first successful call reads `source`; later calls ignore
    /// their argument. A failed load leaves the store empty so a later call
    /// may try again.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the source cannot be read or parsed. The
    /// underlying cause is kept as the error source.
    pub async fn load(&self, source: &dyn GraphSource) -> Result<Arc<Graph>, LoadError> {
        let graph = self
            .cell
            .get_or_try_init(|| async {
                let location = source.location();
                tracing::debug!(%location, "Loading graph");

                let content = source.read().await.map_err(|err| {
                    tracing::error!(%location, error = %err, "Failed to read graph");
                    LoadError::Read {
                        location: location.clone(),
                        source: err,
                    }
                })?;
                let graph = parse_graph(&location, &content).inspect_err(|e| {
                    tracing::error!(error = %e, "Failed to parse graph");
                })?;

                for warning in graph.load_warnings() {
                    tracing::warn!(%location, "{warning}");
                }
                tracing::debug!(
                    %location,
                    nodes = graph.node_count(),
                    edges = graph.edge_count(),
                    "Graph loaded"
                );
                Ok::<_, LoadError>(Arc::new(graph))
            })
            .await?;
        Ok(Arc::clone(graph))
    }

    /// The loaded snapshot, if any.
    pub fn get(&self) -> Option<Arc<Graph>> {
        self.cell.get().cloned()
    }

    /// Whether a snapshot has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}
