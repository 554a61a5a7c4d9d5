//! Path queries over a loaded graph.
//!
//! [`PathEngine`] runs the whole pipeline for one query: enumerate paths,
//! apply the selected filters, project the survivors. The two "nothing to
//! show" outcomes are ordinary [`QueryOutcome`] variants rather than errors.
//!
//! # Example
//!
//! ```no_run
//! use routescope::engine::{PathEngine, PathQuery, QueryOutcome};
//! use routescope::filters::parse_filter_list;
//! use routescope::finder::SearchLimits;
//! use routescope::store::{FileSource, GraphStore};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let graph = GraphStore::new().load(&FileSource::new("graph.json")).await?;
//!     let engine = PathEngine::new(graph, SearchLimits::default());
//!
//!     let query = PathQuery::new("frontend", "orders-db")?
//!         .with_filters(parse_filter_list("public-start,no-vulnerability")?);
//!     if let QueryOutcome::Found(report) = engine.run(&query) {
//!         println!("{} matching paths", report.matched_paths);
//!     }
//!     Ok(())
//! }
//! ```

use crate::domain::GraphResponse;
use crate::error::{Error, Result};
use crate::filters::FilterSet;
use crate::finder::{SearchLimits, find_paths};
use crate::projector;
use crate::store::Graph;
use std::sync::Arc;

/// A validated request for paths between two nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQuery {
    start: String,
    end: String,
    filters: FilterSet,
}

impl PathQuery {
    /// Create a query with no filters.
    ///
    /// Names are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if either name is empty.
    pub fn new(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: validate_node_name("Start", start)?,
            end: validate_node_name("End", end)?,
            filters: FilterSet::new(),
        })
    }

    /// Replace the filter set.
    #[must_use]
    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    /// Start node name.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// End node name.
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Selected filters.
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }
}

/// Trim a node name and reject it if nothing is left.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] naming `role` if the name is empty.
pub fn validate_node_name(role: &str, name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput(format!(
            "{role} node must be a non-empty string"
        )));
    }
    Ok(name.to_string())
}

/// Successful query result.
#[derive(Debug, Clone, PartialEq)]
pub struct PathReport {
    /// Union of the matching paths
    pub response: GraphResponse,

    /// Paths found before filtering
    pub total_paths: usize,

    /// Paths kept by the filters
    pub matched_paths: usize,

    /// Whether the search hit a limit
    pub truncated: bool,
}

/// What a query produced.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// At least one path survived the filters.
    Found(PathReport),

    /// No path connects start to end.
    NoPaths,

    /// Paths exist but every one was rejected by the filters.
    NoMatchingPaths {
        /// Paths found before filtering
        total_paths: usize,
    },
}

/// Query runner bound to one graph snapshot.
///
/// Cheap to clone and safe to share across tasks; every query works on the
/// same immutable graph.
#[derive(Debug, Clone)]
pub struct PathEngine {
    graph: Arc<Graph>,
    limits: SearchLimits,
}

impl PathEngine {
    /// Create an engine over `graph`.
    pub fn new(graph: Arc<Graph>, limits: SearchLimits) -> Self {
        Self { graph, limits }
    }

    /// The graph this engine queries.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Search limits applied to every query.
    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Run one query.
    pub fn run(&self, query: &PathQuery) -> QueryOutcome {
        let search = find_paths(&self.graph, &query.start, &query.end, self.limits);
        let total_paths = search.paths.len();
        if total_paths == 0 {
            tracing::info!(start = %query.start, end = %query.end, "No paths found");
            return QueryOutcome::NoPaths;
        }

        let matched = query.filters.apply(search.paths, &self.graph);
        if matched.is_empty() {
            tracing::info!(
                start = %query.start,
                end = %query.end,
                filters = %query.filters,
                total_paths,
                "No paths match the filters"
            );
            return QueryOutcome::NoMatchingPaths { total_paths };
        }

        QueryOutcome::Found(PathReport {
            response: projector::project(&matched),
            total_paths,
            matched_paths: matched.len(),
            truncated: search.truncated,
        })
    }

    /// The whole graph in response form.
    pub fn full_graph(&self) -> GraphResponse {
        projector::full_graph(&self.graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EdgeRecord, GraphDocument, Node, NodeMetadata};
    use crate::filters::PathFilter;

    fn engine() -> PathEngine {
        let mut a = Node::new("A", "service");
        a.public_exposed = Some(true);
        let b = Node::new("B", "service");
        let mut c = Node::new("C", "rds");
        c.metadata = Some(NodeMetadata::with_engine("postgres"));

        let graph = Graph::from_document(GraphDocument {
            nodes: vec![a, b, c],
            edges: vec![
                EdgeRecord {
                    from: "A".to_string(),
                    to: vec!["B".to_string()],
                },
                EdgeRecord {
                    from: "B".to_string(),
                    to: vec!["C".to_string()],
                },
            ],
        });
        PathEngine::new(Arc::new(graph), SearchLimits::default())
    }

    #[test]
    fn test_query_rejects_blank_names() {
        assert!(matches!(PathQuery::new("  ", "B"), Err(Error::InvalidInput(_))));
        assert!(matches!(PathQuery::new("A", ""), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_query_trims_names() {
        let query = PathQuery::new(" A ", "C\n").unwrap();

        assert_eq!(query.start(), "A");
        assert_eq!(query.end(), "C");
    }

    #[test]
    fn test_run_found() {
        let outcome = engine().run(&PathQuery::new("A", "C").unwrap());

        let QueryOutcome::Found(report) = outcome else {
            panic!("expected paths, got {outcome:?}");
        };
        assert_eq!(report.total_paths, 1);
        assert_eq!(report.matched_paths, 1);
        assert!(!report.truncated);
        assert_eq!(report.response.nodes.len(), 3);
        assert_eq!(report.response.edges.len(), 2);
    }

    #[test]
    fn test_run_no_paths() {
        let outcome = engine().run(&PathQuery::new("C", "A").unwrap());

        assert_eq!(outcome, QueryOutcome::NoPaths);
    }

    #[test]
    fn test_run_no_matching_paths() {
        let query = PathQuery::new("A", "C")
            .unwrap()
            .with_filters([PathFilter::SinkEnd].into_iter().collect());

        assert_eq!(
            engine().run(&query),
            QueryOutcome::NoMatchingPaths { total_paths: 1 }
        );
    }

    #[test]
    fn test_full_graph() {
        let response = engine().full_graph();

        assert_eq!(response.nodes.len(), 3);
        assert_eq!(response.edges.len(), 2);
    }
}
