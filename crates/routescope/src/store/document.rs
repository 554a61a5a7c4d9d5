//! Building a [`Graph`] from a parsed graph document.
//!
//! The document is authored externally and may be inconsistent. Problems that
//! do not prevent traversal are normalized away and reported as
//! [`LoadWarning`]s; only unreadable or unparsable sources are errors.

use super::graph::Graph;
use crate::domain::GraphDocument;
use std::collections::HashSet;
use std::fmt;

/// Non-fatal problems found while building the in-memory graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// A second node was declared with an existing name.
    ///
    /// **Effect**: the first declaration is kept, the later one is ignored.
    DuplicateNode {
        /// The repeated name
        name: String,
    },

    /// A second edge record was declared for the same source.
    ///
    /// **Effect**: the first record is kept, the later one is ignored.
    DuplicateEdgeRecord {
        /// The repeated source name
        from: String,
    },

    /// An edge record's source names no node.
    ///
    /// **Effect**: the whole record is skipped.
    OrphanedEdgeSource {
        /// The unknown source name
        from: String,
    },

    /// An edge target names no node.
    ///
    /// **Effect**: the edge is dropped; traversal treats the target as a
    /// dead end.
    DanglingTarget {
        /// Source of the edge
        from: String,
        /// The unknown target name
        to: String,
    },

    /// The same target appears twice in one fan-out list.
    ///
    /// **Effect**: only the first occurrence is kept.
    DuplicateTarget {
        /// Source of the edge
        from: String,
        /// The repeated target name
        to: String,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateNode { name } => {
                write!(f, "duplicate node '{name}' ignored")
            }
            Self::DuplicateEdgeRecord { from } => {
                write!(f, "duplicate edge record for '{from}' ignored")
            }
            Self::OrphanedEdgeSource { from } => {
                write!(f, "edge record for unknown node '{from}' skipped")
            }
            Self::DanglingTarget { from, to } => {
                write!(f, "edge {from} -> {to} points to an unknown node and was dropped")
            }
            Self::DuplicateTarget { from, to } => {
                write!(f, "repeated edge {from} -> {to} ignored")
            }
        }
    }
}

impl Graph {
    /// Build a graph from a parsed document.
    ///
    /// # Algorithm
    ///
    /// 1. Add nodes in declaration order, keeping the first of any duplicate name
    /// 2. Walk edge records, keeping the first record per source
    /// 3. Add one edge per known, not-yet-seen target, weighted by its position
    ///    in the record
    ///
    /// Every skipped element is reported in [`Graph::load_warnings`].
    pub fn from_document(doc: GraphDocument) -> Self {
        let mut graph = Graph::default();
        let mut warnings = Vec::new();

        for node in doc.nodes {
            if graph.node_map.contains_key(&node.name) {
                warnings.push(LoadWarning::DuplicateNode { name: node.name });
                continue;
            }
            let name = node.name.clone();
            let idx = graph.graph.add_node(node);
            graph.node_map.insert(name, idx);
        }

        let mut seen_sources = HashSet::new();
        for record in doc.edges {
            let Some(&source) = graph.node_map.get(&record.from) else {
                warnings.push(LoadWarning::OrphanedEdgeSource { from: record.from });
                continue;
            };
            if !seen_sources.insert(source) {
                warnings.push(LoadWarning::DuplicateEdgeRecord { from: record.from });
                continue;
            }
            graph.record_order.push(source);

            let mut seen_targets = HashSet::new();
            for (ordinal, to) in record.to.into_iter().enumerate() {
                let Some(&target) = graph.node_map.get(&to) else {
                    warnings.push(LoadWarning::DanglingTarget {
                        from: record.from.clone(),
                        to,
                    });
                    continue;
                };
                if !seen_targets.insert(target) {
                    warnings.push(LoadWarning::DuplicateTarget {
                        from: record.from.clone(),
                        to,
                    });
                    continue;
                }
                graph.graph.add_edge(source, target, ordinal);
            }
        }

        graph.warnings = warnings;
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EdgeRecord, Node};

    fn edge(from: &str, to: &[&str]) -> EdgeRecord {
        EdgeRecord {
            from: from.to_string(),
            to: to.iter().map(ToString::to_string).collect(),
        }
    }

    fn nodes(names: &[&str]) -> Vec<Node> {
        names.iter().map(|n| Node::new(*n, "service")).collect()
    }

    #[test]
    fn test_clean_document_has_no_warnings() {
        let graph = Graph::from_document(GraphDocument {
            nodes: nodes(&["a", "b"]),
            edges: vec![edge("a", &["b"])],
        });

        assert!(graph.load_warnings().is_empty());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_duplicate_node_keeps_first() {
        let mut doc_nodes = nodes(&["a"]);
        doc_nodes.push(Node::new("a", "rds"));
        let graph = Graph::from_document(GraphDocument {
            nodes: doc_nodes,
            edges: vec![],
        });

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.find_node("a").unwrap().kind, "service");
        assert_eq!(
            graph.load_warnings(),
            &[LoadWarning::DuplicateNode {
                name: "a".to_string()
            }]
        );
    }

    #[test]
    fn test_duplicate_edge_record_keeps_first() {
        let graph = Graph::from_document(GraphDocument {
            nodes: nodes(&["a", "b", "c"]),
            edges: vec![edge("a", &["b"]), edge("a", &["c"])],
        });

        assert_eq!(graph.outgoing_targets("a"), vec!["b"]);
        assert_eq!(
            graph.load_warnings(),
            &[LoadWarning::DuplicateEdgeRecord {
                from: "a".to_string()
            }]
        );
    }

    #[test]
    fn test_orphaned_source_is_skipped() {
        let graph = Graph::from_document(GraphDocument {
            nodes: nodes(&["b"]),
            edges: vec![edge("ghost", &["b"])],
        });

        assert_eq!(graph.edge_count(), 0);
        assert!(graph.flat_edges().is_empty());
        assert_eq!(
            graph.load_warnings(),
            &[LoadWarning::OrphanedEdgeSource {
                from: "ghost".to_string()
            }]
        );
    }

    #[test]
    fn test_dangling_target_dropped_and_order_kept() {
        let graph = Graph::from_document(GraphDocument {
            nodes: nodes(&["a", "b", "c"]),
            edges: vec![edge("a", &["c", "ghost", "b"])],
        });

        assert_eq!(graph.outgoing_targets("a"), vec!["c", "b"]);
        assert_eq!(
            graph.load_warnings(),
            &[LoadWarning::DanglingTarget {
                from: "a".to_string(),
                to: "ghost".to_string()
            }]
        );
    }

    #[test]
    fn test_repeated_target_kept_once() {
        let graph = Graph::from_document(GraphDocument {
            nodes: nodes(&["a", "b"]),
            edges: vec![edge("a", &["b", "b"])],
        });

        assert_eq!(graph.edge_count(), 1);
        assert!(matches!(
            graph.load_warnings(),
            [LoadWarning::DuplicateTarget { .. }]
        ));
    }

    #[test]
    fn test_warning_messages() {
        let warning = LoadWarning::DanglingTarget {
            from: "a".to_string(),
            to: "x".to_string(),
        };

        assert_eq!(
            warning.to_string(),
            "edge a -> x points to an unknown node and was dropped"
        );
    }
}
