//! Immutable in-memory graph snapshot backed by petgraph.
//!
//! # Representation
//!
//! - `DiGraph<Node, usize>` owns every node; node indices follow declaration
//!   order in the document.
//! - Edge weights are the target's position in its source's fan-out list, so
//!   outgoing edges can be replayed in declared order regardless of how
//!   petgraph stores adjacency internally.
//! - `HashMap<String, NodeIndex>` maps names to graph nodes.
//! - `record_order` keeps the sources in the order their edge records
//!   appeared, for the flattened full-graph view.

use crate::domain::{FlatEdge, Node};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

use super::document::LoadWarning;

/// A loaded component graph. Never mutated after construction.
#[derive(Debug, Default)]
pub struct Graph {
    pub(super) graph: DiGraph<Node, usize>,
    pub(super) node_map: HashMap<String, NodeIndex>,
    pub(super) record_order: Vec<NodeIndex>,
    pub(super) warnings: Vec<LoadWarning>,
}

impl Graph {
    /// Look up a node by name.
    pub fn find_node(&self, name: &str) -> Option<&Node> {
        self.index_of(name).map(|idx| &self.graph[idx])
    }

    /// Names of the direct successors of `name`, in declared order.
    ///
    /// Returns an empty list for unknown nodes and for leaves.
    pub fn outgoing_targets(&self, name: &str) -> Vec<&str> {
        self.index_of(name)
            .map(|idx| {
                self.successors(idx)
                    .into_iter()
                    .map(|t| self.graph[t].name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// All edges flattened to `from -> to` pairs, grouped by record order.
    pub fn flat_edges(&self) -> Vec<FlatEdge> {
        self.record_order
            .iter()
            .flat_map(|&source| {
                let from = &self.graph[source].name;
                self.successors(source)
                    .into_iter()
                    .map(move |target| FlatEdge::new(from.clone(), self.graph[target].name.clone()))
            })
            .collect()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of directed edges kept after load normalization.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Non-fatal problems found while building the graph.
    pub fn load_warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }

    pub(crate) fn node_at(&self, idx: NodeIndex) -> &Node {
        &self.graph[idx]
    }

    /// Successor indices ordered by their declared fan-out position.
    pub(crate) fn successors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<(usize, NodeIndex)> = self
            .graph
            .edges(idx)
            .map(|edge| (*edge.weight(), edge.target()))
            .collect();
        edges.sort_unstable_by_key(|(ordinal, _)| *ordinal);
        edges.into_iter().map(|(_, target)| target).collect()
    }
}
