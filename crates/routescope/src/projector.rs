//! Reduce paths to a deduplicated subgraph.
//!
//! [`project`] keeps exactly the nodes and directed edges that appear in at
//! least one path. Both lists are in first-appearance order. [`full_graph`]
//! flattens the whole loaded graph without any traversal.

use crate::domain::{FlatEdge, GraphResponse, Node, NodePath};
use crate::store::Graph;
use std::collections::{HashMap, HashSet};
use std::collections::hash_map::Entry;

/// Union of `paths` as a node/edge subgraph.
///
/// Nodes are keyed by name. If two paths carry differing payloads for the
/// same name, the later one wins.
pub fn project(paths: &[NodePath<'_>]) -> GraphResponse {
    let mut node_index: HashMap<&str, usize> = HashMap::new();
    let mut nodes: Vec<Node> = Vec::new();
    let mut seen_edges: HashSet<(&str, &str)> = HashSet::new();
    let mut edges: Vec<FlatEdge> = Vec::new();

    for path in paths {
        for &node in path.iter() {
            match node_index.entry(node.name.as_str()) {
                Entry::Occupied(slot) => {
                    let existing = &mut nodes[*slot.get()];
                    if *existing != *node {
                        *existing = node.clone();
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(nodes.len());
                    nodes.push(node.clone());
                }
            }
        }

        for pair in path.windows(2) {
            let (from, to) = (pair[0].name.as_str(), pair[1].name.as_str());
            if seen_edges.insert((from, to)) {
                edges.push(FlatEdge::new(from, to));
            }
        }
    }

    tracing::debug!(
        paths = paths.len(),
        nodes = nodes.len(),
        edges = edges.len(),
        "Projected paths"
    );
    GraphResponse { nodes, edges }
}

/// The entire graph in response form.
///
/// Nodes are in declaration order; edges follow edge-record order and then
/// each record's target order.
pub fn full_graph(graph: &Graph) -> GraphResponse {
    GraphResponse {
        nodes: graph.nodes().cloned().collect(),
        edges: graph.flat_edges(),
    }
}
