//! Simple-path enumeration between two named nodes.
//!
//! The search is a depth-first walk driven by an explicit frame stack. Each
//! frame holds a node and the successors it has yet to try. Alongside the
//! stack the walk keeps the current path and an on-path set; a successor is
//! skipped only while it is on the current path, so different branches may
//! pass through the same node and successful paths may share prefixes.
//!
//! Reaching the end node records the path and does not descend further on
//! that branch. Results come out in declared edge order, depth first.
//!
//! The number of simple paths is exponential in the worst case, so
//! [`find_paths`] takes [`SearchLimits`] to cap the work.

use crate::domain::NodePath;
use crate::store::Graph;
use petgraph::graph::NodeIndex;
use std::collections::HashSet;

/// Default cap on the number of paths a bounded search collects.
pub const DEFAULT_MAX_PATHS: usize = 10_000;

/// Bounds on a path search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop after collecting this many paths (`None` = unbounded)
    pub max_paths: Option<usize>,

    /// Ignore paths longer than this many edges (`None` = unbounded)
    pub max_depth: Option<usize>,
}

impl SearchLimits {
    /// No bounds at all.
    pub const UNBOUNDED: Self = Self {
        max_paths: None,
        max_depth: None,
    };
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_paths: Some(DEFAULT_MAX_PATHS),
            max_depth: None,
        }
    }
}

/// Result of a bounded path search.
#[derive(Debug, Default)]
pub struct PathSearch<'g> {
    /// Paths found, in discovery order
    pub paths: Vec<NodePath<'g>>,

    /// Whether a limit stopped the search before it was exhaustive
    pub truncated: bool,
}

/// Enumerate every simple path from `start` to `end`.
///
/// Returns an empty list when `start` is not in the graph. When
/// `start == end` the single-node path is the only result.
pub fn find_all_paths<'g>(graph: &'g Graph, start: &str, end: &str) -> Vec<NodePath<'g>> {
    find_paths(graph, start, end, SearchLimits::UNBOUNDED).paths
}

/// Pending successors of one node on the current path.
struct Frame {
    node: NodeIndex,
    pending: std::vec::IntoIter<NodeIndex>,
}

impl Frame {
    fn new(graph: &Graph, node: NodeIndex) -> Self {
        Self {
            node,
            pending: graph.successors(node).into_iter(),
        }
    }
}

/// Enumerate simple paths from `start` to `end` within `limits`.
pub fn find_paths<'g>(
    graph: &'g Graph,
    start: &str,
    end: &str,
    limits: SearchLimits,
) -> PathSearch<'g> {
    let mut search = PathSearch::default();

    let Some(start_idx) = graph.index_of(start) else {
        tracing::debug!(start, "Start node not in graph");
        return search;
    };
    // An end name with no node can never be reached.
    let Some(end_idx) = graph.index_of(end) else {
        tracing::debug!(end, "End node not in graph");
        return search;
    };

    let record = |path: &[NodeIndex], search: &mut PathSearch<'g>| -> bool {
        search
            .paths
            .push(NodePath::new(path.iter().map(|&i| graph.node_at(i)).collect()));
        let full = limits.max_paths.is_some_and(|max| search.paths.len() >= max);
        if full {
            search.truncated = true;
        }
        full
    };

    let mut path = vec![start_idx];
    if start_idx == end_idx || limits.max_paths == Some(0) {
        if limits.max_paths == Some(0) {
            search.truncated = true;
        } else {
            record(&path, &mut search);
        }
        return search;
    }

    let mut on_path: HashSet<NodeIndex> = HashSet::from([start_idx]);
    let mut stack = vec![Frame::new(graph, start_idx)];

    loop {
        let next = match stack.last_mut() {
            Some(frame) => frame.pending.next(),
            None => break,
        };

        let Some(next) = next else {
            // All successors tried: backtrack.
            if let Some(done) = stack.pop() {
                on_path.remove(&done.node);
                path.pop();
            }
            continue;
        };

        if on_path.contains(&next) {
            continue;
        }
        if limits.max_depth.is_some_and(|max| path.len() > max) {
            search.truncated = true;
            continue;
        }

        path.push(next);
        if next == end_idx {
            let full = record(&path, &mut search);
            path.pop();
            if full {
                break;
            }
            continue;
        }

        on_path.insert(next);
        stack.push(Frame::new(graph, next));
    }

    if search.truncated {
        tracing::warn!(
            start,
            end,
            paths = search.paths.len(),
            "Path search stopped at a limit"
        );
    }
    tracing::debug!(start, end, paths = search.paths.len(), "Path search complete");
    search
}
