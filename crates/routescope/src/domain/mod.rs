//! Domain types for component graphs.
//!
//! These types mirror the on-disk graph document: field names are camelCase
//! on the wire (`publicExposed`) and optional attributes are omitted when
//! absent, so a node round-trips through the response unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;

/// Node kind used for relational database sinks.
pub const RDS_KIND: &str = "rds";

/// Database engine name for Postgres sinks.
pub const POSTGRES_ENGINE: &str = "postgres";

/// A component in the architecture graph (service, data store, sink...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique name of the node
    pub name: String,

    /// Category tag, e.g. `service`, `rds`, `sink`
    pub kind: String,

    /// Implementation language (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Source path of the component (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Whether the component is reachable from outside
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_exposed: Option<bool>,

    /// Known vulnerabilities, in report order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulnerabilities: Option<Vec<Vulnerability>>,

    /// Deployment metadata (cloud, engine, version...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NodeMetadata>,
}

impl Node {
    /// Create a bare node with the given name and kind.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            language: None,
            path: None,
            public_exposed: None,
            vulnerabilities: None,
            metadata: None,
        }
    }

    /// True only when `publicExposed` is explicitly `true`.
    pub fn is_public(&self) -> bool {
        self.public_exposed == Some(true)
    }

    /// True when the node carries at least one vulnerability.
    pub fn has_vulnerabilities(&self) -> bool {
        self.vulnerabilities.as_ref().is_some_and(|v| !v.is_empty())
    }

    /// Database engine from metadata, if it is a string.
    pub fn engine(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.engine.as_ref())
            .and_then(Value::as_str)
    }

    /// True for an RDS node whose engine is Postgres.
    pub fn is_postgres_sink(&self) -> bool {
        self.kind == RDS_KIND && self.engine() == Some(POSTGRES_ENGINE)
    }
}

/// Open key-value bag attached to a node.
///
/// Values may have any JSON shape. Only `engine` is interpreted, and only
/// when it is a string; anything else is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMetadata {
    /// Cloud provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud: Option<Value>,

    /// Database engine (for data stores)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<Value>,

    /// Engine or runtime version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,

    /// Unrecognized keys
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl NodeMetadata {
    /// Metadata carrying only a database engine.
    pub fn with_engine(engine: &str) -> Self {
        Self {
            engine: Some(Value::from(engine)),
            ..Self::default()
        }
    }
}

/// A vulnerability finding on a node.
///
/// Opaque to path analysis: only the presence of findings matters, so every
/// field is optional and may have any JSON shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    /// File the finding was reported in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<Value>,

    /// Severity label as reported by the scanner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Value>,

    /// Human-readable finding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,

    /// Classification metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<VulnerabilityMetadata>,

    /// Unrecognized keys
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Vulnerability {
    /// A finding with the usual scanner fields set.
    pub fn new(file: &str, severity: &str, message: &str) -> Self {
        Self {
            file: Some(Value::from(file)),
            severity: Some(Value::from(severity)),
            message: Some(Value::from(message)),
            ..Self::default()
        }
    }
}

/// Classification metadata for a vulnerability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityMetadata {
    /// CWE identifier, as a string (`"CWE-89"`) or a number (`89`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwe: Option<Value>,

    /// Unrecognized keys
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Outgoing edges of one node, grouped as a fan-out list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Source node name
    pub from: String,

    /// Target node names, in declared order
    pub to: Vec<String>,
}

/// The graph document as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// All nodes
    pub nodes: Vec<Node>,

    /// Adjacency records, at most one per source node
    pub edges: Vec<EdgeRecord>,
}

/// A single directed edge in flattened form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlatEdge {
    /// Source node name
    pub from: String,

    /// Target node name
    pub to: String,
}

impl FlatEdge {
    /// Create a new flattened edge.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for FlatEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Subgraph returned to callers: nodes plus flattened edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphResponse {
    /// Nodes, each at most once
    pub nodes: Vec<Node>,

    /// Directed edges, each at most once
    pub edges: Vec<FlatEdge>,
}

/// An ordered, non-empty walk through the graph.
///
/// Nodes are borrowed from the loaded graph, so a path is only valid while
/// the graph it came from is alive.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePath<'g>(Vec<&'g Node>);

impl<'g> NodePath<'g> {
    pub(crate) fn new(nodes: Vec<&'g Node>) -> Self {
        debug_assert!(!nodes.is_empty(), "paths always contain a start node");
        Self(nodes)
    }

    /// First node of the path.
    pub fn start(&self) -> Option<&'g Node> {
        self.0.first().copied()
    }

    /// Last node of the path.
    pub fn end(&self) -> Option<&'g Node> {
        self.0.last().copied()
    }

    /// Node names in path order.
    pub fn names(&self) -> Vec<&'g str> {
        self.0.iter().map(|n| n.name.as_str()).collect()
    }
}

impl<'g> Deref for NodePath<'g> {
    type Target = [&'g Node];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'g> AsRef<[&'g Node]> for NodePath<'g> {
    fn as_ref(&self) -> &[&'g Node] {
        &self.0
    }
}

impl fmt::Display for NodePath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join(" -> "))
    }
}
