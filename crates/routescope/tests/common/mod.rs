//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use routescope::domain::NodePath;
use routescope::store::{Graph, parse_graph};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// `A(public) -> B -> C(rds, postgres)`
pub const CHAIN_GRAPH: &str = r#"{
    "nodes": [
        {"name": "A", "kind": "service", "publicExposed": true},
        {"name": "B", "kind": "service"},
        {"name": "C", "kind": "rds", "metadata": {"engine": "postgres"}}
    ],
    "edges": [
        {"from": "A", "to": ["B"]},
        {"from": "B", "to": ["C"]}
    ]
}"#;

/// `A -> {B, D} -> C` where `B` carries a vulnerability.
pub const VULNERABLE_GRAPH: &str = r#"{
    "nodes": [
        {"name": "A", "kind": "service", "publicExposed": true},
        {"name": "B", "kind": "service", "vulnerabilities": [
            {"file": "Login.java", "severity": "high", "message": "SQL injection",
             "metadata": {"cwe": "CWE-89"}}
        ]},
        {"name": "C", "kind": "sink"},
        {"name": "D", "kind": "service"}
    ],
    "edges": [
        {"from": "A", "to": ["B", "D"]},
        {"from": "B", "to": ["C"]},
        {"from": "D", "to": ["C"]}
    ]
}"#;

/// `A -> {B, C}, B -> D, C -> D`
pub const DIAMOND_GRAPH: &str = r#"{
    "nodes": [
        {"name": "A", "kind": "service"},
        {"name": "B", "kind": "service"},
        {"name": "C", "kind": "service"},
        {"name": "D", "kind": "service"}
    ],
    "edges": [
        {"from": "A", "to": ["B", "C"]},
        {"from": "B", "to": ["D"]},
        {"from": "C", "to": ["D"]}
    ]
}"#;

/// `A -> B, B -> {A, C}`
pub const CYCLE_GRAPH: &str = r#"{
    "nodes": [
        {"name": "A", "kind": "service"},
        {"name": "B", "kind": "service"},
        {"name": "C", "kind": "service"}
    ],
    "edges": [
        {"from": "A", "to": ["B"]},
        {"from": "B", "to": ["A", "C"]}
    ]
}"#;

/// A document exercising every load normalization.
pub const MESSY_GRAPH: &str = r#"{
    "nodes": [
        {"name": "A", "kind": "service", "publicExposed": true},
        {"name": "A", "kind": "rds"},
        {"name": "B", "kind": "service"}
    ],
    "edges": [
        {"from": "A", "to": ["B", "B", "ghost"]},
        {"from": "A", "to": ["A"]},
        {"from": "nobody", "to": ["B"]}
    ]
}"#;

/// A -> [ghost, B] -> C: a dangling target declared before a live branch.
pub const DANGLING_GRAPH: &str = r#"{
    "nodes": [
        {"name": "A", "kind": "service"},
        {"name": "B", "kind": "service"},
        {"name": "C", "kind": "rds"}
    ],
    "edges": [
        {"from": "A", "to": ["ghost", "B"]},
        {"from": "B", "to": ["C"]}
    ]
}"#;

/// Build a graph from JSON text.
pub fn graph(json: &str) -> Graph {
    parse_graph("test", json).expect("fixture graph should parse")
}

/// Node names of each path.
pub fn names(paths: &[NodePath<'_>]) -> Vec<Vec<String>> {
    paths
        .iter()
        .map(|p| p.names().into_iter().map(String::from).collect())
        .collect()
}

/// Shorthand for an expected path list.
pub fn expected(paths: &[&[&str]]) -> Vec<Vec<String>> {
    paths
        .iter()
        .map(|p| p.iter().map(|s| (*s).to_string()).collect())
        .collect()
}

/// Write `json` as `graph.json` in `dir` and return its path.
pub fn write_graph(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("graph.json");
    std::fs::write(&path, json).expect("Failed to write graph fixture");
    path
}

/// Run the routescope binary in `dir` with a clean environment.
///
/// Output is plain ASCII without colors, and routescope's own variables are
/// cleared so results do not depend on the caller's shell.
pub fn run_routescope_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_routescope"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("ROUTESCOPE_LOG")
        .env_remove("ROUTESCOPE_GRAPH_FILE")
        .env_remove("ROUTESCOPE_MAX_PATHS")
        .env_remove("ROUTESCOPE_MAX_DEPTH")
        .env("ROUTESCOPE_ASCII", "1")
        .env_remove("ROUTESCOPE_MAX_WIDTH")
        .output()
        .expect("Failed to execute routescope binary")
}

/// Stdout as a string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr as a string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
