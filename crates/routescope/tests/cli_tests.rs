//! Integration tests for the routescope CLI.
//!
//! These tests verify the end-to-end behavior of all CLI commands.

use routescope::domain::GraphResponse;
use rstest::{fixture, rstest};
use std::process::Command;
use tempfile::TempDir;

mod common;
use common::{
    CHAIN_GRAPH, DIAMOND_GRAPH, MESSY_GRAPH, VULNERABLE_GRAPH, run_routescope_in_dir, stderr,
    stdout, write_graph,
};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Provides a fresh temporary directory for each test
#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Provides a temporary directory with the chain graph as `graph.json`
#[fixture]
fn chain_dir() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    write_graph(temp.path(), CHAIN_GRAPH);
    temp
}

/// Provides a temporary directory with the vulnerable graph as `graph.json`
#[fixture]
fn vulnerable_dir() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    write_graph(temp.path(), VULNERABLE_GRAPH);
    temp
}

fn parse_response(stdout: &str) -> GraphResponse {
    serde_json::from_str(stdout).expect("stdout should be a graph response")
}

fn node_names(response: &GraphResponse) -> Vec<&str> {
    response.nodes.iter().map(|n| n.name.as_str()).collect()
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[rstest]
fn test_cli_help_shows_all_commands(temp_dir: TempDir) {
    let output = run_routescope_in_dir(temp_dir.path(), &["--help"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Usage:"));
    for command in ["paths", "filters", "graph", "info"] {
        assert!(out.contains(command), "help should mention {command}");
    }
}

#[rstest]
fn test_cli_version(temp_dir: TempDir) {
    let output = run_routescope_in_dir(temp_dir.path(), &["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[rstest]
fn test_cli_no_args(temp_dir: TempDir) {
    let output = run_routescope_in_dir(temp_dir.path(), &[]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("--help"));
}

// ============================================================================
// Filters Command
// ============================================================================

#[rstest]
fn test_filters_text(temp_dir: TempDir) {
    let output = run_routescope_in_dir(temp_dir.path(), &["filters"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("public-start"));
    assert!(out.contains("sink-end"));
    assert!(out.contains("no-vulnerability"));
}

#[rstest]
fn test_filters_json_needs_no_graph(temp_dir: TempDir) {
    let output = run_routescope_in_dir(temp_dir.path(), &["--json", "filters"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let filters: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let ids: Vec<&str> = filters
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["public-start", "sink-end", "no-vulnerability"]);
    assert!(filters[0]["description"].as_str().is_some());
}

// ============================================================================
// Paths Command
// ============================================================================

#[rstest]
fn test_paths_text(chain_dir: TempDir) {
    let output = run_routescope_in_dir(chain_dir.path(), &["paths", "-s", "A", "-e", "C"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("1 path(s) found"));
    assert!(out.contains("A [service] [public]"));
    assert!(out.contains("A -> B"));
    assert!(out.contains("B -> C"));
}

#[rstest]
fn test_paths_json(chain_dir: TempDir) {
    let output = run_routescope_in_dir(
        chain_dir.path(),
        &["--json", "paths", "--start", "A", "--end", "C"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let response = parse_response(&stdout(&output));
    assert_eq!(node_names(&response), vec!["A", "B", "C"]);
    assert_eq!(response.edges.len(), 2);
    assert_eq!(response.nodes[2].engine(), Some("postgres"));
}

#[rstest]
fn test_paths_json_keeps_node_payload(vulnerable_dir: TempDir) {
    let output = run_routescope_in_dir(
        vulnerable_dir.path(),
        &["--json", "paths", "-s", "A", "-e", "C"],
    );

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["nodes"][0]["publicExposed"], true);
    assert_eq!(
        value["nodes"][1]["vulnerabilities"][0]["metadata"]["cwe"],
        "CWE-89"
    );
}

#[rstest]
fn test_paths_with_filters(vulnerable_dir: TempDir) {
    let output = run_routescope_in_dir(
        vulnerable_dir.path(),
        &[
            "--json",
            "paths",
            "-s",
            "A",
            "-e",
            "C",
            "--filters",
            "public-start,no-vulnerability",
        ],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let response = parse_response(&stdout(&output));
    assert_eq!(node_names(&response), vec!["A", "D", "C"]);
}

#[rstest]
fn test_paths_filter_summary_text(vulnerable_dir: TempDir) {
    let output = run_routescope_in_dir(
        vulnerable_dir.path(),
        &["paths", "-s", "A", "-e", "C", "-f", "no-vulnerability"],
    );

    assert!(output.status.success());
    assert!(stdout(&output).contains("1 of 2 path(s) match the filters"));
}

#[rstest]
fn test_paths_none_found(chain_dir: TempDir) {
    let output = run_routescope_in_dir(chain_dir.path(), &["paths", "-s", "C", "-e", "A"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("No paths found from C to A"));
    assert!(stdout(&output).is_empty());
}

#[rstest]
fn test_paths_all_filtered_out(chain_dir: TempDir) {
    let output = run_routescope_in_dir(
        chain_dir.path(),
        &["paths", "-s", "A", "-e", "C", "--filters", "sink-end"],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("No paths match the specified filters"));
}

#[rstest]
fn test_paths_unknown_filter(chain_dir: TempDir) {
    let output = run_routescope_in_dir(
        chain_dir.path(),
        &["paths", "-s", "A", "-e", "C", "--filters", "fastest"],
    );

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Unknown filter 'fastest'"));
    assert!(err.contains("public-start"));
}

#[rstest]
#[case::blank_start(&["paths", "-s", " ", "-e", "C"], "Start node must be a non-empty string")]
#[case::blank_end(&["paths", "-s", "A", "-e", ""], "End node must be a non-empty string")]
fn test_paths_rejects_blank_names(
    chain_dir: TempDir,
    #[case] args: &[&str],
    #[case] message: &str,
) {
    let output = run_routescope_in_dir(chain_dir.path(), args);

    assert!(!output.status.success());
    assert!(stderr(&output).contains(message));
}

#[rstest]
fn test_paths_max_paths_reports_truncation(temp_dir: TempDir) {
    write_graph(temp_dir.path(), DIAMOND_GRAPH);

    let output = run_routescope_in_dir(
        temp_dir.path(),
        &["paths", "-s", "A", "-e", "D", "--max-paths", "1"],
    );

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("1 path(s) found"));
    assert!(out.contains("configured limit"));
    assert!(!out.contains("C -> D"));
}

// ============================================================================
// Graph Loading and Configuration
// ============================================================================

#[rstest]
fn test_missing_graph_file(temp_dir: TempDir) {
    let output = run_routescope_in_dir(temp_dir.path(), &["graph"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Failed to load graph from"));
    assert!(err.contains("graph.json"));
}

#[rstest]
fn test_malformed_graph_file(temp_dir: TempDir) {
    write_graph(temp_dir.path(), "{\"nodes\": [");

    let output = run_routescope_in_dir(temp_dir.path(), &["graph"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to parse graph from"));
}

#[rstest]
fn test_graph_flag(temp_dir: TempDir) {
    std::fs::write(temp_dir.path().join("other.json"), DIAMOND_GRAPH).unwrap();

    let output = run_routescope_in_dir(temp_dir.path(), &["--json", "graph", "--graph", "other.json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let response = parse_response(&stdout(&output));
    assert_eq!(node_names(&response), vec!["A", "B", "C", "D"]);
    assert_eq!(response.edges.len(), 4);
}

#[rstest]
fn test_config_file_sets_graph(temp_dir: TempDir) {
    std::fs::create_dir(temp_dir.path().join("deploy")).unwrap();
    std::fs::write(temp_dir.path().join("deploy/arch.json"), CHAIN_GRAPH).unwrap();
    std::fs::write(
        temp_dir.path().join("routescope.yaml"),
        "graph-file: deploy/arch.json\n",
    )
    .unwrap();

    let output = run_routescope_in_dir(temp_dir.path(), &["--json", "info"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let info: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(info["nodeCount"], 3);
    assert!(info["location"].as_str().unwrap().ends_with("arch.json"));
}

#[rstest]
fn test_graph_flag_overrides_config(temp_dir: TempDir) {
    write_graph(temp_dir.path(), DIAMOND_GRAPH);
    std::fs::write(temp_dir.path().join("routescope.yaml"), "graph-file: absent.json\n").unwrap();

    let output = run_routescope_in_dir(temp_dir.path(), &["info", "--graph", "graph.json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Nodes: 4"));
}

#[rstest]
fn test_env_graph_file(temp_dir: TempDir) {
    std::fs::write(temp_dir.path().join("env.json"), CHAIN_GRAPH).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_routescope"))
        .args(["--json", "info"])
        .current_dir(temp_dir.path())
        .env("ROUTESCOPE_GRAPH_FILE", "env.json")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute routescope binary");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let info: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(info["nodeCount"], 3);
}

#[rstest]
fn test_malformed_config_file(chain_dir: TempDir) {
    std::fs::write(chain_dir.path().join("routescope.yaml"), "limits: [1, 2]\n").unwrap();

    let output = run_routescope_in_dir(chain_dir.path(), &["info"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Configuration error"));
}

#[rstest]
fn test_missing_explicit_config_names_the_file(chain_dir: TempDir) {
    let output = run_routescope_in_dir(chain_dir.path(), &["--config", "nope.yaml", "info"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Configuration error"));
    assert!(err.contains("nope.yaml"));
}

#[rstest]
fn test_explicit_config_resolves_graph_beside_it(temp_dir: TempDir) {
    let nested = temp_dir.path().join("other").join("dir");
    std::fs::create_dir_all(&nested).unwrap();
    std::fs::write(nested.join("arch.json"), CHAIN_GRAPH).unwrap();
    std::fs::write(nested.join("routescope.yaml"), "graph-file: arch.json\n").unwrap();

    let output = run_routescope_in_dir(
        temp_dir.path(),
        &["--json", "--config", "other/dir/routescope.yaml", "info"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let info: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(info["nodeCount"], 3);
}

// ============================================================================
// Info and Graph Commands
// ============================================================================

#[rstest]
fn test_info_reports_load_warnings(temp_dir: TempDir) {
    write_graph(temp_dir.path(), MESSY_GRAPH);

    let output = run_routescope_in_dir(temp_dir.path(), &["info"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Nodes: 2"));
    assert!(out.contains("Edges: 1"));
    assert!(out.contains("Load warnings (5)"));
    assert!(out.contains("duplicate node 'A' ignored"));
    assert!(out.contains("edge A -> ghost points to an unknown node"));
}

#[rstest]
fn test_info_json_warnings(temp_dir: TempDir) {
    write_graph(temp_dir.path(), MESSY_GRAPH);

    let output = run_routescope_in_dir(temp_dir.path(), &["--json", "info"]);

    assert!(output.status.success());
    let info: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(info["warnings"].as_array().unwrap().len(), 5);
}

#[rstest]
fn test_graph_text(chain_dir: TempDir) {
    let output = run_routescope_in_dir(chain_dir.path(), &["graph"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Nodes (3)"));
    assert!(out.contains("Edges (2)"));
    assert!(out.contains("C [rds] postgres"));
}

#[rstest]
fn test_log_level_debug_writes_to_stderr(chain_dir: TempDir) {
    let output = run_routescope_in_dir(
        chain_dir.path(),
        &["--log-level", "debug", "--json", "paths", "-s", "A", "-e", "C"],
    );

    assert!(output.status.success());
    assert!(stderr(&output).contains("Graph loaded"));
    parse_response(&stdout(&output));
}
