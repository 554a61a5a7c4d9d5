//! Output formatting for CLI commands.
//!
//! This module provides utilities for formatting command output in both
//! human-readable text format and JSON format for programmatic use.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors, icons)

pub mod color;

use crate::domain::{FlatEdge, GraphResponse, Node};
use crate::engine::PathReport;
use crate::filters::FilterInfo;
use crate::store::LoadWarning;
use serde::Serialize;
use std::env;
use std::io::{self, Write};

pub use color::{error, success, warning};

use color::{arrow, bold, colorize_kind, colorize_name, dimmed, node_markers};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 100;

/// Configuration for output formatting.
///
/// This struct holds settings that control how output is formatted,
/// including terminal width limits, ASCII fallback mode, and color output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use ASCII-only icons instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new `OutputConfig` with explicit values.
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Create an `OutputConfig` by reading from environment variables.
    ///
    /// Reads:
    /// - `ROUTESCOPE_MAX_WIDTH`: Maximum content width (default: 100)
    /// - `ROUTESCOPE_ASCII`: Set to "1" or "true" for ASCII-only icons
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `ROUTESCOPE_COLOR`: Set to "0" or "false" to disable colors
    pub fn from_env() -> Self {
        let max_width = match env::var("ROUTESCOPE_MAX_WIDTH") {
            Ok(s) if !s.is_empty() => s.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    env_var = "ROUTESCOPE_MAX_WIDTH",
                    value = %s,
                    default = DEFAULT_MAX_CONTENT_WIDTH,
                    "Invalid value, using default"
                );
                DEFAULT_MAX_CONTENT_WIDTH
            }),
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let use_ascii = match env::var("ROUTESCOPE_ASCII") {
            Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Ok(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Ok(v) => {
                tracing::warn!(
                    env_var = "ROUTESCOPE_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            Err(_) => false,
        };

        // https://no-color.org/
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("ROUTESCOPE_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Usable line width: the terminal width capped by `max_width`.
    fn line_width(&self) -> usize {
        get_terminal_width().min(self.max_width)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Get the current terminal width, falling back to default if detection fails.
fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map_or(DEFAULT_TERMINAL_WIDTH, |(w, _)| w.0)
        .into()
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Summary of a loaded graph, as shown by `info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphInfo {
    /// Where the graph was read from
    pub location: String,
    /// Number of distinct nodes
    pub node_count: usize,
    /// Number of directed edges kept
    pub edge_count: usize,
    /// Normalization notes from loading
    pub warnings: Vec<String>,
}

impl GraphInfo {
    /// Build a summary from counts and load warnings.
    pub fn new(
        location: impl Into<String>,
        node_count: usize,
        edge_count: usize,
        warnings: &[LoadWarning],
    ) -> Self {
        Self {
            location: location.into(),
            node_count,
            edge_count,
            warnings: warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Print the result of a path query.
///
/// JSON mode emits the bare `{nodes, edges}` response.
pub fn print_path_report(report: &PathReport, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => {
            print_path_report_text(&mut handle, report, &OutputConfig::from_env())
        }
        OutputMode::Json => write_json(&mut handle, &report.response),
    }
}

/// Print the whole graph.
pub fn print_graph(response: &GraphResponse, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => print_graph_text(&mut handle, response, &OutputConfig::from_env()),
        OutputMode::Json => write_json(&mut handle, response),
    }
}

/// Print the registered filters.
pub fn print_filters(filters: &[FilterInfo], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => print_filters_text(&mut handle, filters, &OutputConfig::from_env()),
        OutputMode::Json => write_json(&mut handle, filters),
    }
}

/// Print a graph summary.
pub fn print_info(info: &GraphInfo, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => print_info_text(&mut handle, info, &OutputConfig::from_env()),
        OutputMode::Json => write_json(&mut handle, info),
    }
}

/// Pretty-print any serializable value as JSON.
fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

// ============================================================================
// Text Formatting
// ============================================================================

fn print_path_report_text<W: Write>(
    w: &mut W,
    report: &PathReport,
    config: &OutputConfig,
) -> io::Result<()> {
    let summary = if report.matched_paths == report.total_paths {
        format!("{} path(s) found", report.total_paths)
    } else {
        format!(
            "{} of {} path(s) match the filters",
            report.matched_paths, report.total_paths
        )
    };
    writeln!(w, "{}", color::success(&summary, config))?;

    if report.truncated {
        let note = "Search stopped at a configured limit; more paths may exist.";
        for line in wrap_text(note, config.line_width()) {
            writeln!(w, "{}", warning(&line, config))?;
        }
    }

    print_graph_text(w, &report.response, config)
}

fn print_graph_text<W: Write>(
    w: &mut W,
    response: &GraphResponse,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w)?;
    writeln!(
        w,
        "{} {}",
        bold("Nodes", config),
        dimmed(&format!("({})", response.nodes.len()), config)
    )?;
    for node in &response.nodes {
        writeln!(w, "  {}", format_node_line(node, config))?;
    }

    writeln!(w)?;
    writeln!(
        w,
        "{} {}",
        bold("Edges", config),
        dimmed(&format!("({})", response.edges.len()), config)
    )?;
    for edge in &response.edges {
        writeln!(w, "  {}", format_edge_line(edge, config))?;
    }

    Ok(())
}

fn format_node_line(node: &Node, config: &OutputConfig) -> String {
    let mut line = format!(
        "{} {}",
        colorize_name(&node.name, config),
        dimmed(&format!("[{}]", colorize_kind(&node.kind, config)), config)
    );
    if let Some(engine) = node.engine() {
        line.push(' ');
        line.push_str(&dimmed(engine, config));
    }
    let markers = node_markers(node, config);
    if !markers.is_empty() {
        line.push(' ');
        line.push_str(&markers);
    }
    line
}

fn format_edge_line(edge: &FlatEdge, config: &OutputConfig) -> String {
    format!(
        "{} {} {}",
        colorize_name(&edge.from, config),
        arrow(config),
        colorize_name(&edge.to, config)
    )
}

fn print_filters_text<W: Write>(
    w: &mut W,
    filters: &[FilterInfo],
    config: &OutputConfig,
) -> io::Result<()> {
    let id_width = filters.iter().map(|f| f.id.len()).max().unwrap_or(0);
    let desc_width = config.line_width().saturating_sub(id_width + 4).max(20);

    for filter in filters {
        let mut lines = wrap_text(filter.description, desc_width).into_iter();
        let first = lines.next().unwrap_or_default();
        writeln!(
            w,
            "  {}{}  {first}",
            colorize_name(filter.id, config),
            " ".repeat(id_width - filter.id.len())
        )?;
        for line in lines {
            writeln!(w, "  {}  {line}", " ".repeat(id_width))?;
        }
    }
    Ok(())
}

fn print_info_text<W: Write>(w: &mut W, info: &GraphInfo, config: &OutputConfig) -> io::Result<()> {
    writeln!(w, "{} {}", dimmed("Graph:", config), info.location)?;
    writeln!(w, "{} {}", dimmed("Nodes:", config), info.node_count)?;
    writeln!(w, "{} {}", dimmed("Edges:", config), info.edge_count)?;

    if info.warnings.is_empty() {
        return Ok(());
    }

    writeln!(w)?;
    writeln!(
        w,
        "{} {}",
        bold("Load warnings", config),
        dimmed(&format!("({})", info.warnings.len()), config)
    )?;
    let width = config.line_width().saturating_sub(4);
    for text in &info.warnings {
        let mut lines = wrap_text(text, width).into_iter();
        if let Some(first) = lines.next() {
            writeln!(w, "  {} {}", warning("-", config), first)?;
        }
        for line in lines {
            writeln!(w, "    {line}")?;
        }
    }
    Ok(())
}

/// Wrap text to fit within a given width, preserving existing line breaks.
/// Uses textwrap to handle edge cases like long words (paths, URLs).
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width)
                    .into_iter()
                    .map(std::borrow::Cow::into_owned)
                    .collect()
            }
        })
        .collect()
}
