//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

use crate::engine;
use crate::filters::{FilterSet, parse_filter_list};

/// Validate the `--start` node name.
///
/// Delegates to the engine's validator so the CLI and library agree on what
/// a usable node name is.
pub fn validate_start(s: &str) -> Result<String, String> {
    engine::validate_node_name("Start", s).map_err(|e| e.to_string())
}

/// Validate the `--end` node name.
pub fn validate_end(s: &str) -> Result<String, String> {
    engine::validate_node_name("End", s).map_err(|e| e.to_string())
}

/// Parse a comma-separated filter list.
///
/// Empty entries are skipped; unknown ids are rejected with the list of
/// valid ones.
pub fn validate_filters(s: &str) -> Result<FilterSet, String> {
    parse_filter_list(s).map_err(|e| e.to_string())
}
