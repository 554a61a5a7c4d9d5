//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::Parser;

use super::validators::{validate_end, validate_filters, validate_start};
use crate::filters::FilterSet;

/// Arguments for the `paths` command
#[derive(Parser, Debug, Clone)]
pub struct PathsArgs {
    /// Name of the node paths start from
    #[arg(short, long, value_parser = validate_start)]
    pub start: String,

    /// Name of the node paths end at
    #[arg(short, long, value_parser = validate_end)]
    pub end: String,

    /// Filters to apply (comma-separated), e.g. "public-start,no-vulnerability"
    ///
    /// All selected filters must accept a path for it to be kept. Run
    /// `routescope filters` to list them.
    #[arg(short, long, value_parser = validate_filters, default_value = "")]
    pub filters: FilterSet,

    /// Stop after this many paths (0 = no limit)
    #[arg(long)]
    pub max_paths: Option<usize>,

    /// Ignore paths with more than this many edges
    #[arg(long)]
    pub max_depth: Option<usize>,
}

/// Arguments for the `filters` command
#[derive(Parser, Debug, Clone)]
pub struct FiltersArgs {}

/// Arguments for the `graph` command
#[derive(Parser, Debug, Clone)]
pub struct GraphArgs {}

/// Arguments for the `info` command
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {}
