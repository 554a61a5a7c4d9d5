//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for routescope using
//! clap's derive API. Each command has its own argument struct with
//! validation and helpful error messages.
//!
//! # Commands
//!
//! - `paths`: Find paths between two components, optionally filtered
//! - `filters`: List the available path filters
//! - `graph`: Print the whole component graph
//! - `info`: Show graph location, size and load warnings
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--graph`: Graph document to load
//! - `--config`: Configuration file to use
//! - `--log-level`: Log verbosity on stderr
//!
//! # Example
//!
//! ```bash
//! routescope paths --start frontend --end orders-db
//! routescope paths -s frontend -e orders-db --filters public-start,no-vulnerability
//! routescope --json graph
//! ```

mod args;
mod execute;
mod validators;

use crate::app::{App, AppOptions};
use crate::output::OutputMode;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Re-export argument structs
pub use args::{FiltersArgs, GraphArgs, InfoArgs, PathsArgs};

// Re-export validators for external use
pub use validators::{validate_end, validate_filters, validate_start};

/// Default log filter when neither `RUST_LOG` nor `--log-level` is set.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Routescope - attack path discovery over component graphs
///
/// Enumerates every simple path between two components of an architecture
/// graph and narrows them with security filters.
#[derive(Parser, Debug)]
#[command(name = "routescope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Graph document to load (overrides config and ROUTESCOPE_GRAPH_FILE)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub graph: Option<PathBuf>,

    /// Configuration file (default: routescope.yaml in the working directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level or filter directive for stderr logging
    #[arg(
        long,
        global = true,
        env = "ROUTESCOPE_LOG",
        default_value = DEFAULT_LOG_LEVEL,
        value_name = "LEVEL"
    )]
    pub log_level: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Find paths between two components
    ///
    /// Lists every simple path from the start node to the end node and
    /// prints the union of the paths that pass all selected filters.
    Paths(PathsArgs),

    /// List the available path filters
    Filters(FiltersArgs),

    /// Print the whole component graph
    Graph(GraphArgs),

    /// Show graph information
    ///
    /// Displays the graph location, node and edge counts, and anything that
    /// was normalized while loading it.
    Info(InfoArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    fn app_options(&self) -> AppOptions {
        let (max_paths, max_depth) = match &self.command {
            Some(Commands::Paths(args)) => (args.max_paths, args.max_depth),
            _ => (None, None),
        };
        AppOptions {
            config_file: self.config.clone(),
            graph_file: self.graph.clone(),
            max_paths,
            max_depth,
        }
    }

    /// Execute the CLI command
    ///
    /// # Errors
    ///
    /// Returns an error if the graph cannot be loaded, the query finds
    /// nothing, or output cannot be written.
    pub async fn execute(&self) -> Result<()> {
        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        let Some(command) = &self.command else {
            println!("Routescope path discovery");
            println!("Use --help for more information");
            return Ok(());
        };

        if let Commands::Filters(args) = command {
            return execute::execute_filters(args, output_mode);
        }

        let app = App::from_directory(&std::env::current_dir()?, &self.app_options()).await?;
        match command {
            Commands::Paths(args) => execute::execute_paths(&app, args, output_mode),
            Commands::Graph(args) => execute::execute_graph(&app, args, output_mode),
            Commands::Info(args) => execute::execute_info(&app, args, output_mode),
            Commands::Filters(args) => execute::execute_filters(args, output_mode),
        }
    }
}
