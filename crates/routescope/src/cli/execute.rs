//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::{Result, bail};

use super::args::{FiltersArgs, GraphArgs, InfoArgs, PathsArgs};
use crate::app::App;
use crate::engine::{PathQuery, QueryOutcome};
use crate::filters::available_filters;
use crate::output::{self, GraphInfo, OutputMode};

/// Execute the paths command
pub fn execute_paths(app: &App, args: &PathsArgs, output_mode: OutputMode) -> Result<()> {
    let query = PathQuery::new(&args.start, &args.end)?.with_filters(args.filters.clone());

    match app.engine().run(&query) {
        QueryOutcome::Found(report) => {
            output::print_path_report(&report, output_mode)?;
            Ok(())
        }
        QueryOutcome::NoPaths => {
            bail!("No paths found from {} to {}", query.start(), query.end())
        }
        QueryOutcome::NoMatchingPaths { total_paths } => {
            tracing::debug!(total_paths, filters = %query.filters(), "All paths filtered out");
            bail!("No paths match the specified filters")
        }
    }
}

/// Execute the filters command
pub fn execute_filters(_args: &FiltersArgs, output_mode: OutputMode) -> Result<()> {
    output::print_filters(&available_filters(), output_mode)?;
    Ok(())
}

/// Execute the graph command
pub fn execute_graph(app: &App, _args: &GraphArgs, output_mode: OutputMode) -> Result<()> {
    output::print_graph(&app.engine().full_graph(), output_mode)?;
    Ok(())
}

/// Execute the info command
pub fn execute_info(app: &App, _args: &InfoArgs, output_mode: OutputMode) -> Result<()> {
    let graph = app.graph();
    let info = GraphInfo::new(
        app.graph_path().display().to_string(),
        graph.node_count(),
        graph.edge_count(),
        graph.load_warnings(),
    );

    output::print_info(&info, output_mode)?;
    Ok(())
}
