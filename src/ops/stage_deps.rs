//! Implementation of `sdkpack stage-deps`.
//!
//! Called from the native recipe's generate and build steps with the graph
//! the package manager resolved.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::builder::{import_dependencies, AggregationReport, DependencyGraph, Phase, Recipe};

/// Options for staging dependencies.
#[derive(Debug, Clone)]
pub struct StageOptions {
    /// Graph export (`graph info --format=json`)
    pub graph: PathBuf,
    /// Recipe build folder; the staging tree goes beneath it
    pub build_folder: PathBuf,
    /// Recipe declaring the staged requirements; built-in set when absent
    pub recipe: Option<PathBuf>,
    pub phase: Phase,
}

/// Stage the declared dependencies and write the environment scripts.
///
/// Reading the inputs is fatal. Copy failures are not: they come back as
/// warnings in the report.
pub fn stage_dependencies(opts: &StageOptions) -> Result<AggregationReport> {
    let graph = DependencyGraph::load(&opts.graph)?;
    let recipe = Recipe::load_or_default(opts.recipe.as_deref())?;
    tracing::debug!(
        "{} packages in graph, {} declared",
        graph.len(),
        recipe.requires.len()
    );

    let report = import_dependencies(&graph, &recipe, &opts.build_folder, opts.phase);

    report
        .env
        .write_scripts(&opts.build_folder)
        .context("failed to write environment scripts")?;

    Ok(report)
}
