//! `sdkpack stage-deps` command
//!
//! Warnings never fail the command; the native build reports what is really
//! missing.

use anyhow::Result;

use crate::cli::StageDepsArgs;
use crate::GlobalOptions;
use sdkpack::ops::{stage_dependencies, StageOptions};
use sdkpack::util::diagnostic::{emit, suggestions};
use sdkpack::util::{Diagnostic, Status};

pub fn execute(args: StageDepsArgs, global: &GlobalOptions) -> Result<()> {
    let shell = &global.shell;
    let ctx = &global.ctx;

    let opts = StageOptions {
        graph: ctx.resolve_path(&args.graph),
        build_folder: ctx.resolve_path(&args.build_folder),
        recipe: args.recipe.as_deref().map(|r| ctx.resolve_path(r)),
        phase: args.phase.into(),
    };

    let report = stage_dependencies(&opts)?;

    for reference in &report.staged {
        shell.status(Status::Staged, reference);
    }
    if shell.is_verbose() {
        for reference in &report.skipped {
            shell.status(Status::Skipped, format!("{} (not declared)", reference));
        }
    }

    if report.has_warnings() {
        let mut diag = Diagnostic::warning(format!(
            "{} of {} dependencies were not fully staged",
            report.warnings.len(),
            report.warnings.len() + report.staged.len()
        ))
        .with_location(&report.root)
        .with_suggestion(suggestions::STAGING_WARNINGS);
        for warning in &report.warnings {
            diag = diag.with_context(warning.to_string());
        }
        emit(&diag, shell.use_color());
    }

    shell.status(
        Status::Finished,
        format!(
            "{} files into {} ({} phase)",
            report.files.len(),
            report.root.display(),
            opts.phase
        ),
    );
    Ok(())
}
