//! sdkpack CLI - release and packaging helper for the SDK installer

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use sdkpack::util::diagnostic::{emit, Diagnostic};
use sdkpack::util::{GlobalContext, Shell};

/// Options shared by every command.
pub struct GlobalOptions {
    pub shell: Shell,
    pub ctx: GlobalContext,
}

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        emit(&Diagnostic::from_error(&e), color);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("sdkpack=debug")
    } else {
        EnvFilter::new("sdkpack=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(cli.verbose);
    ctx.set_color(!cli.no_color);

    let global = GlobalOptions {
        shell: Shell::from_flags(ctx.is_verbose(), !ctx.color()),
        ctx,
    };

    // Execute command
    match cli.command {
        Commands::Parse(args) => commands::parse::execute(args, &global),
        Commands::GenerateConfig(args) => commands::generate_config::execute(args, &global),
        Commands::ComponentVersions(args) => commands::component_versions::execute(args, &global),
        Commands::StageDeps(args) => commands::stage_deps::execute(args, &global),
        Commands::Package(args) => commands::package::execute(args, &global),
        Commands::Requirements(args) => commands::requirements::execute(args, &global),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
