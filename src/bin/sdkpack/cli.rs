//! CLI definitions using clap.

use std::path::PathBuf;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use sdkpack::builder::Phase;
use sdkpack::core::Action;

/// sdkpack - release and packaging helper for the SDK installer
#[derive(Parser)]
#[command(name = "sdkpack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one library's manifest fields, one per line
    Parse(ParseArgs),

    /// Generate the per-platform installer configs
    GenerateConfig(GenerateConfigArgs),

    /// Record component versions in a version_info.json
    ComponentVersions(ComponentVersionsArgs),

    /// Stage resolved native dependencies into the build folder
    StageDeps(StageDepsArgs),

    /// Collect build outputs into the package folder
    Package(PackageArgs),

    /// Print the native requirements for the package manager
    Requirements(RequirementsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ParseArgs {
    /// Library key in the manifest
    #[arg(long)]
    pub name: String,

    /// Override the manifest's action
    #[arg(
        long,
        value_parser = PossibleValuesParser::new(Action::NAMES)
            .try_map(|s| s.parse::<Action>())
    )]
    pub action: Option<Action>,

    /// Path to the library manifest
    #[arg(long)]
    pub config_path: PathBuf,
}

#[derive(Args)]
pub struct GenerateConfigArgs {
    /// Installer platform(s): Windows, Linux or all
    #[arg(short, long, default_value = "all")]
    pub platform: String,

    /// Installer release tag, or `latest` to look it up
    #[arg(short = 'V', long, default_value = "latest")]
    pub version: String,

    /// Library manifest (defaults to config.yml)
    #[arg(long, env = "SDKPACK_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Output directory (defaults to build/)
    #[arg(long, env = "SDKPACK_OUT_DIR")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ComponentVersionsArgs {
    /// Library manifest
    pub manifest: PathBuf,

    /// JSON document to update in place
    pub version_info: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PhaseArg {
    Generate,
    Build,
}

impl From<PhaseArg> for Phase {
    fn from(phase: PhaseArg) -> Self {
        match phase {
            PhaseArg::Generate => Phase::Generate,
            PhaseArg::Build => Phase::Build,
        }
    }
}

#[derive(Args)]
pub struct StageDepsArgs {
    /// Dependency graph exported by the package manager
    #[arg(long)]
    pub graph: PathBuf,

    /// Recipe build folder
    #[arg(long)]
    pub build_folder: PathBuf,

    /// Recipe declaring the staged requirements
    #[arg(long)]
    pub recipe: Option<PathBuf>,

    /// Recipe step this runs in
    #[arg(long, value_enum, default_value = "build")]
    pub phase: PhaseArg,
}

#[derive(Args)]
pub struct PackageArgs {
    #[arg(long)]
    pub source_folder: PathBuf,

    #[arg(long)]
    pub build_folder: PathBuf,

    #[arg(long)]
    pub package_folder: PathBuf,
}

#[derive(Args)]
pub struct RequirementsArgs {
    /// Recipe to print (defaults to the built-in requirement set)
    #[arg(long)]
    pub recipe: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
