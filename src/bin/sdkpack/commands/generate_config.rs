//! `sdkpack generate-config` command

use anyhow::{Context, Result};

use crate::cli::GenerateConfigArgs;
use crate::GlobalOptions;
use sdkpack::core::{Manifest, PlatformSelection};
use sdkpack::ops::generate_config::LATEST;
use sdkpack::ops::{generate_configs, resolve_installer_version, GenerateOptions};
use sdkpack::sources::HttpClient;
use sdkpack::util::Status;

pub fn execute(args: GenerateConfigArgs, global: &GlobalOptions) -> Result<()> {
    let shell = &global.shell;
    let config = global.ctx.config();
    // Parsed here rather than by clap so an unknown platform exits with 1.
    let selection: PlatformSelection = args.platform.parse()?;

    let manifest_path = global.ctx.manifest_path(args.manifest.as_deref());
    let manifest = Manifest::load(&manifest_path)?;
    let out_dir = global.ctx.output_dir(args.out_dir.as_deref());

    let client = HttpClient::new(&config.net)?;

    let installer_version = if args.version == LATEST {
        let spinner = shell.spinner(
            Status::Resolving,
            format!("latest {}/{} release", config.release.owner(), config.release.repo()),
        );
        let version = resolve_installer_version(&args.version, &client, &config.release)
            .context("failed to look up the latest installer release")?;
        spinner.finish();
        version
    } else {
        args.version.clone()
    };

    let platforms = selection
        .platforms()
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    shell.status(
        Status::Resolving,
        format!("installer {} for {}", installer_version, platforms),
    );

    let opts = GenerateOptions::new(selection, installer_version, &config.release, out_dir);

    let spinner = shell.spinner(Status::Probing, "artifact URLs");
    let written = generate_configs(&manifest, &opts, &client)?;
    spinner.finish();

    for path in written {
        shell.status(Status::Created, path.display());
    }

    Ok(())
}
