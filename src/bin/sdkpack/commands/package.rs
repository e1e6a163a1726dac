//! `sdkpack package` command

use anyhow::Result;

use crate::cli::PackageArgs;
use crate::GlobalOptions;
use sdkpack::ops::{package_artifacts, PackageOptions};
use sdkpack::util::Status;

pub fn execute(args: PackageArgs, global: &GlobalOptions) -> Result<()> {
    let ctx = &global.ctx;
    let opts = PackageOptions {
        source_folder: ctx.resolve_path(&args.source_folder),
        build_folder: ctx.resolve_path(&args.build_folder),
        package_folder: ctx.resolve_path(&args.package_folder),
    };

    let files = package_artifacts(&opts)?;

    global.shell.status(
        Status::Finished,
        format!("{} files into {}", files.len(), opts.package_folder.display()),
    );
    Ok(())
}
