//! `sdkpack component-versions` command

use anyhow::Result;

use crate::cli::ComponentVersionsArgs;
use crate::GlobalOptions;
use sdkpack::ops::extract_component_versions;
use sdkpack::util::Status;

pub fn execute(args: ComponentVersionsArgs, global: &GlobalOptions) -> Result<()> {
    let manifest = global.ctx.resolve_path(&args.manifest);
    let version_info = global.ctx.resolve_path(&args.version_info);

    extract_component_versions(&manifest, &version_info)?;

    global.shell.status(Status::Updated, version_info.display());
    Ok(())
}
