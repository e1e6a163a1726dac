//! `sdkpack parse` command
//!
//! Prints the eight fields of one library to stdout. An unknown library is
//! not an error: the message goes to stderr and stdout stays empty.

use anyhow::Result;

use crate::cli::ParseArgs;
use crate::GlobalOptions;
use sdkpack::core::{Manifest, ResolveError};
use sdkpack::ops::describe_library;

pub fn execute(args: ParseArgs, global: &GlobalOptions) -> Result<()> {
    let path = global.ctx.resolve_path(&args.config_path);
    let manifest = Manifest::load(&path)?;

    match describe_library(&manifest, &args.name, args.action) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
            Ok(())
        }
        Err(ResolveError::NotFound { name, manifest }) => {
            global.shell.note(format!(
                "No library named {} found in {}",
                name,
                manifest.display()
            ));
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
