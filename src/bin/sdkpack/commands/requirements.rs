//! `sdkpack requirements` command
//!
//! Prints the recipe in the package manager's plain-text format:
//!
//! ```text
//! [requires]
//! glib/2.76.3
//!
//! [tool_requires]
//! meson/1.2.3
//! ```

use anyhow::Result;

use crate::cli::RequirementsArgs;
use crate::GlobalOptions;
use sdkpack::builder::Recipe;

pub fn execute(args: RequirementsArgs, global: &GlobalOptions) -> Result<()> {
    let path = args.recipe.as_deref().map(|r| global.ctx.resolve_path(r));
    let recipe = Recipe::load_or_default(path.as_deref())?;

    println!("[requires]");
    for reference in &recipe.requires {
        println!("{}", reference);
    }
    println!();
    println!("[tool_requires]");
    for reference in &recipe.tool_requires {
        println!("{}", reference);
    }

    Ok(())
}
