//! `relay-formula render` – print the package-manager recipe for a release.

use anyhow::Result;

use crate::cli::VarsArgs;

pub fn run_render(vars: &VarsArgs) -> Result<()> {
    let vars = vars.load()?;
    let recipe = vars.render_recipe()?;
    print!("{}", recipe);
    Ok(())
}
