//! CLI command handlers, one file per command.

mod checksum;
mod completions;
mod install;
mod render;
mod resolve;

pub use checksum::run_checksum;
pub use completions::{run_completions, run_man};
pub use install::run_install;
pub use render::run_render;
pub use resolve::run_resolve;
pub use test::run_test;

use anyhow::Result;
use formula_core::config::FormulaConfig;
use formula_core::Formula;

use crate::cli::VarsArgs;

/// Load the template variables and render the table against the effective base URL.
pub(crate) fn load_formula(
    cfg: &FormulaConfig,
    vars: &VarsArgs,
    base_url: Option<&str>,
) -> Result<Formula> {
    let vars = vars.load()?;
    let base_url = base_url.unwrap_or(&cfg.base_url);
    let formula = Formula::render(&vars, base_url)?;
    let dups = formula.duplicate_targets();
    if !dups.is_empty() {
        tracing::warn!(?dups, "formula lists some platforms more than once");
    }
    Ok(formula)
}
