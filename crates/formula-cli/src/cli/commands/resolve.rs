//! `relay-formula resolve` – show which archive a platform would get.

use anyhow::Result;
use formula_core::config::FormulaConfig;
use formula_core::resolve::resolve;
use serde::Serialize;

use super::load_formula;
use crate::cli::{PlatformArgs, VarsArgs};

#[derive(Debug, Serialize)]
struct ResolvedView<'a> {
    name: &'a str,
    version: &'a str,
    os: String,
    arch: String,
    url: &'a str,
    sha256: String,
}

pub fn run_resolve(
    cfg: &FormulaConfig,
    vars: &VarsArgs,
    platform: &PlatformArgs,
    base_url: Option<&str>,
    json: bool,
) -> Result<()> {
    let formula = load_formula(cfg, vars, base_url)?;
    let (os, arch) = platform.resolve()?;
    let target = resolve(&formula.targets, os, arch)?;

    if json {
        let view = ResolvedView {
            name: formula.name,
            version: &formula.version,
            os: target.os.to_string(),
            arch: target.arch.to_string(),
            url: &target.url,
            sha256: target.checksum.to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}-{}", target.os, target.arch);
        println!("  url:    {}", target.url);
        println!("  sha256: {}", target.checksum);
    }
    Ok(())
}
