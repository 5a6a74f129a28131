//! `relay-formula install` – the full resolve/fetch/verify/install/self-test run.

use anyhow::Result;
use formula_core::config::FormulaConfig;
use formula_core::fetch::CurlSource;
use formula_core::Installer;
use std::path::PathBuf;

use super::load_formula;
use crate::cli::{PlatformArgs, VarsArgs};

pub fn run_install(
    cfg: &FormulaConfig,
    vars: &VarsArgs,
    platform: &PlatformArgs,
    base_url: Option<&str>,
    bin_dir: Option<PathBuf>,
    skip_test: bool,
) -> Result<()> {
    let formula = load_formula(cfg, vars, base_url)?;
    let (os, arch) = platform.resolve()?;
    let bin_dir = match bin_dir {
        Some(dir) => dir,
        None => cfg.resolve_bin_dir()?,
    };

    let source = CurlSource::new(cfg.fetch_options());
    println!(
        "Installing {} {} ({}-{}) into {}",
        formula.name,
        formula.version,
        os,
        arch,
        bin_dir.display()
    );
    let report = Installer::new(&formula, &source, bin_dir)
        .with_platform(os, arch)
        .skip_self_test(skip_test)
        .run()?;

    println!(
        "Installed {} ({} bytes downloaded, sha256 {})",
        report.installed_path.display(),
        report.archive_bytes,
        report.target.checksum
    );
    if report.self_tested {
        println!("Self-test passed: {} --help", report.installed_path.display());
    }
    Ok(())
}
