//! Argument groups shared by several subcommands.

use anyhow::{Context, Result};
use clap::Args;
use formula_core::{platform, Arch, FormulaVars, Os};
use std::fs;
use std::path::PathBuf;

/// Template variables, either one by one or from a TOML file.
#[derive(Debug, Clone, Default, Args)]
pub struct VarsArgs {
    /// TOML file with `version` and the `sha256_*` keys.
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with_all = ["version", "sha256_macos_intel", "sha256_macos_arm", "sha256_linux_intel"]
    )]
    pub vars: Option<PathBuf>,
    /// Release version, e.g. 1.2.3.
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,
    /// SHA-256 of the macos-x86_64 archive.
    #[arg(long, value_name = "HEX")]
    pub sha256_macos_intel: Option<String>,
    /// SHA-256 of the macos-arm64 archive.
    #[arg(long, value_name = "HEX")]
    pub sha256_macos_arm: Option<String>,
    /// SHA-256 of the linux-x86_64 archive.
    #[arg(long, value_name = "HEX")]
    pub sha256_linux_intel: Option<String>,
}

impl VarsArgs {
    pub fn load(&self) -> Result<FormulaVars> {
        if let Some(path) = &self.vars {
            let data =
                fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
            let vars: FormulaVars =
                toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
            return Ok(vars);
        }

        let missing = |flag: &str| anyhow::anyhow!("missing --{} (or pass --vars FILE)", flag);
        Ok(FormulaVars {
            version: self.version.clone().ok_or_else(|| missing("version"))?,
            sha256_macos_intel: self
                .sha256_macos_intel
                .clone()
                .ok_or_else(|| missing("sha256-macos-intel"))?,
            sha256_macos_arm: self
                .sha256_macos_arm
                .clone()
                .ok_or_else(|| missing("sha256-macos-arm"))?,
            sha256_linux_intel: self
                .sha256_linux_intel
                .clone()
                .ok_or_else(|| missing("sha256-linux-intel"))?,
        })
    }
}

/// Platform override; both halves default to the running host.
#[derive(Debug, Clone, Default, Args)]
pub struct PlatformArgs {
    /// Operating system (macos, linux).
    #[arg(long, value_name = "OS")]
    pub os: Option<Os>,
    /// CPU architecture (x86_64, arm64).
    #[arg(long, value_name = "ARCH")]
    pub arch: Option<Arch>,
}

impl PlatformArgs {
    /// Fill whichever half is missing from host detection.
    pub fn resolve(&self) -> Result<(Os, Arch)> {
        match (self.os, self.arch) {
            (Some(os), Some(arch)) => Ok((os, arch)),
            (os, arch) => {
                let (host_os, host_arch) = platform::detect()?;
                Ok((os.unwrap_or(host_os), arch.unwrap_or(host_arch)))
            }
        }
    }
}
