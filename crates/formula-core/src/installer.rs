//! Sequential install pipeline.
//!
//! detect -> resolve -> fetch -> verify -> install -> self-test. The first
//! error aborts the whole run; nothing is touched in the bin dir until the
//! archive has passed verification.

use crate::error::InstallError;
use crate::fetch::{self, ArchiveSource};
use crate::formula::{Formula, PlatformTarget};
use crate::install;
use crate::platform::{self, Arch, Os};
use crate::resolve::resolve;
use crate::selftest;
use std::path::PathBuf;

/// What a successful run did.
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub target: PlatformTarget,
    pub installed_path: PathBuf,
    pub archive_bytes: usize,
    pub self_tested: bool,
}

pub struct Installer<'a> {
    formula: &'a Formula,
    source: &'a dyn ArchiveSource,
    bin_dir: PathBuf,
    platform: Option<(Os, Arch)>,
    self_test: bool,
}

impl<'a> Installer<'a> {
    pub fn new(formula: &'a Formula, source: &'a dyn ArchiveSource, bin_dir: impl Into<PathBuf>) -> Self {
        Self {
            formula,
            source,
            bin_dir: bin_dir.into(),
            platform: None,
            self_test: true,
        }
    }

    /// Install for `(os, arch)` instead of the detected host.
    pub fn with_platform(mut self, os: Os, arch: Arch) -> Self {
        self.platform = Some((os, arch));
        self
    }

    pub fn skip_self_test(mut self, skip: bool) -> Self {
        self.self_test = !skip;
        self
    }

    /// Run every step in order. A failed self-test leaves the freshly
    /// installed binary in the bin dir; only the error is reported.
    pub fn run(&self) -> Result<InstallReport, InstallError> {
        let (os, arch) = match self.platform {
            Some(p) => p,
            None => platform::detect()?,
        };
        tracing::info!(
            formula = self.formula.name,
            version = %self.formula.version,
            %os,
            %arch,
            bin_dir = %self.bin_dir.display(),
            "install started"
        );

        let target = resolve(&self.formula.targets, os, arch)?;
        let archive = fetch::fetch_and_verify(self.source, target)?;
        let installed_path = install::install(&archive, self.formula.binary, &self.bin_dir)?;

        if self.self_test {
            selftest::self_test(&installed_path)?;
        } else {
            tracing::debug!("self-test skipped");
        }

        Ok(InstallReport {
            target: target.clone(),
            installed_path,
            archive_bytes: archive.len(),
            self_tested: self.self_test,
        })
    }
}
