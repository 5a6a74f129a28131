//! Pick the table entry for a host.

use crate::error::InstallError;
use crate::formula::PlatformTarget;
use crate::platform::{Arch, Os};

/// Linear match of `(os, arch)` against `table`. The first match wins; later
/// matches are logged as ambiguous and ignored.
pub fn resolve(table: &[PlatformTarget], os: Os, arch: Arch) -> Result<&PlatformTarget, InstallError> {
    let mut matches = table.iter().filter(|t| t.os == os && t.arch == arch);
    let first = matches.next().ok_or_else(|| InstallError::UnsupportedPlatform {
        os: os.to_string(),
        arch: arch.to_string(),
    })?;
    let extra = matches.count();
    if extra > 0 {
        tracing::warn!(%os, %arch, extra, "ambiguous formula table; using first entry");
    }
    tracing::debug!(%os, %arch, url = %first.url, "resolved platform target");
    Ok(first)
}
