//! The rendered per-platform download table for `rusty-relay-client`.
//!
//! The set of supported (os, arch) pairs is a compile-time list. Rendering
//! fills in version-dependent URLs and the checksums injected at release
//! time; after that the table is immutable.

use crate::checksum::Sha256Digest;
use crate::error::InstallError;
use crate::platform::{Arch, Os};
use crate::template;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const BINARY_NAME: &str = "rusty-relay-client";
pub const DESCRIPTION: &str = "The client which can connect to a rusty-relay server";
pub const HOMEPAGE: &str = "https://github.com/larscom/rusty-relay";
pub const DEFAULT_BASE_URL: &str = "https://github.com/larscom/rusty-relay/releases/download";

const URL_PATTERN: &str = "{{base_url}}/{{version}}/{{binary}}-{{version}}-{{os}}-{{arch}}.tar.gz";

/// Bundled package-manager recipe, rendered by [`FormulaVars::render_recipe`].
pub const RECIPE_TEMPLATE: &str = include_str!("../templates/rusty-relay-client.rb");

/// Which injected checksum belongs to a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChecksumVar {
    MacosIntel,
    MacosArm,
    LinuxIntel,
}

/// Supported platforms, in match order.
const TABLE: &[(Os, Arch, ChecksumVar)] = &[
    (Os::Macos, Arch::X86_64, ChecksumVar::MacosIntel),
    (Os::Macos, Arch::Arm64, ChecksumVar::MacosArm),
    (Os::Linux, Arch::X86_64, ChecksumVar::LinuxIntel),
];

/// Release-time template variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaVars {
    pub version: String,
    pub sha256_macos_intel: String,
    pub sha256_macos_arm: String,
    pub sha256_linux_intel: String,
}

impl FormulaVars {
    fn checksum(&self, var: ChecksumVar) -> &str {
        match var {
            ChecksumVar::MacosIntel => &self.sha256_macos_intel,
            ChecksumVar::MacosArm => &self.sha256_macos_arm,
            ChecksumVar::LinuxIntel => &self.sha256_linux_intel,
        }
    }

    /// Reject versions that would break the URL and checksums that are not digests.
    pub fn validate(&self) -> Result<(), InstallError> {
        let v = self.version.trim();
        if v.is_empty() {
            return Err(InstallError::InvalidFormula("version is empty".to_string()));
        }
        if v.contains("..") || v.chars().any(|c| matches!(c, '/' | '?' | '#') || c.is_whitespace()) {
            return Err(InstallError::InvalidFormula(format!(
                "version {:?} must not contain '/', '?', '#', '..' or whitespace",
                self.version
            )));
        }
        for &(_, _, var) in TABLE {
            self.checksum(var).parse::<Sha256Digest>()?;
        }
        Ok(())
    }

    fn as_map(&self) -> HashMap<&str, &str> {
        HashMap::from([
            ("version", self.version.trim()),
            ("sha256_macos_intel", self.sha256_macos_intel.trim()),
            ("sha256_macos_arm", self.sha256_macos_arm.trim()),
            ("sha256_linux_intel", self.sha256_linux_intel.trim()),
        ])
    }

    /// Render the bundled package-manager recipe text.
    pub fn render_recipe(&self) -> Result<String, InstallError> {
        self.validate()?;
        template::render(RECIPE_TEMPLATE, &self.as_map())
            .map_err(|e| InstallError::InvalidFormula(e.to_string()))
    }
}

/// One (os, arch) combination with its download artifact and checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformTarget {
    pub os: Os,
    pub arch: Arch,
    pub url: String,
    pub checksum: Sha256Digest,
}

#[derive(Debug, Clone)]
pub struct Formula {
    pub name: &'static str,
    pub desc: &'static str,
    pub homepage: &'static str,
    pub version: String,
    /// Executable contained in each archive and placed into the bin dir.
    pub binary: &'static str,
    pub targets: Vec<PlatformTarget>,
}

impl Formula {
    /// Render the static table against `vars`.
    ///
    /// `base_url` is the release download prefix (no trailing slash needed).
    pub fn render(vars: &FormulaVars, base_url: &str) -> Result<Formula, InstallError> {
        vars.validate()?;
        let base_url = base_url.trim_end_matches('/');
        let version = vars.version.trim();

        let mut targets = Vec::with_capacity(TABLE.len());
        for &(os, arch, var) in TABLE {
            let values = HashMap::from([
                ("base_url", base_url),
                ("version", version),
                ("binary", BINARY_NAME),
                ("os", os.as_str()),
                ("arch", arch.as_str()),
            ]);
            let rendered = template::render(URL_PATTERN, &values)
                .map_err(|e| InstallError::InvalidFormula(e.to_string()))?;
            let parsed = url::Url::parse(&rendered).map_err(|e| {
                InstallError::InvalidFormula(format!("bad download URL {}: {}", rendered, e))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(InstallError::InvalidFormula(format!(
                    "download URL must be http(s): {}",
                    rendered
                )));
            }
            targets.push(PlatformTarget {
                os,
                arch,
                url: rendered,
                checksum: vars.checksum(var).parse()?,
            });
        }

        tracing::debug!(version, targets = targets.len(), "formula rendered");
        Ok(Formula {
            name: BINARY_NAME,
            desc: DESCRIPTION,
            homepage: HOMEPAGE,
            version: version.to_string(),
            binary: BINARY_NAME,
            targets,
        })
    }

    /// (os, arch) pairs that appear more than once. Only the first is ever used.
    pub fn duplicate_targets(&self) -> Vec<(Os, Arch)> {
        duplicates(&self.targets)
    }
}

pub(crate) fn duplicates(table: &[PlatformTarget]) -> Vec<(Os, Arch)> {
    let mut seen = Vec::new();
    let mut dups = Vec::new();
    for t in table {
        let key = (t.os, t.arch);
        if seen.contains(&key) {
            if !dups.contains(&key) {
                dups.push(key);
            }
        } else {
            seen.push(key);
        }
    }
    dups
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_vars(version: &str) -> FormulaVars {
        FormulaVars {
            version: version.to_string(),
            sha256_macos_intel: "11".repeat(32),
            sha256_macos_arm: "22".repeat(32),
            sha256_linux_intel: "33".repeat(32),
        }
    }

    #[test]
    fn render_builds_one_target_per_row() {
        let f = Formula::render(&sample_vars("1.2.3"), DEFAULT_BASE_URL).unwrap();
        assert_eq!(f.targets.len(), 3);
        assert_eq!(f.version, "1.2.3");
        assert!(f.duplicate_targets().is_empty());
    }

    #[test]
    fn linux_url_and_checksum() {
        let f = Formula::render(&sample_vars("1.2.3"), DEFAULT_BASE_URL).unwrap();
        let t = f
            .targets
            .iter()
            .find(|t| t.os == Os::Linux && t.arch == Arch::X86_64)
            .unwrap();
        assert_eq!(
            t.url,
            "https://github.com/larscom/rusty-relay/releases/download/1.2.3/rusty-relay-client-1.2.3-linux-x86_64.tar.gz"
        );
        assert_eq!(t.checksum.to_string(), "33".repeat(32));
    }

    #[test]
    fn macos_rows_use_their_own_checksums() {
        let f = Formula::render(&sample_vars("0.4.0"), DEFAULT_BASE_URL).unwrap();
        let arm = f.targets.iter().find(|t| t.arch == Arch::Arm64).unwrap();
        assert_eq!(arm.os, Os::Macos);
        assert!(arm.url.ends_with("rusty-relay-client-0.4.0-macos-arm64.tar.gz"));
        assert_eq!(arm.checksum.to_string(), "22".repeat(32));
    }

    #[test]
    fn trailing_slash_on_base_url() {
        let f = Formula::render(&sample_vars("1.0.0"), "http://127.0.0.1:8080/dl/").unwrap();
        assert!(f.targets[0].url.starts_with("http://127.0.0.1:8080/dl/1.0.0/"));
    }

    #[test]
    fn invalid_vars_rejected() {
        let mut v = sample_vars("");
        assert!(matches!(
            Formula::render(&v, DEFAULT_BASE_URL),
            Err(InstallError::InvalidFormula(_))
        ));
        v.version = "1.0/evil".to_string();
        assert!(v.validate().is_err());
        let mut v = sample_vars("1.0.0");
        v.sha256_macos_arm = "{{sha256_macos_arm}}".to_string();
        assert!(v.validate().is_err());
    }

    #[test]
    fn version_with_url_syntax_rejected() {
        for bad in ["1.0?x=1", "1.0#frag", "..", "1..2", "1.0 beta"] {
            let v = sample_vars(bad);
            assert!(
                matches!(v.validate(), Err(InstallError::InvalidFormula(_))),
                "accepted {:?}",
                bad
            );
        }
        sample_vars("1.2.3-rc.1+build.5").validate().unwrap();
    }

    #[test]
    fn non_http_base_url_rejected() {
        assert!(Formula::render(&sample_vars("1.0.0"), "file:///tmp").is_err());
        assert!(Formula::render(&sample_vars("1.0.0"), "not a url").is_err());
    }

    #[test]
    fn recipe_renders_without_placeholders() {
        let text = sample_vars("2.0.1").render_recipe().unwrap();
        assert!(!text.contains("{{"));
        assert!(text.contains("version \"2.0.1\""));
        assert!(text.contains(&"33".repeat(32)));
        assert!(text.contains("rusty-relay-client-2.0.1-macos-arm64.tar.gz"));
    }

    #[test]
    fn duplicates_detected() {
        let f = Formula::render(&sample_vars("1.0.0"), DEFAULT_BASE_URL).unwrap();
        let mut table = f.targets.clone();
        table.push(f.targets[2].clone());
        assert_eq!(duplicates(&table), vec![(Os::Linux, Arch::X86_64)]);
    }

    #[test]
    fn vars_from_toml() {
        let toml = format!(
            "version = \"1.2.3\"\nsha256_macos_intel = \"{a}\"\nsha256_macos_arm = \"{a}\"\nsha256_linux_intel = \"{a}\"\n",
            a = "ab".repeat(32)
        );
        let v: FormulaVars = toml::from_str(&toml).unwrap();
        assert_eq!(v.version, "1.2.3");
        v.validate().unwrap();
    }
}
