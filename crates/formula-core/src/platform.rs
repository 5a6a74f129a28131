//! Host platform detection and the (os, arch) vocabulary used by release assets.

use crate::error::InstallError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operating systems with published release archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Macos,
    Linux,
}

/// CPU architectures with published release archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arch {
    #[serde(rename = "x86_64", alias = "amd64")]
    X86_64,
    #[serde(rename = "arm64", alias = "aarch64")]
    Arm64,
}

impl Os {
    pub fn as_str(self) -> &'static str {
        match self {
            Os::Macos => "macos",
            Os::Linux => "linux",
        }
    }
}

impl Arch {
    /// Name as it appears in release asset file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Os {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "macos" | "darwin" => Ok(Os::Macos),
            "linux" => Ok(Os::Linux),
            other => Err(format!("unknown operating system: {}", other)),
        }
    }
}

impl FromStr for Arch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x86_64" | "amd64" => Ok(Arch::X86_64),
            "arm64" | "aarch64" => Ok(Arch::Arm64),
            other => Err(format!("unknown architecture: {}", other)),
        }
    }
}

/// Map raw `std::env::consts` names onto the release vocabulary.
pub fn from_consts(os: &str, arch: &str) -> Result<(Os, Arch), InstallError> {
    let unsupported = || InstallError::UnsupportedPlatform {
        os: os.to_string(),
        arch: arch.to_string(),
    };
    let os_v = match os {
        "macos" => Os::Macos,
        "linux" => Os::Linux,
        _ => return Err(unsupported()),
    };
    let arch_v = match arch {
        "x86_64" => Arch::X86_64,
        "aarch64" => Arch::Arm64,
        _ => return Err(unsupported()),
    };
    Ok((os_v, arch_v))
}

/// Detect the running host as `(os, arch)`.
pub fn detect() -> Result<(Os, Arch), InstallError> {
    from_consts(std::env::consts::OS, std::env::consts::ARCH)
}
