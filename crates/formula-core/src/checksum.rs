//! SHA-256 digests and fail-closed verification of downloaded archives.

use crate::error::InstallError;
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

const BUF_SIZE: usize = 64 * 1024;

/// A parsed SHA-256 digest. Displays as lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Digest([u8; 32]);

impl FromStr for Sha256Digest {
    type Err = InstallError;

    /// Accepts 64 hex characters in either case; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || InstallError::InvalidFormula(format!("not a SHA-256 hex digest: {:?}", s));
        if s.len() != 64 {
            return Err(invalid());
        }
        let mut out = [0u8; 32];
        hex::decode_to_slice(s, &mut out).map_err(|_| invalid())?;
        Ok(Sha256Digest(out))
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Compute SHA-256 of an in-memory buffer.
pub fn sha256_bytes(data: &[u8]) -> Sha256Digest {
    let digest = Sha256::digest(data);
    Sha256Digest(digest.into())
}

/// Compute SHA-256 of a file and return the digest as lowercase hex.
/// Reads in chunks to keep memory use bounded.
pub fn sha256_path(path: &Path) -> Result<String> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    let digest = hasher.finalize();
    Ok(hex::encode(digest))
}

/// Check `data` against `expected`. A mismatch is always fatal.
pub fn verify(data: &[u8], expected: &Sha256Digest) -> Result<(), InstallError> {
    let actual = sha256_bytes(data);
    if &actual != expected {
        tracing::warn!(%expected, %actual, "checksum mismatch");
        return Err(InstallError::ChecksumMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
    tracing::debug!(digest = %actual, len = data.len(), "checksum verified");
    Ok(())
}
