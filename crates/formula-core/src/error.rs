//! Error taxonomy for a single install attempt.
//!
//! Every variant is terminal: the pipeline aborts on the first error and
//! nothing is retried.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    /// No table entry matches the host (os, arch).
    #[error("unsupported platform: {os}-{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    /// Network or HTTP failure while fetching the archive.
    #[error("download of {url} failed: {reason}")]
    DownloadFailure { url: String, reason: String },

    /// Downloaded bytes do not hash to the expected digest. Never bypassed.
    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    /// Malformed archive or unexpected contents.
    #[error("extract failed: {0}")]
    ExtractFailure(String),

    /// Installed binary did not answer the smoke test with exit status 0.
    #[error("self-test of {} failed: {}", path.display(), describe_exit(*code, stderr))]
    SelfTestFailure {
        path: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    /// Template variables or the rendered table are not usable.
    #[error("invalid formula: {0}")]
    InvalidFormula(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InstallError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InstallError::Io {
            path: path.into(),
            source,
        }
    }
}

fn describe_exit(code: Option<i32>, stderr: &str) -> String {
    let code = match code {
        Some(c) => format!("exit code {}", c),
        None => "no exit code".to_string(),
    };
    if stderr.is_empty() {
        code
    } else {
        format!("{}: {}", code, stderr)
    }
}
