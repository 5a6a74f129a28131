//! Post-install smoke test: the binary must answer `--help` with exit status 0.

use crate::error::InstallError;
use std::path::Path;
use std::process::{Command, Stdio};

pub const HELP_FLAG: &str = "--help";

/// Run `executable --help` and require a zero exit status.
pub fn self_test(executable: &Path) -> Result<(), InstallError> {
    run_check(executable, &[HELP_FLAG])
}

/// Run `executable` with `args`; success iff it exits 0.
fn run_check(executable: &Path, args: &[&str]) -> Result<(), InstallError> {
    tracing::debug!(exe = %executable.display(), ?args, "running self-test");
    let output = Command::new(executable)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| InstallError::SelfTestFailure {
            path: executable.to_path_buf(),
            code: None,
            stderr: e.to_string(),
        })?;

    if output.status.success() {
        tracing::info!(exe = %executable.display(), "self-test passed");
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr)
        .lines()
        .next()
        .unwrap_or("")
        .trim()
        .to_string();
    Err(InstallError::SelfTestFailure {
        path: executable.to_path_buf(),
        code: output.status.code(),
        stderr,
    })
}
