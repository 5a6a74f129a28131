//! Extract the executable from a `.tar.gz` release archive and place it.
//!
//! The binary is written next to its final name with a `.part` suffix and
//! renamed into place, so a failed install never leaves a truncated binary.

use crate::error::InstallError;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Suffix used while the binary is being written.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Find the single regular file named `binary_name` (root or nested) and return its contents.
pub fn extract_binary(archive: &[u8], binary_name: &str) -> Result<Vec<u8>, InstallError> {
    let gz = flate2::read::GzDecoder::new(archive);
    let mut tar = tar::Archive::new(gz);
    let malformed = |e: std::io::Error| InstallError::ExtractFailure(format!("malformed archive: {}", e));

    let mut found: Option<Vec<u8>> = None;
    for entry in tar.entries().map_err(malformed)? {
        let mut entry = entry.map_err(malformed)?;
        let path = entry.path().map_err(malformed)?.into_owned();
        let is_match = path.file_name().and_then(|n| n.to_str()) == Some(binary_name);
        if !is_match {
            continue;
        }
        if !entry.header().entry_type().is_file() {
            return Err(InstallError::ExtractFailure(format!(
                "{} in archive is not a regular file",
                path.display()
            )));
        }
        if found.is_some() {
            return Err(InstallError::ExtractFailure(format!(
                "archive contains more than one '{}'",
                binary_name
            )));
        }
        let declared = entry.size();
        let mut data = Vec::new();
        entry.read_to_end(&mut data).map_err(malformed)?;
        if data.len() as u64 != declared {
            return Err(InstallError::ExtractFailure(format!(
                "{} truncated: header declares {} bytes, archive holds {}",
                path.display(),
                declared,
                data.len()
            )));
        }
        tracing::debug!(entry = %path.display(), bytes = data.len(), "found binary in archive");
        found = Some(data);
    }

    found.ok_or_else(|| {
        InstallError::ExtractFailure(format!("binary '{}' not found in archive", binary_name))
    })
}

/// Extract `binary_name` from `archive` into `dest_dir` and mark it executable.
/// Returns the installed path.
pub fn install(archive: &[u8], binary_name: &str, dest_dir: &Path) -> Result<PathBuf, InstallError> {
    let data = extract_binary(archive, binary_name)?;

    fs::create_dir_all(dest_dir).map_err(|e| InstallError::io(dest_dir, e))?;
    let final_path = dest_dir.join(binary_name);
    let tmp = temp_path(&final_path);

    if let Err(e) = write_executable(&tmp, &data) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    if let Err(e) = fs::rename(&tmp, &final_path) {
        let _ = fs::remove_file(&tmp);
        return Err(InstallError::io(&final_path, e));
    }

    tracing::info!(path = %final_path.display(), bytes = data.len(), "binary installed");
    Ok(final_path)
}

fn write_executable(path: &Path, data: &[u8]) -> Result<(), InstallError> {
    fs::write(path, data).map_err(|e| InstallError::io(path, e))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .map_err(|e| InstallError::io(path, e))?;
    }
    Ok(())
}
