//! Artifact inspection.

use std::fs;
use std::path::Path;

use tracing::{debug, instrument, warn};

use crate::core::artifact::ArtifactDescriptor;

/// Inspect a build artifact. Never fails.
///
/// A missing path short-circuits with every field defaulted. When the path
/// exists but its metadata cannot be read (it vanished after the existence
/// check, or stat failed), the artifact is reported as existing with unknown
/// size and not executable.
#[instrument(skip_all, fields(path = %binary_path))]
pub fn inspect_artifact(binary_path: &str) -> ArtifactDescriptor {
    let path = Path::new(binary_path);
    if !path.exists() {
        debug!("artifact missing");
        return ArtifactDescriptor::missing(binary_path);
    }

    let artifact = match fs::metadata(path) {
        Ok(meta) => ArtifactDescriptor::new(binary_path, true, is_executable(path), meta.len()),
        Err(err) => {
            warn!(error = %err, "artifact metadata unavailable");
            ArtifactDescriptor::new(binary_path, true, false, 0)
        }
    };
    debug!(
        executable = artifact.executable(),
        size_bytes = artifact.size_bytes(),
        valid = artifact.valid(),
        "artifact inspected"
    );
    artifact
}

/// Whether the current process may execute (or, for a directory, search) `path`.
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use nix::unistd::{AccessFlags, access};

    match access(path, AccessFlags::X_OK) {
        Ok(()) => true,
        Err(errno) => {
            debug!(error = %errno, "execute access denied");
            false
        }
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
