//! Test-only helpers for building source trees and step inputs.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use tempfile::TempDir;

use crate::core::checklist::{CHECKLIST, TaskRecords};

/// Scratch directory that hash patterns and artifact paths resolve against.
pub struct SourceTree {
    dir: TempDir,
}

impl SourceTree {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        write_file(self.root(), relative, contents)
    }
}

/// Write `contents` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(&path, contents).expect("write file");
    path
}

/// Set mode 0o755 on `path`.
#[cfg(unix)]
pub fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).expect("chmod");
}

/// Task records for every checklist task, as the orchestrator reports them.
pub fn all_tasks() -> TaskRecords {
    tasks_except(&[])
}

/// Task records for every checklist task not in `missing`.
pub fn tasks_except(missing: &[&str]) -> TaskRecords {
    CHECKLIST
        .iter()
        .filter(|name| !missing.contains(*name))
        .map(|name| {
            (
                (*name).to_string(),
                json!({"status": "completed", "output": {"exit_code": 0}}),
            )
        })
        .collect()
}
