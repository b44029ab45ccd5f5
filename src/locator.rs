//! Locating candidate manifests for a selection.
//!
//! Walks ancestor directories from a starting path up to the workspace
//! boundary, collecting every `CMakeLists.txt` on the way. Nearest-first
//! ordering matters: it drives the "which manifest did the user mean" pick.

use std::path::{Path, PathBuf};

/// File name of the manifest this tool manages.
pub const MANIFEST_FILE_NAME: &str = "CMakeLists.txt";

/// Collect manifests from `start` up to `workspace_root`, nearest first.
///
/// Begins in the directory containing `start` (or `start` itself when it is
/// a directory). Stops once the walk leaves `workspace_root` or hits the
/// filesystem root. A start path outside the workspace yields an empty list;
/// zero manifests is a normal outcome, not an error.
pub fn find_manifests(start: &Path, workspace_root: &Path) -> Vec<PathBuf> {
    let mut manifests = Vec::new();

    let mut current: Option<&Path> = if start.is_dir() {
        Some(start)
    } else {
        start.parent()
    };

    while let Some(dir) = current {
        if !dir.starts_with(workspace_root) {
            break;
        }
        let candidate = dir.join(MANIFEST_FILE_NAME);
        if candidate.is_file() {
            manifests.push(candidate);
        }
        current = dir.parent();
    }

    manifests
}
