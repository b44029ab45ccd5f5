//! Command implementations.

pub mod include;
pub mod init;
pub mod refs;
pub mod sources;
pub mod watch;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::locator::find_manifests;
use crate::ui::Prompt;

/// Per-batch outcome counts. Each file's add/remove is independent; one
/// file's no-op never aborts the batch.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub added: usize,
    pub removed: usize,
    pub already_present: usize,
    pub not_found: usize,
    pub skipped: usize,
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        for (count, label) in [
            (self.added, "added"),
            (self.removed, "removed"),
            (self.already_present, "already present"),
            (self.not_found, "not found"),
            (self.skipped, "skipped"),
        ] {
            if count > 0 {
                parts.push(format!("{count} {label}"));
            }
        }
        if parts.is_empty() {
            write!(f, "nothing to do")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

/// How the target manifest was (or was not) determined.
pub enum ManifestChoice {
    Chosen(PathBuf),
    NoneFound,
    Cancelled,
}

/// Pick the target manifest: an explicit `--manifest` wins; otherwise the
/// nearest-first candidates from the ancestor walk, with an interactive
/// pick when there is more than one.
pub fn choose_manifest(
    explicit: Option<PathBuf>,
    anchor: &Path,
    workspace_root: &Path,
    prompt: &dyn Prompt,
) -> ManifestChoice {
    if let Some(path) = explicit {
        return ManifestChoice::Chosen(path);
    }

    let mut candidates = find_manifests(anchor, workspace_root);
    match candidates.len() {
        0 => ManifestChoice::NoneFound,
        1 => ManifestChoice::Chosen(candidates.remove(0)),
        _ => {
            let items: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
            let picked = prompt
                .pick("Which CMakeLists.txt?", &items)
                .and_then(|idx| candidates.into_iter().nth(idx));
            match picked {
                Some(path) => ManifestChoice::Chosen(path),
                None => ManifestChoice::Cancelled,
            }
        }
    }
}

/// Absolutize a user-supplied path without requiring it to exist (removal
/// targets are often already gone).
pub fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_display_skips_zero_counts() {
        let tally = Tally {
            added: 2,
            already_present: 1,
            ..Tally::default()
        };
        assert_eq!(tally.to_string(), "2 added, 1 already present");
    }

    #[test]
    fn test_tally_display_empty() {
        assert_eq!(Tally::default().to_string(), "nothing to do");
    }
}
