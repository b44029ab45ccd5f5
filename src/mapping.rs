//! Extension to group-name mapping.
//!
//! Pure lookups over the `[mapping]` table from settings. An extension absent
//! from the table means the file is not managed by this tool.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{SyncError, SyncResult};

/// Extension (with leading dot, lowercase) to declaration group name.
pub type ExtensionMap = HashMap<String, String>;

/// Extract a file's extension with the leading dot, lowercased.
///
/// Returns `None` for paths without an extension.
pub fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

/// Look up the group name for a path's extension.
pub fn group_for_path<'a>(path: &Path, map: &'a ExtensionMap) -> Option<&'a str> {
    let ext = dotted_extension(path)?;
    map.get(&ext).map(String::as_str)
}

/// Keep only the paths whose extension is mapped to a group.
///
/// An empty result is a configuration-class error so the caller surfaces it
/// to the user instead of silently doing nothing.
pub fn filter_managed(paths: &[PathBuf], map: &ExtensionMap) -> SyncResult<Vec<PathBuf>> {
    let managed: Vec<PathBuf> = paths
        .iter()
        .filter(|p| group_for_path(p, map).is_some())
        .cloned()
        .collect();

    if managed.is_empty() {
        return Err(SyncError::NoManagedFiles);
    }
    Ok(managed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_map() -> ExtensionMap {
        let mut map = ExtensionMap::new();
        map.insert(".cpp".to_string(), "SOURCES".to_string());
        map.insert(".h".to_string(), "HEADERS".to_string());
        map
    }

    #[test]
    fn test_group_for_path_maps_known_extension() {
        let map = test_map();
        assert_eq!(
            group_for_path(Path::new("src/main.cpp"), &map),
            Some("SOURCES")
        );
    }

    #[test]
    fn test_group_for_path_lowercases_extension() {
        let map = test_map();
        assert_eq!(
            group_for_path(Path::new("src/Widget.CPP"), &map),
            Some("SOURCES")
        );
    }

    #[test]
    fn test_group_for_path_unmapped_returns_none() {
        let map = test_map();
        assert_eq!(group_for_path(Path::new("notes.txt"), &map), None);
        assert_eq!(group_for_path(Path::new("Makefile"), &map), None);
    }

    #[test]
    fn test_filter_managed_keeps_order() {
        let map = test_map();
        let paths = vec![
            PathBuf::from("a.cpp"),
            PathBuf::from("README.md"),
            PathBuf::from("b.h"),
        ];
        let managed = filter_managed(&paths, &map).unwrap();
        assert_eq!(managed, vec![PathBuf::from("a.cpp"), PathBuf::from("b.h")]);
    }

    #[test]
    fn test_filter_managed_empty_result_is_error() {
        let map = test_map();
        let paths = vec![PathBuf::from("README.md")];
        let err = filter_managed(&paths, &map).unwrap_err();
        assert!(matches!(err, SyncError::NoManagedFiles));
    }
}
