//! Mutating operations against one manifest file.
//!
//! Every operation is a single read-modify-write pass: read the manifest,
//! locate the target block, splice the rebuilt block text over exactly the
//! matched span, write the whole document back. No-op outcomes (entry
//! already present, entry not found, block missing) skip the write entirely
//! so the file's bytes and modification time stay untouched.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::engine::block::{extract_entries, render_named, render_unnamed};
use crate::engine::scanner::{
    BlockSpan, find_keyword_block, find_last_keyword_block, find_named_block,
};
use crate::error::{SyncError, SyncResult};
use crate::mapping::{ExtensionMap, dotted_extension, group_for_path};

pub const SET_KEYWORD: &str = "set";
pub const INCLUDE_KEYWORD: &str = "include_directories";
pub const PROJECT_KEYWORD: &str = "project";
pub const SOURCE_DIR_PLACEHOLDER: &str = "${CMAKE_CURRENT_SOURCE_DIR}";

/// Engine knobs threaded in from settings, loaded once per top-level
/// operation.
#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    /// Track parenthesis depth when locating a block's end. `false` selects
    /// the historical first-`)` behavior.
    pub nested_parens: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            nested_parens: true,
        }
    }
}

/// Result of an insertion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
    /// No block for this group exists. The entry was not written; creating
    /// the block is the caller's (user-confirmed) decision.
    BlockMissing { group: String },
}

/// Result of a removal attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotPresent,
    BlockMissing { group: String },
}

fn read_manifest(path: &Path) -> SyncResult<String> {
    fs::read_to_string(path).map_err(|source| SyncError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_manifest(path: &Path, text: &str) -> SyncResult<()> {
    fs::write(path, text).map_err(|source| SyncError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn splice(text: &str, span: &BlockSpan, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..span.span.start]);
    out.push_str(replacement);
    out.push_str(&text[span.span.end..]);
    out
}

/// Relative path from `base` to `target`, walking up with `..` where the
/// prefixes diverge. Both paths are expected to be absolute and lexically
/// normalized; neither needs to exist (removal runs after deletion).
fn relative_path(base: &Path, target: &Path) -> PathBuf {
    let base_components: Vec<Component> = base.components().collect();
    let target_components: Vec<Component> = target.components().collect();

    let common = base_components
        .iter()
        .zip(target_components.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base_components.len() {
        rel.push("..");
    }
    for component in &target_components[common..] {
        rel.push(component);
    }
    rel
}

fn forward_slashes(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Canonical quoted entry for a file: relative to the manifest's own
/// directory, forward slashes on every platform, double-quoted.
pub fn quoted_relative_entry(manifest: &Path, file: &Path) -> String {
    let manifest_dir = manifest.parent().unwrap_or(Path::new(""));
    let rel = relative_path(manifest_dir, file);
    format!("\"{}\"", forward_slashes(&rel))
}

/// Composite entry for an include directory:
/// `${CMAKE_CURRENT_SOURCE_DIR}/<relative>`.
pub fn include_dir_entry(manifest: &Path, dir: &Path) -> String {
    let manifest_dir = manifest.parent().unwrap_or(Path::new(""));
    let rel = relative_path(manifest_dir, dir);
    format!("{SOURCE_DIR_PLACEHOLDER}/{}", forward_slashes(&rel))
}

/// Idempotently insert `file` into its mapped `set` block.
///
/// A missing block is reported as [`AddOutcome::BlockMissing`] without any
/// write; the caller decides whether to run [`create_blocks`] first.
pub fn add_entry(
    manifest: &Path,
    file: &Path,
    map: &ExtensionMap,
    opts: &EngineOptions,
) -> SyncResult<AddOutcome> {
    let group = group_for_path(file, map)
        .ok_or_else(|| SyncError::UnmappedExtension {
            extension: dotted_extension(file).unwrap_or_default(),
        })?
        .to_string();

    let text = read_manifest(manifest)?;
    let entry = quoted_relative_entry(manifest, file);

    let Some(block) = find_named_block(&text, SET_KEYWORD, &group, opts.nested_parens) else {
        return Ok(AddOutcome::BlockMissing { group });
    };

    let mut entries = extract_entries(&text[block.body.clone()]);
    if entries.iter().any(|e| e == &entry) {
        return Ok(AddOutcome::AlreadyPresent);
    }
    entries.push(entry);

    let rebuilt = render_named(SET_KEYWORD, &group, &entries);
    write_manifest(manifest, &splice(&text, &block, &rebuilt))?;
    tracing::debug!("added {} to {group} in {}", file.display(), manifest.display());
    Ok(AddOutcome::Added)
}

/// Idempotently remove `file` from its mapped `set` block.
///
/// Removing the last entry keeps the `set(NAME\n)` shell; the block itself
/// is never deleted.
pub fn remove_entry(
    manifest: &Path,
    file: &Path,
    map: &ExtensionMap,
    opts: &EngineOptions,
) -> SyncResult<RemoveOutcome> {
    let group = group_for_path(file, map)
        .ok_or_else(|| SyncError::UnmappedExtension {
            extension: dotted_extension(file).unwrap_or_default(),
        })?
        .to_string();

    let text = read_manifest(manifest)?;
    let entry = quoted_relative_entry(manifest, file);

    let Some(block) = find_named_block(&text, SET_KEYWORD, &group, opts.nested_parens) else {
        return Ok(RemoveOutcome::BlockMissing { group });
    };

    let entries = extract_entries(&text[block.body.clone()]);
    if !entries.iter().any(|e| e == &entry) {
        return Ok(RemoveOutcome::NotPresent);
    }
    let kept: Vec<String> = entries.into_iter().filter(|e| e != &entry).collect();

    let rebuilt = render_named(SET_KEYWORD, &group, &kept);
    write_manifest(manifest, &splice(&text, &block, &rebuilt))?;
    tracing::debug!(
        "removed {} from {group} in {}",
        file.display(),
        manifest.display()
    );
    Ok(RemoveOutcome::Removed)
}

/// Synthesize empty `set` blocks for the given groups.
///
/// Insertion anchor, in priority order: after the last existing `set(...)`
/// block, after `project(...)`, at the top of the file. All queued blocks
/// are concatenated and inserted together at the one computed point,
/// preserving their relative order.
pub fn create_blocks(manifest: &Path, groups: &[String], opts: &EngineOptions) -> SyncResult<()> {
    if groups.is_empty() {
        return Ok(());
    }
    let text = read_manifest(manifest)?;

    let blocks_text = groups
        .iter()
        .map(|group| render_named(SET_KEYWORD, group, &[]))
        .collect::<Vec<_>>()
        .join("\n\n");

    let anchor = find_last_keyword_block(&text, SET_KEYWORD, opts.nested_parens)
        .or_else(|| find_keyword_block(&text, PROJECT_KEYWORD, opts.nested_parens));

    let rebuilt = match anchor {
        Some(block) => insert_after(&text, block.span.end, &blocks_text),
        None => format!("{blocks_text}\n\n{text}"),
    };

    write_manifest(manifest, &rebuilt)?;
    tracing::debug!("created block(s) {} in {}", groups.join(", "), manifest.display());
    Ok(())
}

fn insert_after(text: &str, at: usize, inserted: &str) -> String {
    let mut out = String::with_capacity(text.len() + inserted.len() + 4);
    out.push_str(&text[..at]);
    out.push_str("\n\n");
    out.push_str(inserted);
    if !text[at..].starts_with('\n') {
        out.push('\n');
    }
    out.push_str(&text[at..]);
    out
}

/// Insert `dir` into the `include_directories` block.
///
/// Unlike file entries, a missing block is auto-created inline (anchored
/// after `project(...)` if present, else at the top of the file) with no
/// separate confirmation step. This asymmetry is intentional.
pub fn add_include_dir(manifest: &Path, dir: &Path, opts: &EngineOptions) -> SyncResult<AddOutcome> {
    let text = read_manifest(manifest)?;
    let entry = include_dir_entry(manifest, dir);

    if let Some(block) = find_keyword_block(&text, INCLUDE_KEYWORD, opts.nested_parens) {
        let mut entries = extract_entries(&text[block.body.clone()]);
        if entries.iter().any(|e| e == &entry) {
            return Ok(AddOutcome::AlreadyPresent);
        }
        entries.push(entry);
        let rebuilt = render_unnamed(INCLUDE_KEYWORD, &entries);
        write_manifest(manifest, &splice(&text, &block, &rebuilt))?;
        return Ok(AddOutcome::Added);
    }

    let block_text = render_unnamed(INCLUDE_KEYWORD, std::slice::from_ref(&entry));
    let rebuilt = match find_keyword_block(&text, PROJECT_KEYWORD, opts.nested_parens) {
        Some(project) => insert_after(&text, project.span.end, &block_text),
        None => format!("{block_text}\n\n{text}"),
    };
    write_manifest(manifest, &rebuilt)?;
    tracing::debug!("created {INCLUDE_KEYWORD} block in {}", manifest.display());
    Ok(AddOutcome::Added)
}

/// Remove `dir` from the `include_directories` block.
pub fn remove_include_dir(
    manifest: &Path,
    dir: &Path,
    opts: &EngineOptions,
) -> SyncResult<RemoveOutcome> {
    let text = read_manifest(manifest)?;
    let entry = include_dir_entry(manifest, dir);

    let Some(block) = find_keyword_block(&text, INCLUDE_KEYWORD, opts.nested_parens) else {
        return Ok(RemoveOutcome::BlockMissing {
            group: INCLUDE_KEYWORD.to_string(),
        });
    };

    let entries = extract_entries(&text[block.body.clone()]);
    if !entries.iter().any(|e| e == &entry) {
        return Ok(RemoveOutcome::NotPresent);
    }
    let kept: Vec<String> = entries.into_iter().filter(|e| e != &entry).collect();

    let rebuilt = render_unnamed(INCLUDE_KEYWORD, &kept);
    write_manifest(manifest, &splice(&text, &block, &rebuilt))?;
    Ok(RemoveOutcome::Removed)
}
