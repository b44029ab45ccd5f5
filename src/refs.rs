//! Resolving quoted filenames inside declaration blocks to workspace files.
//!
//! A scan walks every `keyword(...)` shape in the manifest, pulls out the
//! double-quoted tokens, and matches each token's filename against a
//! workspace-wide filename index built in one gitignore-respecting walk.
//! Tokens with one hit become direct references; tokens with several carry
//! all candidates and leave disambiguation to the moment the reference is
//! activated. Tokens with no hit produce nothing.
//!
//! The resolver keeps a single-entry cache keyed on the exact document
//! content, plus a debounce window so rapid successive calls (every
//! keystroke of an editing session) reuse the previous result instead of
//! re-walking the workspace.

use std::collections::HashMap;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::engine::scan_blocks;

/// One quoted filename token resolved against the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Token content, exactly as written between the quotes.
    pub name: String,
    /// Byte span of the token content only, quotes excluded.
    pub span: Range<usize>,
    /// Matching workspace files. Always non-empty; more than one means the
    /// reference is ambiguous until activated.
    pub targets: Vec<PathBuf>,
}

impl Reference {
    pub fn is_ambiguous(&self) -> bool {
        self.targets.len() > 1
    }
}

struct CacheEntry {
    content: String,
    references: Vec<Reference>,
    scanned_at: Instant,
}

/// Per-document reference resolver with a content-snapshot cache.
pub struct ReferenceResolver {
    workspace_root: PathBuf,
    nested_parens: bool,
    debounce: Duration,
    cache: Option<CacheEntry>,
}

impl ReferenceResolver {
    pub fn new(workspace_root: PathBuf, nested_parens: bool, debounce_ms: u64) -> Self {
        Self {
            workspace_root,
            nested_parens,
            debounce: Duration::from_millis(debounce_ms),
            cache: None,
        }
    }

    /// Resolve references for the given document content.
    ///
    /// Unchanged content returns the cached list. Changed content inside the
    /// debounce window also returns the cached (stale) list; the re-scan
    /// happens on the first call after the window passes.
    pub fn resolve(&mut self, content: &str) -> &[Reference] {
        let reuse = match &self.cache {
            Some(entry) => {
                entry.content == content || entry.scanned_at.elapsed() < self.debounce
            }
            None => false,
        };

        if !reuse {
            let references = self.scan(content);
            self.cache = Some(CacheEntry {
                content: content.to_string(),
                references,
                scanned_at: Instant::now(),
            });
        }

        self.cache
            .as_ref()
            .map(|entry| entry.references.as_slice())
            .unwrap_or(&[])
    }

    fn scan(&self, content: &str) -> Vec<Reference> {
        let mut tokens = Vec::new();
        for block in scan_blocks(content, self.nested_parens) {
            collect_quoted_tokens(content, block.body, &mut tokens);
        }
        if tokens.is_empty() {
            return Vec::new();
        }

        let index = build_filename_index(&self.workspace_root);
        let mut references = Vec::new();
        for (name, span) in tokens {
            let file_name = match Path::new(&name).file_name() {
                Some(f) => f.to_string_lossy().into_owned(),
                None => continue,
            };
            if let Some(targets) = index.get(&file_name) {
                references.push(Reference {
                    name,
                    span,
                    targets: targets.clone(),
                });
            }
        }
        references
    }
}

/// Collect `"..."` tokens inside `body`, with spans excluding the quotes.
fn collect_quoted_tokens(text: &str, body: Range<usize>, out: &mut Vec<(String, Range<usize>)>) {
    let bytes = text.as_bytes();
    let mut pos = body.start;
    while pos < body.end {
        if bytes[pos] != b'"' {
            pos += 1;
            continue;
        }
        let content_start = pos + 1;
        let Some(rel) = text[content_start..body.end].find('"') else {
            break;
        };
        let content_end = content_start + rel;
        if content_end > content_start {
            out.push((
                text[content_start..content_end].to_string(),
                content_start..content_end,
            ));
        }
        pos = content_end + 1;
    }
}

/// One workspace walk, filename -> all files bearing it. Respects gitignore
/// rules the way the rest of the tool's walks do.
fn build_filename_index(root: &Path) -> HashMap<String, Vec<PathBuf>> {
    let mut index: HashMap<String, Vec<PathBuf>> = HashMap::new();
    for entry in ignore::WalkBuilder::new(root).build().flatten() {
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        index.entry(name).or_default().push(entry.into_path());
    }
    index
}
