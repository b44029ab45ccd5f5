//! The manifest text-patching engine.
//!
//! Locates `set(NAME ...)` and `include_directories(...)` blocks inside a
//! manifest, classifies them as present or missing, synthesizes missing
//! blocks at a sensible anchor, and performs idempotent, order-preserving
//! insertion and removal of individual entries. Everything outside the
//! matched block span is left byte-for-byte untouched.
//!
//! The engine owns no state: each operation reads the manifest from disk,
//! mutates the text, and writes it back in one pass.

mod block;
mod edit;
mod scanner;

pub use block::{extract_entries, render_named, render_unnamed};
pub use edit::{
    AddOutcome, EngineOptions, INCLUDE_KEYWORD, PROJECT_KEYWORD, RemoveOutcome, SET_KEYWORD,
    SOURCE_DIR_PLACEHOLDER, add_entry, add_include_dir, create_blocks, include_dir_entry,
    quoted_relative_entry, remove_entry, remove_include_dir,
};
pub use scanner::{BlockSpan, find_keyword_block, find_last_keyword_block, find_named_block,
    scan_blocks};
