//! Locating declaration blocks inside manifest text.
//!
//! The manifest is treated as plain text, not parsed CMake. A block is the
//! region from its keyword up to and including the closing parenthesis. Two
//! strictness modes exist for finding that parenthesis:
//!
//! - nested (default): parenthesis depth is tracked explicitly, so entries
//!   containing balanced parens do not terminate the block early;
//! - legacy (`nested_parens = false`): the first `)` after the body begins
//!   ends the block. This reproduces the historical behavior and is kept
//!   selectable rather than silently changed.

use std::ops::Range;

/// A located block inside manifest text.
///
/// `span` covers the keyword through the closing parenthesis; `body` is the
/// inner region holding the entries (for named blocks it starts just after
/// the group name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpan {
    pub span: Range<usize>,
    pub body: Range<usize>,
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// True when `text[at..at + len]` is not glued to a preceding identifier
/// character (rejects matching `set` inside `preset`).
fn at_token_boundary(text: &str, at: usize) -> bool {
    at == 0 || !is_ident_char(text.as_bytes()[at - 1])
}

fn skip_spaces(text: &str, mut pos: usize) -> usize {
    let bytes = text.as_bytes();
    while pos < bytes.len() && (bytes[pos] == b' ' || bytes[pos] == b'\t') {
        pos += 1;
    }
    pos
}

fn skip_whitespace(text: &str, mut pos: usize) -> usize {
    let bytes = text.as_bytes();
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

/// Find the index of the parenthesis closing the block opened at `open`.
///
/// In nested mode an unbalanced block (no closing paren) yields `None`; the
/// caller treats that the same as a missing block.
fn find_close(text: &str, open: usize, nested: bool) -> Option<usize> {
    let bytes = text.as_bytes();
    if !nested {
        return text[open + 1..].find(')').map(|rel| open + 1 + rel);
    }
    let mut depth = 1usize;
    let mut pos = open + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
            _ => {}
        }
        pos += 1;
    }
    None
}

/// Locate the first `keyword(NAME ...)` block for an exact group name.
///
/// The name must be followed by a space, tab, or line break; `set(NAME)`
/// with nothing after the name does not match (the synthesized empty form
/// is `set(NAME\n)`, which does). Only the first occurrence is returned;
/// duplicate group names are never merged.
pub fn find_named_block(
    text: &str,
    keyword: &str,
    name: &str,
    nested: bool,
) -> Option<BlockSpan> {
    let bytes = text.as_bytes();
    let mut search_from = 0;

    while let Some(rel) = text[search_from..].find(keyword) {
        let kw_start = search_from + rel;
        search_from = kw_start + 1;

        if !at_token_boundary(text, kw_start) {
            continue;
        }
        let after_kw = skip_spaces(text, kw_start + keyword.len());
        if bytes.get(after_kw) != Some(&b'(') {
            continue;
        }
        let open = after_kw;
        let name_start = skip_whitespace(text, open + 1);
        if !text[name_start..].starts_with(name) {
            continue;
        }
        let name_end = name_start + name.len();
        match bytes.get(name_end).copied() {
            Some(b' ' | b'\t' | b'\r' | b'\n') => {}
            _ => continue,
        }

        let close = find_close(text, open, nested)?;
        if close < name_end {
            // Legacy mode can close before the name ends on malformed input.
            continue;
        }
        return Some(BlockSpan {
            span: kw_start..close + 1,
            body: name_end..close,
        });
    }
    None
}

/// Locate the first `keyword(...)` block with no group name
/// (`include_directories`, `project`).
pub fn find_keyword_block(text: &str, keyword: &str, nested: bool) -> Option<BlockSpan> {
    scan_keyword_blocks(text, keyword, nested).next()
}

/// Locate the last `keyword(...)` block in the text.
///
/// Used as the synthesis anchor: new `set` blocks land after the last
/// existing block of the same family.
pub fn find_last_keyword_block(text: &str, keyword: &str, nested: bool) -> Option<BlockSpan> {
    scan_keyword_blocks(text, keyword, nested).last()
}

fn scan_keyword_blocks<'a>(
    text: &'a str,
    keyword: &'a str,
    nested: bool,
) -> impl Iterator<Item = BlockSpan> + 'a {
    let bytes = text.as_bytes();
    let mut search_from = 0;
    std::iter::from_fn(move || {
        while let Some(rel) = text[search_from..].find(keyword) {
            let kw_start = search_from + rel;
            search_from = kw_start + 1;

            if !at_token_boundary(text, kw_start) {
                continue;
            }
            let kw_end = kw_start + keyword.len();
            if bytes.get(kw_end).copied().is_some_and(is_ident_char) {
                continue;
            }
            let after_kw = skip_spaces(text, kw_end);
            if bytes.get(after_kw) != Some(&b'(') {
                continue;
            }
            let Some(close) = find_close(text, after_kw, nested) else {
                continue;
            };
            search_from = close + 1;
            return Some(BlockSpan {
                span: kw_start..close + 1,
                body: after_kw + 1..close,
            });
        }
        None
    })
}

/// Loose scan over every `identifier(...)` shape in the text.
///
/// Used by the reference resolver, which looks for quoted tokens inside any
/// declaration block without caring about the keyword.
pub fn scan_blocks(text: &str, nested: bool) -> Vec<BlockSpan> {
    let bytes = text.as_bytes();
    let mut blocks = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        if !(bytes[pos].is_ascii_alphabetic() || bytes[pos] == b'_') || !at_token_boundary(text, pos)
        {
            pos += 1;
            continue;
        }
        let mut ident_end = pos;
        while ident_end < bytes.len() && is_ident_char(bytes[ident_end]) {
            ident_end += 1;
        }
        let after = skip_spaces(text, ident_end);
        if bytes.get(after) != Some(&b'(') {
            pos = ident_end;
            continue;
        }
        match find_close(text, after, nested) {
            Some(close) => {
                blocks.push(BlockSpan {
                    span: pos..close + 1,
                    body: after + 1..close,
                });
                pos = close + 1;
            }
            None => pos = ident_end,
        }
    }
    blocks
}
