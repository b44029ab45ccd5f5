//! Block entry extraction and rendering.
//!
//! Entries are the trimmed, non-empty lines of a block body. Blank lines
//! inside a block carry no meaning and are dropped on rewrite; the rewrite
//! always produces the canonical one-entry-per-line, 4-space-indented form.

const INDENT: &str = "    ";

/// Extract the ordered entry list from a block body.
pub fn extract_entries(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render a named block (`set(NAME ...)`) in canonical form.
///
/// An empty entry list keeps the keyword/name shell: `set(NAME\n)`.
pub fn render_named(keyword: &str, name: &str, entries: &[String]) -> String {
    let mut out = format!("{keyword}({name}\n");
    for entry in entries {
        out.push_str(INDENT);
        out.push_str(entry);
        out.push('\n');
    }
    out.push(')');
    out
}

/// Render an unnamed block (`include_directories(...)`) in canonical form.
pub fn render_unnamed(keyword: &str, entries: &[String]) -> String {
    let mut out = format!("{keyword}(\n");
    for entry in entries {
        out.push_str(INDENT);
        out.push_str(entry);
        out.push('\n');
    }
    out.push(')');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_entries_trims_and_drops_blanks() {
        let body = "\n    \"a.cpp\"\n\n\t\"b.cpp\"  \n   \n";
        assert_eq!(extract_entries(body), vec!["\"a.cpp\"", "\"b.cpp\""]);
    }

    #[test]
    fn test_extract_entries_empty_body() {
        assert!(extract_entries("\n").is_empty());
        assert!(extract_entries("").is_empty());
    }

    #[test]
    fn test_render_named_canonical_form() {
        let entries = vec!["\"a.cpp\"".to_string(), "\"b.cpp\"".to_string()];
        assert_eq!(
            render_named("set", "SOURCES", &entries),
            "set(SOURCES\n    \"a.cpp\"\n    \"b.cpp\"\n)"
        );
    }

    #[test]
    fn test_render_named_empty_keeps_shell() {
        assert_eq!(render_named("set", "HEADERS", &[]), "set(HEADERS\n)");
    }

    #[test]
    fn test_render_unnamed() {
        let entries = vec!["${CMAKE_CURRENT_SOURCE_DIR}/include".to_string()];
        assert_eq!(
            render_unnamed("include_directories", &entries),
            "include_directories(\n    ${CMAKE_CURRENT_SOURCE_DIR}/include\n)"
        );
    }
}
