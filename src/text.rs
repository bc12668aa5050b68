//! Visible-text collection and small text utilities.
//!
//! Everything downstream (chunk titles, metadata, the search index, the
//! glossary) works over the same notion of "visible text": the concatenated
//! content of text nodes with whitespace normalized and break elements
//! rendered as single spaces.

use crate::model::{Document, Kind, NodeId};

/// Collect the visible text of a node and its descendants.
///
/// Whitespace is normalized: runs of whitespace collapse to single spaces,
/// and leading/trailing whitespace at element boundaries is preserved as at
/// most one space so adjacent runs don't fuse into one word.
pub fn collect_text(document: &Document, id: NodeId) -> String {
    let mut result = String::new();
    collect_text_recursive(document, id, &mut result);
    result
}

/// Collect the visible text of a sequence of sibling nodes.
pub fn collect_text_of(document: &Document, ids: &[NodeId]) -> String {
    let mut result = String::new();
    for &id in ids {
        collect_text_recursive(document, id, &mut result);
        if !result.is_empty() && !result.ends_with(' ') {
            result.push(' ');
        }
    }
    result.trim().to_string()
}

fn collect_text_recursive(document: &Document, id: NodeId, result: &mut String) {
    let Some(node) = document.node(id) else {
        return;
    };

    if node.kind == Kind::Break {
        if !result.is_empty() && !result.ends_with(' ') {
            result.push(' ');
        }
        return;
    }

    if node.kind == Kind::Text && !node.text.is_empty() {
        let text = document.text(node.text);
        let has_leading = text.starts_with(char::is_whitespace);
        let has_trailing = text.ends_with(char::is_whitespace);
        let words: Vec<&str> = text.split_whitespace().collect();

        if !words.is_empty() {
            if has_leading && !result.is_empty() && !result.ends_with(' ') {
                result.push(' ');
            }
            result.push_str(&words.join(" "));
            if has_trailing {
                result.push(' ');
            }
        } else if !text.is_empty() && !result.is_empty() && !result.ends_with(' ') {
            result.push(' ');
        }
    }

    for child_id in document.children(id) {
        collect_text_recursive(document, child_id, result);
    }

    // Block boundaries separate words: a paragraph or table cell never fuses
    // with its successor.
    if matches!(node.kind, Kind::Paragraph | Kind::TableCell)
        && !result.is_empty()
        && !result.ends_with(' ')
    {
        result.push(' ');
    }
}

/// Count whitespace-separated words in a text, dropping empty tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Generate a GitHub-style slug from text.
///
/// Converts text to lowercase, replaces spaces and special characters with
/// hyphens, and removes consecutive/leading/trailing hyphens.
///
/// # Examples
///
/// ```
/// use quire::text::slugify;
///
/// assert_eq!(slugify("Chapter One"), "chapter-one");
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
/// ```
pub fn slugify(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                // Skip other characters
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Escape text for embedding in an HTML artifact.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Extract a window of up to `radius` bytes on each side of
/// `[start, start + len)`, clamped to char boundaries.
pub fn context_window(text: &str, start: usize, len: usize, radius: usize) -> &str {
    let mut lo = start.saturating_sub(radius);
    while lo > 0 && !text.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = (start + len + radius).min(text.len());
    while hi < text.len() && !text.is_char_boundary(hi) {
        hi += 1;
    }
    text[lo..hi].trim()
}
