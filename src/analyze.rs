//! Document analysis: a one-pass structural inventory.
//!
//! The analyzer walks the tree once and records every heading, table, image,
//! link, and bookmark, plus derived structure flags. The result is read-only
//! and safe to share across concurrent chunking calls.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::model::{Document, Kind, NodeId};
use crate::text::collect_text;

/// Style identifiers that classify a paragraph as a heading: `heading<N>` or
/// `h<N>`, case-insensitive.
static HEADING_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:heading|h)(\d+)$").unwrap());

/// Parse a heading level out of a paragraph style identifier.
///
/// Returns `None` for non-heading styles. The level is the first decimal run
/// in the identifier; absurdly large values saturate at 255.
///
/// This is the external parser's style contract isolated in one place so it
/// can be swapped per input format.
pub fn heading_level_of(style_id: &str) -> Option<u8> {
    let captures = HEADING_STYLE.captures(style_id)?;
    let digits = captures.get(1).map(|m| m.as_str())?;
    Some(digits.parse::<u32>().map_or(u8::MAX, |n| n.min(255) as u8))
}

/// Heading level of an element, if it is a heading paragraph.
///
/// A paragraph with no style identifier is not a heading; an element that is
/// otherwise known to be a heading but lacks a parseable level defaults to 1
/// inside [`heading_level_of`].
pub fn heading_level(document: &Document, id: NodeId) -> Option<u8> {
    let node = document.node(id)?;
    if node.kind != Kind::Paragraph {
        return None;
    }
    document.semantics.style_id(id).and_then(heading_level_of)
}

/// A heading discovered during analysis.
#[derive(Debug, Clone, Serialize)]
pub struct HeadingInfo {
    /// Heading level (1-based).
    pub level: u8,
    /// Visible heading text, trimmed.
    pub text: String,
    /// The heading paragraph's node id.
    pub node: NodeId,
}

/// Derived structural flags and counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StructureInfo {
    /// Number of level-1 headings.
    pub chapter_count: usize,
    /// Number of level-2 headings.
    pub section_count: usize,
    /// A heading mentions "contents".
    pub has_table_of_contents: bool,
    /// A heading mentions "index".
    pub has_index: bool,
    /// A heading mentions "glossary".
    pub has_glossary: bool,
}

/// Structural inventory of a document. Immutable after construction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Analysis {
    /// All headings in document order.
    pub headings: Vec<HeadingInfo>,
    /// Deepest heading level observed (0 when there are no headings).
    pub max_heading_level: u8,
    /// All table elements in document order.
    pub tables: Vec<NodeId>,
    /// All image elements in document order.
    pub images: Vec<NodeId>,
    /// All hyperlink elements in document order.
    pub links: Vec<NodeId>,
    /// All bookmark elements in document order.
    pub bookmarks: Vec<NodeId>,
    /// Derived structure flags.
    pub structure: StructureInfo,
}

/// Analyze a document in a single depth-first traversal.
///
/// A document with zero elements yields an empty-but-valid analysis; this
/// operation cannot fail.
pub fn analyze(document: &Document) -> Analysis {
    let mut analysis = Analysis::default();

    for id in document.iter_dfs() {
        let Some(node) = document.node(id) else {
            continue;
        };
        match node.kind {
            Kind::Paragraph => {
                if let Some(level) = heading_level(document, id) {
                    let text = collect_text(document, id).trim().to_string();
                    record_structure(&mut analysis.structure, level, &text);
                    analysis.max_heading_level = analysis.max_heading_level.max(level);
                    analysis.headings.push(HeadingInfo { level, text, node: id });
                }
            }
            Kind::Table => analysis.tables.push(id),
            Kind::Image => analysis.images.push(id),
            Kind::Hyperlink => analysis.links.push(id),
            Kind::Bookmark => analysis.bookmarks.push(id),
            _ => {}
        }
    }

    analysis
}

fn record_structure(structure: &mut StructureInfo, level: u8, text: &str) {
    match level {
        1 => structure.chapter_count += 1,
        2 => structure.section_count += 1,
        _ => {}
    }
    let lower = text.to_lowercase();
    if lower.contains("contents") {
        structure.has_table_of_contents = true;
    }
    if lower.contains("index") {
        structure.has_index = true;
    }
    if lower.contains("glossary") {
        structure.has_glossary = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Document;

    #[test]
    fn heading_style_patterns() {
        assert_eq!(heading_level_of("Heading1"), Some(1));
        assert_eq!(heading_level_of("heading3"), Some(3));
        assert_eq!(heading_level_of("H2"), Some(2));
        assert_eq!(heading_level_of("h6"), Some(6));
        assert_eq!(heading_level_of("Title"), None);
        assert_eq!(heading_level_of("Heading"), None);
        assert_eq!(heading_level_of("heading2extra"), None);
        assert_eq!(heading_level_of(""), None);
    }

    #[test]
    fn empty_document_yields_valid_analysis() {
        let analysis = analyze(&Document::new());
        assert!(analysis.headings.is_empty());
        assert_eq!(analysis.max_heading_level, 0);
        assert_eq!(analysis.structure.chapter_count, 0);
    }

    #[test]
    fn inventories_headings_and_counts() {
        let mut document = Document::new();
        document.add_heading(1, "Chapter 1");
        document.add_paragraph(None, "Body.");
        document.add_heading(2, "Section 1.1");
        document.add_heading(2, "Section 1.2");
        document.add_heading(1, "Chapter 2");

        let analysis = analyze(&document);
        assert_eq!(analysis.headings.len(), 4);
        assert_eq!(analysis.max_heading_level, 2);
        assert_eq!(analysis.structure.chapter_count, 2);
        assert_eq!(analysis.structure.section_count, 2);
    }

    #[test]
    fn structure_flags_are_case_insensitive() {
        let mut document = Document::new();
        document.add_heading(1, "Table of Contents");
        document.add_heading(1, "INDEX");
        document.add_heading(2, "Glossary of Terms");

        let structure = analyze(&document).structure;
        assert!(structure.has_table_of_contents);
        assert!(structure.has_index);
        assert!(structure.has_glossary);
    }

    #[test]
    fn non_heading_paragraphs_are_ignored() {
        let mut document = Document::new();
        document.add_paragraph(Some("BodyText"), "Not a heading.");
        document.add_paragraph(None, "Plain.");

        let analysis = analyze(&document);
        assert!(analysis.headings.is_empty());
    }

    #[test]
    fn inventories_tables_images_links_bookmarks() {
        let mut document = Document::new();
        let para = document.add_paragraph(None, "See ");
        document.add_hyperlink(para, Some("#sec1"), None, "section one");
        document.add_bookmark(para, "sec1");
        document.add_image(para, Some("diagram"), Some("image/png"));
        document.add_table(&[&["a"]]);

        let analysis = analyze(&document);
        assert_eq!(analysis.links.len(), 1);
        assert_eq!(analysis.bookmarks.len(), 1);
        assert_eq!(analysis.images.len(), 1);
        assert_eq!(analysis.tables.len(), 1);
    }
}
