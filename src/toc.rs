//! Table-of-contents generation.
//!
//! Chunks and their sub-headings flatten into leveled entries in document
//! order; the nested outline is then reconstructed from that flat, leveled,
//! pre-order sequence.

use serde::Serialize;

use crate::chunk::Chunk;
use crate::text::escape_html;

/// TOC generation options.
#[derive(Debug, Clone)]
pub struct TocConfig {
    /// Deepest sub-heading level included in the TOC.
    pub max_depth: u8,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self { max_depth: 3 }
    }
}

/// A flattened, leveled TOC record.
#[derive(Debug, Clone, Serialize)]
pub struct TocEntry {
    pub id: String,
    pub title: String,
    pub level: u8,
    pub href: String,
    pub chunk_id: u32,
    /// True for the entry representing a chunk itself, false for one of its
    /// sub-headings.
    pub is_chunk_title: bool,
}

/// A node in the nested outline.
#[derive(Debug, Clone, Serialize)]
pub struct TocItem {
    pub entry: TocEntry,
    pub children: Vec<TocItem>,
}

/// TOC summary metadata.
#[derive(Debug, Clone, Serialize)]
pub struct TocMetadata {
    pub total_entries: usize,
    /// Deepest entry level observed.
    pub max_depth: u8,
}

/// The generated table of contents.
#[derive(Debug, Clone, Serialize)]
pub struct Toc {
    /// Flat entries in document order.
    pub entries: Vec<TocEntry>,
    /// Nested outline reconstructed from the flat entries.
    pub tree: Vec<TocItem>,
    /// Ready-to-embed HTML rendering of the outline.
    pub rendered_tree: String,
    pub metadata: TocMetadata,
}

/// Generate a table of contents over the finalized chunks.
pub fn generate_toc(chunks: &[Chunk], config: &TocConfig) -> Toc {
    let mut entries = Vec::new();

    for chunk in chunks {
        entries.push(TocEntry {
            id: format!("toc-{}", entries.len()),
            title: chunk.title.clone(),
            level: chunk.level,
            href: chunk.file_name.clone(),
            chunk_id: chunk.id,
            is_chunk_title: true,
        });
        for heading in chunk.sub_headings() {
            if heading.level > config.max_depth {
                continue;
            }
            entries.push(TocEntry {
                id: format!("toc-{}", entries.len()),
                title: heading.text.clone(),
                level: heading.level,
                href: format!("{}#{}", chunk.file_name, heading.slug),
                chunk_id: chunk.id,
                is_chunk_title: false,
            });
        }
    }

    let min_level = entries.iter().map(|e| e.level).min().unwrap_or(1);
    let tree = build_nested_list(&entries, min_level);
    let rendered_tree = render_tree(&tree);
    let max_depth = entries.iter().map(|e| e.level).max().unwrap_or(0);

    Toc {
        metadata: TocMetadata {
            total_entries: entries.len(),
            max_depth,
        },
        entries,
        tree,
        rendered_tree,
    }
}

/// Reconstruct a nested outline from a flat, depth-annotated, pre-order
/// sequence.
///
/// An entry at exactly `min_level` becomes an item; the maximal contiguous
/// run of strictly deeper entries after it becomes its children, recursed
/// one level down. An entry shallower than `min_level` terminates the
/// current list. A deeper run with no parent item at this level nests one
/// level down, so no entry is ever dropped.
pub fn build_nested_list(entries: &[TocEntry], min_level: u8) -> Vec<TocItem> {
    let mut items = Vec::new();
    let mut i = 0;

    while i < entries.len() {
        let level = entries[i].level;
        if level == min_level {
            let mut j = i + 1;
            while j < entries.len() && entries[j].level > min_level {
                j += 1;
            }
            let children = build_nested_list(&entries[i + 1..j], min_level + 1);
            items.push(TocItem {
                entry: entries[i].clone(),
                children,
            });
            i = j;
        } else if level < min_level {
            break;
        } else {
            let mut j = i;
            while j < entries.len() && entries[j].level > min_level {
                j += 1;
            }
            items.extend(build_nested_list(&entries[i..j], min_level + 1));
            i = j;
        }
    }

    items
}

fn render_tree(items: &[TocItem]) -> String {
    let mut html = String::from("<ul class=\"toc\">");
    render_items(items, &mut html);
    html.push_str("</ul>");
    html
}

fn render_items(items: &[TocItem], html: &mut String) {
    for item in items {
        html.push_str("<li><a href=\"");
        html.push_str(&escape_html(&item.entry.href));
        html.push_str("\">");
        html.push_str(&escape_html(&item.entry.title));
        html.push_str("</a>");
        if !item.children.is_empty() {
            html.push_str("<ul>");
            render_items(&item.children, html);
            html.push_str("</ul>");
        }
        html.push_str("</li>");
    }
}
