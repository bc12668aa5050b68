//! Cross-reference resolution: rewiring internal links across chunk
//! boundaries.
//!
//! A single pre-pass walks every chunk's content and indexes bookmark names
//! to their owning chunk (document order, first occurrence wins). Each link
//! whose target is an internal fragment then resolves in O(1). Links whose
//! bookmark lives in their own chunk are intentionally left unresolved, as
//! are links with no matching bookmark.

use std::collections::HashMap;

use crate::chunk::Chunk;
use crate::model::{Document, Kind};

/// Where a bookmark lives.
#[derive(Debug, Clone)]
struct BookmarkSite {
    chunk_id: u32,
    file_name: String,
}

/// Resolve internal links in every chunk to chunk-qualified targets.
///
/// Returns the number of links that gained a target.
pub fn resolve_cross_references(document: &Document, chunks: &mut [Chunk]) -> usize {
    let index = index_bookmarks(document, chunks);

    let mut resolved = 0;
    for chunk in chunks.iter_mut() {
        let own_id = chunk.id;
        for link in &mut chunk.links {
            let Some(fragment) = link_fragment(link.anchor.as_deref(), link.href.as_deref())
            else {
                continue;
            };
            let Some(site) = index.get(fragment) else {
                continue;
            };
            // Self-references are not annotated.
            if site.chunk_id == own_id {
                continue;
            }
            link.target_chunk = Some(site.chunk_id);
            link.target_file = Some(site.file_name.clone());
            resolved += 1;
        }
    }

    resolved
}

/// Build `bookmark name -> owning chunk` over all chunk contents.
fn index_bookmarks(document: &Document, chunks: &[Chunk]) -> HashMap<String, BookmarkSite> {
    let mut index: HashMap<String, BookmarkSite> = HashMap::new();

    for chunk in chunks {
        for &top in &chunk.content {
            for id in document.iter_dfs_from(top) {
                let Some(node) = document.node(id) else {
                    continue;
                };
                if node.kind != Kind::Bookmark {
                    continue;
                }
                let Some(name) = document.semantics.name(id) else {
                    continue;
                };
                // First occurrence wins.
                index.entry(name.to_string()).or_insert_with(|| BookmarkSite {
                    chunk_id: chunk.id,
                    file_name: chunk.file_name.clone(),
                });
            }
        }
    }

    index
}

/// The internal fragment a link targets: an explicit anchor, or the
/// fragment of an `href` starting with `#`.
fn link_fragment<'a>(anchor: Option<&'a str>, href: Option<&'a str>) -> Option<&'a str> {
    if let Some(anchor) = anchor {
        return Some(anchor);
    }
    href.and_then(|h| h.strip_prefix('#'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::{ChunkConfig, chunk_document_sync};
    use crate::model::Document;

    fn two_chunk_document() -> Document {
        let mut document = Document::new();
        document.add_heading(1, "First");
        let p1 = document.add_paragraph(None, "See ");
        document.add_hyperlink(p1, Some("#sec2"), None, "section two");
        document.add_hyperlink(p1, Some("#sec1"), None, "myself");
        document.add_bookmark(p1, "sec1");
        document.add_heading(1, "Second");
        let p2 = document.add_paragraph(None, "Target lives here.");
        document.add_bookmark(p2, "sec2");
        document
    }

    fn chunk(document: &Document) -> Vec<Chunk> {
        chunk_document_sync(document, &ChunkConfig::default())
            .result
            .unwrap()
            .chunks
    }

    #[test]
    fn resolves_link_to_other_chunk() {
        let document = two_chunk_document();
        let chunks = chunk(&document);

        let link = chunks[0]
            .links
            .iter()
            .find(|l| l.href.as_deref() == Some("#sec2"))
            .unwrap();
        assert_eq!(link.target_chunk, Some(chunks[1].id));
        assert_eq!(link.target_file.as_deref(), Some(chunks[1].file_name.as_str()));
    }

    #[test]
    fn self_reference_stays_unresolved() {
        let document = two_chunk_document();
        let chunks = chunk(&document);

        let link = chunks[0]
            .links
            .iter()
            .find(|l| l.href.as_deref() == Some("#sec1"))
            .unwrap();
        assert_eq!(link.target_chunk, None);
        assert_eq!(link.target_file, None);
    }

    #[test]
    fn missing_bookmark_is_not_an_error() {
        let mut document = Document::new();
        document.add_heading(1, "Only");
        let p = document.add_paragraph(None, "");
        document.add_hyperlink(p, Some("#nowhere"), None, "dangling");

        let chunks = chunk(&document);
        assert_eq!(chunks[0].links[0].target_chunk, None);
    }

    #[test]
    fn anchor_field_resolves_like_fragment_href() {
        let mut document = Document::new();
        document.add_heading(1, "A");
        let p = document.add_paragraph(None, "");
        document.add_hyperlink(p, None, Some("mark"), "via anchor");
        document.add_heading(1, "B");
        let q = document.add_paragraph(None, "");
        document.add_bookmark(q, "mark");

        let chunks = chunk(&document);
        let link = &chunks[0].links[0];
        assert_eq!(link.target_chunk, Some(chunks[1].id));
    }

    #[test]
    fn external_links_are_ignored() {
        let mut document = Document::new();
        document.add_heading(1, "A");
        let p = document.add_paragraph(None, "");
        document.add_hyperlink(p, Some("https://example.com"), None, "external");

        let chunks = chunk(&document);
        assert_eq!(chunks[0].links[0].target_chunk, None);
    }
}
