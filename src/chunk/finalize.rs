//! Chunk finalization: file names, content summaries, and metadata.

use crate::analyze::heading_level;
use crate::model::{Document, Kind, NodeId};
use crate::text::{collect_text, slugify, word_count};

use super::{
    Chunk, ChunkConfig, ChunkHeading, ChunkImage, ChunkLink, ChunkMetadata, ChunkTable,
};

/// Finalize every chunk before emission: derive its file name, extract
/// heading/link/image/table summaries from its content, and (when
/// configured) compute content-size metadata.
pub(crate) fn finalize_chunks(document: &Document, chunks: &mut [Chunk], config: &ChunkConfig) {
    for chunk in chunks.iter_mut() {
        chunk.file_name = format!("{}{}{}", config.file_prefix, chunk.id, config.file_suffix);
        extract_summaries(document, chunk);

        if config.include_metadata {
            let text = chunk.text(document);
            let words = word_count(&text);
            chunk.metadata = Some(ChunkMetadata {
                word_count: words,
                reading_time: words.div_ceil(200),
                character_count: text.chars().count(),
                heading_count: chunk.headings.len(),
                link_count: chunk.links.len(),
                image_count: chunk.images.len(),
                table_count: chunk.tables.len(),
            });
        }
    }
}

/// Recursively walk the chunk's content and inventory its sub-elements.
fn extract_summaries(document: &Document, chunk: &mut Chunk) {
    for index in 0..chunk.content.len() {
        let top = chunk.content[index];
        for id in document.iter_dfs_from(top) {
            let Some(node) = document.node(id) else {
                continue;
            };
            match node.kind {
                Kind::Paragraph => {
                    if let Some(level) = heading_level(document, id) {
                        let text = collect_text(document, id).trim().to_string();
                        let slug = slugify(&text);
                        chunk.headings.push(ChunkHeading {
                            level,
                            text,
                            slug,
                            node: id,
                        });
                    }
                }
                Kind::Hyperlink => {
                    chunk.links.push(ChunkLink {
                        href: document.semantics.href(id).map(str::to_string),
                        anchor: document.semantics.anchor(id).map(str::to_string),
                        text: collect_text(document, id).trim().to_string(),
                        node: id,
                        target_chunk: None,
                        target_file: None,
                    });
                }
                Kind::Image => {
                    chunk.images.push(ChunkImage {
                        alt_text: document.semantics.alt_text(id).map(str::to_string),
                        content_type: document.semantics.content_type(id).map(str::to_string),
                        node: id,
                    });
                }
                Kind::Table => {
                    chunk.tables.push(table_summary(document, id));
                }
                _ => {}
            }
        }
    }
}

fn table_summary(document: &Document, table: NodeId) -> ChunkTable {
    let mut rows = 0;
    let mut columns = 0;
    for row in document.children(table) {
        let Some(node) = document.node(row) else {
            continue;
        };
        if node.kind == Kind::TableRow {
            rows += 1;
            let cells = document
                .children(row)
                .filter(|&c| {
                    document
                        .node(c)
                        .is_some_and(|n| n.kind == Kind::TableCell)
                })
                .count();
            columns = columns.max(cells);
        }
    }
    ChunkTable {
        node: table,
        rows,
        columns,
    }
}
