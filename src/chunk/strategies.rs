//! Partitioning sweeps.
//!
//! Every sweep is a single left-to-right pass over the document root's
//! children. Each child lands in exactly one chunk; chunk ids are assigned
//! in emission order, with id 0 reserved for the lazily created
//! introduction chunk.

use crate::analyze::heading_level;
use crate::model::{Document, Kind, NodeId};
use crate::text::collect_text;

use super::Chunk;

/// Heading-level sweep.
///
/// A level-1 heading always starts a new chunk; any heading up to
/// `max_level` starts one when no chunk is open. Deeper headings join the
/// open chunk and may take over its title when strictly shallower than the
/// chunk's current level. Headings past `max_level` are ordinary content.
/// Content before the first heading accumulates in the introduction chunk.
pub(crate) fn sweep_by_heading_level(document: &Document, max_level: u8) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut intro: Option<Chunk> = None;
    let mut current: Option<Chunk> = None;
    let mut next_id: u32 = 1;

    for child in document.children(document.root()) {
        match heading_level(document, child) {
            Some(level) if level <= max_level => match current.as_mut() {
                Some(chunk) if level != 1 => {
                    chunk.content.push(child);
                    if level < chunk.level {
                        chunk.title = collect_text(document, child).trim().to_string();
                        chunk.level = level;
                    }
                }
                _ => {
                    if let Some(done) = current.take() {
                        chunks.push(done);
                    }
                    current = Some(open_chunk(document, child, level, &mut next_id));
                }
            },
            _ => match current.as_mut() {
                Some(chunk) => chunk.content.push(child),
                None => intro
                    .get_or_insert_with(Chunk::intro)
                    .content
                    .push(child),
            },
        }
    }

    if let Some(done) = current.take() {
        chunks.push(done);
    }

    let mut out = Vec::with_capacity(chunks.len() + 1);
    out.extend(intro);
    out.extend(chunks);
    out
}

/// Chapter sweep: only level-1 headings start new chunks.
///
/// A heading of any level still opens a chunk when none is open yet, so
/// headings never land in the introduction chunk.
pub(crate) fn sweep_by_chapter(document: &Document) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut intro: Option<Chunk> = None;
    let mut current: Option<Chunk> = None;
    let mut next_id: u32 = 1;

    for child in document.children(document.root()) {
        match heading_level(document, child) {
            Some(level) => match current.as_mut() {
                Some(chunk) if level != 1 => {
                    chunk.content.push(child);
                    if level < chunk.level {
                        chunk.title = collect_text(document, child).trim().to_string();
                        chunk.level = level;
                    }
                }
                _ => {
                    if let Some(done) = current.take() {
                        chunks.push(done);
                    }
                    current = Some(open_chunk(document, child, level, &mut next_id));
                }
            },
            None => match current.as_mut() {
                Some(chunk) => chunk.content.push(child),
                None => intro
                    .get_or_insert_with(Chunk::intro)
                    .content
                    .push(child),
            },
        }
    }

    if let Some(done) = current.take() {
        chunks.push(done);
    }

    let mut out = Vec::with_capacity(chunks.len() + 1);
    out.extend(intro);
    out.extend(chunks);
    out
}

/// Size-budget sweep.
///
/// Accumulates per-element weights and breaks whenever adding the next
/// element would exceed `limit`. A chunk triggered by a heading takes the
/// heading's text as its title; otherwise it gets a synthetic "Section N".
pub(crate) fn sweep_by_size(document: &Document, limit: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current: Option<Chunk> = None;
    let mut accumulated = 0usize;
    let mut next_id: u32 = 1;

    for child in document.children(document.root()) {
        let weight = element_weight(document, child);
        match current.as_mut() {
            Some(chunk) if accumulated + weight <= limit => {
                chunk.content.push(child);
                accumulated += weight;
            }
            _ => {
                if let Some(done) = current.take() {
                    chunks.push(done);
                }
                let chunk = match heading_level(document, child) {
                    Some(level) => open_chunk(document, child, level, &mut next_id),
                    None => {
                        let mut chunk =
                            Chunk::new(next_id, format!("Section {}", next_id), 1);
                        next_id += 1;
                        chunk.content.push(child);
                        chunk
                    }
                };
                accumulated = weight;
                current = Some(chunk);
            }
        }
    }

    if let Some(done) = current.take() {
        chunks.push(done);
    }

    chunks
}

/// Weight of a top-level element: extracted plain-text length plus a
/// surcharge for structurally heavy kinds.
fn element_weight(document: &Document, id: NodeId) -> usize {
    let text_len = collect_text(document, id).trim().len();
    let surcharge = match document.node(id).map(|n| n.kind) {
        Some(Kind::Table) => 500,
        Some(Kind::Image) => 100,
        Some(Kind::Paragraph) if heading_level(document, id).is_some() => 50,
        _ => 0,
    };
    text_len + surcharge
}

/// Single chunk covering the whole document, for degenerate inputs that
/// produce no chunks at all.
pub(crate) fn fallback_chunk(document: &Document) -> Chunk {
    let mut chunk = Chunk::new(1, "Document".to_string(), 1);
    chunk.content = document.children(document.root()).collect();
    chunk
}

fn open_chunk(document: &Document, child: NodeId, level: u8, next_id: &mut u32) -> Chunk {
    let title = collect_text(document, child).trim().to_string();
    let mut chunk = Chunk::new(*next_id, title, level);
    *next_id += 1;
    chunk.content.push(child);
    chunk
}
