//! Document chunker: strategy-driven partitioning into self-contained chunks.
//!
//! The chunker consumes a [`Document`] and produces an ordered list of
//! [`Chunk`]s, each owning a contiguous slice of the document's top-level
//! children. Concatenating every chunk's content in emission order
//! reproduces the root's children exactly once each, for every strategy.
//!
//! The public operation is async-shaped for pipeline composability but the
//! computation is pure and synchronous; it never suspends and never panics
//! outward. Failures degrade to a `None` result plus diagnostics.

mod finalize;
mod strategies;

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::analyze::{Analysis, analyze};
use crate::diagnostics::Diagnostics;
use crate::model::{Document, NodeId};
use crate::nav::{Navigation, build_navigation};
use crate::text::collect_text_of;
use crate::xref::resolve_cross_references;

pub(crate) use finalize::finalize_chunks;

// ============================================================================
// Configuration
// ============================================================================

/// Partitioning strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Split on level-1 headings; deeper headings up to `max_level` join the
    /// open chunk.
    #[default]
    ByHeadingLevel,
    /// Split on level-1 headings only.
    ByChapter,
    /// Heading-level split limited to depth 2.
    BySection,
    /// Split whenever the accumulated content weight would exceed
    /// `chunk_size_limit`.
    BySize,
    /// Reserved. Falls back to [`Strategy::ByHeadingLevel`] with a warning.
    Custom,
}

/// Chunking configuration. All fields have defaults.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkConfig {
    /// Partitioning strategy.
    pub strategy: Strategy,
    /// Deepest heading level that participates in heading-based splitting.
    pub max_level: u8,
    /// Resolve internal links across chunk boundaries.
    pub preserve_links: bool,
    /// Derive the navigation bundle.
    pub generate_navigation: bool,
    /// Compute per-chunk metadata.
    pub include_metadata: bool,
    /// Weight budget per chunk for [`Strategy::BySize`].
    pub chunk_size_limit: Option<usize>,
    /// Prefix for chunk hrefs in derived artifacts.
    pub base_url: String,
    /// Output file name prefix.
    pub file_prefix: String,
    /// Output file name suffix.
    pub file_suffix: String,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            max_level: 6,
            preserve_links: true,
            generate_navigation: true,
            include_metadata: true,
            chunk_size_limit: None,
            base_url: "./".to_string(),
            file_prefix: "chunk-".to_string(),
            file_suffix: ".html".to_string(),
        }
    }
}

// ============================================================================
// Chunk and summaries
// ============================================================================

/// A heading inside a chunk's content.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkHeading {
    pub level: u8,
    pub text: String,
    /// Anchor slug derived from the heading text.
    pub slug: String,
    pub node: NodeId,
}

/// A hyperlink inside a chunk's content.
///
/// `target_chunk`/`target_file` stay `None` until cross-reference resolution
/// runs, and stay `None` for self-referential or unmatched anchors.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkLink {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    pub text: String,
    pub node: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_chunk: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_file: Option<String>,
}

/// An image inside a chunk's content.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub node: NodeId,
}

/// A table inside a chunk's content.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkTable {
    pub node: NodeId,
    pub rows: usize,
    pub columns: usize,
}

/// Per-chunk content-size metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkMetadata {
    pub word_count: usize,
    /// Whole-minute estimate: ceil(word_count / 200).
    pub reading_time: usize,
    pub character_count: usize,
    pub heading_count: usize,
    pub link_count: usize,
    pub image_count: usize,
    pub table_count: usize,
}

/// A contiguous, ordered slice of a document's top-level content.
#[derive(Debug, Clone, Serialize)]
pub struct Chunk {
    /// 0 is reserved for the synthesized introduction chunk; otherwise ids
    /// are 1..N in emission order.
    pub id: u32,
    pub title: String,
    pub level: u8,
    /// Top-level children of the document assigned to this chunk.
    pub content: Vec<NodeId>,
    /// Derived output file name (`prefix + id + suffix`).
    pub file_name: String,
    pub headings: Vec<ChunkHeading>,
    pub links: Vec<ChunkLink>,
    pub images: Vec<ChunkImage>,
    pub tables: Vec<ChunkTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ChunkMetadata>,
    pub is_intro: bool,
}

impl Chunk {
    pub(crate) fn new(id: u32, title: String, level: u8) -> Self {
        Self {
            id,
            title,
            level,
            content: Vec::new(),
            file_name: String::new(),
            headings: Vec::new(),
            links: Vec::new(),
            images: Vec::new(),
            tables: Vec::new(),
            metadata: None,
            is_intro: false,
        }
    }

    pub(crate) fn intro() -> Self {
        let mut chunk = Self::new(0, "Introduction".to_string(), 1);
        chunk.is_intro = true;
        chunk
    }

    /// The chunk's href relative to the configured base URL.
    pub fn href(&self, config: &ChunkConfig) -> String {
        format!("{}{}", config.base_url, self.file_name)
    }

    /// The chunk's concatenated visible text.
    pub fn text(&self, document: &Document) -> String {
        collect_text_of(document, &self.content)
    }

    /// Headings below the chunk's own title level (sidebar/TOC sub-entries).
    pub fn sub_headings(&self) -> impl Iterator<Item = &ChunkHeading> {
        self.headings.iter().filter(|h| h.level > self.level)
    }
}

// ============================================================================
// Results
// ============================================================================

/// Summary metadata for a chunking run.
#[derive(Debug, Clone, Serialize)]
pub struct ResultMetadata {
    /// Strategy that actually ran (after any fallback).
    pub strategy: Strategy,
    pub chunk_count: usize,
    pub total_word_count: usize,
    pub generated: DateTime<Utc>,
}

/// The product of a successful chunking run.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkResult {
    pub chunks: Vec<Chunk>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Navigation>,
    pub analysis: Analysis,
    pub metadata: ResultMetadata,
}

/// Chunking outcome: a result (absent on failure) plus diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ChunkResult>,
    pub diagnostics: Diagnostics,
}

// ============================================================================
// Public operations
// ============================================================================

/// Chunk a document.
///
/// Async-shaped for composability with async pipelines; the computation
/// itself is synchronous and side-effect-free and never awaits.
pub async fn chunk_document(document: &Document, config: &ChunkConfig) -> ChunkOutcome {
    chunk_document_sync(document, config)
}

/// Chunk a document synchronously.
///
/// Never panics: unexpected failures are caught at this boundary and
/// reported as an error diagnostic with a `None` result.
pub fn chunk_document_sync(document: &Document, config: &ChunkConfig) -> ChunkOutcome {
    match catch_unwind(AssertUnwindSafe(|| run_chunking(document, config))) {
        Ok((result, diagnostics)) => ChunkOutcome {
            result: Some(result),
            diagnostics,
        },
        Err(payload) => {
            let mut diagnostics = Diagnostics::new();
            diagnostics.error(format!("chunking failed: {}", panic_message(payload.as_ref())));
            ChunkOutcome {
                result: None,
                diagnostics,
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

fn run_chunking(document: &Document, config: &ChunkConfig) -> (ChunkResult, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let analysis = analyze(document);

    let strategy = effective_strategy(config, &mut diagnostics);
    let mut chunks = match strategy {
        Strategy::ByHeadingLevel | Strategy::Custom => {
            strategies::sweep_by_heading_level(document, config.max_level)
        }
        Strategy::ByChapter => strategies::sweep_by_chapter(document),
        // Heading-level sweep with an explicit depth limit; the caller's
        // max_level is untouched.
        Strategy::BySection => strategies::sweep_by_heading_level(document, 2),
        Strategy::BySize => {
            // effective_strategy guarantees the limit is present here
            let limit = config.chunk_size_limit.unwrap_or(usize::MAX);
            strategies::sweep_by_size(document, limit)
        }
    };

    if chunks.is_empty() {
        chunks.push(strategies::fallback_chunk(document));
    }

    finalize_chunks(document, &mut chunks, config);

    if config.preserve_links {
        let resolved = resolve_cross_references(document, &mut chunks);
        debug!(resolved, "resolved cross-references");
    }

    let navigation = config
        .generate_navigation
        .then(|| build_navigation(&chunks, config));

    let total_word_count = chunks
        .iter()
        .filter_map(|c| c.metadata.as_ref())
        .map(|m| m.word_count)
        .sum();

    debug!(?strategy, chunks = chunks.len(), "chunked document");

    let metadata = ResultMetadata {
        strategy,
        chunk_count: chunks.len(),
        total_word_count,
        generated: Utc::now(),
    };

    (
        ChunkResult {
            chunks,
            navigation,
            analysis,
            metadata,
        },
        diagnostics,
    )
}

/// Resolve the strategy that will actually run, recording fallback warnings.
fn effective_strategy(config: &ChunkConfig, diagnostics: &mut Diagnostics) -> Strategy {
    match config.strategy {
        Strategy::BySize if config.chunk_size_limit.is_none() => {
            warn!("by-size chunking requested without a size limit");
            diagnostics
                .warn("chunk_size_limit is not set; falling back to heading-level chunking");
            Strategy::ByHeadingLevel
        }
        Strategy::Custom => {
            warn!("custom chunking strategy is not implemented");
            diagnostics.warn("custom strategy is not implemented; falling back to heading-level chunking");
            Strategy::ByHeadingLevel
        }
        strategy => strategy,
    }
}
