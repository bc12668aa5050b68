//! # quire
//!
//! A library for partitioning an in-memory structured document into an
//! ordered sequence of self-contained chunks, and deriving navigational and
//! retrieval artifacts over those chunks.
//!
//! ## Features
//!
//! - Strategy-driven partitioning (by heading level, chapter, section, or
//!   content size), with a lazily synthesized introduction chunk
//! - Cross-reference resolution: internal links rewired to chunk-qualified
//!   targets across chunk boundaries
//! - Table of contents: flat leveled entries plus a reconstructed outline
//! - Navigation bundle: previous/next, breadcrumbs, sidebar, jump dropdown,
//!   keyboard shortcuts
//! - Word-level inverted search index and a pattern-based glossary
//!
//! This crate does not parse source document formats, render chunk bodies,
//! or perform file I/O; it consumes a [`Document`] tree built by an external
//! parser and hands serializable artifacts to an external renderer.
//!
//! ## Quick Start
//!
//! ```
//! use quire::{ChunkConfig, Document, TocConfig, chunk_document_sync, generate_toc};
//!
//! let mut document = Document::new();
//! document.add_heading(1, "Introduction");
//! document.add_paragraph(None, "Welcome to the handbook.");
//! document.add_heading(1, "Chapter 1");
//! document.add_paragraph(None, "The first chapter.");
//!
//! let outcome = chunk_document_sync(&document, &ChunkConfig::default());
//! let result = outcome.result.expect("chunking never fails on valid trees");
//! assert_eq!(result.chunks.len(), 2);
//! assert_eq!(result.chunks[0].title, "Introduction");
//!
//! let toc = generate_toc(&result.chunks, &TocConfig::default());
//! assert_eq!(toc.metadata.total_entries, 2);
//! ```

pub mod analyze;
pub mod chunk;
pub mod diagnostics;
pub mod error;
pub mod glossary;
pub mod index;
pub mod model;
pub mod nav;
pub mod text;
pub mod toc;
pub mod xref;

pub use analyze::{Analysis, HeadingInfo, StructureInfo, analyze, heading_level_of};
pub use chunk::{
    Chunk, ChunkConfig, ChunkMetadata, ChunkOutcome, ChunkResult, Strategy, chunk_document,
    chunk_document_sync,
};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{Error, Result};
pub use glossary::{Glossary, GlossaryConfig, GlossaryEntry, extract_glossary};
pub use index::{IndexConfig, IndexEntry, SearchIndex, generate_index};
pub use model::{Document, Kind, Node, NodeId};
pub use nav::{Navigation, build_navigation};
pub use toc::{Toc, TocConfig, TocEntry, TocItem, generate_toc};
pub use xref::resolve_cross_references;
