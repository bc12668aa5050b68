//! Core data model for document chunking.
//!
//! This module contains:
//! - The document arena (tree structure with stable integer ids)
//! - Node types and element kinds
//! - Sparse semantic attributes (style id, href, anchor, bookmark name, ...)

mod document;
mod node;
mod semantic;

pub use document::{ChildIter, DfsIter, Document};
pub use node::{Kind, Node, NodeId, TextRange};
pub use semantic::SemanticMap;
