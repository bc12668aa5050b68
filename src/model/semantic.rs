//! Sparse semantic attributes for document nodes.
//!
//! Most nodes carry no attributes, so per-node `Option<String>` fields would
//! waste memory. Attributes are stored in side tables keyed by [`NodeId`],
//! with all string values packed into a single contiguous buffer referenced
//! by [`TextRange`].

use std::collections::HashMap;

use super::node::{NodeId, TextRange};

/// Sparse map for semantic attributes.
#[derive(Debug, Default, Clone)]
pub struct SemanticMap {
    /// Contiguous buffer for all string attribute values.
    buffer: String,
    /// Style identifier (paragraphs; heading classification derives from it).
    style_id: HashMap<NodeId, TextRange>,
    /// href attribute (hyperlinks with an external or fragment target).
    href: HashMap<NodeId, TextRange>,
    /// anchor attribute (hyperlinks targeting an internal bookmark by name).
    anchor: HashMap<NodeId, TextRange>,
    /// Bookmark name (bookmark elements).
    name: HashMap<NodeId, TextRange>,
    /// Alt text (images).
    alt_text: HashMap<NodeId, TextRange>,
    /// Content type (images).
    content_type: HashMap<NodeId, TextRange>,
}

impl SemanticMap {
    /// Create a new empty semantic map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a string to the buffer and return its TextRange.
    fn append(&mut self, s: &str) -> TextRange {
        let start = self.buffer.len() as u32;
        self.buffer.push_str(s);
        TextRange::new(start, s.len() as u32)
    }

    /// Get a string slice from a TextRange.
    fn get_str(&self, range: TextRange) -> &str {
        let start = range.start as usize;
        let end = (range.start + range.len) as usize;
        &self.buffer[start..end]
    }

    // --- style id ---

    /// Set the style identifier for a node.
    pub fn set_style_id(&mut self, node: NodeId, style_id: &str) {
        if !style_id.is_empty() {
            let range = self.append(style_id);
            self.style_id.insert(node, range);
        }
    }

    /// Get the style identifier for a node.
    pub fn style_id(&self, node: NodeId) -> Option<&str> {
        self.style_id.get(&node).map(|r| self.get_str(*r))
    }

    // --- href ---

    /// Set the href for a node.
    pub fn set_href(&mut self, node: NodeId, href: &str) {
        if !href.is_empty() {
            let range = self.append(href);
            self.href.insert(node, range);
        }
    }

    /// Get the href for a node.
    pub fn href(&self, node: NodeId) -> Option<&str> {
        self.href.get(&node).map(|r| self.get_str(*r))
    }

    // --- anchor ---

    /// Set the internal anchor target for a node.
    pub fn set_anchor(&mut self, node: NodeId, anchor: &str) {
        if !anchor.is_empty() {
            let range = self.append(anchor);
            self.anchor.insert(node, range);
        }
    }

    /// Get the internal anchor target for a node.
    pub fn anchor(&self, node: NodeId) -> Option<&str> {
        self.anchor.get(&node).map(|r| self.get_str(*r))
    }

    // --- bookmark name ---

    /// Set the bookmark name for a node.
    pub fn set_name(&mut self, node: NodeId, name: &str) {
        if !name.is_empty() {
            let range = self.append(name);
            self.name.insert(node, range);
        }
    }

    /// Get the bookmark name for a node.
    pub fn name(&self, node: NodeId) -> Option<&str> {
        self.name.get(&node).map(|r| self.get_str(*r))
    }

    // --- alt text ---

    /// Set the alt text for a node.
    pub fn set_alt_text(&mut self, node: NodeId, alt: &str) {
        if !alt.is_empty() {
            let range = self.append(alt);
            self.alt_text.insert(node, range);
        }
    }

    /// Get the alt text for a node.
    pub fn alt_text(&self, node: NodeId) -> Option<&str> {
        self.alt_text.get(&node).map(|r| self.get_str(*r))
    }

    // --- content type ---

    /// Set the content type for a node.
    pub fn set_content_type(&mut self, node: NodeId, content_type: &str) {
        if !content_type.is_empty() {
            let range = self.append(content_type);
            self.content_type.insert(node, range);
        }
    }

    /// Get the content type for a node.
    pub fn content_type(&self, node: NodeId) -> Option<&str> {
        self.content_type.get(&node).map(|r| self.get_str(*r))
    }
}
