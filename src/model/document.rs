//! Document arena: the in-memory tree consumed by every component.
//!
//! The tree uses a parent-pointer / first-child / next-sibling representation
//! with all text content packed into one buffer. Produced by an external
//! format parser; this crate only reads it, except for the construction API
//! below which parsers (and tests) use to build documents.

use super::node::{Kind, Node, NodeId, TextRange};
use super::semantic::SemanticMap;

/// An in-memory structured document.
#[derive(Debug, Clone)]
pub struct Document {
    /// All nodes in the tree (index 0 is always the root).
    nodes: Vec<Node>,
    /// Sparse semantic attributes (style id, href, anchor, bookmark name, ...).
    pub semantics: SemanticMap,
    /// Global text buffer (text nodes reference ranges into this).
    text: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty document with a root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(Kind::Document)],
            semantics: SemanticMap::new(),
            text: String::new(),
        }
    }

    /// Get the root node ID.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Allocate a new node and return its ID.
    pub fn alloc_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append text to the global buffer and return the range.
    pub fn append_text(&mut self, text: &str) -> TextRange {
        let start = self.text.len() as u32;
        self.text.push_str(text);
        TextRange::new(start, text.len() as u32)
    }

    /// Get text from a range.
    pub fn text(&self, range: TextRange) -> &str {
        let start = range.start as usize;
        let end = (range.start + range.len) as usize;
        &self.text[start..end]
    }

    /// Append a child node to a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(child_node) = self.nodes.get_mut(child.0 as usize) {
            child_node.parent = Some(parent);
        }

        // Find the last child of parent and append after it.
        if let Some(parent_node) = self.nodes.get(parent.0 as usize) {
            if let Some(first_child) = parent_node.first_child {
                let mut current = first_child;
                while let Some(node) = self.nodes.get(current.0 as usize) {
                    if let Some(next) = node.next_sibling {
                        current = next;
                    } else {
                        break;
                    }
                }
                if let Some(last_node) = self.nodes.get_mut(current.0 as usize) {
                    last_node.next_sibling = Some(child);
                }
            } else if let Some(parent_node) = self.nodes.get_mut(parent.0 as usize) {
                parent_node.first_child = Some(child);
            }
        }
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildIter<'_> {
        let first_child = self
            .nodes
            .get(parent.0 as usize)
            .and_then(|n| n.first_child);
        ChildIter {
            document: self,
            current: first_child,
        }
    }

    /// Iterate over a node and all its descendants in depth-first order.
    pub fn iter_dfs_from(&self, start: NodeId) -> DfsIter<'_> {
        DfsIter {
            document: self,
            stack: vec![start],
        }
    }

    /// Iterate over all nodes in depth-first order.
    pub fn iter_dfs(&self) -> DfsIter<'_> {
        self.iter_dfs_from(NodeId::ROOT)
    }

    // ------------------------------------------------------------------
    // Construction conveniences (parser-facing)
    // ------------------------------------------------------------------

    /// Add a paragraph with an optional style id and a single text child.
    /// Returns the paragraph's node id.
    pub fn add_paragraph(&mut self, style_id: Option<&str>, text: &str) -> NodeId {
        let para = self.alloc_node(Node::new(Kind::Paragraph));
        self.append_child(NodeId::ROOT, para);
        if let Some(style) = style_id {
            self.semantics.set_style_id(para, style);
        }
        if !text.is_empty() {
            let range = self.append_text(text);
            let t = self.alloc_node(Node::text(range));
            self.append_child(para, t);
        }
        para
    }

    /// Add a heading paragraph styled `Heading{level}`.
    pub fn add_heading(&mut self, level: u8, text: &str) -> NodeId {
        let style = format!("Heading{}", level);
        self.add_paragraph(Some(&style), text)
    }

    /// Add a bookmark element as a child of `parent`.
    pub fn add_bookmark(&mut self, parent: NodeId, name: &str) -> NodeId {
        let bookmark = self.alloc_node(Node::new(Kind::Bookmark));
        self.append_child(parent, bookmark);
        self.semantics.set_name(bookmark, name);
        bookmark
    }

    /// Add a hyperlink with display text as a child of `parent`.
    ///
    /// `href` is a raw target ("#frag" or external); `anchor` is a bookmark
    /// name for parser models that separate the two.
    pub fn add_hyperlink(
        &mut self,
        parent: NodeId,
        href: Option<&str>,
        anchor: Option<&str>,
        text: &str,
    ) -> NodeId {
        let link = self.alloc_node(Node::new(Kind::Hyperlink));
        self.append_child(parent, link);
        if let Some(href) = href {
            self.semantics.set_href(link, href);
        }
        if let Some(anchor) = anchor {
            self.semantics.set_anchor(link, anchor);
        }
        if !text.is_empty() {
            let range = self.append_text(text);
            let t = self.alloc_node(Node::text(range));
            self.append_child(link, t);
        }
        link
    }

    /// Add an image element as a child of `parent`.
    pub fn add_image(
        &mut self,
        parent: NodeId,
        alt_text: Option<&str>,
        content_type: Option<&str>,
    ) -> NodeId {
        let image = self.alloc_node(Node::new(Kind::Image));
        self.append_child(parent, image);
        if let Some(alt) = alt_text {
            self.semantics.set_alt_text(image, alt);
        }
        if let Some(ct) = content_type {
            self.semantics.set_content_type(image, ct);
        }
        image
    }

    /// Add a table built from rows of cell texts. Returns the table node id.
    pub fn add_table(&mut self, rows: &[&[&str]]) -> NodeId {
        let table = self.alloc_node(Node::new(Kind::Table));
        self.append_child(NodeId::ROOT, table);
        for row_cells in rows {
            let row = self.alloc_node(Node::new(Kind::TableRow));
            self.append_child(table, row);
            for cell_text in *row_cells {
                let cell = self.alloc_node(Node::new(Kind::TableCell));
                self.append_child(row, cell);
                if !cell_text.is_empty() {
                    let range = self.append_text(cell_text);
                    let t = self.alloc_node(Node::text(range));
                    self.append_child(cell, t);
                }
            }
        }
        table
    }
}

/// Iterator over children of a node.
pub struct ChildIter<'a> {
    document: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for ChildIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self
            .document
            .nodes
            .get(current.0 as usize)
            .and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Depth-first iterator over a subtree.
pub struct DfsIter<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for DfsIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;

        // Push children in reverse order so they're visited left-to-right.
        let mut children: Vec<NodeId> = self.document.children(current).collect();
        children.reverse();
        self.stack.extend(children);

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_creation() {
        let document = Document::new();
        assert_eq!(document.node_count(), 1);
        assert_eq!(document.root(), NodeId::ROOT);

        let root = document.node(NodeId::ROOT).unwrap();
        assert_eq!(root.kind, Kind::Document);
        assert!(root.parent.is_none());
    }

    #[test]
    fn text_buffer() {
        let mut document = Document::new();

        let range1 = document.append_text("Hello, ");
        let range2 = document.append_text("World!");

        assert_eq!(document.text(range1), "Hello, ");
        assert_eq!(document.text(range2), "World!");
    }

    #[test]
    fn paragraph_structure() {
        let mut document = Document::new();
        let para = document.add_paragraph(None, "Test content");

        let children: Vec<_> = document.children(NodeId::ROOT).collect();
        assert_eq!(children, vec![para]);

        let text_children: Vec<_> = document.children(para).collect();
        assert_eq!(text_children.len(), 1);
        assert_eq!(document.node(text_children[0]).unwrap().kind, Kind::Text);
    }

    #[test]
    fn dfs_visits_left_to_right() {
        let mut document = Document::new();
        let a = document.add_paragraph(None, "a");
        let b = document.add_paragraph(None, "b");

        let order: Vec<_> = document.iter_dfs().collect();
        assert_eq!(order[0], NodeId::ROOT);
        let a_pos = order.iter().position(|&id| id == a).unwrap();
        let b_pos = order.iter().position(|&id| id == b).unwrap();
        assert!(a_pos < b_pos);
    }

    #[test]
    fn table_shape() {
        let mut document = Document::new();
        let table = document.add_table(&[&["a", "b"], &["c", "d"]]);

        let rows: Vec<_> = document.children(table).collect();
        assert_eq!(rows.len(), 2);
        let cells: Vec<_> = document.children(rows[0]).collect();
        assert_eq!(cells.len(), 2);
    }
}
