// SPDX-License-Identifier: MIT OR Apache-2.0
//! Document arena.
//!
//! Stores nodes in insertion order (which the host is expected to make
//! document order) and answers the geometry and marker queries the
//! effect layer needs.

use crate::geometry::Rect;
use crate::node::{Node, NodeId};
use crate::style::InlineStyle;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Error for document mutations against unknown nodes
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),
}

/// A laid-out page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    nodes: IndexMap<NodeId, Node>,
    root: NodeId,
    /// Total scrollable height of the document in px
    pub scroll_height: f32,
}

impl Document {
    /// Create a document with an empty `body` root
    pub fn new() -> Self {
        let body = Node::new("body");
        let root = body.id;
        let mut nodes = IndexMap::new();
        nodes.insert(root, body);
        Self {
            nodes,
            root,
            scroll_height: 0.0,
        }
    }

    /// Root node ID
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes including the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document holds only the root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Whether a node exists
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Insert a node under a parent. Returns the new node's ID.
    pub fn append(&mut self, parent: NodeId, node: Node) -> Result<NodeId, DomError> {
        if !self.nodes.contains_key(&parent) {
            return Err(DomError::NodeNotFound(parent));
        }
        let id = node.id;
        self.nodes.insert(id, node);
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(id);
        }
        // Grow the scrollable range to cover the new content
        if let Some(n) = self.nodes.get(&id) {
            self.scroll_height = self.scroll_height.max(n.rect.bottom());
        }
        Ok(id)
    }

    /// Get a node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Get a mutable node
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Get a node's inline style for writing. Missing nodes yield `None`
    /// so effect passes can skip them silently.
    pub fn style_mut(&mut self, id: NodeId) -> Option<&mut InlineStyle> {
        self.nodes.get_mut(&id).map(|n| &mut n.style)
    }

    /// Child IDs of a node, in document order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// All node IDs in document order
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// IDs of nodes with the given tag, in document order
    pub fn select_tag(&self, tag: &str) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|n| n.tag == tag)
            .map(|n| n.id)
            .collect()
    }

    /// IDs of nodes carrying the given class, in document order
    pub fn select_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|n| n.has_class(class))
            .map(|n| n.id)
            .collect()
    }

    /// IDs of nodes carrying the given attribute, in document order
    pub fn select_attr(&self, key: &str) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|n| n.attributes.contains_key(key))
            .map(|n| n.id)
            .collect()
    }

    /// First node carrying the given class
    pub fn find_class(&self, class: &str) -> Option<NodeId> {
        self.nodes.values().find(|n| n.has_class(class)).map(|n| n.id)
    }

    /// Viewport-relative rectangle of a node at the given scroll offset
    /// (the `getBoundingClientRect` analog).
    pub fn client_rect(&self, id: NodeId, scroll_y: f32) -> Option<Rect> {
        self.nodes.get(&id).map(|n| n.rect.offset_y(-scroll_y))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
