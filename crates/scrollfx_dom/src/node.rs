// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the document arena.

use crate::geometry::Rect;
use crate::style::InlineStyle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A laid-out element in the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique node ID
    pub id: NodeId,
    /// Element tag (`section`, `div`, ...)
    pub tag: String,
    /// Class list
    pub classes: Vec<String>,
    /// Marker attributes (`data-parallax`, `data-direction`, ...)
    pub attributes: BTreeMap<String, String>,
    /// Layout rectangle in document coordinates
    pub rect: Rect,
    /// Inline style written by the effect layer
    pub style: InlineStyle,
    /// Child nodes in document order
    pub children: Vec<NodeId>,
}

impl Node {
    /// Create a new node with the given tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            tag: tag.into(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            rect: Rect::default(),
            style: InlineStyle::default(),
            children: Vec::new(),
        }
    }

    /// Add a class (builder style)
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set a marker attribute (builder style)
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Set the layout rectangle (builder style)
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    /// Check for a class
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Get a marker attribute value
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}
