// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pointer parallax.
//!
//! Showcase elements drift a few pixels toward the cursor, each at an
//! intensity growing with its document-order index. Applied during the
//! frame pass so the single-writer model holds; pointer events only
//! update the cached normalized position.

use crate::config::PointerConfig;
use crate::evaluate::pointer_shift;
use scrollfx_dom::{Document, NodeId, Transform, Viewport};

/// Classes opting an element into pointer parallax
pub const POINTER_CLASSES: [&str; 2] = ["hero-visual", "project-image"];

/// Pointer-driven parallax over a fixed target set.
#[derive(Debug, Clone, Default)]
pub struct PointerParallax {
    targets: Vec<NodeId>,
    norm_x: f32,
    norm_y: f32,
}

impl PointerParallax {
    /// Collect targets from the document in document order
    pub fn observe(doc: &Document) -> Self {
        let mut targets = Vec::new();
        for class in POINTER_CLASSES {
            targets.extend(doc.select_class(class));
        }
        tracing::debug!(targets = targets.len(), "pointer parallax targets");
        Self {
            targets,
            norm_x: 0.0,
            norm_y: 0.0,
        }
    }

    /// Record a pointer position in viewport coordinates. The position
    /// is normalized to `[-0.5, 0.5]` per axis; out-of-viewport
    /// positions clamp to the edge.
    pub fn set_position(&mut self, x: f32, y: f32, viewport: Viewport) {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return;
        }
        self.norm_x = (x / viewport.width - 0.5).clamp(-0.5, 0.5);
        self.norm_y = (y / viewport.height - 0.5).clamp(-0.5, 0.5);
    }

    /// Normalized pointer position
    pub fn normalized(&self) -> (f32, f32) {
        (self.norm_x, self.norm_y)
    }

    /// Number of targets
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Target IDs
    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    /// Apply the current shift to every target
    pub fn apply(&self, doc: &mut Document, config: &PointerConfig) {
        for (index, id) in self.targets.iter().enumerate() {
            let (x, y) = pointer_shift(
                self.norm_x,
                self.norm_y,
                index,
                config.intensity_step,
                config.travel_px,
            );
            if let Some(style) = doc.style_mut(*id) {
                style.transform = Some(Transform::Translate { x, y });
            }
        }
    }

    /// Reset every target's transform
    pub fn clear(&self, doc: &mut Document) {
        for id in &self.targets {
            if let Some(style) = doc.style_mut(*id) {
                style.transform = None;
            }
        }
    }
}
