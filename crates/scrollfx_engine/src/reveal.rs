// SPDX-License-Identifier: MIT OR Apache-2.0
//! One-shot visibility reveals.
//!
//! Targets carry the `scroll-animate` class. The first time a target's
//! coverage of the observed viewport band crosses the configured
//! trigger step, its children receive staggered entrance animations and
//! the target stops being observed - a target fires exactly once no
//! matter how often it re-enters the viewport.
//!
//! When the host lacks intersection observation, every target is shown
//! in its final static appearance immediately; reduced motion takes the
//! same path on trigger.

use crate::config::RevealConfig;
use indexmap::IndexMap;
use scrollfx_dom::{
    Document, EntranceAnimation, EntranceKind, Environment, NodeId, Viewport,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Class opting an element into a one-shot entrance reveal
pub const REVEAL_CLASS: &str = "scroll-animate";
/// Marker attribute selecting the entrance animation kind
pub const ANIMATION_ATTR: &str = "data-animation";
/// Class stamped on a target once it has fired
pub const TRIGGERED_CLASS: &str = "animate";

/// Unique identifier for a reveal target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevealHandle(pub Uuid);

impl RevealHandle {
    /// Create a new random reveal handle
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RevealHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// An element slated for a one-shot entrance animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealTarget {
    /// Target node
    pub node: NodeId,
    /// Entrance kind for the target's children
    pub kind: EntranceKind,
    /// Whether the entrance has fired
    pub triggered: bool,
}

/// Observes reveal targets and fires their entrance animations.
#[derive(Debug, Clone)]
pub struct RevealSystem {
    targets: IndexMap<RevealHandle, RevealTarget>,
    config: RevealConfig,
    instant: bool,
    fired: usize,
}

impl RevealSystem {
    /// Collect every reveal target in the document.
    ///
    /// Without intersection support the feature degrades on the spot:
    /// all targets get their final static appearance and none is
    /// observed afterwards.
    pub fn observe(doc: &mut Document, config: RevealConfig, env: &Environment) -> Self {
        let ids = doc.select_class(REVEAL_CLASS);

        if !env.supports_intersection {
            tracing::warn!(
                targets = ids.len(),
                "intersection observation unavailable, revealing statically"
            );
            for id in &ids {
                reveal_static(doc, *id);
            }
            return Self {
                targets: IndexMap::new(),
                config,
                instant: true,
                fired: 0,
            };
        }

        let mut targets = IndexMap::new();
        for id in ids {
            let kind = doc
                .node(id)
                .and_then(|n| n.attribute(ANIMATION_ATTR))
                .map(EntranceKind::parse)
                .unwrap_or_default();
            targets.insert(
                RevealHandle::new(),
                RevealTarget {
                    node: id,
                    kind,
                    triggered: false,
                },
            );
        }
        tracing::info!(targets = targets.len(), "reveal targets observed");

        Self {
            targets,
            config,
            instant: env.reduced_motion,
            fired: 0,
        }
    }

    /// Check every unfired target against the current scroll offset and
    /// fire those that now intersect the observed band.
    pub fn process(&mut self, doc: &mut Document, scroll_y: f32, viewport: Viewport) {
        let band_bottom = viewport.height - self.config.bottom_inset_px;
        let trigger = self.config.trigger_ratio();

        let mut due = Vec::new();
        for (handle, target) in &self.targets {
            let Some(rect) = doc.client_rect(target.node, scroll_y) else {
                continue;
            };
            let ratio = rect.vertical_coverage(0.0, band_bottom);
            if ratio > 0.0 && ratio >= trigger {
                due.push(*handle);
            }
        }

        for handle in due {
            let Some(mut target) = self.targets.shift_remove(&handle) else {
                continue;
            };
            target.triggered = true;
            self.fire(doc, &target);
            self.fired += 1;
        }
    }

    fn fire(&self, doc: &mut Document, target: &RevealTarget) {
        tracing::debug!(kind = ?target.kind, "reveal fired");

        if self.instant {
            reveal_static(doc, target.node);
        } else {
            let children = doc.children(target.node).to_vec();
            if children.is_empty() {
                // Leaf target: animate the element itself
                self.assign(doc, target.node, target.kind, 0);
            } else {
                for (index, child) in children.into_iter().enumerate() {
                    self.assign(doc, child, target.kind, index as u32);
                }
            }
        }

        if let Some(node) = doc.node_mut(target.node) {
            node.classes.push(TRIGGERED_CLASS.to_string());
        }
    }

    fn assign(&self, doc: &mut Document, id: NodeId, kind: EntranceKind, index: u32) {
        if let Some(style) = doc.style_mut(id) {
            style.animation = Some(EntranceAnimation {
                kind,
                duration_ms: self.config.duration_ms,
                delay_ms: index * self.config.stagger_ms,
            });
        }
    }

    /// Number of targets still observed
    pub fn pending(&self) -> usize {
        self.targets.len()
    }

    /// Number of targets that have fired
    pub fn fired(&self) -> usize {
        self.fired
    }
}

/// Final static appearance: fully visible, no transform, no animation.
fn reveal_static(doc: &mut Document, id: NodeId) {
    let children = doc.children(id).to_vec();
    for child in children {
        if let Some(style) = doc.style_mut(child) {
            style.opacity = Some(1.0);
            style.transform = None;
            style.animation = None;
        }
    }
    if let Some(style) = doc.style_mut(id) {
        style.opacity = Some(1.0);
        style.transform = None;
        style.animation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollfx_dom::{Node, Rect};

    fn doc_with_target(top: f32) -> (Document, NodeId, Vec<NodeId>) {
        let mut doc = Document::new();
        let root = doc.root();
        let target = doc
            .append(
                root,
                Node::new("div")
                    .with_class(REVEAL_CLASS)
                    .with_rect(Rect::new(0.0, top, 1024.0, 400.0)),
            )
            .unwrap();
        let mut children = Vec::new();
        for i in 0..3 {
            let child = doc
                .append(
                    target,
                    Node::new("div")
                        .with_class("glass-card")
                        .with_rect(Rect::new(0.0, top + i as f32 * 120.0, 300.0, 100.0)),
                )
                .unwrap();
            children.push(child);
        }
        (doc, target, children)
    }

    fn viewport() -> Viewport {
        Viewport::new(1024.0, 800.0)
    }

    #[test]
    fn test_fires_once_with_stagger() {
        let (mut doc, target, children) = doc_with_target(1500.0);
        let mut reveal =
            RevealSystem::observe(&mut doc, RevealConfig::default(), &Environment::default());
        assert_eq!(reveal.pending(), 1);

        // Off screen: nothing fires
        reveal.process(&mut doc, 0.0, viewport());
        assert_eq!(reveal.fired(), 0);

        // Scrolled into view: fires with per-child stagger
        reveal.process(&mut doc, 1200.0, viewport());
        assert_eq!(reveal.fired(), 1);
        assert_eq!(reveal.pending(), 0);
        for (i, child) in children.iter().enumerate() {
            let anim = doc.node(*child).unwrap().style.animation.unwrap();
            assert_eq!(anim.delay_ms, i as u32 * 100);
            assert_eq!(anim.kind, EntranceKind::SlideUp);
        }
        assert!(doc.node(target).unwrap().has_class(TRIGGERED_CLASS));

        // Leaving and re-entering does not re-fire
        reveal.process(&mut doc, 0.0, viewport());
        reveal.process(&mut doc, 1200.0, viewport());
        assert_eq!(reveal.fired(), 1);
    }

    #[test]
    fn test_bottom_inset_delays_trigger() {
        let (mut doc, _, _) = doc_with_target(790.0);
        let mut reveal =
            RevealSystem::observe(&mut doc, RevealConfig::default(), &Environment::default());

        // Top edge inside the viewport but inside the 50px inset band:
        // not yet observed as intersecting
        reveal.process(&mut doc, 0.0, viewport());
        assert_eq!(reveal.fired(), 0);

        // A little more scroll crosses into the band
        reveal.process(&mut doc, 60.0, viewport());
        assert_eq!(reveal.fired(), 1);
    }

    #[test]
    fn test_animation_kind_marker() {
        let mut doc = Document::new();
        let root = doc.root();
        let target = doc
            .append(
                root,
                Node::new("div")
                    .with_class(REVEAL_CLASS)
                    .with_attribute(ANIMATION_ATTR, "slideRight")
                    .with_rect(Rect::new(0.0, 100.0, 500.0, 200.0)),
            )
            .unwrap();
        let mut reveal =
            RevealSystem::observe(&mut doc, RevealConfig::default(), &Environment::default());
        reveal.process(&mut doc, 0.0, viewport());

        // Leaf target animates itself
        let anim = doc.node(target).unwrap().style.animation.unwrap();
        assert_eq!(anim.kind, EntranceKind::SlideRight);
        assert_eq!(anim.delay_ms, 0);
    }

    #[test]
    fn test_unsupported_host_reveals_statically() {
        let (mut doc, target, children) = doc_with_target(5000.0);
        let env = Environment {
            supports_intersection: false,
            ..Environment::default()
        };
        let reveal = RevealSystem::observe(&mut doc, RevealConfig::default(), &env);
        assert_eq!(reveal.pending(), 0);

        // Even a far-off-screen target is already in its final state
        assert_eq!(doc.node(target).unwrap().style.opacity, Some(1.0));
        for child in children {
            let style = &doc.node(child).unwrap().style;
            assert_eq!(style.opacity, Some(1.0));
            assert!(style.animation.is_none());
        }
    }

    #[test]
    fn test_reduced_motion_skips_animation() {
        let (mut doc, _, children) = doc_with_target(200.0);
        let env = Environment {
            reduced_motion: true,
            ..Environment::default()
        };
        let mut reveal = RevealSystem::observe(&mut doc, RevealConfig::default(), &env);
        reveal.process(&mut doc, 0.0, viewport());
        assert_eq!(reveal.fired(), 1);
        for child in children {
            let style = &doc.node(child).unwrap().style;
            assert_eq!(style.opacity, Some(1.0));
            assert!(style.animation.is_none());
        }
    }
}
