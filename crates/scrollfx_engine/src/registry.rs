// SPDX-License-Identifier: MIT OR Apache-2.0
//! Effect registry and document scan.
//!
//! The registry is an arena keyed by stable handles. `scan` populates it
//! from a laid-out document: synthesized background layers, structural
//! sections, author-marked custom parallax and wave elements, and the
//! synthesized scroll-progress indicator. Missing or malformed markers
//! fall back to defaults; the scan has no error path.

use crate::config::EngineConfig;
use crate::effect::{
    Direction, EffectEntry, EffectHandle, EffectKind, DEFAULT_CUSTOM_SPEED,
    DEFAULT_WAVE_AMPLITUDE, DEFAULT_WAVE_FREQUENCY, DIRECTION_ATTR, PARALLAX_ATTR,
    WAVE_AMPLITUDE_ATTR, WAVE_ATTR, WAVE_FREQUENCY_ATTR,
};
use indexmap::IndexMap;
use scrollfx_dom::{Document, Node, Rect, Transform, Viewport};

/// Class of the container the background layers are synthesized under
pub const BACKGROUND_CONTAINER_CLASS: &str = "background-effects";
/// Class stamped on each synthesized background layer
pub const LAYER_CLASS: &str = "parallax-layer";
/// Class of the synthesized scroll-progress indicator
pub const PROGRESS_CLASS: &str = "scroll-progress";

/// Arena of registered effect entries.
#[derive(Debug, Clone, Default)]
pub struct EffectRegistry {
    entries: IndexMap<EffectHandle, EffectEntry>,
}

impl EffectRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entry. Returns its stable handle.
    pub fn register(&mut self, entry: EffectEntry) -> EffectHandle {
        let handle = EffectHandle::new();
        tracing::debug!(kind = entry.kind.name(), speed = entry.speed, "register effect");
        self.entries.insert(handle, entry);
        handle
    }

    /// Remove an entry. Call when its node is known to be gone from the
    /// document; entries are otherwise kept for the page's lifetime.
    pub fn unregister(&mut self, handle: EffectHandle) -> Option<EffectEntry> {
        self.entries.shift_remove(&handle)
    }

    /// Get an entry
    pub fn get(&self, handle: EffectHandle) -> Option<&EffectEntry> {
        self.entries.get(&handle)
    }

    /// All entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = (EffectHandle, &EffectEntry)> {
        self.entries.iter().map(|(h, e)| (*h, e))
    }

    /// Number of registered entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Handles of entries matching a predicate on the kind
    pub fn handles_where(&self, pred: impl Fn(&EffectKind) -> bool) -> Vec<EffectHandle> {
        self.entries
            .iter()
            .filter(|(_, e)| pred(&e.kind))
            .map(|(h, _)| *h)
            .collect()
    }

    /// Populate the registry from a document.
    ///
    /// Synthesizes the background layers and the progress indicator as a
    /// side effect; they do not pre-exist in authored markup.
    pub fn scan(&mut self, doc: &mut Document, viewport: Viewport, config: &EngineConfig) {
        self.create_background_layers(doc, viewport, config.background_layers);
        self.register_sections(doc);
        self.register_custom(doc);
        self.register_waves(doc);
        self.create_progress_indicator(doc, viewport);

        if config.will_change_hint {
            for entry in self.entries.values() {
                if let Some(style) = doc.style_mut(entry.node) {
                    style.will_change = Some("transform, opacity".to_string());
                }
            }
        }

        tracing::info!(entries = self.entries.len(), "effect scan complete");
    }

    fn create_background_layers(&mut self, doc: &mut Document, viewport: Viewport, count: usize) {
        let container = doc
            .find_class(BACKGROUND_CONTAINER_CLASS)
            .unwrap_or_else(|| doc.root());

        for i in 0..count {
            // Layers overdraw the viewport by 20% so translation never
            // exposes their lower edge.
            let mut layer = Node::new("div")
                .with_class(LAYER_CLASS)
                .with_class(format!("layer-{i}"))
                .with_rect(Rect::new(0.0, 0.0, viewport.width, viewport.height * 1.2));
            layer.style.z_index = Some(-10 - i as i32);
            layer.style.opacity = Some(0.1 - i as f32 * 0.02);

            let Ok(id) = doc.append(container, layer) else {
                continue;
            };
            self.register(EffectEntry {
                node: id,
                kind: EffectKind::Background { layer: i },
                speed: (i + 1) as f32 * 0.15,
            });
        }
    }

    fn register_sections(&mut self, doc: &Document) {
        for (index, id) in doc.select_tag("section").into_iter().enumerate() {
            self.register(EffectEntry {
                node: id,
                kind: EffectKind::Section,
                speed: (index % 3) as f32 * 0.1 + 0.1,
            });
        }
    }

    fn register_custom(&mut self, doc: &Document) {
        for id in doc.select_attr(PARALLAX_ATTR) {
            let Some(node) = doc.node(id) else { continue };
            let speed = node
                .attribute(PARALLAX_ATTR)
                .and_then(parse_finite)
                .unwrap_or(DEFAULT_CUSTOM_SPEED);
            let direction = node
                .attribute(DIRECTION_ATTR)
                .map(Direction::parse)
                .unwrap_or_default();
            self.register(EffectEntry {
                node: id,
                kind: EffectKind::Custom { direction },
                speed,
            });
        }
    }

    fn register_waves(&mut self, doc: &Document) {
        for id in doc.select_attr(WAVE_ATTR) {
            let Some(node) = doc.node(id) else { continue };
            let amplitude = node
                .attribute(WAVE_AMPLITUDE_ATTR)
                .and_then(parse_finite)
                .unwrap_or(DEFAULT_WAVE_AMPLITUDE);
            let frequency = node
                .attribute(WAVE_FREQUENCY_ATTR)
                .and_then(parse_finite)
                .unwrap_or(DEFAULT_WAVE_FREQUENCY);
            self.register(EffectEntry {
                node: id,
                kind: EffectKind::Wave {
                    amplitude,
                    frequency,
                },
                speed: 1.0,
            });
        }
    }

    fn create_progress_indicator(&mut self, doc: &mut Document, viewport: Viewport) {
        let mut bar = Node::new("div")
            .with_class(PROGRESS_CLASS)
            .with_rect(Rect::new(0.0, 0.0, viewport.width, 3.0));
        bar.style.z_index = Some(10_000);
        bar.style.transform = Some(Transform::ScaleX(0.0));

        let root = doc.root();
        let Ok(id) = doc.append(root, bar) else {
            return;
        };
        self.register(EffectEntry {
            node: id,
            kind: EffectKind::Progress,
            speed: 1.0,
        });
    }
}

/// Parse a marker attribute as a finite float
fn parse_finite(value: &str) -> Option<f32> {
    value.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}
