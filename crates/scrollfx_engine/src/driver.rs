// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame driver.
//!
//! This module handles:
//! - Committing the debounced scroll sample at frame boundaries
//! - Exhaustive dispatch over every registered effect
//! - The low-power update budget (~30 Hz on constrained devices)
//! - The responsive disable/clear policy for narrow viewports
//! - Cooperative shutdown via a clonable stop token
//!
//! The driver owns the scroll state and the registry; it is an ordinary
//! value, so tests and hosts can run any number of independent
//! instances and drive a fixed number of frames deterministically.

use crate::config::EngineConfig;
use crate::effect::EffectKind;
use crate::evaluate::{
    background_offset, custom_transform, layer_blur, progress_ratio, section_hue,
    section_opacity, vertically_visible, wave_offset,
};
use crate::pointer::PointerParallax;
use crate::registry::EffectRegistry;
use crate::scroll::ScrollState;
use scrollfx_dom::{Document, Environment, Filter, Transform, Viewport};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Cooperative cancellation handle for the frame loop.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    stopped: Arc<AtomicBool>,
}

impl StopToken {
    /// Create an unstopped token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown. Every tick after this is a no-op.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    /// Whether shutdown was requested
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

/// Continuous-effect driver: owns the registry and scroll state,
/// translates scroll offset into style mutations once per frame.
#[derive(Debug)]
pub struct EffectDriver {
    registry: EffectRegistry,
    scroll: ScrollState,
    pointer: PointerParallax,
    config: EngineConfig,
    env: Environment,
    enabled: bool,
    stop: StopToken,
    min_interval: Duration,
    last_applied: Option<Duration>,
    clock: Duration,
    frames: u64,
    applied: u64,
}

impl EffectDriver {
    /// Create a driver for the given environment.
    ///
    /// Reduced motion disables effect application outright; a viewport
    /// narrower than the configured threshold does the same until a
    /// resize widens it.
    pub fn new(config: EngineConfig, env: Environment) -> Self {
        let enabled = !env.reduced_motion && env.viewport.width >= config.narrow_viewport_px;
        let min_interval = if env.is_low_power() {
            Duration::from_millis(config.low_power_min_interval_ms)
        } else {
            Duration::ZERO
        };
        tracing::info!(
            enabled,
            low_power = env.is_low_power(),
            reduced_motion = env.reduced_motion,
            "effect driver created"
        );
        Self {
            registry: EffectRegistry::new(),
            scroll: ScrollState::new(),
            pointer: PointerParallax::default(),
            config,
            env,
            enabled,
            stop: StopToken::new(),
            min_interval,
            last_applied: None,
            clock: Duration::ZERO,
            frames: 0,
            applied: 0,
        }
    }

    /// Scan the document: populate the registry (synthesizing layers and
    /// the progress indicator) and collect pointer parallax targets.
    pub fn scan(&mut self, doc: &mut Document) {
        self.registry.scan(doc, self.env.viewport, &self.config);
        self.pointer = PointerParallax::observe(doc);
    }

    /// The effect registry
    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    /// The effect registry, mutable (e.g. to unregister a dead node)
    pub fn registry_mut(&mut self) -> &mut EffectRegistry {
        &mut self.registry
    }

    /// Last committed scroll offset
    pub fn scroll_y(&self) -> f32 {
        self.scroll.scroll_y()
    }

    /// Whether effects currently apply
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Frames ticked so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames that actually applied styles (differs from [`frames`]
    /// under the low-power budget)
    ///
    /// [`frames`]: Self::frames
    pub fn applied_frames(&self) -> u64 {
        self.applied
    }

    /// Clonable stop token for this driver
    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    /// Current environment snapshot
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Record a scroll event. Bursts coalesce into one refresh per
    /// frame.
    pub fn handle_scroll(&mut self, offset: f32) {
        self.scroll.record(offset);
    }

    /// Record a pointer position in viewport coordinates
    pub fn handle_pointer(&mut self, x: f32, y: f32) {
        self.pointer.set_position(x, y, self.env.viewport);
    }

    /// Apply the responsive policy for a new viewport size.
    ///
    /// Below the width threshold all effects disable and every applied
    /// transform/opacity/filter is cleared in this same call; at or
    /// above it they re-enable unless reduced motion is set.
    pub fn handle_resize(&mut self, doc: &mut Document, viewport: Viewport) {
        self.env.viewport = viewport;
        if viewport.width < self.config.narrow_viewport_px {
            if self.enabled {
                tracing::info!(width = viewport.width, "narrow viewport, effects disabled");
            }
            self.enabled = false;
            self.clear_applied_styles(doc);
        } else {
            self.enabled = !self.env.reduced_motion;
        }
    }

    fn clear_applied_styles(&self, doc: &mut Document) {
        for (_, entry) in self.registry.iter() {
            if let Some(style) = doc.style_mut(entry.node) {
                style.clear_effects();
            }
        }
        self.pointer.clear(doc);
    }

    /// Run one frame at the given timestamp: commit the pending scroll
    /// sample, then apply every effect if enabled and within budget.
    pub fn tick(&mut self, doc: &mut Document, now: Duration) {
        if self.stop.is_stopped() {
            return;
        }
        self.clock = now;
        self.frames += 1;
        self.scroll.commit();

        if !self.enabled {
            return;
        }
        if let Some(last) = self.last_applied {
            if now.saturating_sub(last) < self.min_interval {
                return;
            }
        }

        self.apply(doc);
        self.last_applied = Some(now);
        self.applied += 1;
    }

    /// Drive a fixed number of frames at a fixed cadence. Stops early
    /// when the stop token fires.
    pub fn run_frames(&mut self, doc: &mut Document, frames: u32, frame_dt: Duration) {
        for _ in 0..frames {
            if self.stop.is_stopped() {
                break;
            }
            let next = self.clock + frame_dt;
            self.tick(doc, next);
        }
    }

    fn apply(&self, doc: &mut Document) {
        let scroll_y = self.scroll.scroll_y();
        let viewport_h = self.env.viewport.height;
        let advanced = self.config.advanced_effects;

        for (_, entry) in self.registry.iter() {
            match entry.kind {
                EffectKind::Background { layer } => {
                    if let Some(style) = doc.style_mut(entry.node) {
                        style.transform =
                            Some(Transform::TranslateY(background_offset(scroll_y, entry.speed)));
                        if advanced {
                            style.filter = Some(Filter::Blur(layer_blur(scroll_y, layer)));
                        }
                    }
                }
                EffectKind::Section => {
                    let Some(rect) = doc.client_rect(entry.node, scroll_y) else {
                        continue;
                    };
                    let visible = vertically_visible(&rect, viewport_h);
                    if let Some(style) = doc.style_mut(entry.node) {
                        // Off-screen sections keep their last applied
                        // opacity
                        if visible {
                            style.opacity = Some(section_opacity(rect.top, viewport_h));
                        }
                        if advanced {
                            style.filter =
                                Some(Filter::HueRotate(section_hue(rect.top, viewport_h)));
                        }
                    }
                }
                EffectKind::Custom { direction } => {
                    let Some(rect) = doc.client_rect(entry.node, scroll_y) else {
                        continue;
                    };
                    if vertically_visible(&rect, viewport_h) {
                        if let Some(style) = doc.style_mut(entry.node) {
                            style.transform =
                                Some(custom_transform(scroll_y, entry.speed, direction));
                        }
                    }
                }
                EffectKind::Progress => {
                    let ratio = progress_ratio(scroll_y, doc.scroll_height, viewport_h);
                    if let Some(style) = doc.style_mut(entry.node) {
                        style.transform = Some(Transform::ScaleX(ratio));
                    }
                }
                EffectKind::Wave {
                    amplitude,
                    frequency,
                } => {
                    let Some(doc_top) = doc.node(entry.node).map(|n| n.rect.top) else {
                        continue;
                    };
                    if let Some(style) = doc.style_mut(entry.node) {
                        style.transform = Some(Transform::TranslateY(wave_offset(
                            scroll_y, doc_top, amplitude, frequency,
                        )));
                    }
                }
            }
        }

        self.pointer.apply(doc, &self.config.pointer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::PARALLAX_ATTR;
    use crate::registry::PROGRESS_CLASS;
    use scrollfx_dom::{Node, NodeId, Rect};

    const FRAME: Duration = Duration::from_millis(16);

    fn demo_doc() -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        for i in 0..3 {
            doc.append(
                root,
                Node::new("section").with_rect(Rect::new(0.0, i as f32 * 1000.0, 1024.0, 1000.0)),
            )
            .unwrap();
        }
        doc.append(
            root,
            Node::new("div")
                .with_attribute(PARALLAX_ATTR, "0.5")
                .with_rect(Rect::new(100.0, 100.0, 200.0, 200.0)),
        )
        .unwrap();
        doc
    }

    fn driver_with(env: Environment) -> (Document, EffectDriver) {
        let mut doc = demo_doc();
        let mut driver = EffectDriver::new(EngineConfig::default(), env);
        driver.scan(&mut doc);
        (doc, driver)
    }

    fn layer_nodes(driver: &EffectDriver) -> Vec<(usize, NodeId)> {
        driver
            .registry()
            .iter()
            .filter_map(|(_, e)| match e.kind {
                EffectKind::Background { layer } => Some((layer, e.node)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_background_translation_formula() {
        let (mut doc, mut driver) = driver_with(Environment::default());
        driver.handle_scroll(500.0);
        driver.tick(&mut doc, FRAME);

        for (layer, node) in layer_nodes(&driver) {
            let speed = (layer + 1) as f32 * 0.15;
            assert_eq!(
                doc.node(node).unwrap().style.transform,
                Some(Transform::TranslateY(-(500.0 * speed)))
            );
        }
    }

    #[test]
    fn test_scroll_jump_with_offscreen_section() {
        let (mut doc, mut driver) = driver_with(Environment::default());
        let sections: Vec<NodeId> = driver
            .registry()
            .iter()
            .filter(|(_, e)| e.kind == EffectKind::Section)
            .map(|(_, e)| e.node)
            .collect();

        driver.handle_scroll(0.0);
        driver.tick(&mut doc, FRAME);
        let far_opacity = doc.node(sections[2]).unwrap().style.opacity;

        // Jump straight to 500; the last section is still off screen
        driver.handle_scroll(500.0);
        driver.tick(&mut doc, FRAME * 2);

        let first = doc.node(sections[0]).unwrap().style.opacity.unwrap();
        assert!((0.9..=1.0).contains(&first));
        // Untouched since it never entered the viewport
        assert_eq!(doc.node(sections[2]).unwrap().style.opacity, far_opacity);
    }

    #[test]
    fn test_progress_follows_scroll() {
        let (mut doc, mut driver) = driver_with(Environment::default());
        let bar = doc.find_class(PROGRESS_CLASS).unwrap();
        // Document is 3000 tall, viewport 800: range 2200
        driver.handle_scroll(1100.0);
        driver.tick(&mut doc, FRAME);
        assert_eq!(
            doc.node(bar).unwrap().style.transform,
            Some(Transform::ScaleX(0.5))
        );
    }

    #[test]
    fn test_resize_narrow_clears_styles() {
        let (mut doc, mut driver) = driver_with(Environment::default());
        driver.handle_scroll(400.0);
        driver.tick(&mut doc, FRAME);

        driver.handle_resize(&mut doc, Viewport::new(600.0, 800.0));
        assert!(!driver.is_enabled());
        for (_, entry) in driver.registry().iter() {
            let style = &doc.node(entry.node).unwrap().style;
            assert!(style.transform.is_none());
            assert!(style.opacity.is_none());
            assert!(style.filter.is_none());
        }

        // Ticks while narrow leave everything cleared
        driver.tick(&mut doc, FRAME * 2);
        let (_, layer) = layer_nodes(&driver)[0];
        assert!(doc.node(layer).unwrap().style.transform.is_none());

        // Widening re-enables
        driver.handle_resize(&mut doc, Viewport::new(1024.0, 800.0));
        assert!(driver.is_enabled());
    }

    #[test]
    fn test_reduced_motion_never_mutates() {
        let env = Environment {
            reduced_motion: true,
            ..Environment::default()
        };
        let (mut doc, mut driver) = driver_with(env);
        let before = doc.clone();

        driver.handle_scroll(800.0);
        driver.run_frames(&mut doc, 10, FRAME);

        for id in before.ids() {
            assert_eq!(
                doc.node(id).unwrap().style,
                before.node(id).unwrap().style,
                "style mutated under reduced motion"
            );
        }
        // Reduced motion wins over a wide resize
        driver.handle_resize(&mut doc, Viewport::new(1920.0, 1080.0));
        assert!(!driver.is_enabled());
    }

    #[test]
    fn test_low_power_throttle() {
        let env = Environment {
            hardware_concurrency: 2,
            ..Environment::default()
        };
        let (mut doc, mut driver) = driver_with(env);
        driver.handle_scroll(100.0);
        // 9 frames at 16ms: applies at 16, 48, 80, 112, 144
        driver.run_frames(&mut doc, 9, FRAME);
        assert_eq!(driver.frames(), 9);
        assert_eq!(driver.applied_frames(), 5);
    }

    #[test]
    fn test_stop_token_halts_loop() {
        let (mut doc, mut driver) = driver_with(Environment::default());
        let token = driver.stop_token();
        driver.run_frames(&mut doc, 3, FRAME);
        assert_eq!(driver.frames(), 3);

        token.stop();
        driver.run_frames(&mut doc, 5, FRAME);
        assert_eq!(driver.frames(), 3);

        driver.handle_scroll(999.0);
        driver.tick(&mut doc, FRAME * 100);
        assert_eq!(driver.frames(), 3);
        assert_eq!(driver.scroll_y(), 0.0);
    }

    #[test]
    fn test_unregister_stops_mutation() {
        let (mut doc, mut driver) = driver_with(Environment::default());
        let handle = driver
            .registry()
            .iter()
            .find(|(_, e)| matches!(e.kind, EffectKind::Custom { .. }))
            .map(|(h, _)| h)
            .unwrap();
        let node = driver.registry().get(handle).unwrap().node;

        driver.handle_scroll(200.0);
        driver.tick(&mut doc, FRAME);
        assert!(doc.node(node).unwrap().style.transform.is_some());

        driver.registry_mut().unregister(handle);
        if let Some(style) = doc.style_mut(node) {
            style.clear_effects();
        }
        driver.handle_scroll(400.0);
        driver.tick(&mut doc, FRAME * 2);
        assert!(doc.node(node).unwrap().style.transform.is_none());
    }

    #[test]
    fn test_narrow_at_construction_disables() {
        let env = Environment {
            viewport: Viewport::new(600.0, 800.0),
            ..Environment::default()
        };
        let (mut doc, mut driver) = driver_with(env);
        assert!(!driver.is_enabled());
        driver.handle_scroll(300.0);
        driver.tick(&mut doc, FRAME);
        assert_eq!(driver.applied_frames(), 0);
        // The committed sample is still observable
        assert_eq!(driver.scroll_y(), 300.0);
    }
}
