// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scripted scroll session.
//!
//! Replays a fixed event timeline through the engine: a scroll ramp to
//! the page bottom, a same-frame scroll burst (coalesced by the
//! debounce), pointer moves, a narrow-viewport resize and recovery,
//! then a ramp back up. Ends by firing the stop token and reporting a
//! summary of what was applied.

use crate::page;
use scrollfx_dom::{Document, DomError, Environment, Viewport};
use scrollfx_engine::registry::{LAYER_CLASS, PROGRESS_CLASS};
use scrollfx_engine::{ConfigError, EffectDriver, EngineConfig, RevealSystem};
use serde::Serialize;
use std::time::Duration;

/// Frame cadence in milliseconds
const FRAME_MS: u64 = 16;
/// Total frames the session runs
const TOTAL_FRAMES: u64 = 180;

/// Error running the demo session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Config file unreadable
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    /// Config file invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Demo page construction failed
    #[error("cannot build page: {0}")]
    Page(#[from] DomError),
}

/// One scripted host event.
#[derive(Debug, Clone, Copy)]
enum SessionEvent {
    /// Scroll to an offset
    Scroll(f32),
    /// Pointer moved to viewport coordinates
    Pointer(f32, f32),
    /// Viewport resized
    Resize(Viewport),
}

/// What the session did, for the final report.
#[derive(Debug, Serialize)]
pub struct Summary {
    /// Frames ticked
    pub frames: u64,
    /// Frames that applied styles
    pub applied_frames: u64,
    /// Effect entries registered by the scan
    pub registry_entries: usize,
    /// Reveal targets that fired
    pub reveals_fired: usize,
    /// Reveal targets never reached
    pub reveals_pending: usize,
    /// Scroll offset at session end
    pub final_scroll_y: f32,
    /// Progress indicator transform at session end
    pub progress_transform: Option<String>,
    /// Nearest background layer transform at session end
    pub layer_transform: Option<String>,
    /// Nearest background layer filter at session end
    pub layer_filter: Option<String>,
}

/// Load the engine config: `SCROLLFX_CONFIG` names a RON file, else the
/// stock config with the advanced extras switched on for the demo.
pub fn load_config() -> Result<EngineConfig, SessionError> {
    match std::env::var_os("SCROLLFX_CONFIG") {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(EngineConfig::from_ron(&text)?)
        }
        None => Ok(EngineConfig {
            advanced_effects: true,
            ..EngineConfig::default()
        }),
    }
}

/// Build the page, run the scripted session, print the report.
pub fn launch() -> Result<(), SessionError> {
    let config = load_config()?;
    let env = Environment::default();
    let mut doc = page::build()?;

    let summary = run(&mut doc, config, env, TOTAL_FRAMES);

    tracing::info!(
        frames = summary.frames,
        applied = summary.applied_frames,
        reveals = summary.reveals_fired,
        "session complete"
    );
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::warn!("report serialization failed: {e}"),
    }
    Ok(())
}

/// The event timeline, keyed by frame index.
fn script() -> Vec<(u64, SessionEvent)> {
    let mut events = Vec::new();

    events.push((5, SessionEvent::Pointer(960.0, 240.0)));

    // Steady ramp to the page bottom
    for f in 10..=70u64 {
        events.push((f, SessionEvent::Scroll((f - 10) as f32 * 50.0)));
    }

    // Burst of events inside one frame; only the last survives
    events.push((80, SessionEvent::Scroll(3100.0)));
    events.push((80, SessionEvent::Scroll(3150.0)));
    events.push((80, SessionEvent::Scroll(3200.0)));

    events.push((90, SessionEvent::Pointer(200.0, 600.0)));

    // Narrow resize disables and clears, recovery re-enables
    events.push((100, SessionEvent::Resize(Viewport::new(600.0, 800.0))));
    events.push((115, SessionEvent::Resize(Viewport::new(1280.0, 800.0))));

    // Ramp back up to a quarter of the range
    for f in 120..=150u64 {
        events.push((f, SessionEvent::Scroll(3200.0 - (f - 120) as f32 * 80.0)));
    }

    events
}

/// Run the scripted session against a document.
pub fn run(
    doc: &mut Document,
    config: EngineConfig,
    env: Environment,
    total_frames: u64,
) -> Summary {
    let reveal_config = config.reveal.clone();
    let mut driver = EffectDriver::new(config, env.clone());
    driver.scan(doc);
    let mut reveal = RevealSystem::observe(doc, reveal_config, &env);

    let events = script();
    let frame = Duration::from_millis(FRAME_MS);
    let mut now = Duration::ZERO;

    for f in 0..total_frames {
        now += frame;
        for (at, event) in &events {
            if *at != f {
                continue;
            }
            match *event {
                SessionEvent::Scroll(offset) => driver.handle_scroll(offset),
                SessionEvent::Pointer(x, y) => driver.handle_pointer(x, y),
                SessionEvent::Resize(viewport) => driver.handle_resize(doc, viewport),
            }
        }
        driver.tick(doc, now);
        let viewport = driver.environment().viewport;
        reveal.process(doc, driver.scroll_y(), viewport);
    }

    // Shutdown: further frames must be no-ops
    driver.stop_token().stop();
    driver.run_frames(doc, 10, frame);

    let progress = doc.find_class(PROGRESS_CLASS);
    let layer = doc.find_class(LAYER_CLASS);
    Summary {
        frames: driver.frames(),
        applied_frames: driver.applied_frames(),
        registry_entries: driver.registry().len(),
        reveals_fired: reveal.fired(),
        reveals_pending: reveal.pending(),
        final_scroll_y: driver.scroll_y(),
        progress_transform: progress
            .and_then(|id| doc.node(id))
            .and_then(|n| n.style.transform)
            .map(|t| t.to_string()),
        layer_transform: layer
            .and_then(|id| doc.node(id))
            .and_then(|n| n.style.transform)
            .map(|t| t.to_string()),
        layer_filter: layer
            .and_then(|id| doc.node(id))
            .and_then(|n| n.style.filter)
            .map(|f| f.to_string()),
    }
}
