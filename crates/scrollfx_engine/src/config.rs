// SPDX-License-Identifier: MIT OR Apache-2.0
//! Engine configuration.
//!
//! Serialized as RON so a host can tune the effect layer without
//! recompiling. Every field has a default matching the stock portfolio
//! presentation.

use serde::{Deserialize, Serialize};

/// Error loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// RON syntax or shape error
    #[error("invalid config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of synthesized background parallax layers
    pub background_layers: usize,
    /// Viewport width below which effects are disabled, in logical px
    pub narrow_viewport_px: f32,
    /// Minimum interval between applied updates on low-power devices,
    /// in milliseconds
    pub low_power_min_interval_ms: u64,
    /// Enable the depth-of-field / hue-shift / wave extras
    pub advanced_effects: bool,
    /// Stamp `will-change: transform, opacity` on registered nodes
    pub will_change_hint: bool,
    /// Reveal system tuning
    pub reveal: RevealConfig,
    /// Pointer parallax tuning
    pub pointer: PointerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            background_layers: 3,
            narrow_viewport_px: 768.0,
            low_power_min_interval_ms: 32,
            advanced_effects: false,
            will_change_hint: true,
            reveal: RevealConfig::default(),
            pointer: PointerConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a RON document
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    /// Serialize to RON
    pub fn to_ron(&self) -> String {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .unwrap_or_else(|_| String::from("()"))
    }
}

/// Visibility reveal tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Intersection granularity steps. A target fires once its coverage
    /// of the observed band exceeds the smallest step (0.0 means any
    /// overlap fires).
    pub thresholds: Vec<f32>,
    /// Inset taken off the viewport bottom so targets fire slightly
    /// before full entry, in px
    pub bottom_inset_px: f32,
    /// Per-sibling entrance delay, in milliseconds
    pub stagger_ms: u32,
    /// Entrance animation duration, in milliseconds
    pub duration_ms: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            thresholds: vec![0.0, 0.25, 0.5, 0.75, 1.0],
            bottom_inset_px: 50.0,
            stagger_ms: 100,
            duration_ms: 800,
        }
    }
}

impl RevealConfig {
    /// Coverage ratio a target must exceed to fire
    pub fn trigger_ratio(&self) -> f32 {
        self.thresholds
            .iter()
            .copied()
            .fold(f32::INFINITY, f32::min)
            .clamp(0.0, 1.0)
    }
}

/// Pointer parallax tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Per-target intensity increment (target `i` moves at
    /// `(i + 1) * intensity_step` of the pointer travel)
    pub intensity_step: f32,
    /// Full-travel distance in px for a pointer at the viewport edge
    pub travel_px: f32,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            intensity_step: 0.02,
            travel_px: 100.0,
        }
    }
}
