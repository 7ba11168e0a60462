// SPDX-License-Identifier: MIT OR Apache-2.0
//! Effect descriptors.

use scrollfx_dom::NodeId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marker attribute opting an element into custom parallax
pub const PARALLAX_ATTR: &str = "data-parallax";
/// Marker attribute selecting the custom parallax direction
pub const DIRECTION_ATTR: &str = "data-direction";
/// Marker attribute opting an element into the wave effect
pub const WAVE_ATTR: &str = "data-wave";
/// Wave amplitude override, in px
pub const WAVE_AMPLITUDE_ATTR: &str = "data-wave-amplitude";
/// Wave frequency override, in rad/px
pub const WAVE_FREQUENCY_ATTR: &str = "data-wave-frequency";

/// Default speed for custom parallax elements without a numeric marker
pub const DEFAULT_CUSTOM_SPEED: f32 = 0.5;
/// Default wave amplitude, in px
pub const DEFAULT_WAVE_AMPLITUDE: f32 = 10.0;
/// Default wave frequency, in rad/px
pub const DEFAULT_WAVE_FREQUENCY: f32 = 0.01;

/// Unique identifier for a registered effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectHandle(pub Uuid);

impl EffectHandle {
    /// Create a new random effect handle
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EffectHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Movement direction for custom parallax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Translate up with scroll
    #[default]
    Up,
    /// Translate down with scroll
    Down,
    /// Translate left with scroll
    Left,
    /// Translate right with scroll
    Right,
    /// Scale with scroll (clamped)
    Scale,
    /// Rotate with scroll
    Rotate,
}

impl Direction {
    /// Parse a marker attribute value; unknown values fall back to `Up`.
    pub fn parse(value: &str) -> Self {
        match value {
            "down" => Self::Down,
            "left" => Self::Left,
            "right" => Self::Right,
            "scale" => Self::Scale,
            "rotate" => Self::Rotate,
            _ => Self::Up,
        }
    }

    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Scale => "scale",
            Self::Rotate => "rotate",
        }
    }
}

/// Kind of continuous effect applied to a registered element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Synthesized background layer; `layer` is its depth index
    Background {
        /// Depth index, 0 = nearest layer
        layer: usize,
    },
    /// Structural section fade
    Section,
    /// Author-marked custom parallax
    Custom {
        /// Movement direction
        direction: Direction,
    },
    /// The scroll-progress indicator
    Progress,
    /// Scroll-coupled sine bobbing
    Wave {
        /// Peak displacement in px
        amplitude: f32,
        /// Angular frequency in rad/px
        frequency: f32,
    },
}

impl EffectKind {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background { .. } => "background",
            Self::Section => "section",
            Self::Custom { .. } => "custom",
            Self::Progress => "progress",
            Self::Wave { .. } => "wave",
        }
    }
}

/// One element's continuous-effect configuration.
///
/// The node reference is non-owning: the document owns node lifetime,
/// and an entry whose node has gone away simply stops matching anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectEntry {
    /// Target node
    pub node: NodeId,
    /// Effect variant
    pub kind: EffectKind,
    /// Scroll-distance multiplier
    pub speed: f32,
}
