// SPDX-License-Identifier: MIT OR Apache-2.0
//! Inline style properties written by the effect engine.
//!
//! Only the properties the engine mutates are modeled: transform,
//! opacity, filter, and the one-shot entrance animation. Values render
//! to CSS-compatible strings for reporting and snapshots.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single transform applied to a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    /// Horizontal translation in px
    TranslateX(f32),
    /// Vertical translation in px
    TranslateY(f32),
    /// Translation on both axes in px
    Translate {
        /// Horizontal component
        x: f32,
        /// Vertical component
        y: f32,
    },
    /// Uniform scale
    Scale(f32),
    /// Horizontal-only scale (used by the progress indicator)
    ScaleX(f32),
    /// Rotation in degrees
    Rotate(f32),
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TranslateX(x) => write!(f, "translateX({x}px)"),
            Self::TranslateY(y) => write!(f, "translateY({y}px)"),
            Self::Translate { x, y } => write!(f, "translate({x}px, {y}px)"),
            Self::Scale(s) => write!(f, "scale({s})"),
            Self::ScaleX(s) => write!(f, "scaleX({s})"),
            Self::Rotate(deg) => write!(f, "rotate({deg}deg)"),
        }
    }
}

/// A filter applied to a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    /// Gaussian blur in px
    Blur(f32),
    /// Hue rotation in degrees
    HueRotate(f32),
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blur(px) => write!(f, "blur({px}px)"),
            Self::HueRotate(deg) => write!(f, "hue-rotate({deg}deg)"),
        }
    }
}

/// Entrance animation kind for one-shot reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EntranceKind {
    /// Slide in from below
    #[default]
    SlideUp,
    /// Slide in from the left
    SlideLeft,
    /// Slide in from the right
    SlideRight,
    /// Fade in while scaling up
    FadeScale,
}

impl EntranceKind {
    /// Keyframe name the host stylesheet defines for this kind
    pub fn keyframe_name(&self) -> &'static str {
        match self {
            Self::SlideUp => "slideInUp",
            Self::SlideLeft => "slideInLeft",
            Self::SlideRight => "slideInRight",
            Self::FadeScale => "fadeInScale",
        }
    }

    /// Parse a marker attribute value; unknown values fall back to the
    /// default slide-up.
    pub fn parse(value: &str) -> Self {
        match value {
            "slideLeft" => Self::SlideLeft,
            "slideRight" => Self::SlideRight,
            "scale" => Self::FadeScale,
            _ => Self::SlideUp,
        }
    }
}

/// A one-shot entrance animation assignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntranceAnimation {
    /// Animation kind
    pub kind: EntranceKind,
    /// Duration in milliseconds
    pub duration_ms: u32,
    /// Start delay in milliseconds (sibling stagger)
    pub delay_ms: u32,
}

impl fmt::Display for EntranceAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}ms ease-out {}ms forwards",
            self.kind.keyframe_name(),
            self.duration_ms,
            self.delay_ms
        )
    }
}

/// Inline style state of a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InlineStyle {
    /// Current transform, if any
    pub transform: Option<Transform>,
    /// Current opacity override, if any
    pub opacity: Option<f32>,
    /// Current filter, if any
    pub filter: Option<Filter>,
    /// Assigned entrance animation, if any
    pub animation: Option<EntranceAnimation>,
    /// Stacking order, if set
    pub z_index: Option<i32>,
    /// `will-change` hint, if stamped
    pub will_change: Option<String>,
}

impl InlineStyle {
    /// Reset transform, opacity, and filter to their defaults. The
    /// entrance animation and `will-change` hint are left alone.
    pub fn clear_effects(&mut self) {
        self.transform = None;
        self.opacity = None;
        self.filter = None;
    }

    /// Whether any effect property is currently set
    pub fn has_effects(&self) -> bool {
        self.transform.is_some() || self.opacity.is_some() || self.filter.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_display() {
        assert_eq!(Transform::TranslateY(-37.5).to_string(), "translateY(-37.5px)");
        assert_eq!(Transform::ScaleX(0.25).to_string(), "scaleX(0.25)");
        assert_eq!(Transform::Rotate(12.0).to_string(), "rotate(12deg)");
    }

    #[test]
    fn test_entrance_parse_fallback() {
        assert_eq!(EntranceKind::parse("slideLeft"), EntranceKind::SlideLeft);
        assert_eq!(EntranceKind::parse("scale"), EntranceKind::FadeScale);
        assert_eq!(EntranceKind::parse("bogus"), EntranceKind::SlideUp);
        assert_eq!(EntranceKind::parse(""), EntranceKind::SlideUp);
    }

    #[test]
    fn test_clear_effects_keeps_animation() {
        let mut style = InlineStyle {
            transform: Some(Transform::Scale(1.2)),
            opacity: Some(0.95),
            filter: Some(Filter::Blur(2.0)),
            animation: Some(EntranceAnimation {
                kind: EntranceKind::SlideUp,
                duration_ms: 800,
                delay_ms: 0,
            }),
            z_index: None,
            will_change: None,
        };
        style.clear_effects();
        assert!(!style.has_effects());
        assert!(style.animation.is_some());
    }
}
