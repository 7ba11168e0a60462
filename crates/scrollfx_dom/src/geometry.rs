// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layout geometry.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle. Coordinates follow screen convention:
/// `top < bottom`, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Width (non-negative)
    pub width: f32,
    /// Height (non-negative)
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Vertical center
    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }

    /// Shift the rectangle vertically
    pub fn offset_y(&self, dy: f32) -> Self {
        Self {
            top: self.top + dy,
            ..*self
        }
    }

    /// Fraction of this rectangle's height that lies inside the vertical
    /// band `[band_top, band_bottom]`, in `[0, 1]`. Zero-height
    /// rectangles report 1.0 when their top edge is inside the band.
    pub fn vertical_coverage(&self, band_top: f32, band_bottom: f32) -> f32 {
        if self.height <= 0.0 {
            return if self.top >= band_top && self.top <= band_bottom {
                1.0
            } else {
                0.0
            };
        }
        let visible_top = self.top.max(band_top);
        let visible_bottom = self.bottom().min(band_bottom);
        ((visible_bottom - visible_top) / self.height).clamp(0.0, 1.0)
    }
}
