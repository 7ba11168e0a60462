// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-variant style evaluation.
//!
//! Pure functions from scroll geometry to style values. The frame driver
//! dispatches over [`EffectKind`](crate::effect::EffectKind) and applies
//! the results; keeping the math free of document access makes every
//! formula testable in isolation.

use crate::effect::Direction;
use scrollfx_dom::{Rect, Transform};

/// Clamp to `[0, 1]`
pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Whether a viewport-relative rectangle intersects the viewport
/// vertically.
pub fn vertically_visible(rect: &Rect, viewport_h: f32) -> bool {
    rect.bottom() >= 0.0 && rect.top <= viewport_h
}

/// Background layer translation: pure scroll-proportional offset,
/// unbounded.
pub fn background_offset(scroll_y: f32, speed: f32) -> f32 {
    -(scroll_y * speed)
}

/// Section opacity while on screen.
///
/// Dips toward 0.9 the farther the section's top edge sits from the
/// viewport's vertical center. The narrow `[0.9, 1.0]` range is
/// intentional.
pub fn section_opacity(client_top: f32, viewport_h: f32) -> f32 {
    let centered = clamp01(1.0 - (client_top - viewport_h / 2.0).abs() / viewport_h);
    centered * 0.1 + 0.9
}

/// Custom parallax transform for a visible element.
pub fn custom_transform(scroll_y: f32, speed: f32, direction: Direction) -> Transform {
    let distance = scroll_y * speed;
    match direction {
        Direction::Up => Transform::TranslateY(-distance),
        Direction::Down => Transform::TranslateY(distance),
        Direction::Left => Transform::TranslateX(-distance),
        Direction::Right => Transform::TranslateX(distance),
        Direction::Scale => Transform::Scale((1.0 + distance / 1000.0).clamp(0.5, 1.5)),
        Direction::Rotate => Transform::Rotate(distance * 0.1),
    }
}

/// Scroll progress in `[0, 1]`. A document no taller than the viewport
/// reports zero progress rather than dividing by zero.
pub fn progress_ratio(scroll_y: f32, scroll_height: f32, viewport_h: f32) -> f32 {
    let range = scroll_height - viewport_h;
    if range <= 0.0 {
        return 0.0;
    }
    clamp01(scroll_y / range)
}

/// Wave bobbing offset, bounded by the amplitude.
pub fn wave_offset(scroll_y: f32, doc_top: f32, amplitude: f32, frequency: f32) -> f32 {
    ((scroll_y + doc_top) * frequency).sin() * amplitude
}

/// Depth-of-field blur for background layer `layer` (0-based).
pub fn layer_blur(scroll_y: f32, layer: usize) -> f32 {
    let depth = (layer + 1) as f32;
    (scroll_y / 1000.0 * depth).max(0.0)
}

/// Hue shift for a section, growing to 30 degrees as its top edge
/// reaches the viewport top.
pub fn section_hue(client_top: f32, viewport_h: f32) -> f32 {
    clamp01(1.0 - client_top / viewport_h) * 30.0
}

/// Pointer parallax shift for target `index` (0-based), given the
/// pointer position normalized to `[-0.5, 0.5]` on each axis.
pub fn pointer_shift(
    norm_x: f32,
    norm_y: f32,
    index: usize,
    intensity_step: f32,
    travel_px: f32,
) -> (f32, f32) {
    let intensity = (index + 1) as f32 * intensity_step;
    (norm_x * intensity * travel_px, norm_y * intensity * travel_px)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_offset_proportional() {
        // Layer i moves at -(s * (i + 1) * 0.15) for any offset
        for s in [0.0_f32, 1.0, 250.0, 10_000.0] {
            for i in 0..3usize {
                let speed = (i + 1) as f32 * 0.15;
                assert_eq!(background_offset(s, speed), -(s * speed));
            }
        }
    }

    #[test]
    fn test_scale_clamped_for_any_distance() {
        for scroll_y in [0.0_f32, 100.0, 5_000.0, 1_000_000.0] {
            let t = custom_transform(scroll_y, 3.0, Direction::Scale);
            match t {
                Transform::Scale(s) => assert!((0.5..=1.5).contains(&s), "scale {s} out of range"),
                other => panic!("expected scale, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_custom_directions() {
        assert_eq!(
            custom_transform(100.0, 0.5, Direction::Up),
            Transform::TranslateY(-50.0)
        );
        assert_eq!(
            custom_transform(100.0, 0.5, Direction::Down),
            Transform::TranslateY(50.0)
        );
        assert_eq!(
            custom_transform(100.0, 0.5, Direction::Left),
            Transform::TranslateX(-50.0)
        );
        assert_eq!(
            custom_transform(100.0, 0.5, Direction::Right),
            Transform::TranslateX(50.0)
        );
        assert_eq!(
            custom_transform(100.0, 0.5, Direction::Rotate),
            Transform::Rotate(5.0)
        );
    }

    #[test]
    fn test_progress_bounds() {
        assert_eq!(progress_ratio(0.0, 3000.0, 800.0), 0.0);
        assert_eq!(progress_ratio(1100.0, 3000.0, 800.0), 0.5);
        assert_eq!(progress_ratio(2200.0, 3000.0, 800.0), 1.0);
        // Past the end stays clamped
        assert_eq!(progress_ratio(9999.0, 3000.0, 800.0), 1.0);
    }

    #[test]
    fn test_progress_degenerate_document() {
        // Document exactly viewport height: zero, not NaN
        let p = progress_ratio(50.0, 800.0, 800.0);
        assert_eq!(p, 0.0);
        assert!(!progress_ratio(50.0, 400.0, 800.0).is_nan());
    }

    #[test]
    fn test_section_opacity_range() {
        for top in [-5000.0_f32, -100.0, 0.0, 400.0, 800.0, 5000.0] {
            let o = section_opacity(top, 800.0);
            assert!((0.9..=1.0).contains(&o), "opacity {o} out of range at top {top}");
        }
        // Peak opacity when the top edge sits at viewport center
        assert_eq!(section_opacity(400.0, 800.0), 1.0);
    }

    #[test]
    fn test_visibility_band() {
        let viewport_h = 800.0;
        assert!(vertically_visible(&Rect::new(0.0, 100.0, 10.0, 200.0), viewport_h));
        // Straddling the top edge still counts
        assert!(vertically_visible(&Rect::new(0.0, -150.0, 10.0, 200.0), viewport_h));
        // Entirely above or below does not
        assert!(!vertically_visible(&Rect::new(0.0, -500.0, 10.0, 200.0), viewport_h));
        assert!(!vertically_visible(&Rect::new(0.0, 900.0, 10.0, 200.0), viewport_h));
    }

    #[test]
    fn test_wave_bounded_by_amplitude() {
        for s in [0.0_f32, 123.0, 4567.0] {
            let w = wave_offset(s, 640.0, 10.0, 0.01);
            assert!(w.abs() <= 10.0 + f32::EPSILON);
        }
    }

    #[test]
    fn test_layer_blur_grows_with_depth() {
        assert_eq!(layer_blur(0.0, 0), 0.0);
        assert_eq!(layer_blur(1000.0, 0), 1.0);
        assert_eq!(layer_blur(1000.0, 2), 3.0);
    }

    #[test]
    fn test_hue_clamped() {
        assert_eq!(section_hue(800.0, 800.0), 0.0);
        assert_eq!(section_hue(0.0, 800.0), 30.0);
        // Above the viewport top saturates at 30
        assert_eq!(section_hue(-400.0, 800.0), 30.0);
    }

    #[test]
    fn test_pointer_shift_scales_with_index() {
        let (x0, y0) = pointer_shift(0.5, -0.5, 0, 0.02, 100.0);
        let (x1, y1) = pointer_shift(0.5, -0.5, 1, 0.02, 100.0);
        assert_eq!((x0, y0), (1.0, -1.0));
        assert_eq!((x1, y1), (2.0, -2.0));
    }
}
