//! Viewport and panel geometry in CSS pixel coordinates.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Size of the drawing surface particles are clamped to.
///
/// A viewport with zero (or non-finite) area is "unmeasured": hosts report
/// it before layout has happened, and consumers defer work until it changes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when both sides are finite and strictly positive.
    pub fn is_measured(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Upper corner of the clamp box.
    pub fn max(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Clamps `p` into `[0, width] × [0, height]`.
    pub fn clamp(&self, p: DVec2) -> DVec2 {
        p.clamp(DVec2::ZERO, self.max().max(DVec2::ZERO))
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }
}

/// Axis-aligned bounding box of a panel, as reported by the host layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Inclusive hit test.
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.x && p.y >= self.y && p.x <= self.x + self.width && p.y <= self.y + self.height
    }

    /// Offset of `p` from the centre as a fraction of the size, each axis
    /// clamped to `[-limit, limit]`. A degenerate axis yields 0.
    pub fn normalized_offset(&self, p: DVec2, limit: f64) -> DVec2 {
        let axis = |coord: f64, origin: f64, size: f64| {
            if size.is_finite() && size > 0.0 && coord.is_finite() {
                ((coord - origin) / size - 0.5).clamp(-limit, limit)
            } else {
                0.0
            }
        };
        DVec2::new(
            axis(p.x, self.x, self.width),
            axis(p.y, self.y, self.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmeasured_viewports() {
        assert!(!Viewport::new(0.0, 800.0).is_measured());
        assert!(!Viewport::new(1000.0, 0.0).is_measured());
        assert!(!Viewport::new(f64::NAN, 10.0).is_measured());
        assert!(!Viewport::default().is_measured());
        assert!(Viewport::new(1000.0, 800.0).is_measured());
    }

    #[test]
    fn clamp_keeps_point_inside() {
        let vp = Viewport::new(100.0, 50.0);
        assert_eq!(vp.clamp(DVec2::new(-5.0, 60.0)), DVec2::new(0.0, 50.0));
        assert_eq!(vp.clamp(DVec2::new(20.0, 10.0)), DVec2::new(20.0, 10.0));
    }

    #[test]
    fn rect_center_and_contains() {
        let r = Rect::new(10.0, 20.0, 200.0, 100.0);
        assert_eq!(r.center(), DVec2::new(110.0, 70.0));
        assert!(r.contains(DVec2::new(10.0, 20.0)));
        assert!(r.contains(DVec2::new(210.0, 120.0)));
        assert!(!r.contains(DVec2::new(211.0, 70.0)));
    }

    #[test]
    fn normalized_offset_at_center_is_zero() {
        let r = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(r.normalized_offset(DVec2::new(100.0, 50.0), 0.5), DVec2::ZERO);
    }

    #[test]
    fn normalized_offset_at_corners() {
        let r = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert_eq!(r.normalized_offset(DVec2::new(0.0, 0.0), 0.5), DVec2::new(-0.5, -0.5));
        assert_eq!(r.normalized_offset(DVec2::new(200.0, 100.0), 0.5), DVec2::new(0.5, 0.5));
    }

    #[test]
    fn normalized_offset_is_clamped_outside_bounds() {
        let r = Rect::new(0.0, 0.0, 200.0, 100.0);
        let o = r.normalized_offset(DVec2::new(5000.0, -900.0), 0.5);
        assert_eq!(o, DVec2::new(0.5, -0.5));
    }

    #[test]
    fn normalized_offset_of_degenerate_rect_is_zero() {
        let r = Rect::new(0.0, 0.0, 0.0, 100.0);
        let o = r.normalized_offset(DVec2::new(50.0, 100.0), 0.5);
        assert_eq!(o, DVec2::new(0.0, 0.5));
    }
}
