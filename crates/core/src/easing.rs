//! Easing curves expressed as CSS-style cubic Béziers.

use serde::{Deserialize, Serialize};

/// Newton iterations before falling back to bisection.
const NEWTON_ITERATIONS: usize = 8;
/// Accept an x estimate once it is this close.
const SOLVE_EPSILON: f64 = 1e-7;

/// Unit cubic Bézier from (0,0) to (1,1) with control points (x1,y1), (x2,y2),
/// the same curve CSS `cubic-bezier()` describes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn sample(a1: f64, a2: f64, t: f64) -> f64 {
        // Bernstein form with P0 = 0, P3 = 1.
        let u = 1.0 - t;
        3.0 * u * u * t * a1 + 3.0 * u * t * t * a2 + t * t * t
    }

    fn slope(a1: f64, a2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * a1 + 6.0 * u * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    /// Curve parameter whose x coordinate equals `x`.
    fn solve_t(&self, x: f64) -> f64 {
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = Self::sample(self.x1, self.x2, t) - x;
            if err.abs() < SOLVE_EPSILON {
                return t;
            }
            let d = Self::slope(self.x1, self.x2, t);
            if d.abs() < 1e-6 {
                break;
            }
            t = (t - err / d).clamp(0.0, 1.0);
        }
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        while hi - lo > SOLVE_EPSILON {
            let sx = Self::sample(self.x1, self.x2, t);
            if (sx - x).abs() < SOLVE_EPSILON {
                break;
            }
            if sx < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) * 0.5;
        }
        t
    }

    /// Eased progress for linear progress `x`, clamped to [0, 1].
    pub fn apply(&self, x: f64) -> f64 {
        if !x.is_finite() || x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        Self::sample(self.y1, self.y2, self.solve_t(x))
    }
}

/// Named easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    pub fn curve(self) -> CubicBezier {
        match self {
            Easing::Linear => CubicBezier::new(0.0, 0.0, 1.0, 1.0),
            Easing::EaseIn => CubicBezier::new(0.42, 0.0, 1.0, 1.0),
            Easing::EaseOut => CubicBezier::new(0.0, 0.0, 0.58, 1.0),
            Easing::EaseInOut => CubicBezier::new(0.42, 0.0, 0.58, 1.0),
        }
    }

    pub fn apply(self, x: f64) -> f64 {
        match self {
            Easing::Linear => x.clamp(0.0, 1.0),
            other => other.curve().apply(x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        for e in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(e.apply(0.0), 0.0, "{e:?} at 0");
            assert_eq!(e.apply(1.0), 1.0, "{e:?} at 1");
        }
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(Easing::EaseInOut.apply(-3.0), 0.0);
        assert_eq!(Easing::EaseInOut.apply(7.0), 1.0);
        assert_eq!(Easing::EaseOut.apply(f64::NAN), 0.0);
    }

    #[test]
    fn ease_in_out_is_symmetric_about_midpoint() {
        let e = Easing::EaseInOut;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-5);
        for x in [0.1, 0.25, 0.4] {
            let sum = e.apply(x) + e.apply(1.0 - x);
            assert!((sum - 1.0).abs() < 1e-5, "asymmetric at {x}: {sum}");
        }
    }

    #[test]
    fn ease_in_starts_slow_and_ease_out_starts_fast() {
        assert!(Easing::EaseIn.apply(0.25) < 0.25);
        assert!(Easing::EaseOut.apply(0.25) > 0.25);
    }

    #[test]
    fn curves_are_monotonic() {
        for e in [Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = e.apply(i as f64 / 100.0);
                assert!(v + 1e-9 >= prev, "{e:?} decreased at {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn linear_bezier_is_identity() {
        let c = Easing::Linear.curve();
        for x in [0.1, 0.33, 0.8] {
            assert!((c.apply(x) - x).abs() < 1e-6);
        }
    }
}
