//! Easing curves for timed steps

/// Easing curve applied to the progress of a timed step.
///
/// The default is [`Easing::EaseInOut`], which is what a timing step uses
/// unless told otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    /// CSS-style `cubic-bezier(x1, y1, x2, y2)`
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Map linear progress `t` onto the curve.
    ///
    /// Input is clamped to `0.0..=1.0`, and both endpoints map exactly onto
    /// themselves so a finished step lands on its target.
    pub fn apply(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match *self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (2.0 - 2.0 * t).powi(3) / 2.0
                }
            }
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => t * (2.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (2.0 - 2.0 * t).powi(2) / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => Bezier::new(x1, y1, x2, y2).solve(t),
        }
    }
}

/// Unit cubic bezier anchored at (0,0) and (1,1).
///
/// Evaluated in f64 so frame-to-frame samples don't jitter.
struct Bezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl Bezier {
    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1: x1 as f64,
            y1: y1 as f64,
            x2: x2 as f64,
            y2: y2 as f64,
        }
    }

    /// Find the curve parameter whose x equals `t` and return its y.
    fn solve(&self, t: f32) -> f32 {
        let x = t as f64;
        let p = self.param_for_x(x);
        coord(p, self.y1, self.y2) as f32
    }

    fn param_for_x(&self, x: f64) -> f64 {
        const TOLERANCE: f64 = 1e-7;

        // Newton first; it converges in a few rounds for sane control points
        let mut p = x;
        for _ in 0..8 {
            let err = coord(p, self.x1, self.x2) - x;
            if err.abs() < TOLERANCE {
                return p;
            }
            let slope = coord_slope(p, self.x1, self.x2);
            if slope.abs() < TOLERANCE {
                break;
            }
            p -= err / slope;
        }

        // Bisection when the slope goes flat
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        p = x;
        for _ in 0..24 {
            let sample = coord(p, self.x1, self.x2);
            if (sample - x).abs() < TOLERANCE {
                break;
            }
            if sample < x {
                lo = p;
            } else {
                hi = p;
            }
            p = 0.5 * (lo + hi);
        }
        p
    }
}

/// One axis of the bezier: 3(1-p)²p·c1 + 3(1-p)p²·c2 + p³
#[inline]
fn coord(p: f64, c1: f64, c2: f64) -> f64 {
    let a = 1.0 + 3.0 * c1 - 3.0 * c2;
    let b = 3.0 * c2 - 6.0 * c1;
    let c = 3.0 * c1;
    ((a * p + b) * p + c) * p
}

#[inline]
fn coord_slope(p: f64, c1: f64, c2: f64) -> f64 {
    let a = 1.0 + 3.0 * c1 - 3.0 * c2;
    let b = 3.0 * c2 - 6.0 * c1;
    let c = 3.0 * c1;
    (3.0 * a * p + 2.0 * b) * p + c
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 8] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::CubicBezier(0.42, 0.0, 0.58, 1.0),
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        for easing in ALL {
            assert_eq!(easing.apply(-0.5), 0.0);
            assert_eq!(easing.apply(1.5), 1.0);
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let e = Easing::EaseInOut;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_curves_are_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!(v + 1e-5 >= prev, "{easing:?} decreased at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_linear_bezier_matches_linear() {
        let e = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((e.apply(t) - t).abs() < 1e-4);
        }
    }

    #[test]
    fn test_default_is_ease_in_out() {
        assert_eq!(Easing::default(), Easing::EaseInOut);
    }
}
