//! Timing curves for transitions.

use serde::{Deserialize, Serialize};

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 24;
const EPSILON: f32 = 1e-6;

/// A cubic bezier timing curve through (0, 0) and (1, 1), as used by css transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    /// `ease-out`
    pub const EASE_OUT: CubicBezier = CubicBezier::new(0., 0., 0.58, 1.);

    /// Soft deceleration used by scroll reveals.
    pub const REVEAL: CubicBezier = CubicBezier::new(0.21, 0.47, 0.32, 0.98);

    pub const LINEAR: CubicBezier = CubicBezier::new(0., 0., 1., 1.);

    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Eased progress for linear progress `t`, both in `0..=1`.
    pub fn apply(&self, t: f32) -> f32 {
        if t <= 0. {
            return 0.;
        }
        if t >= 1. {
            return 1.;
        }

        let s = self.solve_x(t);
        sample(self.y1, self.y2, s)
    }

    // finds the curve parameter whose x equals `x`
    fn solve_x(&self, x: f32) -> f32 {
        let mut s = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = sample(self.x1, self.x2, s) - x;
            if err.abs() < EPSILON {
                return s;
            }
            let d = derivative(self.x1, self.x2, s);
            if d.abs() < EPSILON {
                break;
            }
            s -= err / d;
        }

        let (mut lo, mut hi) = (0., 1.);
        s = x;
        for _ in 0..BISECTION_ITERATIONS {
            let v = sample(self.x1, self.x2, s);
            if (v - x).abs() < EPSILON {
                break;
            }
            if v < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.;
        }
        s
    }
}

fn sample(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1. - s;
    3. * inv * inv * s * p1 + 3. * inv * s * s * p2 + s * s * s
}

fn derivative(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1. - s;
    3. * inv * inv * p1 + 6. * inv * s * (p2 - p1) + 3. * s * s * (1. - p2)
}
