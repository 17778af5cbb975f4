use crate::geometry::Point;

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 64;
const EPSILON: f64 = 1e-12;
const MIN_SLOPE: f64 = 1e-9;

/// Cubic Bézier timing curve with fixed endpoints (0, 0) and (1, 1).
///
/// Control point x coordinates are clamped to `[0, 1]`, which keeps x(t)
/// monotonic so every progress value maps to exactly one curve parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    first: Point,
    second: Point,
}

impl CubicBezier {
    pub fn new(first: Point, second: Point) -> Self {
        Self {
            first: Point::new(first.x.clamp(0.0, 1.0), first.y),
            second: Point::new(second.x.clamp(0.0, 1.0), second.y),
        }
    }

    pub fn linear() -> Self {
        Self::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0))
    }

    pub fn first(&self) -> Point {
        self.first
    }

    pub fn second(&self) -> Point {
        self.second
    }

    /// Maps linear progress in `[0, 1]` to eased progress.
    pub fn ease(&self, progress: f64) -> f64 {
        if progress <= 0.0 {
            return 0.0;
        }
        if progress >= 1.0 {
            return 1.0;
        }
        let t = self.solve_parameter(progress);
        sample(t, self.first.y, self.second.y)
    }

    /// Finds t with x(t) == x. Newton first, bisection when Newton stalls.
    fn solve_parameter(&self, x: f64) -> f64 {
        let (x1, x2) = (self.first.x, self.second.x);

        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let error = sample(t, x1, x2) - x;
            if error.abs() < EPSILON {
                if (0.0..=1.0).contains(&t) {
                    return t;
                }
                break;
            }
            let slope = derivative(t, x1, x2);
            if slope.abs() < MIN_SLOPE {
                break;
            }
            t -= error / slope;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..BISECTION_ITERATIONS {
            let value = sample(t, x1, x2);
            if (value - x).abs() < EPSILON {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::new(Point::new(0.5, 0.0), Point::new(0.5, 1.0))
    }
}

fn sample(t: f64, p1: f64, p2: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

fn derivative(t: f64, p1: f64, p2: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}
