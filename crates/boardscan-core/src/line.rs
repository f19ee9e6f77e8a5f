use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A line in polar (Hesse normal) form: every point `(x, y)` on the line
/// satisfies `x cos(theta) + y sin(theta) = rho`.
///
/// `theta` is expected in `[0, pi)`; `rho` may be negative for lines on the
/// far side of the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolarLine {
    pub rho: f32,
    pub theta: f32,
}

impl PolarLine {
    pub fn new(rho: f32, theta: f32) -> Self {
        Self { rho, theta }
    }

    /// Intersection with another polar line.
    ///
    /// Solves the 2x2 system formed by the two line equations. Returns
    /// `None` when the lines are (near-)parallel: the determinant equals
    /// `sin(theta_other - theta_self)`, and anything below the guard is
    /// treated as singular rather than producing a huge unstable point.
    pub fn intersect(&self, other: &PolarLine) -> Option<Point2<f32>> {
        let (s1, c1) = self.theta.sin_cos();
        let (s2, c2) = other.theta.sin_cos();

        let det = c1 * s2 - s1 * c2;
        if det.abs() < 1e-9 {
            return None;
        }

        let x = (self.rho * s2 - other.rho * s1) / det;
        let y = (c1 * other.rho - c2 * self.rho) / det;
        Some(Point2::new(x, y))
    }

    /// Signed distance from a point to the line.
    pub fn distance_to(&self, p: Point2<f32>) -> f32 {
        let (s, c) = self.theta.sin_cos();
        p.x * c + p.y * s - self.rho
    }
}
