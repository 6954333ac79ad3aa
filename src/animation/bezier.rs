use glam::Vec3;

/// Cubic Bezier curve through four fixed control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Vec3,
    pub p1: Vec3,
    pub p2: Vec3,
    pub p3: Vec3,
}

impl CubicBezier {
    #[must_use]
    pub fn new(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// `B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3`
    ///
    /// Exact at the ends: `evaluate(0.0) == p0` and `evaluate(1.0) == p3`.
    #[must_use]
    pub fn evaluate(&self, t: f32) -> Vec3 {
        let u = 1.0 - t;
        let u2 = u * u;
        let t2 = t * t;

        self.p0 * (u2 * u) + self.p1 * (3.0 * u2 * t) + self.p2 * (3.0 * u * t2) + self.p3 * (t2 * t)
    }
}
