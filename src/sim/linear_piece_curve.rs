/// A continuous piecewise-linear function defined by sorted `(x, y)` points
///
/// Inputs before the first point or after the last point are clamped to that point's output.
#[derive(Clone, Copy, Debug)]
pub struct LinearPieceCurve<const N: usize> {
    points: [(f32, f32); N],
}

impl<const N: usize> LinearPieceCurve<N> {
    #[must_use]
    pub const fn new(points: [(f32, f32); N]) -> Self {
        assert!(N != 0, "a curve needs at least one point");

        let mut i = 1;
        while i < N {
            assert!(points[i - 1].0 < points[i].0, "curve points must be sorted by x");
            i += 1;
        }

        Self { points }
    }

    #[must_use]
    pub fn get_output(&self, input: f32) -> f32 {
        let (first_x, first_y) = self.points[0];
        if input <= first_x {
            return first_y;
        }

        let Some(upper) = self.points.iter().position(|&(x, _)| x > input) else {
            return self.points[N - 1].1;
        };

        let (base_x, base_y) = self.points[upper - 1];
        let (max_x, max_y) = self.points[upper];
        let interp_frac = (input - base_x) / (max_x - base_x);
        (max_y - base_y) * interp_frac + base_y
    }
}

#[cfg(test)]
mod tests {
    use super::LinearPieceCurve;

    const CURVE: LinearPieceCurve<3> =
        LinearPieceCurve::new([(0.0, 1.0), (1400.0, 0.1), (1410.0, 0.0)]);

    #[test]
    fn clamps_outside_range() {
        assert_eq!(CURVE.get_output(-50.0), 1.0);
        assert_eq!(CURVE.get_output(5000.0), 0.0);
    }

    #[test]
    fn interpolates_between_points() {
        assert!((CURVE.get_output(700.0) - 0.55).abs() < 1e-6);
        assert!((CURVE.get_output(1405.0) - 0.05).abs() < 1e-6);
        assert_eq!(CURVE.get_output(1400.0), 0.1);
    }
}
