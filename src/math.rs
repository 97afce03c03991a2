use std::f32::consts::PI;

use glam::{Mat3A, Vec3A};

/// Wraps `val` into `[-minmax, minmax)`
#[must_use]
pub fn wrap_normalize_float(val: f32, minmax: f32) -> f32 {
    let result = (val + minmax).rem_euclid(minmax * 2.0);
    result - minmax
}

/// Yaw/pitch/roll angles in radians
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Angle {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Angle {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self { yaw, pitch, roll }
    }

    /// Yaw and pitch that point along `forward`, roll is always zero
    #[must_use]
    pub fn from_vec(forward: Vec3A) -> Self {
        let (yaw, pitch) = if forward.x == 0.0 && forward.y == 0.0 {
            let pitch = if forward.z > 0.0 {
                PI / 2.0
            } else if forward.z < 0.0 {
                -PI / 2.0
            } else {
                0.0
            };
            (0.0, pitch)
        } else {
            let dist_2d = forward.x.hypot(forward.y);
            (forward.y.atan2(forward.x), forward.z.atan2(dist_2d))
        };

        Self::new(yaw, pitch, 0.0)
    }

    #[must_use]
    pub fn to_rot_mat(self) -> Mat3A {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        let (sr, cr) = self.roll.sin_cos();

        Mat3A::from_cols(
            Vec3A::new(cp * cy, cp * sy, sp),
            Vec3A::new(cy * sp * sr - cr * sy, sy * sp * sr + cr * cy, -cp * sr),
            Vec3A::new(-cr * cy * sp - sr * sy, -cr * sy * sp + sr * cy, cp * cr),
        )
    }

    #[must_use]
    pub fn get_forward_vector(self) -> Vec3A {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3A::new(cp * cy, cp * sy, sp)
    }

    /// Wraps every component into `[-PI, PI)`
    pub fn normalize_fix(&mut self) {
        self.yaw = wrap_normalize_float(self.yaw, PI);
        self.pitch = wrap_normalize_float(self.pitch, PI);
        self.roll = wrap_normalize_float(self.roll, PI);
    }
}

impl std::ops::Sub for Angle {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.yaw - rhs.yaw, self.pitch - rhs.pitch, self.roll - rhs.roll)
    }
}

/// Roll of a rotation matrix around its own forward axis, in `[-PI, PI]`
#[must_use]
pub fn get_roll(rot_mat: Mat3A) -> f32 {
    let forward = rot_mat.x_axis;
    let flat_right = Vec3A::new(-forward.y, forward.x, 0.0);
    if flat_right.length_squared() < f32::EPSILON {
        return 0.0;
    }

    let flat_right = flat_right.normalize();
    let flat_up = forward.cross(flat_right);
    let right = rot_mat.y_axis;
    (-right.dot(flat_up)).atan2(right.dot(flat_right))
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use glam::{Mat3A, Vec3A};

    use super::{Angle, get_roll, wrap_normalize_float};

    #[test]
    fn wraps_into_range() {
        assert!((wrap_normalize_float(3.0 * PI / 2.0, PI) + PI / 2.0).abs() < 1e-5);
        assert!((wrap_normalize_float(-3.0 * PI / 2.0, PI) - PI / 2.0).abs() < 1e-5);
        assert_eq!(wrap_normalize_float(0.5, PI), 0.5);
    }

    #[test]
    fn forward_vector_round_trip() {
        let dir = Vec3A::new(1.0, 1.0, 0.5).normalize();
        let angle = Angle::from_vec(dir);
        assert!((angle.yaw - FRAC_PI_4).abs() < 1e-5);
        assert!(angle.get_forward_vector().abs_diff_eq(dir, 1e-5));
        assert!(angle.to_rot_mat().x_axis.abs_diff_eq(dir, 1e-5));
    }

    #[test]
    fn rot_mat_is_orthonormal() {
        let rot = Angle::new(1.0, -0.4, 2.2).to_rot_mat();
        assert!((rot.determinant() - 1.0).abs() < 1e-5);
        assert!(rot.x_axis.cross(rot.y_axis).abs_diff_eq(rot.z_axis, 1e-5));
    }

    #[test]
    fn roll_of_upside_down_car() {
        assert!(get_roll(Mat3A::IDENTITY).abs() < 1e-5);
        let rolled = Angle::new(0.3, 0.0, FRAC_PI_2).to_rot_mat();
        assert!((get_roll(rolled).abs() - FRAC_PI_2).abs() < 1e-4);
        let flipped = Angle::new(0.0, 0.0, PI - 0.01).to_rot_mat();
        assert!(get_roll(flipped).abs() > 3.0);
    }
}
