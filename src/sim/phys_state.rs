use std::fmt::Display;

use glam::{Mat3A, Vec3A};

/// Default is not implemented for this struct,
/// because the initial start height of the ball/car is different.
/// The correct values are set in `BallState::default()` and `CarState::default()`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysState {
    pub pos: Vec3A,
    pub rot_mat: Mat3A,
    pub vel: Vec3A,
    pub ang_vel: Vec3A,
}

impl PhysState {
    pub(crate) const fn at_rest(pos: Vec3A) -> Self {
        Self {
            pos,
            rot_mat: Mat3A::IDENTITY,
            vel: Vec3A::ZERO,
            ang_vel: Vec3A::ZERO,
        }
    }

    /// Mirror this state onto the other half of the field
    #[must_use]
    pub fn get_inverted_y(mut self) -> Self {
        const INVERT_SCALE: Vec3A = Vec3A::new(-1.0, -1.0, 1.0);

        self.pos *= INVERT_SCALE;
        self.vel *= INVERT_SCALE;
        self.ang_vel *= INVERT_SCALE;

        for i in 0..3 {
            *self.rot_mat.col_mut(i) *= INVERT_SCALE;
        }

        self
    }

    #[must_use]
    pub const fn get_forward_dir(&self) -> Vec3A {
        self.rot_mat.x_axis
    }

    #[must_use]
    pub const fn get_right_dir(&self) -> Vec3A {
        self.rot_mat.y_axis
    }

    #[must_use]
    pub const fn get_up_dir(&self) -> Vec3A {
        self.rot_mat.z_axis
    }
}

impl Display for PhysState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "PhysState {{ pos: {}, vel: {}, ang_vel: {}, forward: {} }}",
            self.pos,
            self.vel,
            self.ang_vel,
            self.get_forward_dir()
        )
    }
}
