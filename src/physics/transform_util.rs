use glam::{Affine3A, Mat3A, Quat, Vec3A};
use std::f32::consts::FRAC_PI_4;

const ANGULAR_MOTION_THRESHOLD: f32 = FRAC_PI_4;

pub fn integrate_transform_no_rot(
    cur_trans: &Affine3A,
    lin_vel: Vec3A,
    time_step: f32,
) -> Affine3A {
    Affine3A {
        matrix3: cur_trans.matrix3,
        translation: cur_trans.translation + lin_vel * time_step,
    }
}

/// Exponential-map orientation update, with the rotation per step capped at a quarter turn
pub fn integrate_transform(
    cur_trans: &Affine3A,
    lin_vel: Vec3A,
    ang_vel: Vec3A,
    time_step: f32,
) -> Affine3A {
    let translation = cur_trans.translation + lin_vel * time_step;

    let ang_speed = ang_vel.length();
    let mut angle = ang_speed;
    if angle * time_step > ANGULAR_MOTION_THRESHOLD {
        angle = ANGULAR_MOTION_THRESHOLD / time_step;
    }

    if angle == 0.0 {
        return Affine3A {
            matrix3: cur_trans.matrix3,
            translation,
        };
    }

    let axis = if angle < 0.001 {
        // Taylor expansion of sin(x/2)/x
        ang_vel
            * (0.5 * time_step - time_step * time_step * time_step * 0.020_833_334 * angle * angle)
    } else {
        ang_vel * ((0.5 * angle * time_step).sin() / ang_speed)
    };

    let dorn = Quat::from_xyzw(axis.x, axis.y, axis.z, (angle * time_step * 0.5).cos());
    let orn0 = Quat::from_mat3a(&cur_trans.matrix3);
    let predicted_orn = (dorn * orn0).normalize();

    Affine3A {
        matrix3: Mat3A::from_quat(predicted_orn),
        translation,
    }
}

#[cfg(test)]
mod tests {
    use glam::{Affine3A, Vec3A};
    use std::f32::consts::FRAC_PI_4;

    use super::integrate_transform;

    #[test]
    fn quarter_turn_about_z() {
        let trans = integrate_transform(
            &Affine3A::IDENTITY,
            Vec3A::new(10.0, 0.0, 0.0),
            Vec3A::new(0.0, 0.0, FRAC_PI_4),
            1.0,
        );

        assert!(trans.translation.abs_diff_eq(Vec3A::new(10.0, 0.0, 0.0), 1e-5));
        let expected_forward = Vec3A::new(FRAC_PI_4.cos(), FRAC_PI_4.sin(), 0.0);
        assert!(trans.matrix3.x_axis.abs_diff_eq(expected_forward, 1e-5));
    }

    #[test]
    fn rotation_is_capped() {
        let trans = integrate_transform(
            &Affine3A::IDENTITY,
            Vec3A::ZERO,
            Vec3A::new(0.0, 0.0, 100.0),
            1.0,
        );
        let angle = trans.matrix3.x_axis.y.atan2(trans.matrix3.x_axis.x);
        assert!((angle - FRAC_PI_4).abs() < 1e-4);
    }
}
