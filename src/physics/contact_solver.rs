use glam::Vec3A;

use crate::physics::{ManifoldPoint, RigidBody};

/// Error reduction used by `resolve_single_collision`
const ERP: f32 = 0.2;
/// Error reduction used by split-impulse penetration recovery
const ERP2: f32 = 0.8;
/// Approach speeds below this don't bounce
const RESTITUTION_VELOCITY_THRESHOLD: f32 = 10.0;
const MAX_COMBINED_FRICTION: f32 = 10.0;

#[derive(Clone, Copy, Debug)]
pub struct ContactSolverInfo {
    pub num_iterations: u32,
    /// Contacts are generated this far before shapes actually touch
    pub contact_margin: f32,
}

impl Default for ContactSolverInfo {
    fn default() -> Self {
        Self {
            num_iterations: 10,
            contact_margin: 2.0,
        }
    }
}

#[must_use]
pub fn combined_friction(body_a: &RigidBody, body_b: &RigidBody) -> f32 {
    (body_a.collision_object.friction * body_b.collision_object.friction)
        .clamp(-MAX_COMBINED_FRICTION, MAX_COMBINED_FRICTION)
}

#[must_use]
pub fn combined_restitution(body_a: &RigidBody, body_b: &RigidBody) -> f32 {
    body_a.collision_object.restitution * body_b.collision_object.restitution
}

/// Damped impulse that would cancel the relative velocity of two bodies along `normal`
#[must_use]
pub fn resolve_single_bilateral(
    body1: &RigidBody,
    pos1: Vec3A,
    body2: &RigidBody,
    pos2: Vec3A,
    normal: Vec3A,
) -> f32 {
    const CONTACT_DAMPING: f32 = -0.2;

    let rel_pos1 = pos1 - body1.collision_object.origin();
    let rel_pos2 = pos2 - body2.collision_object.origin();

    let vel1 = body1.get_velocity_in_local_point(rel_pos1);
    let vel2 = body2.get_velocity_in_local_point(rel_pos2);
    let rel_vel = normal.dot(vel1 - vel2);

    let jac_diag = body1.compute_impulse_denominator(pos1, normal)
        + body2.compute_impulse_denominator(pos2, normal);
    if jac_diag <= f32::EPSILON {
        return 0.0;
    }

    CONTACT_DAMPING * rel_vel / jac_diag
}

/// Non-negative impulse that pushes `body1` out of `body2` and cancels their approach speed
#[must_use]
pub fn resolve_single_collision(
    body1: &RigidBody,
    body2: &RigidBody,
    contact_position_world: Vec3A,
    contact_normal_on_b: Vec3A,
    time_step: f32,
    distance: f32,
) -> f32 {
    let rel_pos1 = contact_position_world - body1.collision_object.origin();
    let rel_pos2 = contact_position_world - body2.collision_object.origin();
    let vel1 = body1.get_velocity_in_local_point(rel_pos1);
    let vel2 = body2.get_velocity_in_local_point(rel_pos2);
    let rel_vel = contact_normal_on_b.dot(vel1 - vel2);

    let positional_error = ERP * -distance / time_step;
    let velocity_error = -rel_vel;

    let denom = body1.compute_impulse_denominator(contact_position_world, contact_normal_on_b)
        + body2.compute_impulse_denominator(contact_position_world, contact_normal_on_b);
    if denom <= f32::EPSILON {
        return 0.0;
    }

    ((positional_error + velocity_error) / denom).max(0.0)
}

/// Any unit vector perpendicular to `normal`
fn plane_space(normal: Vec3A) -> Vec3A {
    if normal.z.abs() > std::f32::consts::FRAC_1_SQRT_2 {
        let a = normal.y * normal.y + normal.z * normal.z;
        let k = 1.0 / a.sqrt();
        Vec3A::new(0.0, -normal.z * k, normal.y * k)
    } else {
        let a = normal.x * normal.x + normal.y * normal.y;
        let k = 1.0 / a.sqrt();
        Vec3A::new(-normal.y * k, normal.x * k, 0.0)
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct SolverContact {
    pub body_a: usize,
    pub body_b: usize,
    rel_pos_a: Vec3A,
    rel_pos_b: Vec3A,
    normal: Vec3A,
    friction: f32,
    target_normal_vel: f32,
    penetration: f32,
    normal_mass: f32,
    tangents: [Vec3A; 2],
    tangent_mass: [f32; 2],
    normal_impulse: f32,
    tangent_impulse: [f32; 2],
    push_impulse: f32,
}

fn effective_mass(
    body_a: &RigidBody,
    body_b: &RigidBody,
    pos_a: Vec3A,
    pos_b: Vec3A,
    dir: Vec3A,
) -> f32 {
    let denom = body_a.compute_impulse_denominator(pos_a, dir)
        + body_b.compute_impulse_denominator(pos_b, dir);
    if denom > f32::EPSILON { 1.0 / denom } else { 0.0 }
}

impl SolverContact {
    pub fn new(
        body_a_idx: usize,
        body_a: &RigidBody,
        body_b_idx: usize,
        body_b: &RigidBody,
        point: &ManifoldPoint,
        time_step: f32,
    ) -> Self {
        let pos_a = point.position_world_on_a;
        let pos_b = point.position_world_on_b;
        let rel_pos_a = pos_a - body_a.collision_object.origin();
        let rel_pos_b = pos_b - body_b.collision_object.origin();
        let normal = point.normal_world_on_b;

        let rel_vel = body_a.get_velocity_in_local_point(rel_pos_a)
            - body_b.get_velocity_in_local_point(rel_pos_b);
        let normal_vel = normal.dot(rel_vel);

        let mut target_normal_vel = if -normal_vel > RESTITUTION_VELOCITY_THRESHOLD {
            -normal_vel * point.combined_restitution
        } else {
            0.0
        };
        if point.distance_1 > 0.0 {
            // Not touching yet, only stop what would close the gap this step
            target_normal_vel -= point.distance_1 / time_step;
        }

        let tangent_vel = rel_vel - normal * normal_vel;
        let tangent_1 = if tangent_vel.length_squared() > f32::EPSILON {
            tangent_vel.normalize()
        } else {
            plane_space(normal)
        };
        let tangent_2 = normal.cross(tangent_1);

        Self {
            body_a: body_a_idx,
            body_b: body_b_idx,
            rel_pos_a,
            rel_pos_b,
            normal,
            friction: point.combined_friction,
            target_normal_vel,
            penetration: point.distance_1,
            normal_mass: effective_mass(body_a, body_b, pos_a, pos_b, normal),
            tangents: [tangent_1, tangent_2],
            tangent_mass: [
                effective_mass(body_a, body_b, pos_a, pos_b, tangent_1),
                effective_mass(body_a, body_b, pos_a, pos_b, tangent_2),
            ],
            normal_impulse: 0.0,
            tangent_impulse: [0.0; 2],
            push_impulse: 0.0,
        }
    }

    fn apply(
        body_a: &mut RigidBody,
        body_b: &mut RigidBody,
        impulse: Vec3A,
        rel_pos_a: Vec3A,
        rel_pos_b: Vec3A,
    ) {
        body_a.apply_impulse(impulse, rel_pos_a);
        body_b.apply_impulse(-impulse, rel_pos_b);
    }

    pub fn solve(&mut self, body_a: &mut RigidBody, body_b: &mut RigidBody) {
        let rel_vel = body_a.get_velocity_in_local_point(self.rel_pos_a)
            - body_b.get_velocity_in_local_point(self.rel_pos_b);

        let normal_vel = self.normal.dot(rel_vel);
        let delta = (self.target_normal_vel - normal_vel) * self.normal_mass;
        let old_impulse = self.normal_impulse;
        self.normal_impulse = (old_impulse + delta).max(0.0);
        let applied = self.normal_impulse - old_impulse;
        if applied != 0.0 {
            Self::apply(body_a, body_b, self.normal * applied, self.rel_pos_a, self.rel_pos_b);
        }

        let max_friction = self.friction * self.normal_impulse;
        for i in 0..2 {
            let tangent = self.tangents[i];
            let rel_vel = body_a.get_velocity_in_local_point(self.rel_pos_a)
                - body_b.get_velocity_in_local_point(self.rel_pos_b);
            let delta = -tangent.dot(rel_vel) * self.tangent_mass[i];
            let old_impulse = self.tangent_impulse[i];
            self.tangent_impulse[i] = (old_impulse + delta).clamp(-max_friction, max_friction);
            let applied = self.tangent_impulse[i] - old_impulse;
            if applied != 0.0 {
                Self::apply(body_a, body_b, tangent * applied, self.rel_pos_a, self.rel_pos_b);
            }
        }
    }

    pub fn solve_penetration(
        &mut self,
        body_a: &mut RigidBody,
        body_b: &mut RigidBody,
        time_step: f32,
    ) {
        if self.penetration >= 0.0 {
            return;
        }

        let push_vel = self.normal.dot(
            body_a.get_push_velocity_in_local_point(self.rel_pos_a)
                - body_b.get_push_velocity_in_local_point(self.rel_pos_b),
        );
        let target = -self.penetration * ERP2 / time_step;
        let delta = (target - push_vel) * self.normal_mass;
        let old_impulse = self.push_impulse;
        self.push_impulse = (old_impulse + delta).max(0.0);
        let applied = self.push_impulse - old_impulse;
        if applied != 0.0 {
            let impulse = self.normal * applied;
            body_a.apply_push_impulse(impulse, self.rel_pos_a);
            body_b.apply_push_impulse(-impulse, self.rel_pos_b);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{Affine3A, Vec3A};

    use super::{SolverContact, resolve_single_bilateral, resolve_single_collision};
    use crate::physics::{
        CollisionShapes, ManifoldPoint, RigidBody, RigidBodyConstructionInfo, SphereShape,
        StaticPlaneShape,
    };

    const TICK_TIME: f32 = 1.0 / 120.0;

    fn ball(z: f32, vel_z: f32) -> RigidBody {
        let shape = SphereShape::new(91.25);
        let mut info = RigidBodyConstructionInfo::new(30.0, CollisionShapes::Sphere(shape));
        info.local_inertia = shape.calculate_local_inertia(30.0);
        info.start_world_transform = Affine3A::from_translation(glam::Vec3::new(0.0, 0.0, z));
        let mut body = RigidBody::new(info);
        body.linear_velocity.z = vel_z;
        body
    }

    fn floor() -> RigidBody {
        RigidBody::new_static(
            CollisionShapes::StaticPlane(StaticPlaneShape::new(Vec3A::Z, 0.0)),
            0.6,
            0.3,
        )
    }

    #[test]
    fn bounce_uses_restitution() {
        let mut ball = ball(91.0, -1000.0);
        let mut floor = floor();
        let mut point =
            ManifoldPoint::new(Vec3A::new(0.0, 0.0, -0.25), Vec3A::ZERO, Vec3A::Z, -0.25);
        point.combined_restitution = 0.6;
        point.combined_friction = 0.5;

        let mut contact = SolverContact::new(0, &ball, 1, &floor, &point, 1.0 / 120.0);
        for _ in 0..10 {
            contact.solve(&mut ball, &mut floor);
        }

        assert!((ball.linear_velocity.z - 600.0).abs() < 1e-2);
        assert_eq!(floor.linear_velocity, Vec3A::ZERO);
    }

    #[test]
    fn penetration_uses_push_velocity_only() {
        let mut ball = ball(90.0, 0.0);
        let mut floor = floor();
        let point = ManifoldPoint::new(Vec3A::new(0.0, 0.0, -1.25), Vec3A::ZERO, Vec3A::Z, -1.25);

        let mut contact = SolverContact::new(0, &ball, 1, &floor, &point, 1.0 / 120.0);
        contact.solve_penetration(&mut ball, &mut floor, 1.0 / 120.0);

        assert_eq!(ball.linear_velocity, Vec3A::ZERO);
        assert!(ball.push_velocity.z > 0.0);
    }

    #[test]
    fn collision_impulse_is_never_negative() {
        let separating = ball(90.0, 500.0);
        let impulse =
            resolve_single_collision(&separating, &floor(), Vec3A::ZERO, Vec3A::Z, TICK_TIME, 0.0);
        assert_eq!(impulse, 0.0);

        let approaching = ball(90.0, -500.0);
        let impulse =
            resolve_single_collision(&approaching, &floor(), Vec3A::ZERO, Vec3A::Z, TICK_TIME, 0.0);
        assert!((impulse - 500.0 * 30.0).abs() < 1.0);
    }

    #[test]
    fn bilateral_opposes_sliding() {
        let mut sliding = ball(90.0, 0.0);
        sliding.linear_velocity.x = 100.0;
        let pos = sliding.collision_object.origin();
        let impulse = resolve_single_bilateral(&sliding, pos, &floor(), pos, Vec3A::X);
        assert!((impulse + 0.2 * 100.0 * 30.0).abs() < 1e-2);
    }
}
