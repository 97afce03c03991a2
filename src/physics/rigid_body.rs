use glam::{Affine3A, Mat3A, Vec3A};

use crate::physics::{CollisionFlags, CollisionObject, CollisionShapes, transform_util};

pub struct RigidBodyConstructionInfo {
    pub mass: f32,
    pub start_world_transform: Affine3A,
    pub collision_shape: CollisionShapes,
    pub local_inertia: Vec3A,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl RigidBodyConstructionInfo {
    #[must_use]
    pub const fn new(mass: f32, collision_shape: CollisionShapes) -> Self {
        Self {
            mass,
            start_world_transform: Affine3A::IDENTITY,
            collision_shape,
            local_inertia: Vec3A::ZERO,
            linear_damping: 0.0,
            angular_damping: 0.0,
            friction: 0.5,
            restitution: 0.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RigidBody {
    pub collision_object: CollisionObject,
    pub inv_inertia_tensor_world: Mat3A,
    pub linear_velocity: Vec3A,
    pub angular_velocity: Vec3A,
    pub inverse_mass: f32,
    pub inv_inertia_local: Vec3A,
    pub gravity: Vec3A,
    pub total_force: Vec3A,
    pub total_torque: Vec3A,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Split-impulse velocities, only used to resolve penetration
    pub push_velocity: Vec3A,
    pub turn_velocity: Vec3A,
}

impl RigidBody {
    #[must_use]
    pub fn new(info: RigidBodyConstructionInfo) -> Self {
        let mut collision_object = CollisionObject::new(info.collision_shape);
        collision_object.set_world_transform(info.start_world_transform);
        collision_object.friction = info.friction;
        collision_object.restitution = info.restitution;

        let inverse_mass = if info.mass == 0.0 {
            collision_object.collision_flags |= CollisionFlags::StaticObject as u8;
            0.0
        } else {
            collision_object.collision_flags &= !(CollisionFlags::StaticObject as u8);
            1.0 / info.mass
        };

        let inv_inertia_local = Vec3A::select(
            info.local_inertia.cmpeq(Vec3A::ZERO),
            Vec3A::ZERO,
            1.0 / info.local_inertia,
        );

        let inv_inertia_tensor_world = Self::get_inertia_tensor(
            collision_object.get_world_transform().matrix3,
            inv_inertia_local,
        );

        Self {
            collision_object,
            inv_inertia_tensor_world,
            linear_velocity: Vec3A::ZERO,
            angular_velocity: Vec3A::ZERO,
            inverse_mass,
            inv_inertia_local,
            gravity: Vec3A::ZERO,
            total_force: Vec3A::ZERO,
            total_torque: Vec3A::ZERO,
            linear_damping: info.linear_damping.clamp(0.0, 1.0),
            angular_damping: info.angular_damping.clamp(0.0, 1.0),
            push_velocity: Vec3A::ZERO,
            turn_velocity: Vec3A::ZERO,
        }
    }

    /// A massless body that never moves
    #[must_use]
    pub fn new_static(collision_shape: CollisionShapes, friction: f32, restitution: f32) -> Self {
        let mut info = RigidBodyConstructionInfo::new(0.0, collision_shape);
        info.friction = friction;
        info.restitution = restitution;
        Self::new(info)
    }

    #[inline]
    #[must_use]
    pub fn mass(&self) -> f32 {
        if self.inverse_mass == 0.0 {
            0.0
        } else {
            1.0 / self.inverse_mass
        }
    }

    #[inline]
    #[must_use]
    pub fn is_static_object(&self) -> bool {
        self.collision_object.is_static_object()
    }

    pub fn set_gravity(&mut self, acceleration: Vec3A) {
        if self.inverse_mass != 0.0 {
            self.gravity = acceleration * self.mass();
        }
    }

    fn get_inertia_tensor(world_mat: Mat3A, inv_inertia_local: Vec3A) -> Mat3A {
        let mut scaled_mat = world_mat.transpose();
        scaled_mat.x_axis *= inv_inertia_local;
        scaled_mat.y_axis *= inv_inertia_local;
        scaled_mat.z_axis *= inv_inertia_local;

        world_mat * scaled_mat
    }

    pub fn update_inertia_tensor(&mut self) {
        self.inv_inertia_tensor_world = Self::get_inertia_tensor(
            self.collision_object.get_world_transform().matrix3,
            self.inv_inertia_local,
        );
    }

    /// Teleport the body, keeping velocities
    pub fn set_center_of_mass_transform(&mut self, trans: Affine3A) {
        self.collision_object.set_world_transform(trans);
        self.update_inertia_tensor();
    }

    /// Inverse of the world inverse-inertia tensor
    ///
    /// Converts a desired angular acceleration into torque
    #[must_use]
    pub fn world_inertia_tensor(&self) -> Mat3A {
        let local_inertia = Vec3A::select(
            self.inv_inertia_local.cmpeq(Vec3A::ZERO),
            Vec3A::ZERO,
            1.0 / self.inv_inertia_local,
        );
        Self::get_inertia_tensor(
            self.collision_object.get_world_transform().matrix3,
            local_inertia,
        )
    }

    #[inline]
    #[must_use]
    pub fn get_velocity_in_local_point(&self, rel_pos: Vec3A) -> Vec3A {
        self.linear_velocity + self.angular_velocity.cross(rel_pos)
    }

    #[inline]
    #[must_use]
    pub fn get_push_velocity_in_local_point(&self, rel_pos: Vec3A) -> Vec3A {
        self.push_velocity + self.turn_velocity.cross(rel_pos)
    }

    /// Speed along the body's local forward axis
    #[inline]
    #[must_use]
    pub fn get_forward_speed(&self) -> f32 {
        self.linear_velocity
            .dot(self.collision_object.get_world_transform().matrix3.x_axis)
    }

    #[must_use]
    pub fn compute_impulse_denominator(&self, pos: Vec3A, normal: Vec3A) -> f32 {
        let r0 = pos - self.collision_object.origin();
        let c0 = r0.cross(normal);
        let vec = (self.inv_inertia_tensor_world * c0).cross(r0);
        self.inverse_mass + normal.dot(vec)
    }

    #[inline]
    pub fn apply_central_force(&mut self, force: Vec3A) {
        self.total_force += force;
    }

    #[inline]
    pub fn apply_torque(&mut self, torque: Vec3A) {
        self.total_torque += torque;
    }

    #[inline]
    pub fn apply_central_impulse(&mut self, impulse: Vec3A) {
        self.linear_velocity += impulse * self.inverse_mass;
    }

    #[inline]
    pub fn apply_torque_impulse(&mut self, torque: Vec3A) {
        self.angular_velocity += self.inv_inertia_tensor_world * torque;
    }

    #[inline]
    pub fn apply_impulse(&mut self, impulse: Vec3A, rel_pos: Vec3A) {
        if self.inverse_mass != 0.0 {
            self.apply_central_impulse(impulse);
            self.apply_torque_impulse(rel_pos.cross(impulse));
        }
    }

    #[inline]
    pub(crate) fn apply_push_impulse(&mut self, impulse: Vec3A, rel_pos: Vec3A) {
        if self.inverse_mass != 0.0 {
            self.push_velocity += impulse * self.inverse_mass;
            self.turn_velocity += self.inv_inertia_tensor_world * rel_pos.cross(impulse);
        }
    }

    #[inline]
    pub fn clear_forces(&mut self) {
        self.total_force = Vec3A::ZERO;
        self.total_torque = Vec3A::ZERO;
    }

    pub(crate) fn integrate_velocities(&mut self, step: f32) {
        if self.is_static_object() {
            return;
        }

        self.linear_velocity += (self.total_force + self.gravity) * (self.inverse_mass * step);
        self.angular_velocity += self.inv_inertia_tensor_world * self.total_torque * step;
    }

    pub(crate) fn apply_damping(&mut self, time_step: f32) {
        if self.linear_damping != 0.0 {
            self.linear_velocity *= (1.0 - self.linear_damping).powf(time_step);
        }

        if self.angular_damping != 0.0 {
            self.angular_velocity *= (1.0 - self.angular_damping).powf(time_step);
        }
    }

    pub(crate) fn integrate_transform(&mut self, time_step: f32) {
        if self.is_static_object() {
            return;
        }

        let cur_trans = *self.collision_object.get_world_transform();
        let lin_vel = self.linear_velocity + self.push_velocity;
        let new_trans = if self.collision_object.no_rot {
            transform_util::integrate_transform_no_rot(&cur_trans, lin_vel, time_step)
        } else {
            transform_util::integrate_transform(
                &cur_trans,
                lin_vel,
                self.angular_velocity + self.turn_velocity,
                time_step,
            )
        };

        self.push_velocity = Vec3A::ZERO;
        self.turn_velocity = Vec3A::ZERO;
        self.set_center_of_mass_transform(new_trans);
    }
}

#[cfg(test)]
mod tests {
    use glam::{Affine3A, Quat, Vec3A};

    use super::{RigidBody, RigidBodyConstructionInfo};
    use crate::physics::{BoxShape, CollisionShapes};

    fn make_box() -> RigidBody {
        let shape = BoxShape::new(Vec3A::new(60.0, 40.0, 20.0), Vec3A::ZERO);
        let mut info = RigidBodyConstructionInfo::new(180.0, CollisionShapes::Box(shape));
        info.local_inertia = shape.calculate_local_inertia(180.0);
        info.start_world_transform =
            Affine3A::from_quat(Quat::from_euler(glam::EulerRot::ZYX, 0.7, 0.2, -0.4));
        RigidBody::new(info)
    }

    #[test]
    fn inertia_inverse_is_consistent() {
        let body = make_box();
        let product = body.world_inertia_tensor() * body.inv_inertia_tensor_world;
        assert!(product.abs_diff_eq(glam::Mat3A::IDENTITY, 1e-4));
    }

    #[test]
    fn impulse_at_center_has_no_spin() {
        let mut body = make_box();
        body.apply_impulse(Vec3A::new(0.0, 0.0, 180.0), Vec3A::ZERO);
        assert!(body.linear_velocity.abs_diff_eq(Vec3A::Z, 1e-6));
        assert_eq!(body.angular_velocity, Vec3A::ZERO);
    }

    #[test]
    fn static_body_ignores_impulses() {
        let mut body = RigidBody::new_static(
            CollisionShapes::StaticPlane(crate::physics::StaticPlaneShape::new(Vec3A::Z, 0.0)),
            0.6,
            0.3,
        );
        body.apply_impulse(Vec3A::splat(100.0), Vec3A::X);
        body.integrate_velocities(1.0 / 120.0);
        assert_eq!(body.linear_velocity, Vec3A::ZERO);
        assert!(body.is_static_object());
    }
}
