//! Raycast vehicle: four suspension rays, spring/damper suspension and tire friction impulses.
//!
//! Every value in here is recomputed from the chassis body and the car state each tick,
//! so a vehicle carries nothing between ticks that a serialized [`CarState`](crate::CarState)
//! wouldn't restore.

use arrayvec::ArrayVec;
use glam::{Affine3A, Mat3A, Vec3A};

use crate::{
    CarConfig,
    physics::{
        CollisionFilterGroups, PhysicsEngine, RigidBody, resolve_single_bilateral,
        resolve_single_collision,
    },
    sim::{CollisionMasks, consts::vehicle as vehicle_consts},
};

pub(crate) const NUM_WHEELS: usize = 4;

const WHEEL_DIRECTION_CS: Vec3A = Vec3A::new(0.0, 0.0, -1.0);
const WHEEL_AXLE_CS: Vec3A = Vec3A::new(0.0, -1.0, 0.0);
/// Wheels pass through geometry only the ball collides with
const WHEEL_RAY_MASK: u8 = CollisionFilterGroups::All as u8
    & !(CollisionMasks::HoopsNet as u8 | CollisionMasks::DropshotTile as u8);

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct RaycastInfo {
    pub contact_normal_ws: Vec3A,
    pub contact_point_ws: Vec3A,
    pub suspension_length: f32,
    pub hard_point_ws: Vec3A,
    pub wheel_direction_ws: Vec3A,
    pub wheel_axle_ws: Vec3A,
    pub is_in_contact: bool,
    /// Engine handle of whatever the ray hit
    pub ground_object: Option<usize>,
}

#[derive(Clone, Debug)]
pub(crate) struct Wheel {
    pub raycast_info: RaycastInfo,
    pub world_transform: Affine3A,
    pub chassis_connection_point_cs: Vec3A,
    pub suspension_rest_length: f32,
    pub radius: f32,
    pub suspension_force_scale: f32,
    pub engine_force: f32,
    pub brake: f32,
    pub steer_angle: f32,
    pub lat_friction: f32,
    pub long_friction: f32,
    /// The ray hit static geometry rather than another car or the ball
    pub is_in_contact_with_world: bool,
    clipped_inv_contact_dot_suspension: f32,
    suspension_relative_velocity: f32,
    suspension_force: f32,
    impulse: Vec3A,
    extra_pushback: f32,
}

impl Wheel {
    fn new(
        connection_point_cs: Vec3A,
        suspension_rest_length: f32,
        radius: f32,
        force_scale: f32,
    ) -> Self {
        Self {
            raycast_info: RaycastInfo::default(),
            world_transform: Affine3A::IDENTITY,
            chassis_connection_point_cs: connection_point_cs,
            suspension_rest_length,
            radius,
            suspension_force_scale: force_scale,
            engine_force: 0.0,
            brake: 0.0,
            steer_angle: 0.0,
            lat_friction: 0.0,
            long_friction: 0.0,
            is_in_contact_with_world: false,
            clipped_inv_contact_dot_suspension: 0.0,
            suspension_relative_velocity: 0.0,
            suspension_force: 0.0,
            impulse: Vec3A::ZERO,
            extra_pushback: 0.0,
        }
    }

    fn update_wheel_transform_ws(&mut self, chassis_trans: &Affine3A) {
        self.is_in_contact_with_world = false;
        self.raycast_info.is_in_contact = false;
        self.raycast_info.ground_object = None;
        self.raycast_info.hard_point_ws =
            chassis_trans.transform_point3a(self.chassis_connection_point_cs);
        self.raycast_info.wheel_direction_ws = chassis_trans.matrix3 * WHEEL_DIRECTION_CS;
        self.raycast_info.wheel_axle_ws = chassis_trans.matrix3 * WHEEL_AXLE_CS;
    }

    fn update_wheel_transform(&mut self, chassis_trans: &Affine3A) {
        self.update_wheel_transform_ws(chassis_trans);
        let up = -self.raycast_info.wheel_direction_ws;
        let right = self.raycast_info.wheel_axle_ws;
        let fwd = up.cross(right).normalize();

        let steering_mat = Mat3A::from_axis_angle(up.into(), self.steer_angle);
        let basis = Mat3A::from_cols(fwd, -right, up);
        self.world_transform = Affine3A {
            matrix3: steering_mat * basis,
            translation: self.raycast_info.hard_point_ws
                + self.raycast_info.wheel_direction_ws * self.suspension_rest_length,
        };
    }

    fn set_no_contact(&mut self) {
        self.raycast_info.suspension_length =
            self.suspension_rest_length + vehicle_consts::MAX_SUSPENSION_TRAVEL;
        self.suspension_relative_velocity = 0.0;
        self.raycast_info.contact_normal_ws = -self.raycast_info.wheel_direction_ws;
        self.clipped_inv_contact_dot_suspension = 1.0;
        self.extra_pushback = 0.0;
    }

    fn ray_cast(&mut self, engine: &dyn PhysicsEngine, chassis_idx: usize, time_step: f32) {
        let chassis = engine.body(chassis_idx);
        let chassis_trans = *chassis.collision_object.get_world_transform();

        let suspension_travel = vehicle_consts::MAX_SUSPENSION_TRAVEL;
        let real_ray_length = self.suspension_rest_length + suspension_travel + self.radius
            - vehicle_consts::SUSPENSION_SUBTRACTION;

        let source = self.raycast_info.hard_point_ws;
        let target = source + self.raycast_info.wheel_direction_ws * real_ray_length;
        self.raycast_info.contact_point_ws = target;
        self.extra_pushback = 0.0;

        let Some(hit) = engine.ray_test(source, target, chassis_idx, WHEEL_RAY_MASK) else {
            self.set_no_contact();
            return;
        };

        self.raycast_info.contact_point_ws = hit.hit_point;
        self.raycast_info.contact_normal_ws = hit.hit_normal;
        self.raycast_info.is_in_contact = true;
        self.raycast_info.ground_object = Some(hit.body_idx);
        self.is_in_contact_with_world = hit.is_static;

        let up = chassis_trans.matrix3.z_axis;
        let wheel_trace_len = (self.raycast_info.hard_point_ws - hit.hit_point).dot(up);
        self.raycast_info.suspension_length = (wheel_trace_len - self.radius).clamp(
            self.suspension_rest_length - suspension_travel,
            self.suspension_rest_length + suspension_travel,
        );

        let rel_pos = hit.hit_point - chassis_trans.translation;
        let vel_at_contact_point = chassis.get_velocity_in_local_point(rel_pos);

        let proj_vel = hit.hit_normal.dot(vel_at_contact_point);
        let denom = hit.hit_normal.dot(up);
        if denom > 0.1 {
            let inv = 1.0 / denom;
            self.suspension_relative_velocity = proj_vel * inv;
            self.clipped_inv_contact_dot_suspension = inv;
        } else {
            self.suspension_relative_velocity = 0.0;
            self.clipped_inv_contact_dot_suspension = 10.0;
        }

        if self.is_in_contact_with_world {
            let ray_pushback_thresh =
                self.suspension_rest_length + self.radius - vehicle_consts::SUSPENSION_SUBTRACTION;
            if wheel_trace_len < ray_pushback_thresh {
                let collision_result = resolve_single_collision(
                    chassis,
                    engine.body(hit.body_idx),
                    hit.hit_point,
                    hit.hit_normal,
                    time_step,
                    wheel_trace_len - ray_pushback_thresh,
                );

                self.extra_pushback = collision_result / NUM_WHEELS as f32;
            }
        }
    }

    fn calc_friction_impulse(
        &mut self,
        chassis: &RigidBody,
        ground: &RigidBody,
        friction_scale: f32,
        time_step: f32,
    ) {
        let mut axle_dir = self.world_transform.matrix3.y_axis;
        let surf_normal_ws = self.raycast_info.contact_normal_ws;
        axle_dir -= surf_normal_ws * axle_dir.dot(surf_normal_ws);
        axle_dir = axle_dir.normalize_or_zero();

        let forward_dir = surf_normal_ws.cross(axle_dir).normalize_or_zero();
        let contact_point = self.raycast_info.contact_point_ws;

        let side_impulse =
            resolve_single_bilateral(chassis, contact_point, ground, contact_point, axle_dir);

        let rolling_friction = if self.engine_force != 0.0 {
            -self.engine_force / friction_scale
        } else if self.brake == 0.0 {
            0.0
        } else {
            let car_rel_contact_point = contact_point - chassis.collision_object.origin();
            let contact_vel = chassis.get_velocity_in_local_point(car_rel_contact_point)
                - ground.get_velocity_in_local_point(car_rel_contact_point);
            let mut rel_vel = contact_vel.dot(forward_dir);

            if time_step > 1.0 / 80.0 {
                let threshold = (0.8 - 1.0 / (time_step * 150.0)) * 50.0;
                if rel_vel.abs() < threshold {
                    rel_vel = 0.0;
                }
            }

            (-rel_vel * vehicle_consts::ROLLING_FRICTION_SCALE).clamp(-self.brake, self.brake)
        };

        let total_friction_force = forward_dir * rolling_friction * self.long_friction
            + axle_dir * side_impulse * self.lat_friction;
        self.impulse = total_friction_force * friction_scale;
    }

    fn update_suspension(&mut self, chassis: &mut RigidBody, time_step: f32) {
        if !self.raycast_info.is_in_contact {
            self.suspension_force = 0.0;
            return;
        }

        let force = (self.suspension_rest_length - self.raycast_info.suspension_length)
            * vehicle_consts::SUSPENSION_STIFFNESS
            * self.clipped_inv_contact_dot_suspension;
        let damping_vel_scale = if self.suspension_relative_velocity < 0.0 {
            vehicle_consts::WHEELS_DAMPING_COMPRESSION
        } else {
            vehicle_consts::WHEELS_DAMPING_RELAXATION
        };

        self.suspension_force = ((force - damping_vel_scale * self.suspension_relative_velocity)
            * self.suspension_force_scale)
            .max(0.0);

        if self.suspension_force == 0.0 {
            return;
        }

        let contact_point_offset =
            self.raycast_info.contact_point_ws - chassis.collision_object.origin();
        let base_force_scale = self.suspension_force * time_step + self.extra_pushback;
        chassis.apply_impulse(
            self.raycast_info.contact_normal_ws * base_force_scale,
            contact_point_offset,
        );
    }

    fn apply_friction_impulse(&self, chassis: &mut RigidBody, time_step: f32) {
        if self.impulse == Vec3A::ZERO {
            return;
        }

        let trans = chassis.collision_object.get_world_transform();
        let wheel_contact_offset = self.raycast_info.contact_point_ws - trans.translation;
        let contact_up_dot = trans.matrix3.z_axis.dot(wheel_contact_offset);
        let wheel_rel_pos = wheel_contact_offset - trans.matrix3.z_axis * contact_up_dot;
        chassis.apply_impulse(self.impulse * time_step, wheel_rel_pos);
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Vehicle {
    pub wheels: ArrayVec<Wheel, NUM_WHEELS>,
}

impl Vehicle {
    /// Front wheels first, then back; left before right in each pair
    pub fn new(config: &CarConfig) -> Self {
        let mut wheels = ArrayVec::new();

        for i in 0..NUM_WHEELS {
            let front = i < 2;
            let left = i % 2 != 0;

            let pair = if front {
                &config.front_wheels
            } else {
                &config.back_wheels
            };

            let mut connection_point = pair.connection_point_offset;
            if left {
                connection_point.y *= -1.0;
            }

            let force_scale = if front {
                vehicle_consts::SUSPENSION_FORCE_SCALE_FRONT
            } else {
                vehicle_consts::SUSPENSION_FORCE_SCALE_BACK
            };

            wheels.push(Wheel::new(
                connection_point,
                pair.suspension_rest_length - vehicle_consts::MAX_SUSPENSION_TRAVEL,
                pair.wheel_radius,
                force_scale,
            ));
        }

        Self { wheels }
    }

    pub fn set_steer_angle(&mut self, steer_angle: f32) {
        self.wheels[0].steer_angle = steer_angle;
        self.wheels[1].steer_angle = steer_angle;
    }

    /// Cast every suspension ray from the chassis' current transform
    pub fn update_contacts(
        &mut self,
        engine: &dyn PhysicsEngine,
        chassis_idx: usize,
        time_step: f32,
    ) {
        let chassis_trans = *engine.body(chassis_idx).collision_object.get_world_transform();
        for wheel in &mut self.wheels {
            wheel.update_wheel_transform(&chassis_trans);
            wheel.ray_cast(engine, chassis_idx, time_step);
            wheel.impulse = Vec3A::ZERO;
        }
    }

    /// Needs each wheel's engine force, brake and friction factors to be set for this tick
    pub fn calc_friction_impulses(
        &mut self,
        engine: &dyn PhysicsEngine,
        chassis_idx: usize,
        time_step: f32,
    ) {
        let chassis = engine.body(chassis_idx);
        let friction_scale = chassis.mass() / 3.0;

        for wheel in &mut self.wheels {
            let Some(ground_idx) = wheel.raycast_info.ground_object else {
                wheel.impulse = Vec3A::ZERO;
                continue;
            };

            let ground = engine.body(ground_idx);
            wheel.calc_friction_impulse(chassis, ground, friction_scale, time_step);
        }
    }

    pub fn num_wheels_in_contact(&self) -> u8 {
        self.wheels
            .iter()
            .map(|wheel| u8::from(wheel.raycast_info.is_in_contact))
            .sum()
    }

    pub fn has_world_contact(&self) -> bool {
        self.wheels.iter().any(|wheel| wheel.is_in_contact_with_world)
    }

    pub fn get_upwards_dir_from_wheel_contacts(&self, chassis: &RigidBody) -> Vec3A {
        let sum_contact_dir: Vec3A = self
            .wheels
            .iter()
            .filter(|wheel| wheel.raycast_info.is_in_contact)
            .map(|wheel| wheel.raycast_info.contact_normal_ws)
            .sum();

        if sum_contact_dir == Vec3A::ZERO {
            chassis.collision_object.get_world_transform().matrix3.z_axis
        } else {
            sum_contact_dir.normalize_or_zero()
        }
    }

    pub fn apply_suspension_and_friction(&mut self, chassis: &mut RigidBody, time_step: f32) {
        for wheel in &mut self.wheels {
            wheel.update_suspension(chassis, time_step);
        }

        // all suspension must be applied before any friction
        for wheel in &self.wheels {
            wheel.apply_friction_impulse(chassis, time_step);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{Affine3A, Vec3A};

    use super::Vehicle;
    use crate::{
        CarConfig,
        physics::{
            BoxShape, CollisionFilterGroups, CollisionShapes, DiscreteDynamicsWorld, PhysicsEngine,
            RigidBody, RigidBodyConstructionInfo, StaticPlaneShape,
        },
    };

    fn world_with_chassis(height: f32) -> (DiscreteDynamicsWorld, usize) {
        let mut world = DiscreteDynamicsWorld::default();
        world.add_rigid_body(
            RigidBody::new_static(
                CollisionShapes::StaticPlane(StaticPlaneShape::new(Vec3A::Z, 0.0)),
                1.0,
                0.0,
            ),
            CollisionFilterGroups::Static as u8,
            CollisionFilterGroups::All as u8,
        );

        let config = CarConfig::OCTANE;
        let shape = BoxShape::new(config.hitbox_size * 0.5, config.hitbox_pos_offset);
        let mut info = RigidBodyConstructionInfo::new(180.0, CollisionShapes::Box(shape));
        info.local_inertia = shape.calculate_local_inertia(180.0);
        info.start_world_transform =
            Affine3A::from_translation(Vec3A::new(0.0, 0.0, height).into());
        let chassis = world.add_rigid_body(
            RigidBody::new(info),
            CollisionFilterGroups::Default as u8,
            CollisionFilterGroups::All as u8,
        );

        (world, chassis)
    }

    #[test]
    fn wheels_touch_floor_at_rest_height() {
        let (world, chassis) = world_with_chassis(17.0);
        let mut vehicle = Vehicle::new(&CarConfig::OCTANE);
        vehicle.update_contacts(&world, chassis, 1.0 / 120.0);

        assert_eq!(vehicle.num_wheels_in_contact(), 4);
        assert!(vehicle.has_world_contact());
        let up = vehicle.get_upwards_dir_from_wheel_contacts(world.body(chassis));
        assert!(up.abs_diff_eq(Vec3A::Z, 1e-5));
    }

    #[test]
    fn wheels_miss_floor_when_high() {
        let (world, chassis) = world_with_chassis(500.0);
        let mut vehicle = Vehicle::new(&CarConfig::OCTANE);
        vehicle.update_contacts(&world, chassis, 1.0 / 120.0);

        assert_eq!(vehicle.num_wheels_in_contact(), 0);
        assert!(!vehicle.has_world_contact());
    }

    #[test]
    fn suspension_pushes_chassis_up() {
        let (mut world, chassis) = world_with_chassis(10.0);
        let mut vehicle = Vehicle::new(&CarConfig::OCTANE);
        vehicle.update_contacts(&world, chassis, 1.0 / 120.0);
        vehicle.apply_suspension_and_friction(world.body_mut(chassis), 1.0 / 120.0);

        assert!(world.body(chassis).linear_velocity.z > 0.0);
    }
}
