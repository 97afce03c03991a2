use std::f32::consts::PI;

use fastrand::Rng;
use glam::{Affine3A, Vec3A};

use super::vehicle::Vehicle;
use crate::{
    CarConfig, CarControls, CarState, GameMode, MutatorConfig, PhysState, Team,
    math::{Angle, get_roll},
    physics::{
        ActivationState, BoxShape, CollisionFilterGroups, CollisionFlags, CollisionShapes,
        PhysicsEngine, RigidBody, RigidBodyConstructionInfo,
    },
    sim::{
        CollisionMasks, UserInfoTypes,
        consts::{self, car as car_consts, car::drive as drive_consts, curves},
    },
};

#[derive(Clone, Debug)]
pub struct Car {
    pub(crate) id: u64,
    team: Team,
    config: CarConfig,
    pub(crate) vehicle: Vehicle,
    pub(crate) rigid_body_idx: usize,
    /// Bump impulses collected during the physics step, added after it
    pub(crate) velocity_impulse_cache: Vec3A,
    pub(crate) internal_state: CarState,
}

impl Car {
    /// Create a car and register its body with `engine`
    pub(crate) fn new(
        id: u64,
        team: Team,
        config: CarConfig,
        engine: &mut dyn PhysicsEngine,
        mutator_config: &MutatorConfig,
    ) -> Self {
        let mut car = Self {
            id,
            team,
            config,
            vehicle: Vehicle::new(&config),
            rigid_body_idx: usize::MAX,
            velocity_impulse_cache: Vec3A::ZERO,
            internal_state: CarState {
                boost: mutator_config.car_spawn_boost_amount,
                ..CarState::DEFAULT
            },
        };

        car.attach(engine, mutator_config);
        car
    }

    /// Register a fresh rigid body for this car, placed at its current state
    pub(crate) fn attach(
        &mut self,
        engine: &mut dyn PhysicsEngine,
        mutator_config: &MutatorConfig,
    ) {
        let hitbox = BoxShape::new(self.config.hitbox_size * 0.5, self.config.hitbox_pos_offset);

        let mut info =
            RigidBodyConstructionInfo::new(mutator_config.car_mass, CollisionShapes::Box(hitbox));
        info.friction = car_consts::BASE_COEFS.friction;
        info.restitution = car_consts::BASE_COEFS.restitution;
        info.local_inertia = hitbox.calculate_local_inertia(mutator_config.car_mass);

        let mut body = RigidBody::new(info);
        body.collision_object.user_index = UserInfoTypes::Car;
        body.collision_object.user_pointer = self.id;
        body.collision_object.collision_flags |= CollisionFlags::CustomMaterialCallback as u8;

        self.rigid_body_idx = engine.add_rigid_body(
            body,
            CollisionFilterGroups::Default as u8 | CollisionMasks::DropshotFloor as u8,
            CollisionFilterGroups::All as u8,
        );

        let state = self.internal_state;
        self.set_state(engine.body_mut(self.rigid_body_idx), &state);
    }

    /// Remove this car's rigid body from `engine`
    pub(crate) fn detach(&mut self, engine: &mut dyn PhysicsEngine) {
        engine.remove_rigid_body(self.rigid_body_idx);
        self.rigid_body_idx = usize::MAX;
        self.velocity_impulse_cache = Vec3A::ZERO;
    }

    /// Unique id of this car within its arena
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub const fn team(&self) -> Team {
        self.team
    }

    /// Get the forward direction as a unit vector
    #[must_use]
    pub const fn get_forward_dir(&self) -> Vec3A {
        self.internal_state.phys.rot_mat.x_axis
    }

    /// Get the rightward direction as a unit vector
    #[must_use]
    pub const fn get_right_dir(&self) -> Vec3A {
        self.internal_state.phys.rot_mat.y_axis
    }

    /// Get the upward direction as a unit vector
    #[must_use]
    pub const fn get_up_dir(&self) -> Vec3A {
        self.internal_state.phys.rot_mat.z_axis
    }

    #[must_use]
    pub const fn config(&self) -> &CarConfig {
        &self.config
    }

    #[must_use]
    pub const fn get_state(&self) -> &CarState {
        &self.internal_state
    }

    pub const fn set_controls(&mut self, new_controls: CarControls) {
        self.internal_state.controls = new_controls;
    }

    /// `respawn_delay` is usually [`MutatorConfig::respawn_delay`]
    pub const fn demolish(&mut self, respawn_delay: f32) {
        self.internal_state.is_demoed = true;
        self.internal_state.demo_respawn_timer = respawn_delay;
    }

    /// Respawn at a random respawn location, after a demo
    pub(crate) fn respawn(
        &mut self,
        rb: &mut RigidBody,
        rng: &mut Rng,
        game_mode: GameMode,
        boost_amount: f32,
    ) {
        let respawn_locations = car_consts::spawn::get_respawn_locations(game_mode);
        let spawn_pos = respawn_locations[rng.usize(0..respawn_locations.len())];

        let yaw = spawn_pos.yaw_ang + if self.team == Team::Blue { 0.0 } else { PI };
        let new_state = CarState {
            phys: PhysState {
                rot_mat: Angle::new(yaw, 0.0, 0.0).to_rot_mat(),
                ..PhysState::at_rest(Vec3A::new(
                    spawn_pos.x,
                    spawn_pos.y * -self.team.get_y_dir(),
                    car_consts::spawn::RESPAWN_Z,
                ))
            },
            boost: boost_amount,
            ..CarState::DEFAULT
        };

        self.set_state(rb, &new_state);
    }

    pub(crate) fn set_state(&mut self, rb: &mut RigidBody, state: &CarState) {
        debug_assert_eq!(rb.collision_object.user_index, UserInfoTypes::Car);
        debug_assert_eq!(rb.collision_object.world_array_index, self.rigid_body_idx);

        rb.set_center_of_mass_transform(Affine3A {
            matrix3: state.phys.rot_mat,
            translation: state.phys.pos,
        });
        rb.linear_velocity = state.phys.vel;
        rb.angular_velocity = state.phys.ang_vel;

        self.velocity_impulse_cache = Vec3A::ZERO;
        self.internal_state = *state;
    }

    fn update_handbrake(&mut self, tick_time: f32) {
        let rate = if self.internal_state.controls.handbrake {
            drive_consts::POWERSLIDE_RISE_RATE
        } else {
            -drive_consts::POWERSLIDE_FALL_RATE
        };

        self.internal_state.handbrake_val =
            (self.internal_state.handbrake_val + rate * tick_time).clamp(0.0, 1.0);
    }

    fn steer_angle(&self, abs_forward_speed: f32) -> f32 {
        let mut steer_angle = if self.config.three_wheels {
            curves::STEER_ANGLE_FROM_SPEED_THREEWHEEL.get_output(abs_forward_speed)
        } else {
            curves::STEER_ANGLE_FROM_SPEED.get_output(abs_forward_speed)
        };

        if self.internal_state.handbrake_val != 0.0 {
            steer_angle += (curves::POWERSLIDE_STEER_ANGLE_FROM_SPEED.get_output(abs_forward_speed)
                - steer_angle)
                * self.internal_state.handbrake_val;
        }

        steer_angle * self.internal_state.controls.steer
    }

    fn real_throttle(&self) -> f32 {
        if self.internal_state.controls.boost && self.internal_state.boost > 0.0 {
            1.0
        } else {
            self.internal_state.controls.throttle
        }
    }

    fn update_wheels(
        &mut self,
        engine: &mut dyn PhysicsEngine,
        tick_time: f32,
        num_wheels_in_contact: u8,
        forward_speed: f32,
    ) {
        let mut real_brake = 0.0;
        let real_throttle = self.real_throttle();

        let abs_forward_speed = forward_speed.abs();
        let mut engine_throttle = real_throttle;
        if !self.internal_state.controls.handbrake {
            if real_throttle.abs() >= drive_consts::THROTTLE_DEADZONE {
                if abs_forward_speed > drive_consts::STOPPING_FORWARD_VEL
                    && real_throttle.signum() != forward_speed.signum()
                {
                    real_brake = 1.0;

                    if abs_forward_speed > drive_consts::BRAKING_NO_THROTTLE_SPEED_THRESH {
                        engine_throttle = 0.0;
                    }
                }
            } else {
                engine_throttle = 0.0;
                real_brake = if abs_forward_speed < drive_consts::STOPPING_FORWARD_VEL {
                    1.0
                } else {
                    drive_consts::COASTING_BRAKE_FACTOR
                };
            }
        }

        let mut drive_speed_scale = curves::DRIVE_SPEED_TORQUE_FACTOR.get_output(abs_forward_speed);
        if num_wheels_in_contact < 3 {
            drive_speed_scale /= 4.0;
        }

        let drive_engine_force =
            engine_throttle * drive_consts::THROTTLE_TORQUE_AMOUNT * drive_speed_scale;
        let drive_brake_force = real_brake * drive_consts::BRAKE_TORQUE_AMOUNT;

        let (chassis_vel, chassis_ang_vel, chassis_origin) = {
            let rb = engine.body(self.rigid_body_idx);
            (rb.linear_velocity, rb.angular_velocity, rb.collision_object.origin())
        };

        let handbrake_val = self.internal_state.handbrake_val;
        for wheel in &mut self.vehicle.wheels {
            wheel.engine_force = drive_engine_force;
            wheel.brake = drive_brake_force;

            if !wheel.raycast_info.is_in_contact {
                continue;
            }

            let lat_dir = wheel.world_transform.matrix3.y_axis;
            let long_dir = lat_dir.cross(wheel.raycast_info.contact_normal_ws);

            let wheel_delta = wheel.raycast_info.hard_point_ws - chassis_origin;
            let cross_vec = chassis_ang_vel.cross(wheel_delta) + chassis_vel;

            let base_friction = cross_vec.dot(lat_dir).abs();
            let friction_curve_input = if base_friction > 5.0 {
                base_friction / (cross_vec.dot(long_dir).abs() + base_friction)
            } else {
                0.0
            };

            let mut lat_friction = if self.config.three_wheels {
                curves::LAT_FRICTION_THREEWHEEL.get_output(friction_curve_input)
            } else {
                curves::LAT_FRICTION.get_output(friction_curve_input)
            };
            let mut long_friction = 1.0;

            if handbrake_val != 0.0 {
                lat_friction *= 1.0 - curves::HANDBRAKE_LAT_FRICTION_FACTOR * handbrake_val;
                long_friction *= 1.0
                    + (curves::HANDBRAKE_LONG_FRICTION_FACTOR.get_output(friction_curve_input)
                        - 1.0)
                        * handbrake_val;
            }

            if real_throttle == 0.0 {
                // contact is not sticky
                let non_sticky_scale = curves::NON_STICKY_FRICTION_FACTOR
                    .get_output(wheel.raycast_info.contact_normal_ws.z);
                lat_friction *= non_sticky_scale;
                long_friction *= non_sticky_scale;
            }

            wheel.lat_friction = lat_friction;
            wheel.long_friction = long_friction;
        }

        self.vehicle
            .calc_friction_impulses(&*engine, self.rigid_body_idx, tick_time);

        if self.vehicle.has_world_contact() {
            let rb = engine.body_mut(self.rigid_body_idx);
            let upwards_dir = self.vehicle.get_upwards_dir_from_wheel_contacts(rb);

            let full_stick =
                real_throttle != 0.0 || abs_forward_speed > drive_consts::STOPPING_FORWARD_VEL;
            let mut sticky_force_scale = f32::from(!self.config.three_wheels) * 0.5;
            if full_stick {
                sticky_force_scale += 1.0 - upwards_dir.z.abs();
            }

            rb.apply_central_force(
                upwards_dir * sticky_force_scale * const { consts::GRAVITY_Z * car_consts::MASS },
            );
        }
    }

    fn update_air_torque(&mut self, rb: &mut RigidBody, update_air_control: bool) {
        let dir_pitch = -self.get_right_dir();
        let dir_yaw = self.get_up_dir();
        let dir_roll = -self.get_forward_dir();
        let controls = self.internal_state.controls;

        if self.internal_state.is_flipping {
            self.internal_state.is_flipping = self.internal_state.has_flipped
                && self.internal_state.flip_time < car_consts::flip::TORQUE_TIME;
        }

        let mut do_air_control = false;
        if self.internal_state.is_flipping {
            if self.internal_state.flip_rel_torque == Vec3A::ZERO {
                do_air_control = true;
            } else {
                let mut rel_dodge_torque = self.internal_state.flip_rel_torque;

                // flip cancel
                let mut pitch_scale = 1.0;
                if rel_dodge_torque.y != 0.0
                    && controls.pitch != 0.0
                    && rel_dodge_torque.y.signum() == controls.pitch.signum()
                {
                    pitch_scale = 1.0 - controls.pitch.abs().min(1.0);
                    do_air_control = true;
                }

                rel_dodge_torque.y *= pitch_scale;
                let dodge_torque = rel_dodge_torque
                    * const {
                        Vec3A::new(car_consts::flip::TORQUE_X, car_consts::flip::TORQUE_Y, 0.0)
                    };

                let rb_torque = rb.world_inertia_tensor()
                    * (rb.collision_object.get_world_transform().matrix3 * dodge_torque);
                rb.apply_torque(rb_torque);
            }
        } else {
            do_air_control = true;
        }

        do_air_control &= !self.internal_state.is_auto_flipping;
        do_air_control &= update_air_control;
        if do_air_control {
            let mut pitch_torque_scale = 1.0;
            let torque = if controls.pitch != 0.0 || controls.yaw != 0.0 || controls.roll != 0.0 {
                if self.internal_state.is_flipping
                    || self.internal_state.has_flipped
                        && self.internal_state.flip_time
                            < const {
                                car_consts::flip::TORQUE_TIME
                                    + car_consts::flip::PITCHLOCK_EXTRA_TIME
                            }
                {
                    pitch_torque_scale = 0.0;
                }

                controls.pitch * dir_pitch * pitch_torque_scale * car_consts::air_control::TORQUE.x
                    + controls.yaw * dir_yaw * car_consts::air_control::TORQUE.y
                    + controls.roll * dir_roll * car_consts::air_control::TORQUE.z
            } else {
                Vec3A::ZERO
            };

            let ang_vel = rb.angular_velocity;

            let damp_pitch = dir_pitch.dot(ang_vel)
                * car_consts::air_control::DAMPING.x
                * (1.0 - (controls.pitch * pitch_torque_scale).abs());
            let damp_yaw = dir_yaw.dot(ang_vel)
                * car_consts::air_control::DAMPING.y
                * (1.0 - controls.yaw.abs());
            let damp_roll = dir_roll.dot(ang_vel) * car_consts::air_control::DAMPING.z;

            let damping = dir_yaw * damp_yaw + dir_pitch * damp_pitch + dir_roll * damp_roll;

            let rb_torque = rb.world_inertia_tensor()
                * ((torque - damping) * car_consts::air_control::TORQUE_APPLY_SCALE);
            rb.apply_torque(rb_torque);
        }

        if controls.throttle != 0.0 {
            rb.apply_central_force(
                self.get_forward_dir()
                    * controls.throttle
                    * const { drive_consts::THROTTLE_AIR_ACCEL * car_consts::MASS },
            );
        }
    }

    fn update_jump(
        &mut self,
        rb: &mut RigidBody,
        tick_time: f32,
        mutator_config: &MutatorConfig,
        jump_pressed: bool,
    ) {
        let state = &mut self.internal_state;
        if state.is_on_ground && !state.is_jumping {
            // A minimum-time jump may not have left the ground yet
            let still_leaving_ground = state.has_jumped
                && state.jump_time
                    < const { car_consts::jump::MIN_TIME + car_consts::jump::RESET_TIME_PAD };
            if !still_leaving_ground {
                state.has_jumped = false;
                state.jump_time = 0.0;
            }
        }

        let up_dir = state.phys.rot_mat.z_axis;
        if state.is_jumping {
            state.is_jumping = state.jump_time < car_consts::jump::MIN_TIME
                || (state.controls.jump && state.jump_time < car_consts::jump::MAX_TIME);
        } else if state.is_on_ground && jump_pressed {
            state.is_jumping = true;
            state.jump_time = 0.0;
            rb.apply_central_impulse(
                up_dir * mutator_config.jump_immediate_force * car_consts::MASS,
            );
        }

        if state.is_jumping {
            state.has_jumped = true;

            let mut total_jump_force = up_dir * mutator_config.jump_accel;
            if state.jump_time < car_consts::jump::MIN_TIME {
                const JUMP_PRE_MIN_ACCEL_SCALE: f32 = 0.62;
                total_jump_force *= JUMP_PRE_MIN_ACCEL_SCALE;
            }

            rb.apply_central_force(total_jump_force * car_consts::MASS);
        }

        if state.is_jumping || state.has_jumped {
            state.jump_time += tick_time;
        }
    }

    fn update_auto_flip(&mut self, rb: &mut RigidBody, tick_time: f32, jump_pressed: bool) {
        let state = &mut self.internal_state;
        if jump_pressed
            && state
                .world_contact_normal
                .is_some_and(|normal| normal.z > car_consts::autoflip::NORM_Z_THRESH)
        {
            let roll = get_roll(state.phys.rot_mat);
            let abs_roll = roll.abs();
            if abs_roll > car_consts::autoflip::ROLL_THRESH {
                state.auto_flip_timer =
                    car_consts::autoflip::TIME * (abs_roll / car_consts::autoflip::MAX_ROLL);
                state.auto_flip_torque_scale = roll.signum();
                state.is_auto_flipping = true;

                rb.apply_central_impulse(
                    -state.phys.rot_mat.z_axis
                        * const { car_consts::autoflip::IMPULSE * car_consts::MASS },
                );
            }
        }

        if state.is_auto_flipping {
            if state.auto_flip_timer <= 0.0 {
                state.is_auto_flipping = false;
                state.auto_flip_timer = 0.0;
            } else {
                rb.angular_velocity += state.phys.rot_mat.x_axis
                    * car_consts::autoflip::TORQUE
                    * state.auto_flip_torque_scale
                    * tick_time;
                state.auto_flip_timer -= tick_time;
            }
        }
    }

    fn update_double_jump_or_flip(
        &mut self,
        rb: &mut RigidBody,
        tick_time: f32,
        mutator_config: &MutatorConfig,
        jump_pressed: bool,
        forward_speed: f32,
    ) {
        let forward_dir = self.get_forward_dir();
        let up_dir = self.get_up_dir();
        let dodge_deadzone = self.config.dodge_deadzone;
        let state = &mut self.internal_state;

        if state.is_on_ground {
            state.has_double_jumped = false;
            state.has_flipped = false;
            state.air_time = 0.0;
            state.air_time_since_jump = 0.0;
            state.flip_time = 0.0;
            return;
        }

        let tick_time_scale = tick_time / const { 1.0 / 120.0 };

        state.air_time += tick_time;

        if state.has_jumped && !state.is_jumping {
            state.air_time_since_jump += tick_time;
        } else {
            state.air_time_since_jump = 0.0;
        }

        if jump_pressed && state.air_time_since_jump < car_consts::jump::DOUBLEJUMP_MAX_DELAY {
            let controls = state.controls;
            let input_magnitude = controls.yaw.abs() + controls.pitch.abs() + controls.roll.abs();
            let is_flip_input = input_magnitude >= dodge_deadzone;

            let can_use = !state.is_auto_flipping && !state.has_double_jumped && !state.has_flipped
                || if is_flip_input {
                    mutator_config.unlimited_flips
                } else {
                    mutator_config.unlimited_double_jumps
                };

            if can_use && is_flip_input {
                state.flip_time = 0.0;
                state.has_flipped = true;
                state.is_flipping = true;

                let forward_speed_ratio = forward_speed.abs() / car_consts::MAX_SPEED;
                let mut dodge_dir = Vec3A::new(-controls.pitch, controls.yaw + controls.roll, 0.0);

                if dodge_dir.x.abs() < 0.1 && dodge_dir.y.abs() < 0.1 {
                    dodge_dir = Vec3A::ZERO;
                } else {
                    dodge_dir = dodge_dir.normalize();
                }

                state.flip_rel_torque =
                    Vec3A::new(-dodge_dir.y, dodge_dir.x, 0.0) / tick_time_scale;

                if dodge_dir.x.abs() < 0.1 {
                    dodge_dir.x = 0.0;
                }

                if dodge_dir.y.abs() < 0.1 {
                    dodge_dir.y = 0.0;
                }

                if dodge_dir.length_squared() > const { f32::EPSILON * f32::EPSILON } {
                    let should_dodge_backwards = if forward_speed.abs() < 100.0 {
                        dodge_dir.x.is_sign_negative()
                    } else {
                        dodge_dir.x.signum() != forward_speed.signum()
                    };

                    let max_speed_scale_x = if should_dodge_backwards {
                        car_consts::flip::BACKWARD_IMPULSE_MAX_SPEED_SCALE
                    } else {
                        car_consts::flip::FORWARD_IMPULSE_MAX_SPEED_SCALE
                    };

                    let mut initial_dodge_vel = dodge_dir * car_consts::flip::INITIAL_VEL_SCALE;
                    initial_dodge_vel.x *= (max_speed_scale_x - 1.0) * forward_speed_ratio + 1.0;
                    initial_dodge_vel.y *= (car_consts::flip::SIDE_IMPULSE_MAX_SPEED_SCALE - 1.0)
                        * forward_speed_ratio
                        + 1.0;
                    if should_dodge_backwards {
                        initial_dodge_vel.x *= car_consts::flip::BACKWARD_IMPULSE_SCALE_X;
                    }

                    let forward_dir_2d = forward_dir.with_z(0.0).normalize_or_zero();
                    let right_dir_2d = Vec3A::new(-forward_dir_2d.y, forward_dir_2d.x, 0.0);
                    let final_delta_vel =
                        initial_dodge_vel.x * forward_dir_2d + initial_dodge_vel.y * right_dir_2d;

                    rb.apply_central_impulse(final_delta_vel * car_consts::MASS);
                }
            } else if can_use {
                rb.apply_central_impulse(
                    up_dir * mutator_config.jump_immediate_force * car_consts::MASS,
                );
                state.has_double_jumped = true;
            }
        }

        if state.is_flipping {
            state.flip_time += tick_time;
            if state.flip_time <= car_consts::flip::TORQUE_TIME
                && state.flip_time >= car_consts::flip::Z_DAMP_START
                && (rb.linear_velocity.z < 0.0 || state.flip_time < car_consts::flip::Z_DAMP_END)
            {
                rb.linear_velocity.z *= (1.0 - car_consts::flip::Z_DAMP_120).powf(tick_time_scale);
            }
        } else if state.has_flipped {
            state.flip_time += tick_time;
        }
    }

    fn update_auto_roll(&self, rb: &mut RigidBody, num_wheels_in_contact: u8) {
        let ground_up_dir = if num_wheels_in_contact > 0 {
            self.vehicle.get_upwards_dir_from_wheel_contacts(rb)
        } else if let Some(normal) = self.internal_state.world_contact_normal {
            normal
        } else {
            return;
        };

        let ground_down_dir = -ground_up_dir;

        let forward_dir = self.get_forward_dir();
        let right_dir = self.get_right_dir();

        let cross_right_dir = ground_up_dir.cross(forward_dir);
        let cross_forward_dir = ground_down_dir.cross(cross_right_dir);

        let right_torque_factor = 1.0 - right_dir.dot(cross_right_dir).clamp(0.0, 1.0);
        let forward_torque_factor = 1.0 - forward_dir.dot(cross_forward_dir).clamp(0.0, 1.0);

        let torque_dir_right = forward_dir * -right_dir.dot(ground_up_dir).signum();
        let torque_dir_forward = right_dir * forward_dir.dot(ground_up_dir).signum();

        let torque_right = torque_dir_right * right_torque_factor;
        let torque_forward = torque_dir_forward * forward_torque_factor;

        rb.apply_central_force(
            ground_down_dir * const { car_consts::autoroll::FORCE * car_consts::MASS },
        );

        let rb_torque = rb.world_inertia_tensor()
            * ((torque_forward + torque_right) * car_consts::autoroll::TORQUE);
        rb.apply_torque(rb_torque);
    }

    fn update_boost(&mut self, rb: &mut RigidBody, tick_time: f32, mutator_config: &MutatorConfig) {
        let forward_dir = self.get_forward_dir();
        let state = &mut self.internal_state;

        state.is_boosting = state.boost > 0.0
            && (state.controls.boost
                || (state.is_boosting && state.boosting_time < car_consts::boost::MIN_TIME));

        if state.is_boosting {
            state.boosting_time += tick_time;
            state.time_since_boosted = 0.0;
            state.boost -= mutator_config.boost_used_per_second * tick_time;

            let accel = if state.is_on_ground {
                mutator_config.boost_accel_ground
            } else {
                mutator_config.boost_accel_air
            };

            rb.apply_central_force(accel * forward_dir * car_consts::MASS);
        } else {
            state.boosting_time = 0.0;
            state.time_since_boosted += tick_time;

            if mutator_config.recharge_boost_enabled
                && state.time_since_boosted >= mutator_config.recharge_boost_delay
            {
                state.boost += mutator_config.recharge_boost_per_second * tick_time;
            }
        }

        state.boost = state.boost.clamp(0.0, mutator_config.car_max_boost_amount);
    }

    pub(crate) fn pre_tick_update(
        &mut self,
        engine: &mut dyn PhysicsEngine,
        rng: &mut Rng,
        game_mode: GameMode,
        tick_time: f32,
        mutator_config: &MutatorConfig,
    ) {
        let forward_speed = {
            let rb = engine.body_mut(self.rigid_body_idx);
            if self.internal_state.is_demoed {
                self.internal_state.demo_respawn_timer =
                    (self.internal_state.demo_respawn_timer - tick_time).max(0.0);
                if self.internal_state.demo_respawn_timer == 0.0 {
                    self.respawn(rb, rng, game_mode, mutator_config.car_spawn_boost_amount);
                }
            }

            if self.internal_state.is_demoed {
                rb.collision_object
                    .set_activation_state(ActivationState::DisableSimulation);
                rb.collision_object.collision_flags |= CollisionFlags::NoContactResponse as u8;
                return;
            }

            rb.collision_object.set_activation_state(ActivationState::Active);
            rb.collision_object.collision_flags &= !(CollisionFlags::NoContactResponse as u8);

            self.internal_state.controls = self.internal_state.controls.clamp();
            rb.get_forward_speed()
        };

        // Steering is derived from this tick's inputs before the wheels are traced
        self.update_handbrake(tick_time);
        let steer_angle = self.steer_angle(forward_speed.abs());
        self.vehicle.set_steer_angle(steer_angle);
        self.vehicle
            .update_contacts(&*engine, self.rigid_body_idx, tick_time);

        let jump_pressed =
            self.internal_state.controls.jump && !self.internal_state.prev_controls.jump;

        for (wheel, has_contact) in self
            .vehicle
            .wheels
            .iter()
            .zip(&mut self.internal_state.wheels_with_contact)
        {
            *has_contact = wheel.raycast_info.is_in_contact;
        }

        let num_wheels_in_contact = self.vehicle.num_wheels_in_contact();
        self.internal_state.is_on_ground = CarState::ground_from_wheel_contacts(
            self.internal_state.wheels_with_contact,
            self.config.three_wheels,
        );

        self.update_wheels(engine, tick_time, num_wheels_in_contact, forward_speed);

        let rb = engine.body_mut(self.rigid_body_idx);
        if self.internal_state.is_on_ground {
            self.internal_state.is_flipping = false;
        } else {
            self.update_air_torque(rb, num_wheels_in_contact == 0);
        }

        self.update_jump(rb, tick_time, mutator_config, jump_pressed);
        self.update_auto_flip(rb, tick_time, jump_pressed);
        self.update_double_jump_or_flip(rb, tick_time, mutator_config, jump_pressed, forward_speed);

        if self.internal_state.controls.throttle != 0.0
            && ((0 < num_wheels_in_contact && num_wheels_in_contact < 4)
                || self.internal_state.world_contact_normal.is_some())
        {
            self.update_auto_roll(rb, num_wheels_in_contact);
        }

        self.internal_state.world_contact_normal = None;

        self.vehicle.apply_suspension_and_friction(rb, tick_time);
        self.update_boost(rb, tick_time, mutator_config);
    }

    pub(crate) fn post_tick_update(&mut self, tick_time: f32, rb: &RigidBody) {
        debug_assert_eq!(rb.collision_object.world_array_index, self.rigid_body_idx);
        if self.internal_state.is_demoed {
            return;
        }

        let state = &mut self.internal_state;
        state.phys.rot_mat = rb.collision_object.get_world_transform().matrix3;

        let speed_squared = rb.linear_velocity.length_squared();
        let threshold = if state.is_supersonic
            && state.supersonic_time < car_consts::supersonic::MAINTAIN_MAX_TIME
        {
            car_consts::supersonic::MAINTAIN_MIN_SPEED
        } else {
            car_consts::supersonic::START_SPEED
        };
        state.is_supersonic = speed_squared >= threshold * threshold;

        if state.is_supersonic {
            state.supersonic_time += tick_time;
        } else {
            state.supersonic_time = 0.0;
        }

        if let Some(car_contact) = &mut state.car_contact {
            car_contact.cooldown_timer -= tick_time;
            if car_contact.cooldown_timer <= 0.0 {
                state.car_contact = None;
            }
        }

        state.prev_controls = state.controls;
    }

    pub(crate) fn finish_physics_tick(&mut self, rb: &mut RigidBody) {
        debug_assert_eq!(rb.collision_object.world_array_index, self.rigid_body_idx);

        if self.internal_state.is_demoed {
            self.velocity_impulse_cache = Vec3A::ZERO;
            return;
        }

        if self.velocity_impulse_cache != Vec3A::ZERO {
            rb.linear_velocity += self.velocity_impulse_cache;
            self.velocity_impulse_cache = Vec3A::ZERO;
        }

        let vel = &mut rb.linear_velocity;
        if vel.length_squared() > const { car_consts::MAX_SPEED * car_consts::MAX_SPEED } {
            *vel = vel.normalize() * car_consts::MAX_SPEED;
        }

        let ang_vel = &mut rb.angular_velocity;
        if ang_vel.length_squared()
            > const { car_consts::MAX_ANG_SPEED * car_consts::MAX_ANG_SPEED }
        {
            *ang_vel = ang_vel.normalize() * car_consts::MAX_ANG_SPEED;
        }

        self.internal_state.phys.pos = rb.collision_object.origin();
        self.internal_state.phys.vel = rb.linear_velocity;
        self.internal_state.phys.ang_vel = rb.angular_velocity;
    }
}
