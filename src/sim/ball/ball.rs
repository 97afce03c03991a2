use fastrand::Rng;
use glam::{Affine3A, Vec3A};

use crate::{
    BallHitInfo, BallState, Car, DropshotTilesState, GameMode, MutatorConfig, PhysState, Team,
    math::Angle,
    physics::{
        CollisionFilterGroups, CollisionFlags, CollisionShapes, PhysicsEngine, RigidBody,
        RigidBodyConstructionInfo, SphereShape,
    },
    sim::{
        CollisionMasks, DropshotInfo, HeatseekerInfo, UserInfoTypes,
        consts::{self, ball::car_hit_impulse, dropshot, heatseeker, hoops},
    },
};

#[derive(Clone, Debug)]
pub struct Ball {
    pub(crate) state: BallState,
    pub(crate) rigid_body_idx: usize,
    /// Extra car-hit velocity collected during the physics step, added after it
    pub(crate) velocity_impulse_cache: Vec3A,
}

impl Ball {
    pub(crate) fn new(
        engine: &mut dyn PhysicsEngine,
        mutator_config: &MutatorConfig,
        no_rot: bool,
    ) -> Self {
        let mut ball = Self {
            state: BallState::DEFAULT,
            rigid_body_idx: usize::MAX,
            velocity_impulse_cache: Vec3A::ZERO,
        };

        ball.attach(engine, mutator_config, no_rot);
        ball
    }

    /// Register a fresh rigid body for the ball, placed at its current state
    pub(crate) fn attach(
        &mut self,
        engine: &mut dyn PhysicsEngine,
        mutator_config: &MutatorConfig,
        no_rot: bool,
    ) {
        let shape = SphereShape::new(mutator_config.ball_radius);

        let mut info = RigidBodyConstructionInfo::new(
            mutator_config.ball_mass,
            CollisionShapes::Sphere(shape),
        );
        info.local_inertia = shape.calculate_local_inertia(mutator_config.ball_mass);
        info.linear_damping = mutator_config.ball_drag;
        info.friction = consts::ball::COEFS.friction;
        info.restitution = consts::ball::COEFS.restitution;

        let mut body = RigidBody::new(info);
        body.collision_object.user_index = UserInfoTypes::Ball;
        body.collision_object.collision_flags |= CollisionFlags::CustomMaterialCallback as u8;
        body.collision_object.no_rot = no_rot;

        self.rigid_body_idx = engine.add_rigid_body(
            body,
            CollisionFilterGroups::Default as u8
                | CollisionMasks::HoopsNet as u8
                | CollisionMasks::DropshotTile as u8,
            CollisionFilterGroups::All as u8,
        );

        let state = self.state;
        self.set_state(engine.body_mut(self.rigid_body_idx), state);
    }

    pub(crate) fn detach(&mut self, engine: &mut dyn PhysicsEngine) {
        engine.remove_rigid_body(self.rigid_body_idx);
        self.rigid_body_idx = usize::MAX;
        self.velocity_impulse_cache = Vec3A::ZERO;
    }

    #[must_use]
    pub const fn get_state(&self) -> &BallState {
        &self.state
    }

    pub(crate) fn set_state(&mut self, rb: &mut RigidBody, state: BallState) {
        debug_assert_eq!(rb.collision_object.user_index, UserInfoTypes::Ball);

        rb.set_center_of_mass_transform(Affine3A {
            matrix3: state.phys.rot_mat,
            translation: state.phys.pos,
        });
        rb.linear_velocity = state.phys.vel;
        rb.angular_velocity = state.phys.ang_vel;

        self.velocity_impulse_cache = Vec3A::ZERO;
        self.state = state;
    }

    /// Kickoff state for `game_mode`
    ///
    /// Heatseeker launches the ball towards a random side
    pub(crate) fn kickoff_state(game_mode: GameMode, rng: &mut Rng, ball_radius: f32) -> BallState {
        match game_mode {
            GameMode::Heatseeker => {
                let mut phys = PhysState {
                    vel: heatseeker::BALL_START_VEL,
                    ..PhysState::at_rest(heatseeker::BALL_START_POS)
                };

                if rng.bool() {
                    phys = phys.get_inverted_y();
                }

                BallState {
                    phys,
                    hs_info: HeatseekerInfo::DEFAULT,
                    ..BallState::DEFAULT
                }
            }
            GameMode::Hoops | GameMode::Dropshot => {
                // Resting on the floor, whatever the radius is
                let rest_z = ball_radius + (consts::ball::REST_Z - consts::ball::RADIUS_SOCCAR);
                BallState {
                    phys: PhysState::at_rest(Vec3A::new(0.0, 0.0, rest_z)),
                    ..BallState::DEFAULT
                }
            }
            GameMode::Soccar | GameMode::TheVoid => BallState::DEFAULT,
        }
    }

    pub(crate) fn pre_tick_update(
        &mut self,
        rb: &mut RigidBody,
        game_mode: GameMode,
        tick_time: f32,
    ) {
        match game_mode {
            GameMode::Heatseeker => self.update_heatseeker(rb, tick_time),
            GameMode::Hoops => {
                self.try_launch(rb, tick_time, hoops::BALL_LAUNCH_DELAY, hoops::BALL_LAUNCH_Z_VEL);
            }
            GameMode::Dropshot => {
                let (delay, z_vel) = (dropshot::BALL_LAUNCH_DELAY, dropshot::BALL_LAUNCH_Z_VEL);
                self.try_launch(rb, tick_time, delay, z_vel);
            }
            GameMode::Soccar | GameMode::TheVoid => {}
        }
    }

    /// Pop the ball up once it sat at the center for `delay` seconds after a kickoff
    fn try_launch(&self, rb: &mut RigidBody, tick_time: f32, delay: f32, z_vel: f32) {
        let launch_tick = (delay / tick_time).round() as u64;
        if self.state.tick_count_since_kickoff != launch_tick {
            return;
        }

        // Only a ball nobody touched yet
        let at_center = rb.collision_object.origin().truncate().length() < 1.0
            && rb.linear_velocity.truncate().length() < 1.0;
        if at_center {
            rb.linear_velocity.z = z_vel;
        }
    }

    /// Steer towards the targeted net
    fn update_heatseeker(&mut self, rb: &mut RigidBody, tick_time: f32) {
        let hs_info = &mut self.state.hs_info;
        if hs_info.y_target_dir == 0.0 {
            return;
        }

        hs_info.time_since_hit += tick_time;

        let vel = rb.linear_velocity;
        let old_speed = vel.length();
        if old_speed == 0.0 {
            return;
        }

        let goal_target_pos = Vec3A::new(
            0.0,
            heatseeker::TARGET_Y * hs_info.y_target_dir,
            heatseeker::TARGET_Z,
        );
        let dir_to_goal = (goal_target_pos - rb.collision_object.origin()).normalize_or_zero();

        let vel_angle = Angle::from_vec(vel / old_speed);
        let goal_angle = Angle::from_vec(dir_to_goal);
        let mut delta_angle = goal_angle - vel_angle;
        delta_angle.normalize_fix();

        let mut new_angle = vel_angle;
        new_angle.yaw += delta_angle.yaw * heatseeker::HORIZONTAL_BLEND * tick_time;
        new_angle.pitch += delta_angle.pitch * heatseeker::VERTICAL_BLEND * tick_time;
        new_angle.normalize_fix();
        new_angle.pitch = new_angle
            .pitch
            .clamp(-heatseeker::MAX_TURN_PITCH, heatseeker::MAX_TURN_PITCH);

        let new_speed =
            old_speed + (hs_info.cur_target_speed - old_speed) * heatseeker::SPEED_BLEND;
        rb.linear_velocity = new_angle.get_forward_vector() * new_speed;
    }

    pub(crate) fn finish_physics_tick(
        &mut self,
        rb: &mut RigidBody,
        mutator_config: &MutatorConfig,
    ) {
        if self.velocity_impulse_cache != Vec3A::ZERO {
            rb.linear_velocity += self.velocity_impulse_cache;
            self.velocity_impulse_cache = Vec3A::ZERO;
        }

        let max_speed = mutator_config.ball_max_speed;
        if rb.linear_velocity.length_squared() > max_speed * max_speed {
            rb.linear_velocity = rb.linear_velocity.normalize() * max_speed;
        }

        if rb.angular_velocity.length_squared()
            > const { consts::ball::MAX_ANG_SPEED * consts::ball::MAX_ANG_SPEED }
        {
            rb.angular_velocity = rb.angular_velocity.normalize() * consts::ball::MAX_ANG_SPEED;
        }

        let trans = rb.collision_object.get_world_transform();
        self.state.phys.pos = trans.translation;
        self.state.phys.rot_mat = trans.matrix3;
        self.state.phys.vel = rb.linear_velocity;
        self.state.phys.ang_vel = rb.angular_velocity;
        self.state.tick_count_since_kickoff += 1;
    }

    /// Record a car touch and queue the extra hit impulse
    ///
    /// The extra impulse cannot be applied on two consecutive ticks by the same car
    pub(crate) fn on_hit(
        &mut self,
        car: &mut Car,
        rel_pos: Vec3A,
        tick_count: u64,
        game_mode: GameMode,
        mutator_config: &MutatorConfig,
    ) {
        let team = car.team();
        let car_state = &mut car.internal_state;

        let mut ball_hit_info = BallHitInfo {
            relative_pos_on_ball: rel_pos,
            ball_pos: self.state.phys.pos,
            extra_hit_vel: Vec3A::ZERO,
            tick_count_when_hit: tick_count,
            tick_count_when_extra_impulse_applied: 0,
        };

        if let Some(old_hit) = car_state.ball_hit_info {
            ball_hit_info.tick_count_when_extra_impulse_applied =
                old_hit.tick_count_when_extra_impulse_applied;

            if tick_count <= old_hit.tick_count_when_extra_impulse_applied + 1
                && old_hit.tick_count_when_extra_impulse_applied <= tick_count
            {
                car_state.ball_hit_info = Some(ball_hit_info);
                return;
            }
        }

        ball_hit_info.tick_count_when_extra_impulse_applied = tick_count;

        let car_forward = car_state.phys.rot_mat.x_axis;
        let rel_ball_pos = self.state.phys.pos - car_state.phys.pos;
        let rel_vel = self.state.phys.vel - car_state.phys.vel;

        let rel_speed = rel_vel.length().min(car_hit_impulse::MAX_DELTA_VEL);
        if rel_speed > 0.0 {
            let z_scale = if game_mode == GameMode::Hoops
                && car_state.is_on_ground
                && car_state.phys.rot_mat.z_axis.z > car_hit_impulse::Z_SCALE_HOOPS_NORMAL_Z_THRESH
            {
                car_hit_impulse::Z_SCALE_HOOPS_GROUND
            } else {
                car_hit_impulse::Z_SCALE_NORMAL
            };

            let mut hit_dir = (rel_ball_pos * Vec3A::new(1.0, 1.0, z_scale)).normalize_or_zero();
            let forward_dir_adjustment = car_forward
                * hit_dir.dot(car_forward)
                * const { 1.0 - car_hit_impulse::FORWARD_SCALE };
            hit_dir = (hit_dir - forward_dir_adjustment).normalize_or_zero();

            let added_vel = hit_dir
                * rel_speed
                * consts::curves::BALL_CAR_EXTRA_IMPULSE_FACTOR.get_output(rel_speed)
                * mutator_config.ball_hit_extra_force_scale;
            ball_hit_info.extra_hit_vel = added_vel;

            self.velocity_impulse_cache += added_vel;
        }

        car_state.ball_hit_info = Some(ball_hit_info);

        match game_mode {
            GameMode::Heatseeker => {
                let hs_info = &mut self.state.hs_info;
                let can_increase = hs_info.time_since_hit > heatseeker::MIN_SPEEDUP_INTERVAL
                    || hs_info.y_target_dir == 0.0;
                hs_info.y_target_dir = team.opposite().get_y_dir();

                if can_increase {
                    hs_info.time_since_hit = 0.0;
                    hs_info.cur_target_speed = heatseeker::MAX_SPEED
                        .min(hs_info.cur_target_speed + heatseeker::TARGET_SPEED_INCREMENT);
                }
            }
            GameMode::Dropshot => {
                let ds_info = &mut self.state.ds_info;

                let dir_from_car = (self.state.phys.pos - car_state.phys.pos).normalize_or_zero();
                let hit_speed = dir_from_car.dot(car_state.phys.vel - self.state.phys.vel);
                if hit_speed >= dropshot::MIN_CHARGE_HIT_SPEED {
                    ds_info.accumulated_hit_force += hit_speed;

                    if ds_info.accumulated_hit_force >= dropshot::MIN_ABSORBED_FORCE_FOR_SUPERCHARGE
                    {
                        ds_info.charge_level = 3;
                    } else if ds_info.accumulated_hit_force
                        >= dropshot::MIN_ABSORBED_FORCE_FOR_CHARGE
                    {
                        ds_info.charge_level = 2;
                    }
                }

                ds_info.y_target_dir = team.opposite().get_y_dir();
            }
            GameMode::Soccar | GameMode::Hoops | GameMode::TheVoid => {}
        }
    }

    /// Damage the tiles around the first touched tile on the targeted side
    ///
    /// `touched_tiles` are the (team, tile index) pairs the ball touched during the last step.
    /// Returns true if any tile changed.
    pub(crate) fn try_damage_tiles(
        &mut self,
        tiles: &mut DropshotTilesState,
        touched_tiles: &[(Team, usize)],
        tick_count: u64,
        tick_time: f32,
    ) -> bool {
        let ds_info = &mut self.state.ds_info;
        if ds_info.y_target_dir == 0.0 {
            return false;
        }

        if ds_info.has_damaged {
            let ticks_since_damage = tick_count.saturating_sub(ds_info.last_damage_tick);
            if (ticks_since_damage as f32) * tick_time < dropshot::MIN_DAMAGE_INTERVAL {
                return false;
            }
        }

        let target_team = Team::from_team_y(ds_info.y_target_dir);
        let Some(&(_, tile_idx)) = touched_tiles.iter().find(|(team, _)| *team == target_team)
        else {
            return false;
        };

        log::trace!(
            "ball damaged {target_team:?} tile {tile_idx} at charge level {} on tick {tick_count}",
            ds_info.charge_level
        );
        tiles.damage(target_team, tile_idx, ds_info.charge_level);

        *ds_info = DropshotInfo {
            has_damaged: true,
            last_damage_tick: tick_count,
            ..DropshotInfo::DEFAULT
        };
        true
    }

    /// Bouncing off a back wall in heatseeker retargets the other net
    pub(crate) fn on_world_hit(&mut self, game_mode: GameMode, normal: Vec3A) {
        if game_mode != GameMode::Heatseeker {
            return;
        }

        let hs_info = &mut self.state.hs_info;
        if hs_info.y_target_dir != 0.0
            && self.state.phys.pos.y.abs() > heatseeker::WALL_BOUNCE_CHANGE_Y_THRESH
            && normal.y * hs_info.y_target_dir <= -heatseeker::WALL_BOUNCE_CHANGE_Y_NORMAL
        {
            hs_info.y_target_dir *= -1.0;
        }
    }
}
