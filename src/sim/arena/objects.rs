use std::collections::BTreeMap;

use glam::Vec3A;

use super::dropshot::DropshotTiles;
use crate::{
    Ball, Car, CarContact, CarState, GameMode, MutatorConfig, Team,
    physics::{CollisionObject, ContactAddedCallback, ManifoldPoint},
    sim::{
        BoostPadGrid, CarBumpCallback, CarBumpEvent, DemoMode, UserInfoTypes,
        consts::{car::CAR_BALL_COEFS, car::CAR_CAR_COEFS, car::bump, curves},
    },
};

/// Everything in the arena that reacts to contacts during a physics step
#[derive(Clone)]
pub(crate) struct Objects {
    pub ball: Ball,
    /// Ordered by id, so every iteration is deterministic
    pub cars: BTreeMap<u64, Car>,
    pub boost_pads: BoostPadGrid,
    pub tick_count: u64,
    pub game_mode: GameMode,
    pub mutator_config: MutatorConfig,
    pub car_bump_callback: Option<CarBumpCallback>,
    /// Dropshot tiles the ball touched during the current step, in contact order
    pub touched_tiles: Vec<(Team, usize)>,
}

impl Objects {
    /// Both cars mutably, in the given order
    fn two_cars_mut(&mut self, id_1: u64, id_2: u64) -> Option<(&mut Car, &mut Car)> {
        if id_1 == id_2 {
            return None;
        }

        let mut range = self.cars.range_mut(id_1.min(id_2)..=id_1.max(id_2));
        let (&low_id, low) = range.next()?;
        let (&high_id, high) = range.next_back()?;
        if low_id != id_1.min(id_2) || high_id != id_1.max(id_2) {
            return None;
        }

        Some(if id_1 < id_2 { (low, high) } else { (high, low) })
    }

    fn on_car_ball_collision(
        &mut self,
        car_id: u64,
        manifold_point: &mut ManifoldPoint,
        rel_ball_pos: Vec3A,
    ) {
        manifold_point.combined_friction = CAR_BALL_COEFS.friction;
        manifold_point.combined_restitution = CAR_BALL_COEFS.restitution;

        let Some(car) = self.cars.get_mut(&car_id) else {
            return;
        };

        self.ball.on_hit(
            car,
            rel_ball_pos,
            self.tick_count,
            self.game_mode,
            &self.mutator_config,
        );
    }

    fn on_car_world_collision(
        &mut self,
        car_id: u64,
        manifold_point: &mut ManifoldPoint,
        normal: Vec3A,
    ) {
        manifold_point.combined_friction = self.mutator_config.car_world_friction;
        manifold_point.combined_restitution = self.mutator_config.car_world_restitution;

        if let Some(car) = self.cars.get_mut(&car_id) {
            car.internal_state.world_contact_normal = Some(normal);
        }
    }

    fn on_ball_world_collision(&mut self, manifold_point: &mut ManifoldPoint, normal: Vec3A) {
        manifold_point.combined_friction = self.mutator_config.ball_world_friction;
        manifold_point.combined_restitution = self.mutator_config.ball_world_restitution;

        self.ball.on_world_hit(self.game_mode, normal);
    }

    fn on_ball_tile_collision(&mut self, tile_pointer: u64, manifold_point: &mut ManifoldPoint) {
        manifold_point.combined_friction = self.mutator_config.ball_world_friction;
        manifold_point.combined_restitution = self.mutator_config.ball_world_restitution;

        let tile = DropshotTiles::from_tile_pointer(tile_pointer);
        if !self.touched_tiles.contains(&tile) {
            self.touched_tiles.push(tile);
        }
    }

    fn on_car_car_collision(
        &mut self,
        car_1_id: u64,
        car_2_id: u64,
        manifold_point: &mut ManifoldPoint,
    ) {
        manifold_point.combined_friction = CAR_CAR_COEFS.friction;
        manifold_point.combined_restitution = CAR_CAR_COEFS.restitution;

        let tick_count = self.tick_count;
        let mutator_config = self.mutator_config;
        let bump_callback = self.car_bump_callback.clone();
        let Some((car_1, car_2)) = self.two_cars_mut(car_1_id, car_2_id) else {
            return;
        };

        let state_1 = *car_1.get_state();
        let state_2 = *car_2.get_state();
        if state_1.is_demoed || state_2.is_demoed {
            return;
        }

        // Test the hit both ways
        for is_swapped in [false, true] {
            let (bumper, victim, bumper_state, victim_state, local_point) = if is_swapped {
                (&mut *car_2, &mut *car_1, &state_2, &state_1, manifold_point.local_point_b)
            } else {
                (&mut *car_1, &mut *car_2, &state_1, &state_2, manifold_point.local_point_a)
            };

            let Some(is_demo) = Self::try_bump(
                bumper,
                victim,
                bumper_state,
                victim_state,
                local_point,
                &mutator_config,
            ) else {
                continue;
            };

            log::debug!(
                "car {} {} car {} on tick {tick_count}",
                bumper.id(),
                if is_demo { "demolished" } else { "bumped" },
                victim.id()
            );

            if let Some(callback) = &bump_callback {
                callback(&CarBumpEvent {
                    tick_count,
                    bumper_id: bumper.id(),
                    victim_id: victim.id(),
                    is_demo,
                });
            }
        }
    }

    /// Bump or demolish `victim` if `bumper` drove into it with its front bumper
    ///
    /// Returns whether it was a demo, or `None` if nothing happened
    fn try_bump(
        bumper: &mut Car,
        victim: &mut Car,
        bumper_state: &CarState,
        victim_state: &CarState,
        local_point: Vec3A,
        mutator_config: &MutatorConfig,
    ) -> Option<bool> {
        if let Some(car_contact) = bumper.internal_state.car_contact
            && car_contact.other_car_id == victim.id()
            && car_contact.cooldown_timer > 0.0
        {
            return None;
        }

        let delta_pos = victim_state.pos - bumper_state.pos;
        if bumper_state.vel.dot(delta_pos) < 0.0 {
            // Moving away from the other car
            return None;
        }

        let vel_dir = bumper_state.vel.normalize_or_zero();
        let dir_to_other_car = delta_pos.normalize_or_zero();

        let speed_towards_other_car = bumper_state.vel.dot(dir_to_other_car);
        let other_car_away_speed = victim_state.vel.dot(vel_dir);
        if speed_towards_other_car <= other_car_away_speed {
            return None;
        }

        if local_point.x <= bump::MIN_FORWARD_DIST {
            // Didn't hit with the bumper
            return None;
        }

        let mut is_demo = match mutator_config.demo_mode {
            DemoMode::OnContact => true,
            DemoMode::Disabled => false,
            DemoMode::Normal => bumper_state.is_supersonic,
        };
        if is_demo && !mutator_config.enable_team_demos {
            is_demo = bumper.team() != victim.team();
        }

        if is_demo {
            victim.demolish(mutator_config.respawn_delay);
        } else {
            let base_scale = if victim_state.is_on_ground {
                curves::BUMP_VEL_AMOUNT_GROUND
            } else {
                curves::BUMP_VEL_AMOUNT_AIR
            }
            .get_output(speed_towards_other_car);

            let hit_up_dir = if victim_state.is_on_ground {
                victim_state.phys.rot_mat.z_axis
            } else {
                Vec3A::Z
            };

            let bump_impulse = vel_dir * base_scale
                + hit_up_dir
                    * curves::BUMP_UPWARD_VEL_AMOUNT.get_output(speed_towards_other_car)
                    * mutator_config.bump_force_scale;

            victim.velocity_impulse_cache += bump_impulse;
        }

        bumper.internal_state.car_contact = Some(CarContact {
            other_car_id: victim.id(),
            cooldown_timer: mutator_config.bump_cooldown_time,
        });

        Some(is_demo)
    }
}

impl ContactAddedCallback for Objects {
    fn callback(
        &mut self,
        contact_point: &mut ManifoldPoint,
        body_a: &CollisionObject,
        body_b: &CollisionObject,
    ) {
        // Entities first, cars before the ball
        let should_swap = if body_a.user_index != UserInfoTypes::None
            && body_b.user_index != UserInfoTypes::None
        {
            body_a.user_index > body_b.user_index
        } else {
            body_b.user_index != UserInfoTypes::None
        };

        let (body_a, body_b) = if should_swap {
            (body_b, body_a)
        } else {
            (body_a, body_b)
        };

        // Points from body B towards body A
        let normal_on_b = if should_swap {
            -contact_point.normal_world_on_b
        } else {
            contact_point.normal_world_on_b
        };
        let local_point_b = if should_swap {
            contact_point.local_point_a
        } else {
            contact_point.local_point_b
        };

        match (body_a.user_index, body_b.user_index) {
            (UserInfoTypes::Car, UserInfoTypes::Ball) => {
                self.on_car_ball_collision(body_a.user_pointer, contact_point, local_point_b);
            }
            (UserInfoTypes::Car, UserInfoTypes::Car) => {
                self.on_car_car_collision(body_a.user_pointer, body_b.user_pointer, contact_point);
            }
            (UserInfoTypes::Car, UserInfoTypes::None) => {
                self.on_car_world_collision(body_a.user_pointer, contact_point, normal_on_b);
            }
            (UserInfoTypes::Ball, UserInfoTypes::None) => {
                self.on_ball_world_collision(contact_point, normal_on_b);
            }
            (UserInfoTypes::Ball, UserInfoTypes::DropshotTile) => {
                self.on_ball_tile_collision(body_b.user_pointer, contact_point);
            }
            _ => {}
        }
    }
}
