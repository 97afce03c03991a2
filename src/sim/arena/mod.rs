mod arena_config;
mod dropshot;
mod events;
mod geometry;
mod objects;
mod serialize;

pub use arena_config::*;
pub use events::*;
pub use geometry::*;

use std::{collections::BTreeMap, sync::Arc};

use dropshot::DropshotTiles;
use fastrand::Rng;
use glam::Vec3A;
use objects::Objects;

use crate::{
    ArenaError, Ball, BallState, BoostPad, BoostPadConfig, BoostPadGrid, BoostPadState, Car,
    CarConfig, CarControls, CarState, DropshotTilesState, GameMode, GameState, MutatorConfig,
    PhysState, Team,
    error::invariant_violation,
    math::Angle,
    physics::{
        CollisionFilterGroups, CollisionShapes, DiscreteDynamicsWorld, PhysicsEngine, RigidBody,
    },
    sim::{
        BoostPadInfo, CarInfo, CollisionMasks,
        consts::{self, car::spawn, hoops},
    },
};

/// Everything an arena owned, handed back by [`Arena::into_parts`]
///
/// The cars and the ball still refer to their bodies inside `engine`.
pub struct ArenaParts<E> {
    pub engine: E,
    pub game_mode: GameMode,
    pub mutator_config: MutatorConfig,
    pub tick_count: u64,
    /// Ordered by id
    pub cars: Vec<Car>,
    pub ball: Ball,
    pub boost_pads: Vec<BoostPad>,
    /// Only in dropshot
    pub dropshot_tiles: Option<DropshotTilesState>,
}

/// The container for all game simulation
///
/// Stores cars, the ball, boost pads, all arena collisions, and manages the overall game state
pub struct Arena<E: PhysicsEngine = DiscreteDynamicsWorld> {
    engine: E,
    rng: Rng,
    tick_time: f32,
    last_car_id: u64,
    config: ArenaConfig,
    objects: Objects,
    dropshot_tiles: Option<DropshotTiles>,
    goal_score_callback: Option<GoalScoreCallback>,
}

impl Arena {
    /// An arena with the default config, geometry and engine, ticking at 120hz
    #[must_use]
    pub fn new(game_mode: GameMode) -> Self {
        Self::from_geometry(
            game_mode,
            ArenaConfig::DEFAULT,
            1.0 / consts::DEFAULT_TICK_RATE,
            DiscreteDynamicsWorld::default(),
            DefaultArenaGeometry::build(game_mode),
        )
    }

    pub fn new_with_config(
        game_mode: GameMode,
        config: ArenaConfig,
        tick_rate: f32,
    ) -> Result<Self, ArenaError> {
        Self::new_with_engine(
            game_mode,
            config,
            tick_rate,
            DiscreteDynamicsWorld::default(),
            &DefaultArenaGeometry,
        )
    }
}

impl<E: PhysicsEngine> Arena<E> {
    /// Build an arena around an injected physics engine and geometry source
    ///
    /// Fails if `tick_rate` is outside of [15, 120] or the loader has no geometry for `game_mode`
    pub fn new_with_engine(
        game_mode: GameMode,
        config: ArenaConfig,
        tick_rate: f32,
        engine: E,
        loader: &impl ArenaGeometryLoader,
    ) -> Result<Self, ArenaError> {
        if !(consts::MIN_TICK_RATE..=consts::MAX_TICK_RATE).contains(&tick_rate) {
            return invariant_violation!(ArenaError::InvalidTickRate(tick_rate));
        }

        let geometry = loader.load(game_mode)?;
        if game_mode.has_arena_stuff() && geometry.is_empty() {
            return invariant_violation!(ArenaError::MissingGeometry(game_mode.name()));
        }

        Ok(Self::from_geometry(
            game_mode,
            config,
            1.0 / tick_rate,
            engine,
            geometry,
        ))
    }

    fn from_geometry(
        game_mode: GameMode,
        config: ArenaConfig,
        tick_time: f32,
        mut engine: E,
        geometry: StaticGeometry,
    ) -> Self {
        let mutator_config = MutatorConfig::new(game_mode);
        engine.set_gravity(mutator_config.gravity);

        let num_static_shapes = geometry.num_shapes();
        let shapes = geometry
            .planes
            .into_iter()
            .map(CollisionShapes::StaticPlane)
            .chain(geometry.boxes.into_iter().map(CollisionShapes::StaticBox));
        let static_group = CollisionFilterGroups::Static as u8;
        for shape in shapes {
            Self::add_static_collision_shape(&mut engine, shape, static_group);
        }
        for aabb in geometry.ball_only_boxes {
            let shape = CollisionShapes::StaticBox(aabb);
            Self::add_static_collision_shape(&mut engine, shape, CollisionMasks::HoopsNet as u8);
        }
        for plane in geometry.car_only_planes {
            let shape = CollisionShapes::StaticPlane(plane);
            let group = CollisionMasks::DropshotFloor as u8;
            Self::add_static_collision_shape(&mut engine, shape, group);
        }

        let dropshot_tiles =
            (game_mode == GameMode::Dropshot).then(|| DropshotTiles::new(&mut engine));

        let ball = Ball::new(&mut engine, &mutator_config, config.no_ball_rot);

        let pad_configs = if !game_mode.has_boost_pads() {
            Vec::new()
        } else if config.use_custom_boost_pads {
            config.custom_boost_pads.clone()
        } else {
            BoostPadConfig::default_layout(game_mode)
        };

        let rng = match config.rng_seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };

        log::debug!(
            "created {} arena at {}hz with {num_static_shapes} static shapes and {} boost pads",
            game_mode.name(),
            1.0 / tick_time,
            pad_configs.len()
        );

        Self {
            engine,
            rng,
            tick_time,
            last_car_id: 0,
            config,
            objects: Objects {
                ball,
                cars: BTreeMap::new(),
                boost_pads: BoostPadGrid::new(&pad_configs),
                tick_count: 0,
                game_mode,
                mutator_config,
                car_bump_callback: None,
                touched_tiles: Vec::new(),
            },
            dropshot_tiles,
            goal_score_callback: None,
        }
    }

    /// Static geometry in the `Static` group collides with everything,
    /// any other group only collides with bodies sharing it
    fn add_static_collision_shape(engine: &mut E, shape: CollisionShapes, group: u8) {
        let body = RigidBody::new_static(
            shape,
            consts::arena::COEFS.friction,
            consts::arena::COEFS.restitution,
        );

        let mask = if group == CollisionFilterGroups::Static as u8 {
            CollisionFilterGroups::All as u8
        } else {
            group
        };
        engine.add_rigid_body(body, group, mask);
    }

    #[inline]
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.objects.tick_count
    }

    /// Time in seconds each tick (1/tickrate)
    #[inline]
    #[must_use]
    pub const fn tick_time(&self) -> f32 {
        self.tick_time
    }

    #[inline]
    #[must_use]
    pub fn get_tick_rate(&self) -> f32 {
        1.0 / self.tick_time
    }

    #[inline]
    #[must_use]
    pub const fn game_mode(&self) -> GameMode {
        self.objects.game_mode
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &ArenaConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub const fn mutator_config(&self) -> &MutatorConfig {
        &self.objects.mutator_config
    }

    #[inline]
    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Swap the ruleset between steps
    ///
    /// Every body is rebuilt, so new masses, gravity and ball radius take effect immediately
    pub fn set_mutator_config(&mut self, mutator_config: MutatorConfig) {
        for car in self.objects.cars.values_mut() {
            car.detach(&mut self.engine);
        }
        self.objects.ball.detach(&mut self.engine);

        self.objects.mutator_config = mutator_config;
        self.engine.set_gravity(mutator_config.gravity);

        self.objects
            .ball
            .attach(&mut self.engine, &mutator_config, self.config.no_ball_rot);
        for car in self.objects.cars.values_mut() {
            car.attach(&mut self.engine, &mutator_config);
        }

        log::debug!("mutator config replaced, rebuilt {} car bodies", self.objects.cars.len());
    }

    /// Adds a car to the match at a random respawn location, returning the id of the car
    pub fn add_car(&mut self, team: Team, config: CarConfig) -> u64 {
        self.last_car_id += 1;
        let id = self.last_car_id;

        let mut car = Car::new(id, team, config, &mut self.engine, &self.objects.mutator_config);
        car.respawn(
            self.engine.body_mut(car.rigid_body_idx),
            &mut self.rng,
            self.objects.game_mode,
            self.objects.mutator_config.car_spawn_boost_amount,
        );

        self.objects.cars.insert(id, car);
        log::debug!("added car {id} to {team:?}");
        id
    }

    /// Put a car that was removed from an arena back into this one, keeping its state
    ///
    /// The car keeps its id unless that id is 0, in which case a new one is assigned
    pub fn add_car_from(&mut self, mut car: Car) -> Result<u64, ArenaError> {
        if car.id == 0 {
            self.last_car_id += 1;
            car.id = self.last_car_id;
        } else if self.objects.cars.contains_key(&car.id) {
            return invariant_violation!(ArenaError::DuplicateCar(car.id));
        }

        self.last_car_id = self.last_car_id.max(car.id);
        car.attach(&mut self.engine, &self.objects.mutator_config);

        let id = car.id;
        self.objects.cars.insert(id, car);
        log::debug!("re-added car {id}");
        Ok(id)
    }

    /// Remove a car and its body, handing it back to the caller
    pub fn remove_car(&mut self, id: u64) -> Option<Car> {
        let mut car = self.objects.cars.remove(&id)?;
        car.detach(&mut self.engine);

        log::debug!("removed car {id}");
        Some(car)
    }

    #[must_use]
    pub fn get_car(&self, id: u64) -> Option<&Car> {
        self.objects.cars.get(&id)
    }

    #[must_use]
    pub fn get_car_state(&self, id: u64) -> Option<&CarState> {
        self.objects.cars.get(&id).map(Car::get_state)
    }

    /// Returns false if no car has this id
    pub fn set_car_state(&mut self, id: u64, state: &CarState) -> bool {
        let Some(car) = self.objects.cars.get_mut(&id) else {
            return false;
        };

        car.set_state(self.engine.body_mut(car.rigid_body_idx), state);
        true
    }

    /// Returns false if no car has this id
    pub fn set_car_controls(&mut self, id: u64, controls: CarControls) -> bool {
        let Some(car) = self.objects.cars.get_mut(&id) else {
            return false;
        };

        car.set_controls(controls);
        true
    }

    /// Demolish a car right away, returns false if no car has this id
    pub fn demolish_car(&mut self, id: u64) -> bool {
        let Some(car) = self.objects.cars.get_mut(&id) else {
            return false;
        };

        car.demolish(self.objects.mutator_config.respawn_delay);
        true
    }

    /// Ids of every car, ascending
    pub fn car_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.objects.cars.keys().copied()
    }

    /// Every car, ordered by id
    pub fn cars(&self) -> impl Iterator<Item = &Car> {
        self.objects.cars.values()
    }

    #[must_use]
    pub fn num_cars(&self) -> usize {
        self.objects.cars.len()
    }

    #[must_use]
    pub const fn get_ball_state(&self) -> &BallState {
        self.objects.ball.get_state()
    }

    pub fn set_ball_state(&mut self, state: BallState) {
        let ball = &mut self.objects.ball;
        ball.set_state(self.engine.body_mut(ball.rigid_body_idx), state);
    }

    #[must_use]
    pub fn boost_pads(&self) -> &[BoostPad] {
        self.objects.boost_pads.pads()
    }

    #[must_use]
    pub fn num_boost_pads(&self) -> usize {
        self.objects.boost_pads.pads().len()
    }

    #[must_use]
    pub fn get_boost_pad_config(&self, idx: usize) -> Option<&BoostPadConfig> {
        self.boost_pads().get(idx).map(BoostPad::config)
    }

    #[must_use]
    pub fn get_boost_pad_state(&self, idx: usize) -> Option<&BoostPadState> {
        self.boost_pads().get(idx).map(BoostPad::get_state)
    }

    /// Returns false if there is no pad at `idx`
    pub fn set_boost_pad_state(&mut self, idx: usize, state: BoostPadState) -> bool {
        let Some(pad) = self.objects.boost_pads.pads_mut().get_mut(idx) else {
            return false;
        };

        pad.set_state(BoostPadState {
            cur_locked_car_id: None,
            ..state
        });
        true
    }

    /// The damage state of every tile, only in dropshot
    #[must_use]
    pub fn get_dropshot_tiles_state(&self) -> Option<&DropshotTilesState> {
        self.dropshot_tiles.as_ref().map(|tiles| &tiles.state)
    }

    /// Returns false if this isn't a dropshot arena or `state` doesn't have every tile
    pub fn set_dropshot_tiles_state(&mut self, state: DropshotTilesState) -> bool {
        let Some(tiles) = &mut self.dropshot_tiles else {
            return false;
        };
        if !state.is_complete() {
            return false;
        }

        tiles.set_state(state, &mut self.engine);
        true
    }

    /// Called with the scoring team whenever the ball is in a net after a tick
    pub fn set_goal_score_callback<F>(&mut self, callback: F)
    where
        F: Fn(&GoalScoreEvent) + Send + Sync + 'static,
    {
        self.goal_score_callback = Some(Arc::new(callback));
    }

    /// Called during the physics step whenever a car bumps or demolishes another
    pub fn set_car_bump_callback<F>(&mut self, callback: F)
    where
        F: Fn(&CarBumpEvent) + Send + Sync + 'static,
    {
        self.objects.car_bump_callback = Some(Arc::new(callback));
    }

    pub fn clear_callbacks(&mut self) {
        self.goal_score_callback = None;
        self.objects.car_bump_callback = None;
    }

    /// Simulate everything in the arena for a given number of ticks
    pub fn step(&mut self, ticks_to_simulate: u32) {
        for _ in 0..ticks_to_simulate {
            self.internal_step();
        }
    }

    fn internal_step(&mut self) {
        let tick_time = self.tick_time;
        let game_mode = self.objects.game_mode;
        let mutator_config = self.objects.mutator_config;
        let has_boost_pads = game_mode.has_boost_pads();

        for car in self.objects.cars.values_mut() {
            car.pre_tick_update(
                &mut self.engine,
                &mut self.rng,
                game_mode,
                tick_time,
                &mutator_config,
            );
        }

        if has_boost_pads {
            self.objects.boost_pads.pre_tick_update(tick_time);
        }

        let ball = &mut self.objects.ball;
        ball.pre_tick_update(self.engine.body_mut(ball.rigid_body_idx), game_mode, tick_time);

        self.engine.step_simulation(tick_time, &mut self.objects);

        let Objects {
            cars, boost_pads, ..
        } = &mut self.objects;
        for car in cars.values_mut() {
            let rb = self.engine.body_mut(car.rigid_body_idx);
            car.post_tick_update(tick_time, rb);
            car.finish_physics_tick(rb);

            if has_boost_pads {
                boost_pads.check_collision(car, &mutator_config);
            }
        }

        if has_boost_pads {
            for pad in boost_pads.pads_mut() {
                let locked_car = match pad.get_state().cur_locked_car_id {
                    Some(id) => cars.get_mut(&id).map(|car| &mut car.internal_state),
                    None => None,
                };
                pad.post_tick_update(locked_car, &mutator_config);
            }
        }

        let ball = &mut self.objects.ball;
        ball.finish_physics_tick(self.engine.body_mut(ball.rigid_body_idx), &mutator_config);

        let touched_tiles = std::mem::take(&mut self.objects.touched_tiles);
        if let Some(tiles) = &mut self.dropshot_tiles
            && !touched_tiles.is_empty()
            && ball.try_damage_tiles(
                &mut tiles.state,
                &touched_tiles,
                self.objects.tick_count,
                tick_time,
            )
        {
            tiles.sync_bodies(&mut self.engine);
        }

        if self.is_ball_scored() {
            let scoring_team = Team::from_team_y(self.get_ball_state().pos.y).opposite();
            log::debug!("{scoring_team:?} scored on tick {}", self.objects.tick_count);

            if let Some(callback) = &self.goal_score_callback {
                callback(&GoalScoreEvent {
                    tick_count: self.objects.tick_count,
                    scoring_team,
                });
            }

            if self.config.reset_on_goal {
                self.reset_to_random_kickoff(None);
            }
        }

        self.objects.tick_count += 1;
    }

    /// Returns true if the ball is in a net, or fell through the floor in dropshot
    #[must_use]
    pub fn is_ball_scored(&self) -> bool {
        let mutator_config = &self.objects.mutator_config;
        let ball_pos = self.get_ball_state().pos;
        match self.objects.game_mode {
            GameMode::Soccar | GameMode::Heatseeker => {
                ball_pos.y.abs() > mutator_config.goal_base_threshold_y + mutator_config.ball_radius
            }
            GameMode::Hoops => {
                ball_pos.z < hoops::GOAL_SCORE_THRESHOLD_Z
                    && Self::hoops_goal_margin(ball_pos.x, ball_pos.y) < 0.0
            }
            GameMode::Dropshot => ball_pos.z < -mutator_config.ball_radius * 1.75,
            GameMode::TheVoid => false,
        }
    }

    /// Negative inside a hoops scoring zone
    fn hoops_goal_margin(x: f32, y: f32) -> f32 {
        let dy = y.abs() * hoops::GOAL_SCALE_Y - hoops::GOAL_OFFSET_Y;
        x * x + dy * dy - hoops::GOAL_RADIUS * hoops::GOAL_RADIUS
    }

    /// The team that will probably score within `max_time` seconds, if any
    ///
    /// Extrapolates the ball to the goal line with gravity but without bounces,
    /// and purposefully overestimates by the ball radius plus `extra_margin`
    /// (negative to prevent overestimating)
    #[must_use]
    ///
    /// Always `None` outside of soccar and heatseeker
    pub fn is_ball_probably_going_in(&self, max_time: f32, extra_margin: f32) -> Option<Team> {
        if !matches!(self.objects.game_mode, GameMode::Soccar | GameMode::Heatseeker) {
            return None;
        }

        let mutator_config = &self.objects.mutator_config;
        let ball = self.get_ball_state();
        if ball.vel.y.abs() < f32::EPSILON {
            return None;
        }

        let score_dir = ball.vel.y.signum();
        let goal_y = mutator_config.goal_base_threshold_y * score_dir;
        let time_to_goal = (goal_y - ball.pos.y) / ball.vel.y;
        if !(0.0..=max_time).contains(&time_to_goal) {
            return None;
        }

        let extrap_pos = ball.pos
            + ball.vel * time_to_goal
            + mutator_config.gravity * (0.5 * time_to_goal * time_to_goal);

        let margin = mutator_config.ball_radius + extra_margin;
        let in_goal = extrap_pos.x.abs() < consts::goal::SOCCAR_GOAL_HALF_WIDTH + margin
            && extrap_pos.z < consts::goal::SOCCAR_GOAL_HEIGHT + margin;

        // Shooting into the orange net scores for blue
        in_goal.then(|| Team::from_team_y(score_dir).opposite())
    }

    /// Move every car to a shuffled kickoff spot, reset the ball, every boost pad and every tile
    ///
    /// Uses the arena's RNG unless a seed is given
    pub fn reset_to_random_kickoff(&mut self, seed: Option<u64>) {
        const CAR_SPAWN_EXTRA_OFFSET_Y: f32 = 250.0;

        let mut seeded_rng;
        let rng = match seed {
            Some(seed) => {
                seeded_rng = Rng::with_seed(seed);
                &mut seeded_rng
            }
            None => &mut self.rng,
        };

        let game_mode = self.objects.game_mode;
        let kickoff_locations = spawn::get_kickoff_locations(game_mode);
        let respawn_locations = spawn::get_respawn_locations(game_mode);

        let mut kickoff_order: Vec<usize> = (0..kickoff_locations.len()).collect();
        rng.shuffle(&mut kickoff_order);

        let mut team_cars: [Vec<&mut Car>; 2] = [Vec::new(), Vec::new()];
        for car in self.objects.cars.values_mut() {
            team_cars[car.team() as usize].push(car);
        }

        let mut num_cars_at_respawn_pos = vec![0u16; respawn_locations.len()];
        let spawn_boost = self.objects.mutator_config.car_spawn_boost_amount;

        let num_positions = team_cars[0].len().max(team_cars[1].len());
        for i in 0..num_positions {
            let spawn_pos = if let Some(&kickoff_idx) = kickoff_order.get(i) {
                kickoff_locations[kickoff_idx]
            } else {
                // More cars than kickoff spots, line the rest up behind the respawn spots
                let respawn_idx = (i - kickoff_locations.len()) % respawn_locations.len();
                let mut pos = respawn_locations[respawn_idx];
                pos.y -= CAR_SPAWN_EXTRA_OFFSET_Y * f32::from(num_cars_at_respawn_pos[respawn_idx]);
                num_cars_at_respawn_pos[respawn_idx] += 1;
                pos
            };

            let blue_phys = PhysState {
                rot_mat: Angle::new(spawn_pos.yaw_ang, 0.0, 0.0).to_rot_mat(),
                ..PhysState::at_rest(Vec3A::new(spawn_pos.x, spawn_pos.y, spawn::SPAWN_Z))
            };

            for (team, cars) in Team::ALL.into_iter().zip(&mut team_cars) {
                let Some(car) = cars.get_mut(i) else {
                    continue;
                };

                let phys = match team {
                    Team::Blue => blue_phys,
                    Team::Orange => blue_phys.get_inverted_y(),
                };

                let state = CarState {
                    phys,
                    boost: spawn_boost,
                    ..CarState::DEFAULT
                };
                car.set_state(self.engine.body_mut(car.rigid_body_idx), &state);
            }
        }

        let ball_state =
            Ball::kickoff_state(game_mode, rng, self.objects.mutator_config.ball_radius);
        let ball = &mut self.objects.ball;
        ball.set_state(self.engine.body_mut(ball.rigid_body_idx), ball_state);

        self.objects.boost_pads.reset();
        if let Some(tiles) = &mut self.dropshot_tiles {
            tiles.set_state(DropshotTilesState::new(), &mut self.engine);
        }
    }

    /// A snapshot of every car, the ball, every boost pad and every dropshot tile
    #[must_use]
    pub fn get_game_state(&self) -> GameState {
        GameState {
            tick_rate: self.get_tick_rate(),
            tick_count: self.objects.tick_count,
            game_mode: self.objects.game_mode,
            cars: self
                .cars()
                .map(|car| CarInfo {
                    id: car.id(),
                    team: car.team(),
                    state: *car.get_state(),
                    config: *car.config(),
                })
                .collect(),
            ball: *self.get_ball_state(),
            pads: self
                .boost_pads()
                .iter()
                .map(|pad| BoostPadInfo {
                    config: *pad.config(),
                    state: *pad.get_state(),
                })
                .collect(),
            tiles: self.get_dropshot_tiles_state().map(DropshotTilesState::tiles),
        }
    }

    /// Give up the arena, keeping its engine and entities
    #[must_use]
    pub fn into_parts(self) -> ArenaParts<E> {
        ArenaParts {
            engine: self.engine,
            game_mode: self.objects.game_mode,
            mutator_config: self.objects.mutator_config,
            tick_count: self.objects.tick_count,
            cars: self.objects.cars.into_values().collect(),
            ball: self.objects.ball,
            boost_pads: self.objects.boost_pads.all_pads,
            dropshot_tiles: self.dropshot_tiles.map(|tiles| tiles.state),
        }
    }
}

impl<E: PhysicsEngine + Clone> Arena<E> {
    /// A fully independent copy of the arena, optionally without the event callbacks
    #[must_use]
    pub fn clone_arena(&self, copy_callbacks: bool) -> Self {
        let mut objects = self.objects.clone();
        if !copy_callbacks {
            objects.car_bump_callback = None;
        }

        Self {
            engine: self.engine.clone(),
            rng: Rng::with_seed(self.rng.get_seed()),
            tick_time: self.tick_time,
            last_car_id: self.last_car_id,
            config: self.config.clone(),
            objects,
            dropshot_tiles: self.dropshot_tiles.clone(),
            goal_score_callback: self.goal_score_callback.clone().filter(|_| copy_callbacks),
        }
    }
}

impl<E: PhysicsEngine + Clone> Clone for Arena<E> {
    fn clone(&self) -> Self {
        self.clone_arena(true)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3A;

    use super::Arena;
    use crate::{ArenaConfig, BallState, CarConfig, GameMode, PhysState, Team};

    fn seeded(game_mode: GameMode) -> Arena {
        Arena::new_with_config(game_mode, ArenaConfig::with_seed(7), 120.0).unwrap()
    }

    #[test]
    fn rejects_bad_tick_rates() {
        for tick_rate in [0.0, 14.9, 121.0, f32::NAN] {
            let arena = Arena::new_with_config(GameMode::Soccar, ArenaConfig::DEFAULT, tick_rate);
            assert!(arena.is_err());
        }
    }

    #[test]
    fn ids_are_never_reused() {
        let mut arena = seeded(GameMode::Soccar);
        let first = arena.add_car(Team::Blue, CarConfig::OCTANE);
        assert!(arena.remove_car(first).is_some());
        let second = arena.add_car(Team::Blue, CarConfig::OCTANE);

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert!(arena.remove_car(first).is_none());
    }

    #[test]
    fn kickoff_mirrors_orange() {
        let mut arena = seeded(GameMode::Soccar);
        let blue = arena.add_car(Team::Blue, CarConfig::OCTANE);
        let orange = arena.add_car(Team::Orange, CarConfig::DOMINUS);
        arena.reset_to_random_kickoff(Some(3));

        let blue_pos = arena.get_car_state(blue).unwrap().pos;
        let orange_pos = arena.get_car_state(orange).unwrap().pos;
        assert_eq!(orange_pos, blue_pos * Vec3A::new(-1.0, -1.0, 1.0));
        assert!(blue_pos.y < 0.0);

        let blue_forward = arena.get_car(blue).unwrap().get_forward_dir();
        let orange_forward = arena.get_car(orange).unwrap().get_forward_dir();
        assert!((blue_forward + orange_forward).length() < 1e-5);
    }

    #[test]
    fn probably_going_in() {
        let mut arena = seeded(GameMode::Soccar);
        arena.set_ball_state(BallState {
            phys: PhysState {
                vel: Vec3A::new(0.0, 3000.0, 300.0),
                ..PhysState::at_rest(Vec3A::new(0.0, 3000.0, 200.0))
            },
            ..BallState::DEFAULT
        });

        assert_eq!(arena.is_ball_probably_going_in(2.0, 0.0), Some(Team::Blue));
        // too far away to arrive in time
        assert_eq!(arena.is_ball_probably_going_in(0.2, 0.0), None);

        arena.set_ball_state(BallState {
            phys: PhysState {
                vel: Vec3A::new(0.0, 3000.0, 0.0),
                ..PhysState::at_rest(Vec3A::new(3000.0, 3000.0, 200.0))
            },
            ..BallState::DEFAULT
        });
        assert_eq!(arena.is_ball_probably_going_in(2.0, 0.0), None);
    }

    #[test]
    fn void_never_scores() {
        let mut arena = seeded(GameMode::TheVoid);
        arena.set_ball_state(BallState {
            phys: PhysState::at_rest(Vec3A::new(0.0, 6000.0, 100.0)),
            ..BallState::DEFAULT
        });

        assert!(!arena.is_ball_scored());
        assert_eq!(arena.num_boost_pads(), 0);
    }
}
