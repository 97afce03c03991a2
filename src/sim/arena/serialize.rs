use std::io::{Read, Write};

use ahash::AHashSet;
use fastrand::Rng;

use super::{Arena, ArenaConfig, ArenaGeometryLoader, DefaultArenaGeometry};
use crate::{
    ArenaError, BallState, BoostPadState, Car, CarConfig, CarState, DropshotTilesState, GameMode,
    MutatorConfig, Team, TileState, consts,
    data_stream::{StreamValue, write_len},
    error::invariant_violation,
    physics::{DiscreteDynamicsWorld, PhysicsEngine},
};

const NUM_TILES: usize = consts::dropshot::NUM_TILES_PER_TEAM;

impl Car {
    /// Write this car's config and state
    pub fn serialize<W: Write>(&self, out: &mut W) -> Result<(), ArenaError> {
        self.config().write_to(out)?;
        self.get_state().write_to(out)?;
        Ok(())
    }
}

impl Arena {
    /// Rebuild an arena written by [`Arena::serialize`], using the default engine and geometry
    pub fn deserialize_new<R: Read>(input: &mut R) -> Result<Self, ArenaError> {
        let engine = DiscreteDynamicsWorld::default();
        Self::deserialize_new_with_engine(input, engine, &DefaultArenaGeometry)
    }
}

impl<E: PhysicsEngine> Arena<E> {
    /// Write the whole arena
    ///
    /// Stepping the result of [`Arena::deserialize_new`] gives bit-identical results to stepping
    /// this arena
    pub fn serialize<W: Write>(&self, out: &mut W) -> Result<(), ArenaError> {
        self.objects.game_mode.write_to(out)?;
        self.tick_time.write_to(out)?;
        self.objects.tick_count.write_to(out)?;
        self.last_car_id.write_to(out)?;
        self.rng.get_seed().write_to(out)?;
        self.config.write_to(out)?;
        self.objects.mutator_config.write_to(out)?;

        write_len(out, self.objects.cars.len())?;
        for car in self.objects.cars.values() {
            car.id().write_to(out)?;
            car.team().write_to(out)?;
            car.serialize(out)?;
        }

        self.objects.ball.get_state().write_to(out)?;

        let pads = self.objects.boost_pads.pads();
        write_len(out, pads.len())?;
        for pad in pads {
            pad.get_state().write_to(out)?;
        }

        if let Some(tiles) = &self.dropshot_tiles {
            for team_states in &tiles.state.states {
                team_states.write_to(out)?;
            }
        }

        log::trace!("serialized arena at tick {}", self.objects.tick_count);
        Ok(())
    }

    pub fn deserialize_new_with_engine<R: Read>(
        input: &mut R,
        engine: E,
        loader: &impl ArenaGeometryLoader,
    ) -> Result<Self, ArenaError> {
        let game_mode = GameMode::read_from(input)?;
        let tick_time = f32::read_from(input)?;
        let tick_count = u64::read_from(input)?;
        let last_car_id = u64::read_from(input)?;
        let rng_seed = u64::read_from(input)?;
        let config = ArenaConfig::read_from(input)?;
        let mutator_config = MutatorConfig::read_from(input)?;

        // 1 / (1 / rate) can land just outside of the valid range
        let tick_rate = 1.0 / tick_time;
        let tick_rate = if (tick_rate - consts::MAX_TICK_RATE).abs() < 1e-3 {
            consts::MAX_TICK_RATE
        } else if (tick_rate - consts::MIN_TICK_RATE).abs() < 1e-3 {
            consts::MIN_TICK_RATE
        } else {
            tick_rate
        };

        let mut arena = Self::new_with_engine(game_mode, config, tick_rate, engine, loader)?;
        arena.tick_time = tick_time;
        arena.set_mutator_config(mutator_config);
        arena.objects.tick_count = tick_count;
        arena.last_car_id = last_car_id;
        arena.rng = Rng::with_seed(rng_seed);

        let num_cars = u32::read_from(input)?;
        let mut seen_ids = AHashSet::with_capacity(num_cars.min(64) as usize);
        for _ in 0..num_cars {
            let id = u64::read_from(input)?;
            if id == 0 {
                return invariant_violation!(ArenaError::InvalidCarId(id));
            }
            if !seen_ids.insert(id) {
                return invariant_violation!(ArenaError::DuplicateCar(id));
            }

            let team = Team::read_from(input)?;
            arena.read_car(input, id, team)?;
        }

        let ball_state = BallState::read_from(input)?;
        arena.set_ball_state(ball_state);

        let num_pads = u32::read_from(input)? as usize;
        let expected = arena.num_boost_pads();
        if num_pads != expected {
            return invariant_violation!(ArenaError::BoostPadMismatch {
                expected,
                actual: num_pads,
            });
        }

        for pad in arena.objects.boost_pads.pads_mut() {
            pad.set_state(BoostPadState::read_from(input)?);
        }

        if game_mode == GameMode::Dropshot {
            let state = DropshotTilesState {
                states: [Vec::<TileState>::read_from(input)?, Vec::read_from(input)?],
            };
            if let Some(actual) = state.states.iter().map(Vec::len).find(|&len| len != NUM_TILES) {
                return invariant_violation!(ArenaError::TileStateMismatch {
                    expected: NUM_TILES,
                    actual,
                });
            }

            arena.set_dropshot_tiles_state(state);
        }

        log::debug!(
            "deserialized {} arena at tick {tick_count} with {num_cars} cars",
            game_mode.name()
        );
        Ok(arena)
    }

    /// Read a car written by [`Car::serialize`] and add it with a new id
    pub fn deserialize_new_car<R: Read>(
        &mut self,
        input: &mut R,
        team: Team,
    ) -> Result<u64, ArenaError> {
        self.last_car_id += 1;
        let id = self.last_car_id;
        self.read_car(input, id, team)?;
        Ok(id)
    }

    fn read_car<R: Read>(&mut self, input: &mut R, id: u64, team: Team) -> Result<(), ArenaError> {
        let config = CarConfig::read_from(input)?;
        let state = CarState::read_from(input)?;

        let mut car = Car::new(id, team, config, &mut self.engine, &self.objects.mutator_config);
        car.set_state(self.engine.body_mut(car.rigid_body_idx), &state);

        self.last_car_id = self.last_car_id.max(id);
        self.objects.cars.insert(id, car);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::{Arena, ArenaConfig, ArenaError, CarConfig, GameMode, Team};

    fn seeded(seed: u64) -> Arena {
        Arena::new_with_config(GameMode::Soccar, ArenaConfig::with_seed(seed), 120.0).unwrap()
    }

    #[test]
    fn truncated_arena_fails() {
        let mut arena = seeded(1);
        arena.add_car(Team::Blue, CarConfig::OCTANE);

        let mut bytes = Vec::new();
        arena.serialize(&mut bytes).unwrap();
        bytes.truncate(bytes.len() - 3);

        let err = Arena::deserialize_new(&mut Cursor::new(bytes)).err().unwrap();
        assert!(matches!(err, ArenaError::Io(_)));
    }

    #[test]
    fn car_moves_between_arenas() {
        let mut from = seeded(1);
        let id = from.add_car(Team::Orange, CarConfig::MERC);
        from.step(30);

        let mut bytes = Vec::new();
        from.get_car(id).unwrap().serialize(&mut bytes).unwrap();

        let mut to = seeded(2);
        to.add_car(Team::Blue, CarConfig::OCTANE);
        let new_id = to.deserialize_new_car(&mut Cursor::new(bytes), Team::Orange).unwrap();

        assert_eq!(new_id, 2);
        assert_eq!(to.get_car_state(new_id), from.get_car_state(id));
        assert_eq!(to.get_car(new_id).unwrap().config(), &CarConfig::MERC);
    }
}
