mod common;

use carball::{
    Arena, ArenaConfig, ArenaError, BoostPadConfig, CarConfig, CarControls, DropshotTilesState,
    GameMode, MutatorConfig, PhysicsEngine, Team, TileState,
};
use common::{SEED, seeded_arena, serialized};
use glam::Vec3A;

fn busy_arena(game_mode: GameMode) -> Arena {
    let mut arena = seeded_arena(game_mode);
    for (i, config) in CarConfig::ALL_PRESETS.into_iter().enumerate() {
        let team = if i % 2 == 0 { Team::Blue } else { Team::Orange };
        let id = arena.add_car(team, config);
        arena.set_car_controls(
            id,
            CarControls {
                throttle: 1.0,
                steer: if i % 3 == 0 { 0.5 } else { -0.25 },
                boost: i % 2 == 1,
                jump: i == 4,
                ..CarControls::DEFAULT
            },
        );
    }

    arena.reset_to_random_kickoff(None);
    arena.step(90);
    arena
}

#[test]
fn round_trip_is_bit_identical() {
    for game_mode in GameMode::ALL {
        let arena = busy_arena(game_mode);
        let bytes = serialized(&arena);

        let restored = Arena::deserialize_new(&mut bytes.as_slice()).unwrap();
        assert_eq!(serialized(&restored), bytes, "{}", game_mode.name());
        assert_eq!(restored.tick_count(), arena.tick_count());
        assert_eq!(restored.get_game_state(), arena.get_game_state());
    }
}

#[test]
fn restored_arena_steps_identically() {
    let mut arena = busy_arena(GameMode::Soccar);
    let mut restored = Arena::deserialize_new(&mut serialized(&arena).as_slice()).unwrap();

    arena.step(240);
    restored.step(240);

    assert_eq!(serialized(&restored), serialized(&arena));
}

#[test]
fn mutators_and_custom_pads_survive() {
    let config = ArenaConfig {
        use_custom_boost_pads: true,
        custom_boost_pads: vec![
            BoostPadConfig::new(Vec3A::new(0.0, 1000.0, 73.0), true),
            BoostPadConfig::new(Vec3A::new(500.0, -200.0, 70.0), false),
        ],
        no_ball_rot: false,
        ..ArenaConfig::with_seed(SEED)
    };
    let mut arena = Arena::new_with_config(GameMode::Soccar, config.clone(), 60.0).unwrap();
    arena.set_mutator_config(MutatorConfig {
        gravity: Vec3A::new(0.0, 0.0, -325.0),
        ball_radius: 120.0,
        boost_used_per_second: 0.0,
        ..MutatorConfig::new(GameMode::Soccar)
    });
    arena.add_car(Team::Orange, CarConfig::PSYCLOPS);
    arena.step(20);

    let restored = Arena::deserialize_new(&mut serialized(&arena).as_slice()).unwrap();
    assert_eq!(restored.num_boost_pads(), 2);
    assert_eq!(restored.config().custom_boost_pads, config.custom_boost_pads);
    assert_eq!(restored.mutator_config(), arena.mutator_config());
    assert_eq!(restored.tick_time(), arena.tick_time());
    assert_eq!(restored.engine().gravity(), Vec3A::new(0.0, 0.0, -325.0));
}

#[test]
fn pad_count_must_match() {
    let arena = seeded_arena(GameMode::Soccar);
    let mut bytes = serialized(&arena);

    // The last 34 pad states sit behind the pad count
    let pad_state_len = 1 + 4 + 8;
    let count_at = bytes.len() - 34 * pad_state_len - 4;
    bytes[count_at..count_at + 4].copy_from_slice(&33u32.to_le_bytes());

    let err = Arena::deserialize_new(&mut bytes.as_slice()).err().unwrap();
    assert!(matches!(
        err,
        ArenaError::BoostPadMismatch {
            expected: 34,
            actual: 33
        }
    ));
}

#[test]
fn unknown_game_mode_is_rejected() {
    let err = Arena::deserialize_new(&mut [7u8, 0, 0, 0].as_slice()).err().unwrap();
    assert!(matches!(err, ArenaError::InvalidData { what: "game mode", value: 7 }));
}

#[test]
fn re_added_car_steps_identically_after_restore() {
    let mut arena = seeded_arena(GameMode::Soccar);
    let first = arena.add_car(Team::Blue, CarConfig::OCTANE);
    let second = arena.add_car(Team::Orange, CarConfig::OCTANE);

    // The re-added car now sits behind car 2 inside the physics engine
    let car = arena.remove_car(first).unwrap();
    assert_eq!(arena.add_car_from(car).unwrap(), first);

    for (id, x, forward) in [(first, -300.0, Vec3A::X), (second, 300.0, -Vec3A::X)] {
        arena.set_car_state(id, &common::car_state_at(Vec3A::new(x, 0.0, 17.0), forward));
        arena.set_car_controls(
            id,
            CarControls {
                throttle: 1.0,
                boost: true,
                ..CarControls::DEFAULT
            },
        );
    }
    arena.step(5);

    let mut restored = Arena::deserialize_new(&mut serialized(&arena).as_slice()).unwrap();
    assert_eq!(serialized(&restored), serialized(&arena));

    for tick in 0..240 {
        arena.step(1);
        restored.step(1);
        assert_eq!(serialized(&restored), serialized(&arena), "diverged on tick {tick}");
    }
}

#[test]
fn dropshot_tiles_survive_restore() {
    let mut arena = busy_arena(GameMode::Dropshot);
    let mut tiles = DropshotTilesState::new();
    tiles.states[0][0] = TileState::Damaged;
    tiles.states[1][40] = TileState::Broken;
    assert!(arena.set_dropshot_tiles_state(tiles.clone()));

    let bytes = serialized(&arena);
    let mut restored = Arena::deserialize_new(&mut bytes.as_slice()).unwrap();
    assert_eq!(restored.get_dropshot_tiles_state(), Some(&tiles));
    assert_eq!(serialized(&restored), bytes);

    arena.step(120);
    restored.step(120);
    assert_eq!(serialized(&restored), serialized(&arena));

    // Dropshot has no pads, so the tile states end the stream
    let mut truncated = bytes;
    truncated.truncate(truncated.len() - 1);
    assert!(Arena::deserialize_new(&mut truncated.as_slice()).is_err());
}
