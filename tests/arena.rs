mod common;

use std::sync::{Arc, Mutex};

use carball::{
    Arena, ArenaConfig, BallState, BoostPadState, CarConfig, CarControls, DropshotTilesState,
    GameMode, Team, TileState, get_tile_pos,
};
use common::{car_state_at, kickoff_arena, seeded_arena, serialized};
use glam::Vec3A;

#[test]
fn kickoff_first_tick() {
    let (mut arena, blue, orange) = kickoff_arena();
    let spawn_boost = arena.mutator_config().car_spawn_boost_amount;

    arena.step(1);

    assert_eq!(arena.tick_count(), 1);
    for id in [blue, orange] {
        let state = arena.get_car_state(id).unwrap();
        assert!(state.is_on_ground, "car {id} left the ground");
        assert_eq!(state.boost, spawn_boost);
        assert!(!state.is_demoed);
    }
}

#[test]
fn no_boost_means_no_boosting() {
    let (mut arena, blue, _) = kickoff_arena();

    let mut state = *arena.get_car_state(blue).unwrap();
    state.boost = 0.0;
    assert!(arena.set_car_state(blue, &state));
    assert!(arena.set_car_controls(
        blue,
        CarControls {
            boost: true,
            ..CarControls::DEFAULT
        }
    ));

    for _ in 0..30 {
        arena.step(1);
        let state = arena.get_car_state(blue).unwrap();
        assert!(!state.is_boosting);
        assert_eq!(state.boost, 0.0);
    }
}

#[test]
fn big_pad_pickup_and_cooldown() {
    let mut arena = seeded_arena(GameMode::Soccar);
    let id = arena.add_car(Team::Blue, CarConfig::OCTANE);

    let pad_idx = (0..arena.num_boost_pads())
        .find(|&idx| arena.get_boost_pad_config(idx).unwrap().is_big)
        .unwrap();
    let pad_pos = arena.get_boost_pad_config(pad_idx).unwrap().pos;

    let mut state = car_state_at(Vec3A::new(pad_pos.x, pad_pos.y, 17.0), Vec3A::Y);
    state.boost = 0.0;
    arena.set_car_state(id, &state);
    arena.step(1);

    let pad_state = *arena.get_boost_pad_state(pad_idx).unwrap();
    assert!(!pad_state.is_active);
    assert_eq!(pad_state.prev_locked_car_id, id);
    assert_eq!(
        arena.get_car_state(id).unwrap().boost,
        arena.mutator_config().boost_pad_amount_big
    );

    // Park the car somewhere else so it doesn't collect the pad again
    arena.set_car_state(id, &car_state_at(Vec3A::new(0.0, -1000.0, 17.0), Vec3A::Y));

    let cooldown_ticks =
        (arena.mutator_config().boost_pad_cooldown_big * arena.get_tick_rate()).round() as u32;
    arena.step(cooldown_ticks - 1);
    assert!(!arena.get_boost_pad_state(pad_idx).unwrap().is_active);

    arena.step(1);
    assert!(arena.get_boost_pad_state(pad_idx).unwrap().is_active);
}

#[test]
fn set_boost_pad_state_bounds() {
    let mut arena = seeded_arena(GameMode::Soccar);
    let num_pads = arena.num_boost_pads();
    assert_eq!(num_pads, 34);

    let state = BoostPadState {
        is_active: false,
        cooldown: 2.5,
        ..BoostPadState::default()
    };
    assert!(arena.set_boost_pad_state(0, state));
    assert_eq!(arena.get_boost_pad_state(0), Some(&state));

    assert!(!arena.set_boost_pad_state(num_pads, state));
    assert!(arena.get_boost_pad_state(num_pads).is_none());
}

#[test]
fn clones_diverge_independently() {
    let (mut arena, blue, orange) = kickoff_arena();
    let mut clone = arena.clone();
    assert_eq!(serialized(&arena), serialized(&clone));

    for (world, throttle) in [(&mut arena, 1.0), (&mut clone, -1.0)] {
        for id in [blue, orange] {
            world.set_car_controls(
                id,
                CarControls {
                    throttle,
                    ..CarControls::DEFAULT
                },
            );
        }
        world.step(60);
    }

    let arena_bytes = serialized(&arena);
    let clone_bytes = serialized(&clone);
    assert_ne!(arena_bytes, clone_bytes);

    for bytes in [arena_bytes, clone_bytes] {
        let restored = Arena::deserialize_new(&mut bytes.as_slice()).unwrap();
        assert_eq!(serialized(&restored), bytes);
    }
}

#[test]
fn goal_fires_callback_and_resets() {
    let mut arena = seeded_arena(GameMode::Soccar);
    arena.add_car(Team::Blue, CarConfig::OCTANE);

    let goals = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&goals);
    arena.set_goal_score_callback(move |event| sink.lock().unwrap().push(*event));

    let mut ball = BallState::DEFAULT;
    ball.pos = Vec3A::new(0.0, 4500.0, 200.0);
    ball.vel = Vec3A::new(0.0, 3000.0, 0.0);
    arena.set_ball_state(ball);

    arena.step(60);

    let goals = goals.lock().unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].scoring_team, Team::Blue);
    // Back at kickoff
    assert!(arena.get_ball_state().pos.y.abs() < 1.0);
}

#[test]
fn goal_without_reset_keeps_firing() {
    let config = ArenaConfig {
        reset_on_goal: false,
        ..ArenaConfig::with_seed(common::SEED)
    };
    let mut arena = Arena::new_with_config(GameMode::Soccar, config, 120.0).unwrap();

    let goals = Arc::new(Mutex::new(0u32));
    let sink = Arc::clone(&goals);
    arena.set_goal_score_callback(move |_| *sink.lock().unwrap() += 1);

    let mut ball = BallState::DEFAULT;
    ball.pos = Vec3A::new(0.0, -5500.0, 200.0);
    arena.set_ball_state(ball);
    assert!(arena.is_ball_scored());

    arena.step(3);
    assert_eq!(*goals.lock().unwrap(), 3);
}

#[test]
fn supersonic_hit_demolishes() {
    let mut arena = seeded_arena(GameMode::Soccar);
    let bumper = arena.add_car(Team::Blue, CarConfig::OCTANE);
    let victim = arena.add_car(Team::Orange, CarConfig::OCTANE);

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    arena.set_car_bump_callback(move |event| sink.lock().unwrap().push(*event));

    let mut state = car_state_at(Vec3A::new(0.0, -400.0, 17.0), Vec3A::Y);
    state.vel = Vec3A::new(0.0, 2300.0, 0.0);
    state.is_supersonic = true;
    arena.set_car_state(bumper, &state);
    arena.set_car_state(victim, &car_state_at(Vec3A::new(0.0, 0.0, 17.0), Vec3A::X));

    arena.step(30);

    let events = events.lock().unwrap();
    let demo = events
        .iter()
        .find(|event| event.is_demo)
        .expect("no demo happened");
    assert_eq!(demo.bumper_id, bumper);
    assert_eq!(demo.victim_id, victim);
    assert!(arena.get_car_state(victim).unwrap().is_demoed);
}

#[test]
fn removed_car_can_come_back() {
    let (mut arena, blue, orange) = kickoff_arena();
    arena.step(10);

    let car = arena.remove_car(blue).unwrap();
    let state = *car.get_state();
    assert_eq!(arena.car_ids().collect::<Vec<_>>(), vec![orange]);

    assert_eq!(arena.add_car_from(car.clone()).unwrap(), blue);
    assert_eq!(arena.get_car_state(blue), Some(&state));
    assert!(arena.add_car_from(car).is_err());
}

#[test]
fn into_parts_keeps_everything() {
    let (arena, blue, orange) = kickoff_arena();
    let parts = arena.into_parts();

    assert_eq!(parts.game_mode, GameMode::Soccar);
    assert_eq!(
        parts.cars.iter().map(|car| car.id()).collect::<Vec<_>>(),
        vec![blue, orange]
    );
    assert_eq!(parts.boost_pads.len(), 34);
}

#[test]
fn game_state_snapshot() {
    let (mut arena, blue, orange) = kickoff_arena();
    arena.step(5);

    let game_state = arena.get_game_state();
    assert_eq!(game_state.tick_count, 5);
    assert_eq!(game_state.cars.len(), 2);
    assert_eq!(game_state.pads.len(), 34);
    assert_eq!(game_state.get_car(orange).unwrap().team, Team::Orange);
    assert_eq!(&game_state.get_car(blue).unwrap().state, arena.get_car_state(blue).unwrap());
    assert_eq!(&game_state.ball, arena.get_ball_state());
}

#[test]
fn uncopied_clone_never_fires_callbacks() {
    let config = ArenaConfig {
        reset_on_goal: false,
        ..ArenaConfig::with_seed(common::SEED)
    };
    let mut arena = Arena::new_with_config(GameMode::Soccar, config, 120.0).unwrap();
    let bumper = arena.add_car(Team::Blue, CarConfig::OCTANE);
    let victim = arena.add_car(Team::Orange, CarConfig::OCTANE);

    let goals = Arc::new(Mutex::new(0u32));
    let goal_sink = Arc::clone(&goals);
    arena.set_goal_score_callback(move |_| *goal_sink.lock().unwrap() += 1);
    let bumps = Arc::new(Mutex::new(0u32));
    let bump_sink = Arc::clone(&bumps);
    arena.set_car_bump_callback(move |_| *bump_sink.lock().unwrap() += 1);

    let mut state = car_state_at(Vec3A::new(0.0, -400.0, 17.0), Vec3A::Y);
    state.vel = Vec3A::new(0.0, 2300.0, 0.0);
    state.is_supersonic = true;
    arena.set_car_state(bumper, &state);
    arena.set_car_state(victim, &car_state_at(Vec3A::new(0.0, 0.0, 17.0), Vec3A::X));

    let mut ball = BallState::DEFAULT;
    ball.pos = Vec3A::new(0.0, -5500.0, 200.0);
    arena.set_ball_state(ball);

    let mut silent = arena.clone_arena(false);
    let mut loud = arena.clone_arena(true);

    silent.step(30);
    assert!(silent.is_ball_scored());
    assert!(silent.get_car_state(victim).unwrap().is_demoed);
    assert_eq!(*goals.lock().unwrap(), 0);
    assert_eq!(*bumps.lock().unwrap(), 0);

    arena.step(30);
    assert_eq!(*goals.lock().unwrap(), 30);
    assert!(*bumps.lock().unwrap() > 0);

    loud.step(30);
    assert_eq!(*goals.lock().unwrap(), 60);
}

#[test]
fn hoops_scores_inside_the_basket_only() {
    let mut arena = seeded_arena(GameMode::Hoops);
    assert_eq!(arena.num_boost_pads(), 20);

    let basket_y = 2770.0 / 0.9;
    let on_floor = |x: f32, y: f32| {
        let mut ball = BallState::DEFAULT;
        ball.pos = Vec3A::new(x, y, 100.0);
        ball
    };

    for (ball, scored) in [
        (on_floor(0.0, basket_y), true),
        (on_floor(0.0, -basket_y), true),
        (on_floor(900.0, basket_y), false),
        (on_floor(0.0, 1800.0), false),
    ] {
        arena.set_ball_state(ball);
        assert_eq!(arena.is_ball_scored(), scored, "{:?}", ball.pos);
    }
    assert_eq!(arena.is_ball_probably_going_in(5.0, 1000.0), None);

    let goals = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&goals);
    arena.set_goal_score_callback(move |event| sink.lock().unwrap().push(*event));

    // Dropped in from above the rim
    let mut ball = BallState::DEFAULT;
    ball.pos = Vec3A::new(0.0, basket_y, 700.0);
    arena.set_ball_state(ball);
    arena.step(180);

    let goals = goals.lock().unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].scoring_team, Team::Blue);
}

#[test]
fn hoops_basket_stops_the_ball_but_not_cars() {
    let mut arena = seeded_arena(GameMode::Hoops);
    let mut ball = BallState::DEFAULT;
    ball.pos = Vec3A::new(0.0, 1800.0, 100.0);
    ball.vel = Vec3A::new(0.0, 1500.0, 0.0);
    arena.set_ball_state(ball);
    arena.step(90);
    assert!(arena.get_ball_state().pos.y < 2232.0);
    assert!(!arena.is_ball_scored());

    let mut arena = seeded_arena(GameMode::Hoops);
    let car = arena.add_car(Team::Blue, CarConfig::OCTANE);
    let mut state = car_state_at(Vec3A::new(0.0, 1900.0, 17.0), Vec3A::Y);
    state.vel = Vec3A::new(0.0, 1500.0, 0.0);
    arena.set_car_state(car, &state);
    arena.set_car_controls(
        car,
        CarControls {
            throttle: 1.0,
            ..CarControls::DEFAULT
        },
    );
    arena.step(60);
    assert!(arena.get_car_state(car).unwrap().pos.y > 2400.0);
}

#[test]
fn dropshot_kickoff_launches_the_ball() {
    let mut arena = seeded_arena(GameMode::Dropshot);
    arena.add_car(Team::Blue, CarConfig::OCTANE);
    arena.reset_to_random_kickoff(Some(common::SEED));

    assert_eq!(arena.num_boost_pads(), 0);
    assert_eq!(arena.mutator_config().car_spawn_boost_amount, 100.0);

    let rest_z = arena.get_ball_state().pos.z;
    arena.step(20);
    assert!((arena.get_ball_state().pos.z - rest_z).abs() < 5.0);

    arena.step(20);
    let ball = arena.get_ball_state();
    assert!(ball.vel.z > 0.0);
    assert!(ball.pos.z > rest_z + 10.0);
}

#[test]
fn dropshot_ball_breaks_through_tiles() {
    let config = ArenaConfig {
        reset_on_goal: false,
        ..ArenaConfig::with_seed(common::SEED)
    };
    let mut arena = Arena::new_with_config(GameMode::Dropshot, config, 120.0).unwrap();

    let goals = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&goals);
    arena.set_goal_score_callback(move |event| sink.lock().unwrap().push(*event));

    let tile_idx = 30;
    let tile_pos = get_tile_pos(Team::Orange, tile_idx).unwrap();
    let mut ball = BallState::DEFAULT;
    ball.pos = tile_pos + Vec3A::new(0.0, 0.0, 300.0);
    ball.vel = Vec3A::new(0.0, 0.0, -500.0);
    ball.ds_info.y_target_dir = 1.0;
    arena.set_ball_state(ball);

    arena.step(60);

    let tiles = arena.get_dropshot_tiles_state().unwrap();
    assert_eq!(tiles.get(Team::Orange, tile_idx), Some(TileState::Damaged));
    assert_eq!(tiles.get(Team::Orange, tile_idx - 1), Some(TileState::Full));
    assert_eq!(tiles.get(Team::Blue, tile_idx), Some(TileState::Full));
    let ds_info = arena.get_ball_state().ds_info;
    assert!(ds_info.has_damaged);
    assert_eq!(ds_info.y_target_dir, 0.0);
    assert!(goals.lock().unwrap().is_empty());

    let mut broken = tiles.clone();
    broken.states[Team::Orange as usize][tile_idx] = TileState::Broken;
    assert!(arena.set_dropshot_tiles_state(broken));
    arena.set_ball_state(ball);

    arena.step(120);

    assert!(arena.get_ball_state().pos.z < 0.0);
    let goals = goals.lock().unwrap();
    assert_eq!(goals.first().map(|goal| goal.scoring_team), Some(Team::Blue));
}

#[test]
fn dropshot_tiles_state_access() {
    let mut soccar = seeded_arena(GameMode::Soccar);
    assert!(soccar.get_dropshot_tiles_state().is_none());
    assert!(!soccar.set_dropshot_tiles_state(DropshotTilesState::new()));
    assert!(soccar.get_game_state().tiles.is_none());

    let mut arena = seeded_arena(GameMode::Dropshot);
    let mut incomplete = DropshotTilesState::new();
    incomplete.states[0].pop();
    assert!(!arena.set_dropshot_tiles_state(incomplete));

    let mut state = DropshotTilesState::new();
    state.states[0][3] = TileState::Damaged;
    assert!(arena.set_dropshot_tiles_state(state.clone()));
    assert_eq!(arena.get_dropshot_tiles_state(), Some(&state));

    let tiles = arena.get_game_state().tiles.unwrap();
    assert_eq!(tiles[0].len(), 70);
    assert_eq!(tiles[0][3].state, TileState::Damaged);
    assert_eq!(Some(tiles[0][3].pos), get_tile_pos(Team::Blue, 3));

    arena.reset_to_random_kickoff(None);
    assert_eq!(arena.get_dropshot_tiles_state(), Some(&DropshotTilesState::new()));
}
