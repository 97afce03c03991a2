mod common;

use carball::{Arena, CarConfig, CarControls, CarState, GameMode, Team, consts::car::spawn};
use common::{car_state_at, seeded_arena};
use glam::Vec3A;

fn airborne_car(arena: &mut Arena) -> u64 {
    let id = arena.add_car(Team::Blue, CarConfig::OCTANE);
    let mut state = car_state_at(Vec3A::new(0.0, 0.0, 600.0), Vec3A::Y);
    state.is_on_ground = false;
    state.has_jumped = true;
    arena.set_car_state(id, &state);
    arena.step(1);
    id
}

fn hold(arena: &mut Arena, id: u64, controls: CarControls, ticks: u32) -> CarState {
    arena.set_car_controls(id, controls);
    arena.step(ticks);
    *arena.get_car_state(id).unwrap()
}

const FLIP_FORWARD: CarControls = CarControls {
    pitch: -1.0,
    jump: true,
    ..CarControls::DEFAULT
};

#[test]
fn only_one_flip_per_jump() {
    let mut arena = seeded_arena(GameMode::TheVoid);
    let id = airborne_car(&mut arena);
    assert!(!arena.get_car_state(id).unwrap().is_on_ground);

    let first = hold(&mut arena, id, FLIP_FORWARD, 1);
    assert!(first.has_flipped);
    assert!(first.is_flipping);
    assert!(first.flip_rel_torque.y > 0.0);

    hold(&mut arena, id, CarControls::DEFAULT, 5);
    let second = hold(&mut arena, id, FLIP_FORWARD, 1);

    assert!(second.has_flipped);
    assert!(!second.has_double_jumped);
    // The flip timer kept running instead of restarting
    assert!(second.flip_time > first.flip_time);
}

#[test]
fn flip_reset_allows_another_flip() {
    let mut arena = seeded_arena(GameMode::Soccar);
    let id = airborne_car(&mut arena);
    hold(&mut arena, id, FLIP_FORWARD, 1);
    hold(&mut arena, id, CarControls::DEFAULT, 1);

    // Land on all four wheels
    let mut state = *arena.get_car_state(id).unwrap();
    state.phys = car_state_at(Vec3A::new(0.0, 0.0, 17.0), Vec3A::Y).phys;
    arena.set_car_state(id, &state);
    let landed = hold(&mut arena, id, CarControls::DEFAULT, 10);
    assert!(landed.is_on_ground);
    assert!(!landed.has_flipped);
    assert!(!landed.has_jumped);

    // Leave the ground again without jumping
    let mut state = landed;
    state.pos.z = 600.0;
    state.vel = Vec3A::ZERO;
    arena.set_car_state(id, &state);
    let reset = hold(&mut arena, id, CarControls::DEFAULT, 1);
    assert!(!reset.is_on_ground);
    assert!(reset.has_flip_reset());
    assert!(reset.got_flip_reset());

    let again = hold(&mut arena, id, FLIP_FORWARD, 1);
    assert!(again.has_flipped);
    assert!(again.is_flipping);
}

#[test]
fn boost_drains_and_stops_at_zero() {
    let mut arena = seeded_arena(GameMode::TheVoid);
    let id = airborne_car(&mut arena);

    let boost = CarControls {
        boost: true,
        ..CarControls::DEFAULT
    };

    let mut last_boost = arena.get_car_state(id).unwrap().boost;
    for _ in 0..240 {
        let state = hold(&mut arena, id, boost, 1);
        assert!(state.boost <= last_boost);
        assert!(state.boost >= 0.0);
        last_boost = state.boost;
    }

    let state = arena.get_car_state(id).unwrap();
    assert_eq!(state.boost, 0.0);
    assert!(!state.is_boosting);
}

#[test]
fn boosting_lasts_a_minimum_time() {
    let mut arena = seeded_arena(GameMode::TheVoid);
    let id = airborne_car(&mut arena);

    let tapped = hold(
        &mut arena,
        id,
        CarControls {
            boost: true,
            ..CarControls::DEFAULT
        },
        1,
    );
    assert!(tapped.is_boosting);

    let released = hold(&mut arena, id, CarControls::DEFAULT, 1);
    assert!(released.is_boosting);

    let stopped = hold(&mut arena, id, CarControls::DEFAULT, 12);
    assert!(!stopped.is_boosting);
}

#[test]
fn recharge_refills_after_delay() {
    let mut arena = seeded_arena(GameMode::TheVoid);
    let mut mutators = *arena.mutator_config();
    mutators.recharge_boost_enabled = true;
    arena.set_mutator_config(mutators);

    let id = airborne_car(&mut arena);
    let mut state = *arena.get_car_state(id).unwrap();
    state.boost = 10.0;
    state.time_since_boosted = 0.0;
    arena.set_car_state(id, &state);

    let early = hold(&mut arena, id, CarControls::DEFAULT, 1);
    assert_eq!(early.boost, 10.0);

    let ticks = (mutators.recharge_boost_delay * arena.get_tick_rate()) as u32 + 30;
    let later = hold(&mut arena, id, CarControls::DEFAULT, ticks);
    assert!(later.boost > 10.0);
    assert!(later.boost <= mutators.car_max_boost_amount);
}

#[test]
fn out_of_range_controls_are_clamped() {
    let mut arena = seeded_arena(GameMode::Soccar);
    let id = arena.add_car(Team::Orange, CarConfig::BREAKOUT);

    let state = hold(
        &mut arena,
        id,
        CarControls {
            throttle: 7.0,
            steer: -3.0,
            ..CarControls::DEFAULT
        },
        1,
    );

    assert_eq!(state.controls.throttle, 1.0);
    assert_eq!(state.controls.steer, -1.0);
}

#[test]
fn demoed_car_respawns() {
    let mut arena = seeded_arena(GameMode::Soccar);
    let id = arena.add_car(Team::Orange, CarConfig::OCTANE);
    assert!(arena.demolish_car(id));
    assert!(!arena.demolish_car(id + 1));

    let respawn_ticks = (arena.mutator_config().respawn_delay * arena.get_tick_rate()) as u32;
    arena.step(respawn_ticks - 2);
    assert!(arena.get_car_state(id).unwrap().is_demoed);

    arena.step(4);
    let state = arena.get_car_state(id).unwrap();
    assert!(!state.is_demoed);
    assert_eq!(state.boost, arena.mutator_config().car_spawn_boost_amount);
    // Orange respawns on its own half
    assert!(state.pos.y > 0.0);
}

#[test]
fn respawn_spots_follow_game_mode() {
    let mut arena = seeded_arena(GameMode::Hoops);
    let id = arena.add_car(Team::Blue, CarConfig::OCTANE);
    assert!(arena.demolish_car(id));

    let respawn_ticks = (arena.mutator_config().respawn_delay * arena.get_tick_rate()) as u32;
    arena.step(respawn_ticks + 2);

    let state = arena.get_car_state(id).unwrap();
    assert!(!state.is_demoed);
    let on_hoops_spot = spawn::RESPAWN_LOCATIONS_HOOPS
        .iter()
        .any(|spot| (spot.x - state.pos.x).abs() < 5.0 && (spot.y - state.pos.y).abs() < 5.0);
    assert!(on_hoops_spot, "respawned at {}", state.pos);
}

#[test]
fn psyclops_grounds_on_three_wheels() {
    let mut arena = seeded_arena(GameMode::Soccar);
    let id = arena.add_car(Team::Blue, CarConfig::PSYCLOPS);
    arena.set_car_state(id, &car_state_at(Vec3A::new(0.0, 0.0, 17.0), Vec3A::X));
    arena.step(30);

    let state = arena.get_car_state(id).unwrap();
    assert!(state.is_on_ground);
    assert_eq!(
        state.is_on_ground,
        CarState::ground_from_wheel_contacts(state.wheels_with_contact, true)
    );
}
