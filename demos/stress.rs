use std::time::Instant;

use carball::{Arena, ArenaConfig, CarConfig, CarControls, GameMode, Team, init_logging};
use glam::{Mat3A, Vec3A};

const NUM_CARS: u8 = 8;
const NUM_RUNS: u32 = 1_000;
const TICKS_PER_RUN: u32 = 720;

fn main() {
    init_logging().unwrap();

    let mut arena = Arena::new_with_config(
        GameMode::Soccar,
        ArenaConfig {
            rng_seed: Some(0),
            ..Default::default()
        },
        120.0,
    )
    .unwrap();

    let mut ids = Vec::new();
    for i in 0..NUM_CARS {
        let id = arena.add_car(Team::try_from(i % 2).unwrap(), CarConfig::OCTANE);
        ids.push(id);
    }

    arena.reset_to_random_kickoff(None);

    let mut ball_state = *arena.get_ball_state();
    ball_state.vel = Vec3A::new(600.0, 1550.0, 0.0);
    arena.set_ball_state(ball_state);

    let mut states = Vec::new();
    for &id in &ids {
        arena.set_car_controls(
            id,
            CarControls {
                throttle: 1.0,
                ..CarControls::DEFAULT
            },
        );

        let mut state = *arena.get_car_state(id).unwrap();
        state.pos.z = 43.0;
        state.is_on_ground = false;

        let f = Vec3A::new(1., 1., 1.).normalize();
        let up = Vec3A::Z;
        let tr = up.cross(f);
        let u = f.cross(tr).normalize();
        let r = u.cross(f).normalize();
        state.rot_mat = Mat3A::from_cols(f, r, u);
        states.push(state);
    }

    let start = Instant::now();
    for _ in 0..NUM_RUNS {
        arena.set_ball_state(ball_state);
        for (&id, state) in ids.iter().zip(&states) {
            arena.set_car_state(id, state);
        }

        arena.step(TICKS_PER_RUN);
    }

    let elapsed = start.elapsed().as_secs_f32();
    log::info!(
        "Elapsed: {elapsed}s, TPS: {}",
        (NUM_RUNS * TICKS_PER_RUN) as f32 / elapsed
    );
}
