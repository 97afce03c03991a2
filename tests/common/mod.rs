#![allow(dead_code)]

use carball::{Arena, ArenaConfig, CarConfig, CarState, GameMode, Team};
use glam::{Mat3A, Vec3A};

pub const SEED: u64 = 0x5eed;

pub fn seeded_arena(game_mode: GameMode) -> Arena {
    Arena::new_with_config(game_mode, ArenaConfig::with_seed(SEED), 120.0).unwrap()
}

/// One car per team, placed for kickoff
pub fn kickoff_arena() -> (Arena, u64, u64) {
    let mut arena = seeded_arena(GameMode::Soccar);
    let blue = arena.add_car(Team::Blue, CarConfig::OCTANE);
    let orange = arena.add_car(Team::Orange, CarConfig::OCTANE);
    arena.reset_to_random_kickoff(Some(SEED));

    (arena, blue, orange)
}

/// A car sitting still at `pos`, facing along `forward` on the floor plane
pub fn car_state_at(pos: Vec3A, forward: Vec3A) -> CarState {
    let forward = forward.normalize();
    let right = Vec3A::Z.cross(forward).normalize();
    let mut state = CarState::DEFAULT;
    state.pos = pos;
    state.rot_mat = Mat3A::from_cols(forward, right, forward.cross(right));
    state
}

pub fn serialized(arena: &Arena) -> Vec<u8> {
    let mut bytes = Vec::new();
    arena.serialize(&mut bytes).unwrap();
    bytes
}
