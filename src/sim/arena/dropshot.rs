use glam::Vec3A;

use crate::{
    DropshotTilesState, Team, TileState,
    physics::{CollisionFlags, CollisionShapes, PhysicsEngine, RigidBody},
    shared::Aabb,
    sim::{CollisionMasks, UserInfoTypes, consts::dropshot, get_tile_pos},
};

/// The tile bodies of a dropshot arena, kept in step with their damage state
#[derive(Clone, Debug)]
pub(crate) struct DropshotTiles {
    pub state: DropshotTilesState,
    /// Indexed like [`DropshotTilesState::states`]
    bodies: [Vec<usize>; 2],
}

impl DropshotTiles {
    pub fn new(engine: &mut dyn PhysicsEngine) -> Self {
        let half_extents = Vec3A::new(
            dropshot::TILE_WIDTH_X * 0.5,
            dropshot::TILE_ROW_SPACING_Y * 0.5,
            0.0,
        );

        let bodies = Team::ALL.map(|team| {
            (0..dropshot::NUM_TILES_PER_TEAM)
                .filter_map(|idx| get_tile_pos(team, idx).map(|pos| (idx, pos)))
                .map(|(idx, pos)| {
                    let aabb = Aabb::new(
                        pos - half_extents - Vec3A::new(0.0, 0.0, dropshot::TILE_THICKNESS),
                        pos + half_extents,
                    );

                    let mut body = RigidBody::new_static(
                        CollisionShapes::StaticBox(aabb),
                        dropshot::TILE_COEFS.friction,
                        dropshot::TILE_COEFS.restitution,
                    );
                    body.collision_object.user_index = UserInfoTypes::DropshotTile;
                    body.collision_object.user_pointer = Self::tile_pointer(team, idx);

                    engine.add_rigid_body(
                        body,
                        CollisionMasks::DropshotTile as u8,
                        CollisionMasks::DropshotTile as u8,
                    )
                })
                .collect()
        });

        Self {
            state: DropshotTilesState::new(),
            bodies,
        }
    }

    const fn tile_pointer(team: Team, idx: usize) -> u64 {
        (team as usize * dropshot::NUM_TILES_PER_TEAM + idx) as u64
    }

    /// The team and index of a tile body's `user_pointer`
    pub const fn from_tile_pointer(pointer: u64) -> (Team, usize) {
        let pointer = pointer as usize;
        let team = if pointer < dropshot::NUM_TILES_PER_TEAM {
            Team::Blue
        } else {
            Team::Orange
        };

        (team, pointer % dropshot::NUM_TILES_PER_TEAM)
    }

    /// Broken tiles stop colliding, everything else collides again
    pub fn sync_bodies(&self, engine: &mut dyn PhysicsEngine) {
        for (team_states, team_bodies) in self.state.states.iter().zip(&self.bodies) {
            for (&state, &body_idx) in team_states.iter().zip(team_bodies) {
                let flags = &mut engine.body_mut(body_idx).collision_object.collision_flags;
                if state == TileState::Broken {
                    *flags |= CollisionFlags::NoContactResponse as u8;
                } else {
                    *flags &= !(CollisionFlags::NoContactResponse as u8);
                }
            }
        }
    }

    pub fn set_state(&mut self, state: DropshotTilesState, engine: &mut dyn PhysicsEngine) {
        self.state = state;
        self.sync_bodies(engine);
    }
}

#[cfg(test)]
mod tests {
    use super::DropshotTiles;
    use crate::{
        DropshotTilesState, Team, TileState,
        physics::{DiscreteDynamicsWorld, PhysicsEngine},
        sim::consts::dropshot::NUM_TILES_PER_TEAM,
    };

    #[test]
    fn pointers_round_trip() {
        for team in Team::ALL {
            for idx in [0, 37, NUM_TILES_PER_TEAM - 1] {
                let pointer = DropshotTiles::tile_pointer(team, idx);
                assert_eq!(DropshotTiles::from_tile_pointer(pointer), (team, idx));
            }
        }
    }

    #[test]
    fn broken_tiles_stop_colliding() {
        let mut world = DiscreteDynamicsWorld::default();
        let mut tiles = DropshotTiles::new(&mut world);
        assert_eq!(world.num_bodies(), NUM_TILES_PER_TEAM * 2);

        let mut state = DropshotTilesState::new();
        state.states[1][12] = TileState::Broken;
        state.states[1][13] = TileState::Damaged;
        tiles.set_state(state, &mut world);

        let body = |team: usize, idx: usize| &world.body(tiles.bodies[team][idx]).collision_object;
        assert!(!body(1, 12).has_contact_response());
        assert!(body(1, 13).has_contact_response());
        assert!(body(0, 12).has_contact_response());

        tiles.set_state(DropshotTilesState::new(), &mut world);
        assert!(world.body(tiles.bodies[1][12]).collision_object.has_contact_response());
    }
}
