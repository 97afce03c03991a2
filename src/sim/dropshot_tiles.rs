//! Dropshot floor tiles
//!
//! Each team's half of the floor is a hexagonal lattice of tiles, laid out in rows from the center
//! line outwards. Tile `idx` of a team counts along those rows, so tile 0 of each team is the
//! center-most tile on the negative x end of the first row.

use glam::Vec3A;

use crate::{Team, sim::consts::dropshot};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileState {
    #[default]
    Full,
    Damaged,
    /// The ball falls through broken tiles
    Broken,
}

impl TileState {
    /// The state after one more hit
    #[must_use]
    pub const fn damaged(self) -> Self {
        match self {
            Self::Full => Self::Damaged,
            Self::Damaged | Self::Broken => Self::Broken,
        }
    }
}

impl TryFrom<u8> for TileState {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Full),
            1 => Ok(Self::Damaged),
            2 => Ok(Self::Broken),
            other => Err(other),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropshotTile {
    pub pos: Vec3A,
    pub state: TileState,
}

/// The damage state of every dropshot tile, indexed by team and then by tile
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropshotTilesState {
    pub states: [Vec<TileState>; 2],
}

impl Default for DropshotTilesState {
    fn default() -> Self {
        Self::new()
    }
}

impl DropshotTilesState {
    /// Every tile intact
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: [
                vec![TileState::Full; dropshot::NUM_TILES_PER_TEAM],
                vec![TileState::Full; dropshot::NUM_TILES_PER_TEAM],
            ],
        }
    }

    /// Whether both teams have exactly [`dropshot::NUM_TILES_PER_TEAM`] tiles
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.states
            .iter()
            .all(|team_states| team_states.len() == dropshot::NUM_TILES_PER_TEAM)
    }

    #[must_use]
    pub fn get(&self, team: Team, idx: usize) -> Option<TileState> {
        self.states[team as usize].get(idx).copied()
    }

    #[must_use]
    pub fn num_broken(&self, team: Team) -> usize {
        self.states[team as usize]
            .iter()
            .filter(|&&state| state == TileState::Broken)
            .count()
    }

    /// Every tile with its position, indexed like [`DropshotTilesState::states`]
    #[must_use]
    pub fn tiles(&self) -> [Vec<DropshotTile>; 2] {
        Team::ALL.map(|team| {
            self.states[team as usize]
                .iter()
                .enumerate()
                .filter_map(|(idx, &state)| {
                    get_tile_pos(team, idx).map(|pos| DropshotTile { pos, state })
                })
                .collect()
        })
    }

    /// Damage every tile of `team` within `radius` steps of tile `start_idx`
    pub(crate) fn damage(&mut self, team: Team, start_idx: usize, radius: u8) {
        let team_states = &mut self.states[team as usize];
        for idx in get_neighbor_indices(team, start_idx, radius) {
            if let Some(state) = team_states.get_mut(idx) {
                *state = state.damaged();
            }
        }
    }
}

/// Row and column of a tile within its team's half
fn tile_row_col(idx: usize) -> Option<(usize, usize)> {
    let mut first_in_row = 0;
    for (row, &row_size) in dropshot::TILE_ROW_SIZES.iter().enumerate() {
        if idx < first_in_row + row_size {
            return Some((row, idx - first_in_row));
        }
        first_in_row += row_size;
    }

    None
}

/// Center of the top face of a tile, `None` if `idx` is out of range
#[must_use]
pub fn get_tile_pos(team: Team, idx: usize) -> Option<Vec3A> {
    let (row, col) = tile_row_col(idx)?;
    let row_size = dropshot::TILE_ROW_SIZES[row] as f32;

    let x = (col as f32 - (row_size - 1.0) * 0.5) * dropshot::TILE_WIDTH_X;
    let y = (row as f32 + 0.5) * dropshot::TILE_ROW_SPACING_Y * team.get_y_dir();
    Some(Vec3A::new(x, y, 0.0))
}

/// Tile indices of `team` within `radius` steps of tile `start_idx`, including itself
///
/// A radius of 1 is only the tile itself, 2 adds its 6 neighbours, 3 adds the 12 tiles after that
#[must_use]
pub fn get_neighbor_indices(team: Team, start_idx: usize, radius: u8) -> Vec<usize> {
    let Some(start_pos) = get_tile_pos(team, start_idx) else {
        return Vec::new();
    };

    // Neighbouring tile centers are exactly one tile width apart
    let max_dist = f32::from(radius.saturating_sub(1)) * dropshot::TILE_WIDTH_X + 1.0;
    (0..dropshot::NUM_TILES_PER_TEAM)
        .filter(|&idx| {
            get_tile_pos(team, idx).is_some_and(|pos| pos.distance(start_pos) <= max_dist)
        })
        .collect()
}
