use glam::Vec3A;

use crate::{
    BoostPad, BoostPadConfig, Car, MutatorConfig,
    consts::{
        ARENA_EXTENT_X, ARENA_EXTENT_Y,
        boost_pads::{
            CYL_HEIGHT,
            grid::{CELL_SIZE, CELLS_X, CELLS_Y, EXTRA_HEIGHT},
        },
    },
};

/// Buckets boost pads into a fixed 2D grid over the field,
/// so a car only tests the pads in its own and the neighboring cells
#[derive(Clone, Debug)]
pub struct BoostPadGrid {
    cells: Vec<Vec<usize>>,
    pub(crate) all_pads: Vec<BoostPad>,
    max_pad_z: f32,
}

impl BoostPadGrid {
    const CELL_AMOUNT: usize = CELLS_X * CELLS_Y;

    #[must_use]
    pub fn new(pad_configs: &[BoostPadConfig]) -> Self {
        let mut cells = vec![Vec::new(); Self::CELL_AMOUNT];
        let mut all_pads = Vec::with_capacity(pad_configs.len());
        let mut max_pad_z = f32::MIN;

        for config in pad_configs {
            let (x, y) = Self::calc_cell_pos(config.pos);
            cells[Self::cell_idx(x, y)].push(all_pads.len());
            all_pads.push(BoostPad::new(*config));
            max_pad_z = max_pad_z.max(config.pos.z);
        }

        Self {
            cells,
            all_pads,
            max_pad_z,
        }
    }

    /// Cell coordinates containing `pos`, clamped to the grid
    fn calc_cell_pos(pos: Vec3A) -> (usize, usize) {
        let to_cell = |value: f32, extent: f32, count: usize| {
            let idx = ((value + extent) / CELL_SIZE).floor();
            idx.clamp(0.0, (count - 1) as f32) as usize
        };

        (
            to_cell(pos.x, ARENA_EXTENT_X, CELLS_X),
            to_cell(pos.y, ARENA_EXTENT_Y, CELLS_Y),
        )
    }

    const fn cell_idx(x: usize, y: usize) -> usize {
        x + y * CELLS_X
    }

    #[must_use]
    pub fn pads(&self) -> &[BoostPad] {
        &self.all_pads
    }

    #[must_use]
    pub fn pads_mut(&mut self) -> &mut [BoostPad] {
        &mut self.all_pads
    }

    pub fn reset(&mut self) {
        for pad in &mut self.all_pads {
            pad.reset();
        }
    }

    pub(crate) fn pre_tick_update(&mut self, tick_time: f32) {
        for pad in &mut self.all_pads {
            pad.pre_tick_update(tick_time);
        }
    }

    /// Let `car` lock the first free pad it touches
    pub(crate) fn check_collision(&mut self, car: &Car, mutator_config: &MutatorConfig) {
        let state = car.get_state();
        if state.is_demoed || state.boost >= mutator_config.car_max_boost_amount {
            return;
        }

        let car_pos = state.pos;
        if car_pos.z > self.max_pad_z + CYL_HEIGHT + EXTRA_HEIGHT {
            return;
        }

        let (cell_x, cell_y) = Self::calc_cell_pos(car_pos);
        for y in cell_y.saturating_sub(1)..=(cell_y + 1).min(CELLS_Y - 1) {
            for x in cell_x.saturating_sub(1)..=(cell_x + 1).min(CELLS_X - 1) {
                for &pad_idx in &self.cells[Self::cell_idx(x, y)] {
                    if self.all_pads[pad_idx].check_collide(car.id(), car_pos) {
                        return;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3A;

    use super::BoostPadGrid;
    use crate::{BoostPadConfig, GameMode, consts::boost_pads::grid::CELLS_X};

    #[test]
    fn pads_land_in_their_cells() {
        assert_eq!(BoostPadGrid::calc_cell_pos(Vec3A::new(-4096.0, -5120.0, 0.0)), (0, 0));
        assert_eq!(BoostPadGrid::calc_cell_pos(Vec3A::new(0.0, 0.0, 0.0)), (4, 5));
        assert_eq!(BoostPadGrid::calc_cell_pos(Vec3A::new(1e6, -1e6, 0.0)), (CELLS_X - 1, 0));
    }

    #[test]
    fn soccar_layout_is_fully_indexed() {
        let configs = BoostPadConfig::soccar_layout();
        let grid = BoostPadGrid::new(&configs);

        assert_eq!(grid.pads().len(), 34);
        let indexed: usize = grid.cells.iter().map(Vec::len).sum();
        assert_eq!(indexed, configs.len());
        assert_eq!(grid.max_pad_z, 73.0);
    }

    #[test]
    fn hoops_layout_is_fully_indexed() {
        let configs = BoostPadConfig::default_layout(GameMode::Hoops);
        let grid = BoostPadGrid::new(&configs);

        assert_eq!(grid.pads().len(), 20);
        assert_eq!(grid.pads().iter().filter(|pad| pad.config().is_big).count(), 6);
        let indexed: usize = grid.cells.iter().map(Vec::len).sum();
        assert_eq!(indexed, configs.len());
        assert_eq!(grid.max_pad_z, 72.0);

        assert!(BoostPadConfig::default_layout(GameMode::Dropshot).is_empty());
    }
}
