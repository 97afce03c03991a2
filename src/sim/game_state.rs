use crate::{
    GameMode,
    sim::{BallState, BoostPadConfig, BoostPadState, CarConfig, CarState, DropshotTile, Team},
};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoostPadInfo {
    pub config: BoostPadConfig,
    pub state: BoostPadState,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarInfo {
    pub id: u64,
    pub team: Team,
    pub state: CarState,
    pub config: CarConfig,
}

/// A snapshot of everything in an arena
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub tick_rate: f32,
    pub tick_count: u64,
    pub game_mode: GameMode,
    /// Ordered by id
    pub cars: Vec<CarInfo>,
    pub ball: BallState,
    pub pads: Vec<BoostPadInfo>,
    /// Blue then orange tiles, only in dropshot
    pub tiles: Option<[Vec<DropshotTile>; 2]>,
}

impl GameState {
    #[must_use]
    pub fn get_car(&self, id: u64) -> Option<&CarInfo> {
        self.cars.iter().find(|car| car.id == id)
    }
}
