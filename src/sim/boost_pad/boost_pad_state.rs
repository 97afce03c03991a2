#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoostPadState {
    pub is_active: bool,
    /// Seconds until the pad becomes active again
    pub cooldown: f32,
    /// The car holding the pad during the current tick, always `None` between ticks
    pub cur_locked_car_id: Option<u64>,
    /// The last car that held the pad, 0 if none has
    pub prev_locked_car_id: u64,
}

impl Default for BoostPadState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BoostPadState {
    pub const DEFAULT: Self = Self {
        is_active: true,
        cooldown: 0.0,
        cur_locked_car_id: None,
        prev_locked_car_id: 0,
    };
}
