use glam::Vec3A;

use crate::{GameMode, MutatorConfig, consts::boost_pads};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoostPadConfig {
    pub pos: Vec3A,
    pub is_big: bool,
}

impl BoostPadConfig {
    #[must_use]
    pub const fn new(pos: Vec3A, is_big: bool) -> Self {
        Self { pos, is_big }
    }

    /// Radius of the cylinder a car's origin must be inside of to pick this pad up
    #[must_use]
    pub const fn radius(&self) -> f32 {
        if self.is_big {
            boost_pads::CYL_RAD_BIG
        } else {
            boost_pads::CYL_RAD_SMALL
        }
    }

    #[must_use]
    pub const fn get_max_cooldown(&self, mutator_config: &MutatorConfig) -> f32 {
        if self.is_big {
            mutator_config.boost_pad_cooldown_big
        } else {
            mutator_config.boost_pad_cooldown_small
        }
    }

    #[must_use]
    pub const fn get_boost_amount(&self, mutator_config: &MutatorConfig) -> f32 {
        if self.is_big {
            mutator_config.boost_pad_amount_big
        } else {
            mutator_config.boost_pad_amount_small
        }
    }

    /// The standard soccar layout, big pads first
    #[must_use]
    pub fn soccar_layout() -> Vec<Self> {
        Self::layout(&boost_pads::LOCS_BIG, &boost_pads::LOCS_SMALL)
    }

    /// The pads of `game_mode`, big pads first
    ///
    /// Empty for modes without boost pads
    #[must_use]
    pub fn default_layout(game_mode: GameMode) -> Vec<Self> {
        match game_mode {
            GameMode::Soccar | GameMode::Heatseeker => Self::soccar_layout(),
            GameMode::Hoops => {
                Self::layout(&boost_pads::LOCS_BIG_HOOPS, &boost_pads::LOCS_SMALL_HOOPS)
            }
            GameMode::Dropshot | GameMode::TheVoid => Vec::new(),
        }
    }

    fn layout(big: &[Vec3A], small: &[Vec3A]) -> Vec<Self> {
        let big = big.iter().map(|&pos| Self::new(pos, true));
        let small = small.iter().map(|&pos| Self::new(pos, false));
        big.chain(small).collect()
    }
}
