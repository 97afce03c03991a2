use crate::BoostPadConfig;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArenaConfig {
    /// Never integrate the ball's orientation
    pub no_ball_rot: bool,
    /// Use a custom list of boost pads (`custom_boost_pads`) instead of the normal one
    pub use_custom_boost_pads: bool,
    /// Custom boost pads to use, if `use_custom_boost_pads`
    pub custom_boost_pads: Vec<BoostPadConfig>,
    /// Optional RNG seed for deterministic behavior
    /// If None, a random seed will be used
    pub rng_seed: Option<u64>,
    /// Put everything back into a random kickoff right after a goal
    pub reset_on_goal: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ArenaConfig {
    pub const DEFAULT: Self = Self {
        no_ball_rot: true,
        use_custom_boost_pads: false,
        custom_boost_pads: Vec::new(),
        rng_seed: None,
        reset_on_goal: true,
    };

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng_seed: Some(seed),
            ..Self::DEFAULT
        }
    }
}
