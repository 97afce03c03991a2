#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameMode {
    #[default]
    Soccar,
    /// Smaller arena, the ball has to drop through a basket hanging over each end
    Hoops,
    /// Soccar, but the ball steers itself towards the last opposing net it was hit towards
    Heatseeker,
    /// No nets, the ball scores by breaking through the floor tiles on the opponent's side
    Dropshot,
    /// Soccar without goals, boost pads or the arena hull.
    /// The cars and ball will fall infinitely.
    TheVoid,
}

impl GameMode {
    pub const ALL: [Self; 5] = [
        Self::Soccar,
        Self::Hoops,
        Self::Heatseeker,
        Self::Dropshot,
        Self::TheVoid,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Soccar => "soccar",
            Self::Hoops => "hoops",
            Self::Heatseeker => "heatseeker",
            Self::Dropshot => "dropshot",
            Self::TheVoid => "void",
        }
    }

    /// Whether this mode has goals and an arena hull
    #[must_use]
    pub const fn has_arena_stuff(self) -> bool {
        !matches!(self, Self::TheVoid)
    }

    /// Whether this mode has boost pads
    #[must_use]
    pub const fn has_boost_pads(self) -> bool {
        !matches!(self, Self::TheVoid | Self::Dropshot)
    }
}

impl TryFrom<u8> for GameMode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(usize::from(value)).copied().ok_or(value)
    }
}
