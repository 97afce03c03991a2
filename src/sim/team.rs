#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    #[default]
    Blue,
    Orange,
}

impl Team {
    pub const ALL: [Self; 2] = [Self::Blue, Self::Orange];

    /// Which team's half of the field the given y coordinate lies on
    #[must_use]
    pub const fn from_team_y(y: f32) -> Self {
        if y <= 0.0 { Self::Blue } else { Self::Orange }
    }

    /// -1 for blue, 1 for orange
    #[must_use]
    pub const fn get_y_dir(self) -> f32 {
        match self {
            Self::Blue => -1.0,
            Self::Orange => 1.0,
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Blue => Self::Orange,
            Self::Orange => Self::Blue,
        }
    }
}

impl TryFrom<u8> for Team {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Blue),
            1 => Ok(Self::Orange),
            other => Err(other),
        }
    }
}
