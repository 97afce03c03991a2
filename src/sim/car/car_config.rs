use glam::Vec3A;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WheelPairConfig {
    /// Radius of both wheels
    pub wheel_radius: f32,
    /// How far out the suspension rests
    pub suspension_rest_length: f32,
    /// Where the suspension starts, relative to the car origin
    ///
    /// Y is always positive, it gets negated for the right-side wheel
    pub connection_point_offset: Vec3A,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarConfig {
    /// Full size of the hitbox, not the half extents
    pub hitbox_size: Vec3A,
    /// Offset of the hitbox from the car origin
    ///
    /// The center of mass is always at the car origin
    pub hitbox_pos_offset: Vec3A,
    pub front_wheels: WheelPairConfig,
    pub back_wheels: WheelPairConfig,
    /// Three-wheel handling (psyclops), the two front wheels act as one
    pub three_wheels: bool,
    /// `|yaw| + |pitch| + |roll|` must reach this to flip instead of double jumping
    pub dodge_deadzone: f32,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self::OCTANE
    }
}

struct Preset {
    hitbox_size: Vec3A,
    hitbox_offset: Vec3A,
    front_radius: f32,
    back_radius: f32,
    front_rest: f32,
    back_rest: f32,
    front_offset: Vec3A,
    back_offset: Vec3A,
}

const OCTANE_PRESET: Preset = Preset {
    hitbox_size: Vec3A::new(120.507, 86.6994, 38.6591),
    hitbox_offset: Vec3A::new(13.8757, 0.0, 20.755),
    front_radius: 12.5,
    back_radius: 15.0,
    front_rest: 38.755,
    back_rest: 37.055,
    front_offset: Vec3A::new(51.25, 25.90, 20.755),
    back_offset: Vec3A::new(-33.75, 29.50, 20.755),
};

const DOMINUS_PRESET: Preset = Preset {
    hitbox_size: Vec3A::new(130.427, 85.7799, 33.8),
    hitbox_offset: Vec3A::new(9.0, 0.0, 15.75),
    front_radius: 12.0,
    back_radius: 13.5,
    front_rest: 33.95,
    back_rest: 33.85,
    front_offset: Vec3A::new(50.30, 31.10, 15.75),
    back_offset: Vec3A::new(-34.75, 33.00, 15.75),
};

const PLANK_PRESET: Preset = Preset {
    hitbox_size: Vec3A::new(131.32, 87.1704, 31.8944),
    hitbox_offset: Vec3A::new(9.00857, 0.0, 12.0942),
    front_radius: 12.5,
    back_radius: 17.0,
    front_rest: 31.9242,
    back_rest: 27.9242,
    front_offset: Vec3A::new(49.97, 27.80, 12.0942),
    back_offset: Vec3A::new(-35.43, 20.28, 12.0942),
};

const BREAKOUT_PRESET: Preset = Preset {
    hitbox_size: Vec3A::new(133.992, 83.021, 32.8),
    hitbox_offset: Vec3A::new(12.5, 0.0, 11.75),
    front_radius: 13.5,
    back_radius: 15.0,
    front_rest: 29.7,
    back_rest: 29.666,
    front_offset: Vec3A::new(51.50, 26.67, 11.75),
    back_offset: Vec3A::new(-35.75, 35.00, 11.75),
};

const HYBRID_PRESET: Preset = Preset {
    hitbox_size: Vec3A::new(129.519, 84.6879, 36.6591),
    hitbox_offset: Vec3A::new(13.8757, 0.0, 20.755),
    front_radius: 12.5,
    back_radius: 15.0,
    front_rest: 38.755,
    back_rest: 37.055,
    front_offset: Vec3A::new(51.25, 25.90, 20.755),
    back_offset: Vec3A::new(-34.00, 29.50, 20.755),
};

const MERC_PRESET: Preset = Preset {
    hitbox_size: Vec3A::new(123.22, 79.2103, 44.1591),
    hitbox_offset: Vec3A::new(11.3757, 0.0, 21.505),
    front_radius: 15.0,
    back_radius: 15.0,
    front_rest: 39.505,
    back_rest: 39.105,
    front_offset: Vec3A::new(51.25, 25.90, 21.505),
    back_offset: Vec3A::new(-33.75, 29.50, 21.505),
};

const PSYCLOPS_PRESET: Preset = Preset {
    hitbox_size: Vec3A::new(120.641, 86.8334, 38.7931),
    hitbox_offset: Vec3A::new(13.8757, 0.0, 15.0),
    front_radius: 12.5,
    back_radius: 15.0,
    front_rest: 33.0,
    back_rest: 31.3,
    front_offset: Vec3A::new(51.25, 5.0, 15.0),
    back_offset: Vec3A::new(-33.75, 29.50, 15.0),
};

impl CarConfig {
    pub const OCTANE: Self = Self::from_preset(&OCTANE_PRESET, false);
    pub const DOMINUS: Self = Self::from_preset(&DOMINUS_PRESET, false);
    pub const PLANK: Self = Self::from_preset(&PLANK_PRESET, false);
    pub const BREAKOUT: Self = Self::from_preset(&BREAKOUT_PRESET, false);
    pub const HYBRID: Self = Self::from_preset(&HYBRID_PRESET, false);
    pub const MERC: Self = Self::from_preset(&MERC_PRESET, false);
    pub const PSYCLOPS: Self = Self::from_preset(&PSYCLOPS_PRESET, true);

    pub const ALL_PRESETS: [Self; 7] = [
        Self::OCTANE,
        Self::DOMINUS,
        Self::PLANK,
        Self::BREAKOUT,
        Self::HYBRID,
        Self::MERC,
        Self::PSYCLOPS,
    ];

    const fn from_preset(preset: &Preset, three_wheels: bool) -> Self {
        Self {
            hitbox_size: preset.hitbox_size,
            hitbox_pos_offset: preset.hitbox_offset,
            front_wheels: WheelPairConfig {
                wheel_radius: preset.front_radius,
                suspension_rest_length: preset.front_rest,
                connection_point_offset: preset.front_offset,
            },
            back_wheels: WheelPairConfig {
                wheel_radius: preset.back_radius,
                suspension_rest_length: preset.back_rest,
                connection_point_offset: preset.back_offset,
            },
            three_wheels,
            dodge_deadzone: 0.5,
        }
    }
}
