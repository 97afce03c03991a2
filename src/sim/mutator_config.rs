use glam::Vec3A;

use crate::{GameMode, sim::consts};

#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DemoMode {
    /// Supersonic front-bumper hits demolish
    #[default]
    Normal,
    /// Any front-bumper hit demolishes
    OnContact,
    Disabled,
}

impl TryFrom<u8> for DemoMode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Normal),
            1 => Ok(Self::OnContact),
            2 => Ok(Self::Disabled),
            other => Err(other),
        }
    }
}

/// Gameplay rules that can be changed between ticks
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MutatorConfig {
    pub gravity: Vec3A,
    pub car_mass: f32,
    pub car_world_friction: f32,
    pub car_world_restitution: f32,
    pub ball_mass: f32,
    pub ball_max_speed: f32,
    pub ball_drag: f32,
    pub ball_world_friction: f32,
    pub ball_world_restitution: f32,
    pub jump_accel: f32,
    pub jump_immediate_force: f32,
    pub boost_accel_ground: f32,
    pub boost_accel_air: f32,
    pub boost_used_per_second: f32,
    pub respawn_delay: f32,
    pub bump_cooldown_time: f32,
    pub car_max_boost_amount: f32,
    pub car_spawn_boost_amount: f32,
    pub boost_pad_amount_small: f32,
    pub boost_pad_amount_big: f32,
    pub boost_pad_cooldown_big: f32,
    pub boost_pad_cooldown_small: f32,

    pub ball_hit_extra_force_scale: f32,
    pub bump_force_scale: f32,
    pub ball_radius: f32,
    pub unlimited_flips: bool,
    pub unlimited_double_jumps: bool,
    pub recharge_boost_enabled: bool,
    pub recharge_boost_per_second: f32,
    pub recharge_boost_delay: f32,
    pub demo_mode: DemoMode,
    pub enable_team_demos: bool,
    /// Ignored in game modes without goals
    pub goal_base_threshold_y: f32,
}

impl Default for MutatorConfig {
    fn default() -> Self {
        const { Self::new(GameMode::Soccar) }
    }
}

impl MutatorConfig {
    #[must_use]
    pub const fn new(game_mode: GameMode) -> Self {
        Self {
            gravity: Vec3A::new(0., 0., consts::GRAVITY_Z),
            car_mass: consts::car::MASS,
            car_world_friction: consts::car::BASE_COEFS.friction,
            car_world_restitution: consts::car::BASE_COEFS.restitution,
            ball_mass: consts::ball::MASS,
            ball_max_speed: consts::ball::MAX_SPEED,
            ball_drag: consts::ball::DRAG,
            ball_world_friction: consts::ball::COEFS.friction,
            ball_world_restitution: consts::ball::COEFS.restitution,
            jump_accel: consts::car::jump::ACCEL,
            jump_immediate_force: consts::car::jump::IMMEDIATE_FORCE,
            boost_accel_ground: consts::car::boost::ACCEL_GROUND,
            boost_accel_air: consts::car::boost::ACCEL_AIR,
            boost_used_per_second: consts::car::boost::USED_PER_SECOND,
            respawn_delay: consts::car::spawn::DEMO_RESPAWN_TIME,
            bump_cooldown_time: consts::car::bump::COOLDOWN_TIME,
            car_max_boost_amount: consts::car::boost::MAX,
            car_spawn_boost_amount: match game_mode {
                GameMode::Dropshot => 100.,
                _ => consts::car::boost::SPAWN_AMOUNT,
            },
            boost_pad_amount_big: consts::boost_pads::BOOST_AMOUNT_BIG,
            boost_pad_amount_small: consts::boost_pads::BOOST_AMOUNT_SMALL,
            boost_pad_cooldown_big: consts::boost_pads::COOLDOWN_BIG,
            boost_pad_cooldown_small: consts::boost_pads::COOLDOWN_SMALL,
            ball_hit_extra_force_scale: 1.,
            bump_force_scale: 1.,
            ball_radius: match game_mode {
                GameMode::Hoops => consts::ball::RADIUS_HOOPS,
                GameMode::Dropshot => consts::ball::RADIUS_DROPSHOT,
                _ => consts::ball::RADIUS_SOCCAR,
            },
            unlimited_flips: false,
            unlimited_double_jumps: false,
            recharge_boost_enabled: false,
            recharge_boost_per_second: consts::car::boost::RECHARGE_PER_SECOND,
            recharge_boost_delay: consts::car::boost::RECHARGE_DELAY,
            demo_mode: DemoMode::Normal,
            enable_team_demos: false,
            goal_base_threshold_y: consts::goal::SOCCAR_GOAL_SCORE_BASE_THRESHOLD_Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MutatorConfig;
    use crate::{GameMode, sim::consts};

    #[test]
    fn follows_game_mode() {
        let soccar = MutatorConfig::new(GameMode::Soccar);
        assert_eq!(soccar, MutatorConfig::default());
        assert_eq!(MutatorConfig::new(GameMode::TheVoid), soccar);

        let hoops = MutatorConfig::new(GameMode::Hoops);
        assert_eq!(hoops.ball_radius, consts::ball::RADIUS_HOOPS);
        assert_eq!(hoops.car_spawn_boost_amount, soccar.car_spawn_boost_amount);

        let dropshot = MutatorConfig::new(GameMode::Dropshot);
        assert_eq!(dropshot.ball_radius, consts::ball::RADIUS_DROPSHOT);
        assert_eq!(dropshot.car_spawn_boost_amount, 100.0);
    }
}
