use std::ops::{Deref, DerefMut};

use glam::Vec3A;

use crate::{
    BallHitInfo, CarControls, PhysState,
    sim::consts::car::{boost, jump, spawn},
};

/// A recent bump or demo against another car
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarContact {
    pub other_car_id: u64,
    /// Further bumps against the same car are ignored until this reaches 0
    pub cooldown_timer: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarState {
    pub phys: PhysState,
    /// Controls to simulate the car with
    pub controls: CarControls,
    /// Controls from the last time this car was simulated (equals `controls` after a step)
    pub prev_controls: CarControls,
    /// Enough wheels are touching something, see [`CarState::ground_from_wheel_contacts`]
    pub is_on_ground: bool,
    /// Whether each of the 4 wheels have contact, the first two are front
    pub wheels_with_contact: [bool; 4],
    /// Whether we jumped to get into the air
    ///
    /// Can be false while airborne, if we left the ground with a flip reset
    pub has_jumped: bool,
    /// True if we have double jumped and are still in the air
    pub has_double_jumped: bool,
    /// True if we are in the air, and (have flipped or are currently flipping)
    pub has_flipped: bool,
    /// Relative torque direction of the flip
    ///
    /// Forward flip will have positive Y
    pub flip_rel_torque: Vec3A,
    /// When currently jumping, the time since we started jumping, else 0
    pub jump_time: f32,
    /// When currently flipping, the time since we started flipping, else 0
    pub flip_time: f32,
    /// True during a flip (not an auto-flip, and not after a flip)
    pub is_flipping: bool,
    /// True during a jump
    pub is_jumping: bool,
    /// Total time spent in the air
    pub air_time: f32,
    /// Time spent in the air once `!is_jumping`
    ///
    /// If we never jumped, it is 0
    pub air_time_since_jump: f32,
    /// Goes from 0 to the max boost amount (100 by default)
    pub boost: f32,
    /// Used for recharge boost, counts up from 0 on spawn (in seconds)
    pub time_since_boosted: f32,
    /// True if we boosted that tick
    ///
    /// There exists a minimum boosting time, thus why we must track boosting time
    pub is_boosting: bool,
    pub boosting_time: f32,
    pub is_supersonic: bool,
    /// Time spent supersonic, for checking with the supersonic maintain time
    pub supersonic_time: f32,
    /// This is a state variable due to the rise/fall rate of handbrake inputs
    pub handbrake_val: f32,
    pub is_auto_flipping: bool,
    /// Counts down when auto-flipping
    pub auto_flip_timer: f32,
    pub auto_flip_torque_scale: f32,
    pub world_contact_normal: Option<Vec3A>,
    pub car_contact: Option<CarContact>,
    pub is_demoed: bool,
    pub demo_respawn_timer: f32,
    pub ball_hit_info: Option<BallHitInfo>,
}

impl Default for CarState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CarState {
    pub const DEFAULT: Self = Self {
        phys: PhysState::at_rest(Vec3A::new(0.0, 0.0, spawn::SPAWN_Z)),
        controls: CarControls::DEFAULT,
        prev_controls: CarControls::DEFAULT,
        is_on_ground: true,
        wheels_with_contact: [false; 4],
        has_jumped: false,
        has_double_jumped: false,
        has_flipped: false,
        flip_rel_torque: Vec3A::ZERO,
        jump_time: 0.0,
        flip_time: 0.0,
        is_flipping: false,
        is_jumping: false,
        air_time: 0.0,
        air_time_since_jump: 0.0,
        boost: boost::SPAWN_AMOUNT,
        time_since_boosted: 0.0,
        is_boosting: false,
        boosting_time: 0.0,
        is_supersonic: false,
        supersonic_time: 0.0,
        handbrake_val: 0.0,
        is_auto_flipping: false,
        auto_flip_timer: 0.0,
        auto_flip_torque_scale: 0.0,
        world_contact_normal: None,
        car_contact: None,
        is_demoed: false,
        demo_respawn_timer: 0.0,
        ball_hit_info: None,
    };

    /// Whether a car with these wheel contacts counts as grounded
    ///
    /// Four-wheel cars need 3 contacts.
    /// Three-wheel cars treat both front wheels as a single wheel and need 2 of their 3.
    #[must_use]
    pub const fn ground_from_wheel_contacts(wheels: [bool; 4], three_wheels: bool) -> bool {
        let [front_left, front_right, back_left, back_right] = wheels;
        let back = back_left as u8 + back_right as u8;

        if three_wheels {
            (front_left || front_right) as u8 + back >= 2
        } else {
            front_left as u8 + front_right as u8 + back >= 3
        }
    }

    #[must_use]
    pub const fn has_flip_or_jump(&self) -> bool {
        self.is_on_ground
            || (!self.has_flipped
                && !self.has_double_jumped
                && self.air_time_since_jump < jump::DOUBLEJUMP_MAX_DELAY)
    }

    /// Airborne without having jumped, but still able to flip
    #[must_use]
    pub const fn has_flip_reset(&self) -> bool {
        !self.is_on_ground && self.has_flip_or_jump() && !self.has_jumped
    }

    #[must_use]
    pub const fn got_flip_reset(&self) -> bool {
        !self.is_on_ground && !self.has_jumped
    }
}

impl Deref for CarState {
    type Target = PhysState;
    fn deref(&self) -> &Self::Target {
        &self.phys
    }
}

impl DerefMut for CarState {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.phys
    }
}

#[cfg(test)]
mod tests {
    use super::CarState;

    #[test]
    fn four_wheel_grounding() {
        assert!(CarState::ground_from_wheel_contacts([true; 4], false));
        assert!(CarState::ground_from_wheel_contacts([true, false, true, true], false));
        assert!(!CarState::ground_from_wheel_contacts([true, false, false, true], false));
        assert!(!CarState::ground_from_wheel_contacts([false; 4], false));
    }

    #[test]
    fn three_wheel_grounding() {
        assert!(CarState::ground_from_wheel_contacts([true; 4], true));
        assert!(CarState::ground_from_wheel_contacts([false, true, false, true], true));
        assert!(CarState::ground_from_wheel_contacts([false, false, true, true], true));
        // Both front wheels only count once
        assert!(!CarState::ground_from_wheel_contacts([true, true, false, false], true));
        assert!(!CarState::ground_from_wheel_contacts([false, false, false, true], true));
    }

    #[test]
    fn flip_reset_flags() {
        let mut state = CarState {
            is_on_ground: false,
            has_jumped: false,
            ..CarState::DEFAULT
        };
        assert!(state.got_flip_reset());
        assert!(state.has_flip_reset());

        state.has_flipped = true;
        assert!(!state.has_flip_reset());
        assert!(!state.has_flip_or_jump());
    }
}
