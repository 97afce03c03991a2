use glam::Vec3A;

use crate::{BoostPadConfig, BoostPadState, CarState, MutatorConfig, consts::boost_pads};

#[derive(Clone, Copy, Debug)]
pub struct BoostPad {
    config: BoostPadConfig,
    pub(crate) internal_state: BoostPadState,
}

impl BoostPad {
    #[must_use]
    pub const fn new(config: BoostPadConfig) -> Self {
        Self {
            config,
            internal_state: BoostPadState::DEFAULT,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &BoostPadConfig {
        &self.config
    }

    #[must_use]
    pub const fn get_state(&self) -> &BoostPadState {
        &self.internal_state
    }

    pub const fn set_state(&mut self, state: BoostPadState) {
        self.internal_state = state;
    }

    pub const fn reset(&mut self) {
        self.internal_state = BoostPadState::DEFAULT;
    }

    /// Whether a car origin at `car_pos` is inside of the pickup cylinder
    #[must_use]
    pub fn is_overlapping(&self, car_pos: Vec3A) -> bool {
        let radius = self.config.radius();
        let dist_sq_2d = self.config.pos.truncate().distance_squared(car_pos.truncate());

        dist_sq_2d < radius * radius
            && (car_pos.z - self.config.pos.z).abs() <= boost_pads::CYL_HEIGHT
    }

    pub(crate) fn pre_tick_update(&mut self, tick_time: f32) {
        let state = &mut self.internal_state;
        state.cur_locked_car_id = None;

        if !state.is_active {
            state.cooldown -= tick_time;
            // Summed tick times drift from the cooldown, so round to the nearest tick
            if state.cooldown <= tick_time * 0.5 {
                state.cooldown = 0.0;
                state.is_active = true;
            }
        }
    }

    /// Lock the pad to `car_id` if it is free and the car is touching it
    ///
    /// Returns true if the car now holds the lock
    pub(crate) fn check_collide(&mut self, car_id: u64, car_pos: Vec3A) -> bool {
        let state = &self.internal_state;
        if !state.is_active || state.cur_locked_car_id.is_some() || !self.is_overlapping(car_pos) {
            return false;
        }

        self.internal_state.cur_locked_car_id = Some(car_id);
        true
    }

    /// Give boost to the car that locked this pad during the tick and start the cooldown
    pub(crate) fn post_tick_update(
        &mut self,
        locked_car: Option<&mut CarState>,
        mutator_config: &MutatorConfig,
    ) {
        let Some(car_id) = self.internal_state.cur_locked_car_id.take() else {
            return;
        };

        if let Some(car_state) = locked_car {
            car_state.boost = (car_state.boost + self.config.get_boost_amount(mutator_config))
                .min(mutator_config.car_max_boost_amount);
        }

        let state = &mut self.internal_state;
        state.is_active = false;
        state.cooldown = self.config.get_max_cooldown(mutator_config);
        state.prev_locked_car_id = car_id;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3A;

    use super::BoostPad;
    use crate::{BoostPadConfig, CarState, MutatorConfig};

    fn big_pad() -> BoostPad {
        BoostPad::new(BoostPadConfig::new(Vec3A::new(3072.0, 4096.0, 73.0), true))
    }

    #[test]
    fn first_car_keeps_the_lock() {
        let mut pad = big_pad();
        pad.pre_tick_update(1.0 / 120.0);

        let pos = Vec3A::new(3072.0, 4100.0, 17.0);
        assert!(pad.check_collide(1, pos));
        assert!(!pad.check_collide(2, pos));
        assert_eq!(pad.get_state().cur_locked_car_id, Some(1));
    }

    #[test]
    fn pickup_awards_and_starts_cooldown() {
        let mutator_config = MutatorConfig::default();
        let mut pad = big_pad();
        let mut car_state = CarState {
            boost: 20.0,
            ..CarState::DEFAULT
        };

        pad.pre_tick_update(1.0 / 120.0);
        assert!(pad.check_collide(3, Vec3A::new(3100.0, 4096.0, 17.0)));
        pad.post_tick_update(Some(&mut car_state), &mutator_config);

        assert_eq!(car_state.boost, 100.0);
        let state = pad.get_state();
        assert!(!state.is_active);
        assert_eq!(state.cooldown, mutator_config.boost_pad_cooldown_big);
        assert_eq!(state.prev_locked_car_id, 3);
        assert_eq!(state.cur_locked_car_id, None);
    }

    #[test]
    fn cooldown_reactivates() {
        let mutator_config = MutatorConfig::default();
        let mut pad = BoostPad::new(BoostPadConfig::new(Vec3A::new(0.0, 1024.0, 70.0), false));
        let mut car_state = CarState {
            boost: 0.0,
            ..CarState::DEFAULT
        };

        pad.pre_tick_update(0.5);
        assert!(pad.check_collide(1, Vec3A::new(0.0, 1024.0, 17.0)));
        pad.post_tick_update(Some(&mut car_state), &mutator_config);
        assert_eq!(car_state.boost, mutator_config.boost_pad_amount_small);

        for _ in 0..7 {
            pad.pre_tick_update(0.5);
            assert!(!pad.get_state().is_active);
        }

        pad.pre_tick_update(0.5);
        assert!(pad.get_state().is_active);
    }

    #[test]
    fn big_cooldown_lasts_exactly_its_ticks() {
        let mutator_config = MutatorConfig::default();
        let tick_time = 1.0 / 120.0;
        let mut pad = big_pad();

        pad.pre_tick_update(tick_time);
        assert!(pad.check_collide(1, Vec3A::new(3072.0, 4096.0, 17.0)));
        pad.post_tick_update(None, &mutator_config);

        let cooldown_ticks = (mutator_config.boost_pad_cooldown_big / tick_time).round() as u32;
        for _ in 0..cooldown_ticks - 1 {
            pad.pre_tick_update(tick_time);
        }
        assert!(!pad.get_state().is_active);

        pad.pre_tick_update(tick_time);
        let state = pad.get_state();
        assert!(state.is_active);
        assert_eq!(state.cooldown, 0.0);
    }

    #[test]
    fn out_of_reach() {
        let pad = big_pad();
        assert!(!pad.is_overlapping(Vec3A::new(3072.0 + 210.0, 4096.0, 17.0)));
        assert!(!pad.is_overlapping(Vec3A::new(3072.0, 4096.0, 73.0 + 96.0)));
        assert!(pad.is_overlapping(Vec3A::new(3072.0 + 200.0, 4096.0, 73.0 + 95.0)));
    }
}
