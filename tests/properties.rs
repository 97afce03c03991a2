mod common;

use carball::{Arena, CarConfig, CarControls, CarState, GameMode, Team};
use common::{seeded_arena, serialized};
use proptest::prelude::*;

fn controls_strategy() -> impl Strategy<Value = CarControls> {
    (
        -2.0f32..2.0,
        -2.0f32..2.0,
        -1.5f32..1.5,
        -1.5f32..1.5,
        -1.5f32..1.5,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(throttle, steer, pitch, yaw, roll, jump, boost, handbrake)| CarControls {
            throttle,
            steer,
            pitch,
            yaw,
            roll,
            jump,
            boost,
            handbrake,
        })
}

/// Each entry is held for a few ticks
fn input_sequence() -> impl Strategy<Value = Vec<(CarControls, u32)>> {
    prop::collection::vec((controls_strategy(), 1u32..12), 1..12)
}

fn arena_with_cars(configs: &[CarConfig]) -> (Arena, Vec<u64>) {
    let mut arena = seeded_arena(GameMode::Soccar);
    let ids = configs
        .iter()
        .enumerate()
        .map(|(i, &config)| {
            let team = if i % 2 == 0 { Team::Blue } else { Team::Orange };
            arena.add_car(team, config)
        })
        .collect();

    arena.reset_to_random_kickoff(None);
    (arena, ids)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn boost_stays_in_range(inputs in input_sequence(), start_boost in 0.0f32..=100.0) {
        let (mut arena, ids) = arena_with_cars(&[CarConfig::OCTANE, CarConfig::DOMINUS]);
        let max_boost = arena.mutator_config().car_max_boost_amount;

        for &id in &ids {
            let mut state = *arena.get_car_state(id).unwrap();
            state.boost = start_boost;
            arena.set_car_state(id, &state);
        }

        for (controls, ticks) in inputs {
            for &id in &ids {
                arena.set_car_controls(id, controls);
            }

            for _ in 0..ticks {
                arena.step(1);
                for &id in &ids {
                    let boost = arena.get_car_state(id).unwrap().boost;
                    prop_assert!((0.0..=max_boost).contains(&boost), "boost {boost}");
                }
            }
        }
    }

    #[test]
    fn grounded_matches_wheel_contacts(inputs in input_sequence()) {
        let (mut arena, ids) = arena_with_cars(&[CarConfig::OCTANE, CarConfig::PSYCLOPS]);

        for (controls, ticks) in inputs {
            for &id in &ids {
                arena.set_car_controls(id, controls);
            }

            for _ in 0..ticks {
                arena.step(1);
                for car in arena.cars() {
                    let state = car.get_state();
                    prop_assert_eq!(
                        state.is_on_ground,
                        CarState::ground_from_wheel_contacts(
                            state.wheels_with_contact,
                            car.config().three_wheels,
                        )
                    );
                }
            }
        }
    }

    #[test]
    fn stepping_is_associative(controls in controls_strategy(), n in 0u32..40, m in 0u32..40) {
        let (mut split, ids) =
            arena_with_cars(&[CarConfig::OCTANE, CarConfig::HYBRID, CarConfig::PLANK]);
        for &id in &ids {
            split.set_car_controls(id, controls);
        }
        let mut whole = split.clone();

        split.step(n);
        split.step(m);
        whole.step(n + m);

        prop_assert_eq!(serialized(&split), serialized(&whole));
    }

    #[test]
    fn wheel_rule_four_wheels(wheels in any::<[bool; 4]>()) {
        let contacts = wheels.iter().filter(|&&contact| contact).count();
        prop_assert_eq!(CarState::ground_from_wheel_contacts(wheels, false), contacts >= 3);
    }

    #[test]
    fn wheel_rule_three_wheels(wheels in any::<[bool; 4]>()) {
        let front = usize::from(wheels[0] || wheels[1]);
        let back = wheels[2..].iter().filter(|&&contact| contact).count();
        prop_assert_eq!(CarState::ground_from_wheel_contacts(wheels, true), front + back >= 2);
    }
}
