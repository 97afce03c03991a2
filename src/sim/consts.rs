//! Gameplay constants, all in Unreal Units (uu) and seconds unless noted otherwise

use std::f32::consts::{FRAC_1_SQRT_2, PI};

use crate::sim::LinearPieceCurve;

pub const GRAVITY_Z: f32 = -650.0;

pub const ARENA_EXTENT_X: f32 = 4096.0;
pub const ARENA_EXTENT_Y: f32 = 5120.0;
pub const ARENA_HEIGHT: f32 = 2044.0;

pub const ARENA_EXTENT_X_HOOPS: f32 = 8900.0 / 3.0;
pub const ARENA_EXTENT_Y_HOOPS: f32 = 3581.0;
pub const ARENA_HEIGHT_HOOPS: f32 = 1820.0;

pub const DEFAULT_TICK_RATE: f32 = 120.0;
/// Lowest tick rate an arena may be constructed with
pub const MIN_TICK_RATE: f32 = 15.0;
/// Highest tick rate an arena may be constructed with
pub const MAX_TICK_RATE: f32 = 120.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactCoefs {
    pub friction: f32,
    pub restitution: f32,
}

pub mod car {
    use super::ContactCoefs;

    pub const MASS: f32 = 180.0;
    pub const MAX_SPEED: f32 = 2300.0;
    pub const MAX_ANG_SPEED: f32 = 5.5;

    /// Friction and restitution of the car body itself
    pub const BASE_COEFS: ContactCoefs = ContactCoefs {
        friction: 0.3,
        restitution: 0.1,
    };
    pub const CAR_CAR_COEFS: ContactCoefs = ContactCoefs {
        friction: 0.09,
        restitution: 0.1,
    };
    pub const CAR_BALL_COEFS: ContactCoefs = ContactCoefs {
        friction: 2.0,
        restitution: 0.0,
    };

    pub mod spawn {
        use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

        use crate::GameMode;

        pub const SPAWN_Z: f32 = 17.0;
        pub const RESPAWN_Z: f32 = 36.0;
        pub const DEMO_RESPAWN_TIME: f32 = 3.0;

        #[derive(Clone, Copy, Debug)]
        pub struct CarSpawnPos {
            pub x: f32,
            pub y: f32,
            pub yaw_ang: f32,
        }

        impl CarSpawnPos {
            const fn new(x: f32, y: f32, yaw_ang: f32) -> Self {
                Self { x, y, yaw_ang }
            }
        }

        /// Blue side kickoff locations, orange is mirrored
        pub const KICKOFF_LOCATIONS_SOCCAR: [CarSpawnPos; 5] = [
            CarSpawnPos::new(-2048.0, -2560.0, FRAC_PI_4),
            CarSpawnPos::new(2048.0, -2560.0, FRAC_PI_4 * 3.0),
            CarSpawnPos::new(-256.0, -3840.0, FRAC_PI_2),
            CarSpawnPos::new(256.0, -3840.0, FRAC_PI_2),
            CarSpawnPos::new(0.0, -4608.0, FRAC_PI_2),
        ];

        pub const KICKOFF_LOCATIONS_HEATSEEKER: [CarSpawnPos; 4] = [
            CarSpawnPos::new(-1000.0, -4620.0, FRAC_PI_2),
            CarSpawnPos::new(1000.0, -4620.0, FRAC_PI_2),
            CarSpawnPos::new(-2000.0, -4620.0, FRAC_PI_2),
            CarSpawnPos::new(2000.0, -4620.0, FRAC_PI_2),
        ];

        pub const RESPAWN_LOCATIONS_SOCCAR: [CarSpawnPos; 4] = [
            CarSpawnPos::new(-2304.0, -4608.0, FRAC_PI_2),
            CarSpawnPos::new(-2688.0, -4608.0, FRAC_PI_2),
            CarSpawnPos::new(2304.0, -4608.0, FRAC_PI_2),
            CarSpawnPos::new(2688.0, -4608.0, FRAC_PI_2),
        ];

        pub const KICKOFF_LOCATIONS_HOOPS: [CarSpawnPos; 5] = [
            CarSpawnPos::new(-1536.0, -3072.0, FRAC_PI_2),
            CarSpawnPos::new(1536.0, -3072.0, FRAC_PI_2),
            CarSpawnPos::new(-256.0, -2816.0, FRAC_PI_2),
            CarSpawnPos::new(256.0, -2816.0, FRAC_PI_2),
            CarSpawnPos::new(0.0, -3200.0, FRAC_PI_2),
        ];

        pub const RESPAWN_LOCATIONS_HOOPS: [CarSpawnPos; 4] = [
            CarSpawnPos::new(-1920.0, -3072.0, FRAC_PI_2),
            CarSpawnPos::new(-1152.0, -3072.0, FRAC_PI_2),
            CarSpawnPos::new(1152.0, -3072.0, FRAC_PI_2),
            CarSpawnPos::new(1920.0, -3072.0, FRAC_PI_2),
        ];

        pub const KICKOFF_LOCATIONS_DROPSHOT: [CarSpawnPos; 5] = [
            CarSpawnPos::new(-1867.0, -2379.0, FRAC_PI_4),
            CarSpawnPos::new(1867.0, -2379.0, FRAC_PI_4 * 3.0),
            CarSpawnPos::new(-256.0, -3576.0, FRAC_PI_2),
            CarSpawnPos::new(256.0, -3576.0, FRAC_PI_2),
            CarSpawnPos::new(0.0, -4088.0, FRAC_PI_2),
        ];

        pub const RESPAWN_LOCATIONS_DROPSHOT: [CarSpawnPos; 4] = [
            CarSpawnPos::new(-2176.0, -3410.0, FRAC_PI_2),
            CarSpawnPos::new(-1152.0, -3970.0, FRAC_PI_2),
            CarSpawnPos::new(1152.0, -3970.0, FRAC_PI_2),
            CarSpawnPos::new(2176.0, -3410.0, FRAC_PI_2),
        ];

        #[must_use]
        pub const fn get_kickoff_locations(game_mode: GameMode) -> &'static [CarSpawnPos] {
            match game_mode {
                GameMode::Hoops => &KICKOFF_LOCATIONS_HOOPS,
                GameMode::Heatseeker => &KICKOFF_LOCATIONS_HEATSEEKER,
                GameMode::Dropshot => &KICKOFF_LOCATIONS_DROPSHOT,
                GameMode::Soccar | GameMode::TheVoid => &KICKOFF_LOCATIONS_SOCCAR,
            }
        }

        #[must_use]
        pub const fn get_respawn_locations(game_mode: GameMode) -> &'static [CarSpawnPos] {
            match game_mode {
                GameMode::Hoops => &RESPAWN_LOCATIONS_HOOPS,
                GameMode::Dropshot => &RESPAWN_LOCATIONS_DROPSHOT,
                GameMode::Soccar | GameMode::Heatseeker | GameMode::TheVoid => {
                    &RESPAWN_LOCATIONS_SOCCAR
                }
            }
        }
    }

    pub mod boost {
        pub const MAX: f32 = 100.0;
        pub const USED_PER_SECOND: f32 = 100.0 / 3.0;
        /// Minimum time we can be boosting for
        pub const MIN_TIME: f32 = 0.1;
        pub const ACCEL_GROUND: f32 = 2975.0 / 3.0;
        pub const ACCEL_AIR: f32 = 3175.0 / 3.0;
        pub const SPAWN_AMOUNT: f32 = 100.0 / 3.0;
        pub const RECHARGE_PER_SECOND: f32 = 10.0;
        pub const RECHARGE_DELAY: f32 = 0.25;
    }

    pub mod jump {
        pub const ACCEL: f32 = 4375.0 / 3.0;
        pub const IMMEDIATE_FORCE: f32 = 875.0 / 3.0;
        pub const MIN_TIME: f32 = 0.025;
        pub const RESET_TIME_PAD: f32 = 1.0 / 40.0;
        pub const MAX_TIME: f32 = 0.2;
        /// Can be at most 1.25 seconds after the jump is finished
        pub const DOUBLEJUMP_MAX_DELAY: f32 = 1.25;
    }

    pub mod flip {
        pub const Z_DAMP_120: f32 = 0.35;
        pub const Z_DAMP_START: f32 = 0.15;
        pub const Z_DAMP_END: f32 = 0.21;
        pub const TORQUE_TIME: f32 = 0.65;
        pub const TORQUE_X: f32 = 260.0;
        pub const TORQUE_Y: f32 = 224.0;
        pub const PITCHLOCK_EXTRA_TIME: f32 = 0.3;
        pub const INITIAL_VEL_SCALE: f32 = 500.0;
        pub const FORWARD_IMPULSE_MAX_SPEED_SCALE: f32 = 1.0;
        pub const SIDE_IMPULSE_MAX_SPEED_SCALE: f32 = 1.9;
        pub const BACKWARD_IMPULSE_MAX_SPEED_SCALE: f32 = 2.5;
        pub const BACKWARD_IMPULSE_SCALE_X: f32 = 16.0 / 15.0;
    }

    pub mod autoflip {
        use super::super::{FRAC_1_SQRT_2, PI};

        pub const IMPULSE: f32 = 200.0;
        pub const TORQUE: f32 = 50.0;
        pub const TIME: f32 = 0.4;
        pub const NORM_Z_THRESH: f32 = FRAC_1_SQRT_2;
        pub const ROLL_THRESH: f32 = 2.8;
        pub const MAX_ROLL: f32 = PI;
    }

    pub mod autoroll {
        pub const FORCE: f32 = 100.0;
        pub const TORQUE: f32 = 80.0;
    }

    pub mod air_control {
        use glam::Vec3A;

        use super::super::PI;

        /// Pitch, yaw, roll
        pub const TORQUE: Vec3A = Vec3A::new(130.0, 95.0, 400.0);
        /// Pitch, yaw, roll
        pub const DAMPING: Vec3A = Vec3A::new(30.0, 20.0, 50.0);
        /// Converts game torque units into angular acceleration
        pub const TORQUE_APPLY_SCALE: f32 = 2.0 * PI / 65536.0 * 1000.0;
    }

    pub mod drive {
        use super::MASS;

        pub const THROTTLE_TORQUE_AMOUNT: f32 = MASS * 400.0;
        pub const BRAKE_TORQUE_AMOUNT: f32 = MASS * (14.25 + (1.0 / 3.0));
        /// Below this speed, the car will instantly stop when not throttling
        pub const STOPPING_FORWARD_VEL: f32 = 25.0;
        pub const COASTING_BRAKE_FACTOR: f32 = 0.15;
        pub const BRAKING_NO_THROTTLE_SPEED_THRESH: f32 = 0.01;
        pub const THROTTLE_DEADZONE: f32 = 0.001;
        pub const THROTTLE_AIR_ACCEL: f32 = 200.0 / 3.0;
        pub const POWERSLIDE_RISE_RATE: f32 = 5.0;
        pub const POWERSLIDE_FALL_RATE: f32 = 2.0;
    }

    pub mod bump {
        pub const COOLDOWN_TIME: f32 = 0.25;
        pub const MIN_FORWARD_DIST: f32 = 64.5;
    }

    pub mod supersonic {
        pub const START_SPEED: f32 = 2200.0;
        pub const MAINTAIN_MIN_SPEED: f32 = START_SPEED - 100.0;
        pub const MAINTAIN_MAX_TIME: f32 = 1.0;
    }
}

pub mod vehicle {
    pub const SUSPENSION_FORCE_SCALE_FRONT: f32 = 36.0 - (1.0 / 4.0);
    pub const SUSPENSION_FORCE_SCALE_BACK: f32 = 54.0 + (1.0 / 4.0) + (1.5 / 100.0);
    pub const SUSPENSION_STIFFNESS: f32 = 500.0;
    pub const WHEELS_DAMPING_COMPRESSION: f32 = 25.0;
    pub const WHEELS_DAMPING_RELAXATION: f32 = 40.0;
    pub const MAX_SUSPENSION_TRAVEL: f32 = 12.0;
    pub const SUSPENSION_SUBTRACTION: f32 = 2.5;
    /// Rolling friction is applied relative to this reference mass
    pub const ROLLING_FRICTION_SCALE: f32 = 113.739_63;
}

pub mod ball {
    use super::ContactCoefs;

    pub const MASS: f32 = super::car::MASS / 6.0;
    pub const RADIUS_SOCCAR: f32 = 91.25;
    pub const RADIUS_HOOPS: f32 = 96.3831;
    pub const RADIUS_DROPSHOT: f32 = 100.2565;
    pub const REST_Z: f32 = 93.15;
    pub const MAX_SPEED: f32 = 6000.0;
    pub const MAX_ANG_SPEED: f32 = 6.0;
    pub const DRAG: f32 = 0.03;
    pub const COEFS: ContactCoefs = ContactCoefs {
        friction: 0.35,
        restitution: 0.6,
    };

    pub mod car_hit_impulse {
        pub const MAX_DELTA_VEL: f32 = 4600.0;
        pub const Z_SCALE_NORMAL: f32 = 0.35;
        pub const FORWARD_SCALE: f32 = 0.65;
        /// Hoops hits from a car on the ground lift the ball more
        pub const Z_SCALE_HOOPS_GROUND: f32 = Z_SCALE_NORMAL * 1.55;
        pub const Z_SCALE_HOOPS_NORMAL_Z_THRESH: f32 = 0.1;
    }
}

pub mod heatseeker {
    use glam::Vec3A;

    pub const INITIAL_TARGET_SPEED: f32 = 2900.0;
    pub const TARGET_SPEED_INCREMENT: f32 = 85.0;
    pub const MIN_SPEEDUP_INTERVAL: f32 = 1.0;
    pub const TARGET_Y: f32 = 5120.0;
    pub const TARGET_Z: f32 = 320.0;
    pub const HORIZONTAL_BLEND: f32 = 1.45;
    pub const VERTICAL_BLEND: f32 = 0.78;
    pub const SPEED_BLEND: f32 = 0.3;
    pub const MAX_TURN_PITCH: f32 = 7000.0 * std::f32::consts::PI / 32768.0;
    pub const MAX_SPEED: f32 = 4600.0;
    pub const WALL_BOUNCE_CHANGE_Y_THRESH: f32 = 300.0;
    pub const WALL_BOUNCE_CHANGE_Y_NORMAL: f32 = 0.5;
    pub const BALL_START_POS: Vec3A = Vec3A::new(-1000.0, -2220.0, 92.75);
    pub const BALL_START_VEL: Vec3A = Vec3A::new(0.0, -65.0, 650.0);
}

pub mod hoops {
    /// The ball sits still at the center this long after a kickoff, then pops up
    pub const BALL_LAUNCH_DELAY: f32 = 0.265;
    pub const BALL_LAUNCH_Z_VEL: f32 = 1000.0;
    /// The ball has to fall below this inside a basket to score
    pub const GOAL_SCORE_THRESHOLD_Z: f32 = 270.0;

    /// The scoring zone is a circle in (x, |y| * `GOAL_SCALE_Y`) space
    pub const GOAL_SCALE_Y: f32 = 0.9;
    pub const GOAL_OFFSET_Y: f32 = 2770.0;
    pub const GOAL_RADIUS: f32 = 716.0;

    /// Height of the ball-only basket walls around each scoring zone
    pub const BASKET_HEIGHT: f32 = 400.0;
    pub const BASKET_THICKNESS: f32 = 50.0;
}

pub mod dropshot {
    pub const BALL_LAUNCH_DELAY: f32 = 0.26;
    pub const BALL_LAUNCH_Z_VEL: f32 = 985.0;

    pub const MIN_DAMAGE_INTERVAL: f32 = 0.1;
    /// Slower car hits don't charge the ball
    pub const MIN_CHARGE_HIT_SPEED: f32 = 500.0;
    pub const MIN_ABSORBED_FORCE_FOR_CHARGE: f32 = 2500.0;
    pub const MIN_ABSORBED_FORCE_FOR_SUPERCHARGE: f32 = 11000.0;
    pub const MAX_CHARGE_LEVEL: u8 = 3;

    /// Rows of tiles per team, from the center line outwards
    pub const TILE_ROW_SIZES: [usize; 7] = [13, 12, 11, 10, 9, 8, 7];
    pub const NUM_TILES_PER_TEAM: usize = 70;
    pub const TILE_WIDTH_X: f32 = 768.0;
    /// Distance between the centers of two neighbouring rows
    pub const TILE_ROW_SPACING_Y: f32 = 665.108;
    pub const TILE_THICKNESS: f32 = 50.0;

    pub const ARENA_EXTENT_X: f32 = TILE_WIDTH_X * 6.5;
    pub const ARENA_EXTENT_Y: f32 = TILE_ROW_SPACING_Y * 7.0;
    pub const ARENA_HEIGHT: f32 = 2024.0;

    pub const TILE_COEFS: super::ContactCoefs = super::ContactCoefs {
        friction: 0.6,
        restitution: 0.3,
    };
}

pub mod goal {
    /// Ball must be further than this plus its radius past the goal line
    pub const SOCCAR_GOAL_SCORE_BASE_THRESHOLD_Y: f32 = 5124.25;
    pub const SOCCAR_GOAL_HALF_WIDTH: f32 = 892.755;
    pub const SOCCAR_GOAL_HEIGHT: f32 = 642.775;
    pub const SOCCAR_GOAL_DEPTH: f32 = 880.0;
}

pub mod arena {
    use super::ContactCoefs;

    pub const COEFS: ContactCoefs = ContactCoefs {
        friction: 0.6,
        restitution: 0.3,
    };
    /// Thickness of the boxes making up the back walls and goal pockets
    pub const WALL_THICKNESS: f32 = 500.0;
}

pub mod boost_pads {
    use glam::Vec3A;

    pub const CYL_HEIGHT: f32 = 95.0;
    pub const CYL_RAD_BIG: f32 = 208.0;
    pub const CYL_RAD_SMALL: f32 = 144.0;
    pub const COOLDOWN_BIG: f32 = 10.0;
    pub const COOLDOWN_SMALL: f32 = 4.0;
    pub const BOOST_AMOUNT_BIG: f32 = 100.0;
    pub const BOOST_AMOUNT_SMALL: f32 = 12.0;

    pub const LOCS_AMOUNT_BIG: usize = 6;
    pub const LOCS_AMOUNT_SMALL: usize = 28;
    pub const LOCS_AMOUNT_SMALL_HOOPS: usize = 14;

    pub const LOCS_BIG: [Vec3A; LOCS_AMOUNT_BIG] = [
        Vec3A::new(-3584.0, 0.0, 73.0),
        Vec3A::new(3584.0, 0.0, 73.0),
        Vec3A::new(-3072.0, 4096.0, 73.0),
        Vec3A::new(3072.0, 4096.0, 73.0),
        Vec3A::new(-3072.0, -4096.0, 73.0),
        Vec3A::new(3072.0, -4096.0, 73.0),
    ];

    pub const LOCS_SMALL: [Vec3A; LOCS_AMOUNT_SMALL] = [
        Vec3A::new(0.0, -4240.0, 70.0),
        Vec3A::new(-1792.0, -4184.0, 70.0),
        Vec3A::new(1792.0, -4184.0, 70.0),
        Vec3A::new(-940.0, -3308.0, 70.0),
        Vec3A::new(940.0, -3308.0, 70.0),
        Vec3A::new(0.0, -2816.0, 70.0),
        Vec3A::new(-3584.0, -2484.0, 70.0),
        Vec3A::new(3584.0, -2484.0, 70.0),
        Vec3A::new(-1788.0, -2300.0, 70.0),
        Vec3A::new(1788.0, -2300.0, 70.0),
        Vec3A::new(-2048.0, -1036.0, 70.0),
        Vec3A::new(0.0, -1024.0, 70.0),
        Vec3A::new(2048.0, -1036.0, 70.0),
        Vec3A::new(-1024.0, 0.0, 70.0),
        Vec3A::new(1024.0, 0.0, 70.0),
        Vec3A::new(-2048.0, 1036.0, 70.0),
        Vec3A::new(0.0, 1024.0, 70.0),
        Vec3A::new(2048.0, 1036.0, 70.0),
        Vec3A::new(-1788.0, 2300.0, 70.0),
        Vec3A::new(1788.0, 2300.0, 70.0),
        Vec3A::new(-3584.0, 2484.0, 70.0),
        Vec3A::new(3584.0, 2484.0, 70.0),
        Vec3A::new(0.0, 2816.0, 70.0),
        Vec3A::new(-940.0, 3310.0, 70.0),
        Vec3A::new(940.0, 3308.0, 70.0),
        Vec3A::new(-1792.0, 4184.0, 70.0),
        Vec3A::new(1792.0, 4184.0, 70.0),
        Vec3A::new(0.0, 4240.0, 70.0),
    ];

    pub const LOCS_BIG_HOOPS: [Vec3A; LOCS_AMOUNT_BIG] = [
        Vec3A::new(-2176.0, 2944.0, 72.0),
        Vec3A::new(2176.0, -2944.0, 72.0),
        Vec3A::new(-2176.0, -2944.0, 72.0),
        Vec3A::new(-2432.0, 0.0, 72.0),
        Vec3A::new(2432.0, 0.0, 72.0),
        Vec3A::new(2176.0, 2944.0, 72.0),
    ];

    pub const LOCS_SMALL_HOOPS: [Vec3A; LOCS_AMOUNT_SMALL_HOOPS] = [
        Vec3A::new(1536.0, -1024.0, 64.0),
        Vec3A::new(-1280.0, -2304.0, 64.0),
        Vec3A::new(0.0, -2816.0, 64.0),
        Vec3A::new(-1536.0, -1024.0, 64.0),
        Vec3A::new(1280.0, -2304.0, 64.0),
        Vec3A::new(-512.0, 512.0, 64.0),
        Vec3A::new(-1536.0, 1024.0, 64.0),
        Vec3A::new(1536.0, 1024.0, 64.0),
        Vec3A::new(1280.0, 2304.0, 64.0),
        Vec3A::new(0.0, 2816.0, 64.0),
        Vec3A::new(512.0, 512.0, 64.0),
        Vec3A::new(512.0, -512.0, 64.0),
        Vec3A::new(-512.0, -512.0, 64.0),
        Vec3A::new(-1280.0, 2304.0, 64.0),
    ];

    pub mod grid {
        pub const CELLS_X: usize = 8;
        pub const CELLS_Y: usize = 10;
        pub const CELL_SIZE: f32 = 1024.0;
        /// Cars this far above the highest pad cannot touch any pad
        pub const EXTRA_HEIGHT: f32 = 250.0;
    }
}

pub mod curves {
    use super::LinearPieceCurve;

    pub const STEER_ANGLE_FROM_SPEED: LinearPieceCurve<6> = LinearPieceCurve::new([
        (0.0, 0.533_56),
        (500.0, 0.319_30),
        (1000.0, 0.182_03),
        (1500.0, 0.105_70),
        (1750.0, 0.085_07),
        (3000.0, 0.034_54),
    ]);

    pub const STEER_ANGLE_FROM_SPEED_THREEWHEEL: LinearPieceCurve<2> =
        LinearPieceCurve::new([(0.0, 0.342_473), (2300.0, 0.034_837)]);

    pub const POWERSLIDE_STEER_ANGLE_FROM_SPEED: LinearPieceCurve<2> =
        LinearPieceCurve::new([(0.0, 0.392_35), (2500.0, 0.126_10)]);

    pub const DRIVE_SPEED_TORQUE_FACTOR: LinearPieceCurve<3> =
        LinearPieceCurve::new([(0.0, 1.0), (1400.0, 0.1), (1410.0, 0.0)]);

    pub const NON_STICKY_FRICTION_FACTOR: LinearPieceCurve<3> =
        LinearPieceCurve::new([(0.0, 0.1), (0.7075, 0.5), (1.0, 1.0)]);

    pub const LAT_FRICTION: LinearPieceCurve<2> = LinearPieceCurve::new([(0.0, 1.0), (1.0, 0.2)]);

    pub const LAT_FRICTION_THREEWHEEL: LinearPieceCurve<2> =
        LinearPieceCurve::new([(0.0, 0.30), (1.0, 0.25)]);

    pub const HANDBRAKE_LAT_FRICTION_FACTOR: f32 = 0.1;

    pub const HANDBRAKE_LONG_FRICTION_FACTOR: LinearPieceCurve<2> =
        LinearPieceCurve::new([(0.0, 0.5), (1.0, 0.9)]);

    pub const BALL_CAR_EXTRA_IMPULSE_FACTOR: LinearPieceCurve<4> = LinearPieceCurve::new([
        (0.0, 0.65),
        (500.0, 0.65),
        (2300.0, 0.55),
        (4600.0, 0.30),
    ]);

    pub const BUMP_VEL_AMOUNT_GROUND: LinearPieceCurve<3> =
        LinearPieceCurve::new([(0.0, 5.0 / 6.0), (1400.0, 1100.0), (2200.0, 1530.0)]);

    pub const BUMP_VEL_AMOUNT_AIR: LinearPieceCurve<3> =
        LinearPieceCurve::new([(0.0, 5.0 / 6.0), (1400.0, 1390.0), (2200.0, 1945.0)]);

    pub const BUMP_UPWARD_VEL_AMOUNT: LinearPieceCurve<3> =
        LinearPieceCurve::new([(0.0, 2.0 / 6.0), (1400.0, 278.0), (2200.0, 417.0)]);
}
