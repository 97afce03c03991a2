//! Positional little-endian binary codec for arena state.
//!
//! There are no tags, lengths (besides list counts) or versions.
//! Every field list lives in the `stream_fields!` invocation below, which generates both the writer
//! and the reader, so the two can't drift apart.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use glam::{Mat3A, Vec3A};

use crate::{
    ArenaConfig, ArenaError, BallHitInfo, BallState, BoostPadConfig, BoostPadState, CarConfig,
    CarContact, CarControls, CarState, DemoMode, DropshotInfo, GameMode, HeatseekerInfo,
    MutatorConfig, Team, TileState, WheelPairConfig,
};

pub trait StreamValue: Sized {
    fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()>;

    fn read_from<R: Read>(input: &mut R) -> Result<Self, ArenaError>;
}

impl StreamValue for f32 {
    fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_f32::<LittleEndian>(*self)
    }

    fn read_from<R: Read>(input: &mut R) -> Result<Self, ArenaError> {
        Ok(input.read_f32::<LittleEndian>()?)
    }
}

impl StreamValue for u8 {
    fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_u8(*self)
    }

    fn read_from<R: Read>(input: &mut R) -> Result<Self, ArenaError> {
        Ok(input.read_u8()?)
    }
}

impl StreamValue for u32 {
    fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_u32::<LittleEndian>(*self)
    }

    fn read_from<R: Read>(input: &mut R) -> Result<Self, ArenaError> {
        Ok(input.read_u32::<LittleEndian>()?)
    }
}

impl StreamValue for u64 {
    fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_u64::<LittleEndian>(*self)
    }

    fn read_from<R: Read>(input: &mut R) -> Result<Self, ArenaError> {
        Ok(input.read_u64::<LittleEndian>()?)
    }
}

impl StreamValue for bool {
    fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_u8(u8::from(*self))
    }

    fn read_from<R: Read>(input: &mut R) -> Result<Self, ArenaError> {
        match input.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(ArenaError::InvalidData {
                what: "bool",
                value: value.into(),
            }),
        }
    }
}

impl StreamValue for Vec3A {
    fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        self.x.write_to(out)?;
        self.y.write_to(out)?;
        self.z.write_to(out)
    }

    fn read_from<R: Read>(input: &mut R) -> Result<Self, ArenaError> {
        Ok(Self::new(
            f32::read_from(input)?,
            f32::read_from(input)?,
            f32::read_from(input)?,
        ))
    }
}

impl StreamValue for Mat3A {
    fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        self.x_axis.write_to(out)?;
        self.y_axis.write_to(out)?;
        self.z_axis.write_to(out)
    }

    fn read_from<R: Read>(input: &mut R) -> Result<Self, ArenaError> {
        Ok(Self::from_cols(
            Vec3A::read_from(input)?,
            Vec3A::read_from(input)?,
            Vec3A::read_from(input)?,
        ))
    }
}

impl<T: StreamValue + Copy + Default, const N: usize> StreamValue for [T; N] {
    fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        self.iter().try_for_each(|value| value.write_to(out))
    }

    fn read_from<R: Read>(input: &mut R) -> Result<Self, ArenaError> {
        let mut values = [T::default(); N];
        for value in &mut values {
            *value = T::read_from(input)?;
        }

        Ok(values)
    }
}

/// A presence flag, followed by the value if present
impl<T: StreamValue> StreamValue for Option<T> {
    fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        self.is_some().write_to(out)?;
        match self {
            Some(value) => value.write_to(out),
            None => Ok(()),
        }
    }

    fn read_from<R: Read>(input: &mut R) -> Result<Self, ArenaError> {
        if bool::read_from(input)? {
            T::read_from(input).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// A `u32` count, followed by the items
impl<T: StreamValue> StreamValue for Vec<T> {
    fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        write_len(out, self.len())?;
        self.iter().try_for_each(|value| value.write_to(out))
    }

    fn read_from<R: Read>(input: &mut R) -> Result<Self, ArenaError> {
        let len = u32::read_from(input)? as usize;
        // The count isn't trusted for the allocation
        let mut values = Vec::with_capacity(len.min(1024));
        for _ in 0..len {
            values.push(T::read_from(input)?);
        }

        Ok(values)
    }
}

pub(crate) fn write_len<W: Write>(out: &mut W, len: usize) -> std::io::Result<()> {
    let len = u32::try_from(len)
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidInput, "list too long"))?;
    len.write_to(out)
}

macro_rules! stream_enums {
    ($($ty:ty => $what:literal),* $(,)?) => {
        $(
            impl StreamValue for $ty {
                fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
                    (*self as u8).write_to(out)
                }

                fn read_from<R: Read>(input: &mut R) -> Result<Self, ArenaError> {
                    Self::try_from(u8::read_from(input)?).map_err(|value| ArenaError::InvalidData {
                        what: $what,
                        value: value.into(),
                    })
                }
            }
        )*
    };
}

stream_enums! {
    Team => "team",
    GameMode => "game mode",
    DemoMode => "demo mode",
    TileState => "tile state",
}

macro_rules! stream_fields {
    ($($ty:ty { $($($field:ident).+),* $(,)? })*) => {
        $(
            impl StreamValue for $ty {
                fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
                    $(self.$($field).+.write_to(out)?;)*
                    Ok(())
                }

                fn read_from<R: Read>(input: &mut R) -> Result<Self, ArenaError> {
                    let mut value = Self::default();
                    $(value.$($field).+ = StreamValue::read_from(input)?;)*
                    Ok(value)
                }
            }
        )*
    };
}

stream_fields! {
    CarControls {
        throttle, steer, pitch, yaw, roll, jump, boost, handbrake,
    }

    CarContact {
        other_car_id, cooldown_timer,
    }

    BallHitInfo {
        relative_pos_on_ball,
        ball_pos,
        extra_hit_vel,
        tick_count_when_hit,
        tick_count_when_extra_impulse_applied,
    }

    CarState {
        phys.pos,
        phys.rot_mat,
        phys.vel,
        phys.ang_vel,
        is_on_ground,
        wheels_with_contact,
        has_jumped,
        has_double_jumped,
        has_flipped,
        flip_rel_torque,
        jump_time,
        is_flipping,
        flip_time,
        is_jumping,
        air_time,
        air_time_since_jump,
        boost,
        is_boosting,
        boosting_time,
        time_since_boosted,
        is_supersonic,
        supersonic_time,
        handbrake_val,
        is_auto_flipping,
        auto_flip_timer,
        auto_flip_torque_scale,
        is_demoed,
        demo_respawn_timer,
        controls,
        prev_controls,
        world_contact_normal,
        car_contact,
        ball_hit_info,
    }

    WheelPairConfig {
        connection_point_offset, suspension_rest_length, wheel_radius,
    }

    CarConfig {
        dodge_deadzone,
        hitbox_pos_offset,
        hitbox_size,
        front_wheels,
        back_wheels,
        three_wheels,
    }

    HeatseekerInfo {
        y_target_dir, cur_target_speed, time_since_hit,
    }

    DropshotInfo {
        charge_level,
        accumulated_hit_force,
        y_target_dir,
        has_damaged,
        last_damage_tick,
    }

    BallState {
        phys.pos,
        phys.rot_mat,
        phys.vel,
        phys.ang_vel,
        tick_count_since_kickoff,
        hs_info,
        ds_info,
    }

    BoostPadConfig {
        pos, is_big,
    }

    BoostPadState {
        is_active, cooldown, prev_locked_car_id,
    }

    MutatorConfig {
        gravity,
        car_mass,
        car_world_friction,
        car_world_restitution,
        ball_mass,
        ball_max_speed,
        ball_drag,
        ball_world_friction,
        ball_world_restitution,
        jump_accel,
        jump_immediate_force,
        boost_accel_ground,
        boost_accel_air,
        boost_used_per_second,
        respawn_delay,
        bump_cooldown_time,
        car_max_boost_amount,
        car_spawn_boost_amount,
        boost_pad_amount_small,
        boost_pad_amount_big,
        boost_pad_cooldown_big,
        boost_pad_cooldown_small,
        ball_hit_extra_force_scale,
        bump_force_scale,
        ball_radius,
        unlimited_flips,
        unlimited_double_jumps,
        recharge_boost_enabled,
        recharge_boost_per_second,
        recharge_boost_delay,
        demo_mode,
        enable_team_demos,
        goal_base_threshold_y,
    }

    ArenaConfig {
        no_ball_rot, reset_on_goal, use_custom_boost_pads, custom_boost_pads,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use glam::Vec3A;

    use super::StreamValue;
    use crate::{ArenaError, BallHitInfo, CarContact, CarState, GameMode};

    #[test]
    fn layout_is_positional_little_endian() {
        let mut bytes = Vec::new();
        Vec3A::new(1.0, 2.0, 3.0).write_to(&mut bytes).unwrap();
        Some(7u64).write_to(&mut bytes).unwrap();

        assert_eq!(bytes.len(), 12 + 1 + 8);
        assert_eq!(&bytes[..4], &1.0f32.to_le_bytes());
        assert_eq!(bytes[12], 1);
        assert_eq!(&bytes[13..], &7u64.to_le_bytes());
    }

    #[test]
    fn car_state_keeps_optional_fields() {
        let state = CarState {
            boost: 42.5,
            world_contact_normal: Some(Vec3A::Z),
            car_contact: Some(CarContact {
                other_car_id: 9,
                cooldown_timer: 0.125,
            }),
            ball_hit_info: Some(BallHitInfo {
                tick_count_when_hit: 88,
                ..BallHitInfo::default()
            }),
            ..CarState::DEFAULT
        };

        let mut bytes = Vec::new();
        state.write_to(&mut bytes).unwrap();
        let read = CarState::read_from(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(read, state);
    }

    #[test]
    fn rejects_unknown_discriminants() {
        let err = GameMode::read_from(&mut Cursor::new([9u8])).unwrap_err();
        assert!(matches!(
            err,
            ArenaError::InvalidData {
                what: "game mode",
                value: 9
            }
        ));

        let err = bool::read_from(&mut Cursor::new([2u8])).unwrap_err();
        assert!(matches!(err, ArenaError::InvalidData { what: "bool", .. }));
    }

    #[test]
    fn truncated_input_is_an_io_error() {
        let err = CarState::read_from(&mut Cursor::new([0u8; 10])).unwrap_err();
        assert!(matches!(err, ArenaError::Io(_)));
    }
}
