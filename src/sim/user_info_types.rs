/// What kind of simulation entity a physics body belongs to
///
/// The ordering is used to sort contact pairs
///
/// Entities come before world geometry and cars come before the ball.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserInfoTypes {
    #[default]
    None,
    Car,
    Ball,
    /// `user_pointer` holds the tile's index, see [`DropshotTilesState`](crate::DropshotTilesState)
    DropshotTile,
}

/// Filter bits for geometry only some bodies collide with, on top of
/// [`CollisionFilterGroups`](crate::physics::CollisionFilterGroups)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionMasks {
    /// The hoops baskets, which only the ball bounces off of
    HoopsNet = 1 << 2,
    /// The floor under the dropshot tiles, which only cars stand on
    DropshotFloor = 1 << 3,
    /// Dropshot tiles, which only the ball rests on
    DropshotTile = 1 << 4,
}
