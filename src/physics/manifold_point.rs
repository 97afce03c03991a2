use glam::Vec3A;

#[derive(Clone, Copy, Debug, Default)]
pub struct ManifoldPoint {
    /// Contact position relative to body A, in A's local frame
    pub local_point_a: Vec3A,
    /// Contact position relative to body B, in B's local frame
    pub local_point_b: Vec3A,
    pub position_world_on_a: Vec3A,
    pub position_world_on_b: Vec3A,
    /// Points from B towards A
    pub normal_world_on_b: Vec3A,
    /// Negative when penetrating
    pub distance_1: f32,
    pub combined_friction: f32,
    pub combined_restitution: f32,
    pub applied_impulse: f32,
}

impl ManifoldPoint {
    #[must_use]
    pub const fn new(
        position_world_on_a: Vec3A,
        position_world_on_b: Vec3A,
        normal_world_on_b: Vec3A,
        distance: f32,
    ) -> Self {
        Self {
            local_point_a: Vec3A::ZERO,
            local_point_b: Vec3A::ZERO,
            position_world_on_a,
            position_world_on_b,
            normal_world_on_b,
            distance_1: distance,
            combined_friction: 0.0,
            combined_restitution: 0.0,
            applied_impulse: 0.0,
        }
    }
}
