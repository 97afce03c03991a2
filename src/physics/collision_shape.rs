use glam::{Affine3A, Vec3A};

use crate::shared::Aabb;

#[derive(Clone, Copy, Debug)]
pub struct SphereShape {
    pub radius: f32,
}

impl SphereShape {
    #[must_use]
    pub const fn new(radius: f32) -> Self {
        Self { radius }
    }

    #[must_use]
    pub fn calculate_local_inertia(&self, mass: f32) -> Vec3A {
        Vec3A::splat(0.4 * mass * self.radius * self.radius)
    }
}

/// An oriented box that follows its body's transform,
/// with its center offset from the body origin (the center of mass)
#[derive(Clone, Copy, Debug)]
pub struct BoxShape {
    pub half_extents: Vec3A,
    pub local_offset: Vec3A,
}

impl BoxShape {
    #[must_use]
    pub const fn new(half_extents: Vec3A, local_offset: Vec3A) -> Self {
        Self {
            half_extents,
            local_offset,
        }
    }

    #[must_use]
    pub fn calculate_local_inertia(&self, mass: f32) -> Vec3A {
        let l = self.half_extents * 2.0;
        let l2 = l * l;
        mass / 12.0 * Vec3A::new(l2.y + l2.z, l2.x + l2.z, l2.x + l2.y)
    }

    #[must_use]
    pub fn world_center(&self, trans: &Affine3A) -> Vec3A {
        trans.transform_point3a(self.local_offset)
    }

    /// The eight corners in world space
    #[must_use]
    pub fn world_corners(&self, trans: &Affine3A) -> [Vec3A; 8] {
        let he = self.half_extents;
        std::array::from_fn(|i| {
            let sign = Vec3A::new(
                if i & 1 == 0 { -1.0 } else { 1.0 },
                if i & 2 == 0 { -1.0 } else { 1.0 },
                if i & 4 == 0 { -1.0 } else { 1.0 },
            );
            trans.transform_point3a(self.local_offset + he * sign)
        })
    }
}

/// An infinite plane of all points `p` where `normal.dot(p) == constant`, in world space
#[derive(Clone, Copy, Debug)]
pub struct StaticPlaneShape {
    pub normal: Vec3A,
    pub constant: f32,
}

impl StaticPlaneShape {
    #[must_use]
    pub fn new(normal: Vec3A, constant: f32) -> Self {
        Self {
            normal: normal.normalize(),
            constant,
        }
    }

    #[inline]
    #[must_use]
    pub fn signed_distance(&self, point: Vec3A) -> f32 {
        self.normal.dot(point) - self.constant
    }
}

#[derive(Clone, Debug)]
pub enum CollisionShapes {
    Sphere(SphereShape),
    Box(BoxShape),
    StaticPlane(StaticPlaneShape),
    /// An axis-aligned box in world space
    StaticBox(Aabb),
}

impl CollisionShapes {
    #[must_use]
    pub fn calculate_local_inertia(&self, mass: f32) -> Vec3A {
        match self {
            Self::Sphere(sphere) => sphere.calculate_local_inertia(mass),
            Self::Box(obb) => obb.calculate_local_inertia(mass),
            Self::StaticPlane(_) | Self::StaticBox(_) => Vec3A::ZERO,
        }
    }

    /// World space bounds, `None` for unbounded shapes
    #[must_use]
    pub fn get_aabb(&self, trans: &Affine3A) -> Option<Aabb> {
        match self {
            Self::Sphere(sphere) => Some(Aabb::from_center(
                trans.translation,
                Vec3A::splat(sphere.radius),
            )),
            Self::Box(obb) => {
                let center = obb.world_center(trans);
                let abs_basis = glam::Mat3A::from_cols(
                    trans.matrix3.x_axis.abs(),
                    trans.matrix3.y_axis.abs(),
                    trans.matrix3.z_axis.abs(),
                );
                Some(Aabb::from_center(center, abs_basis * obb.half_extents))
            }
            Self::StaticPlane(_) => None,
            Self::StaticBox(aabb) => Some(*aabb),
        }
    }
}
