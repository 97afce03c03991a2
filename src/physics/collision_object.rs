use glam::{Affine3A, Vec3A};

use crate::{physics::CollisionShapes, sim::UserInfoTypes};

pub enum CollisionFlags {
    StaticObject = 1,
    NoContactResponse = 4,
    CustomMaterialCallback = 8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActivationState {
    #[default]
    Active,
    /// Not integrated and not part of collision detection
    DisableSimulation,
}

#[derive(Clone, Debug)]
pub struct CollisionObject {
    world_transform: Affine3A,
    collision_shape: CollisionShapes,
    pub collision_flags: u8,
    pub collision_filter_group: u8,
    pub collision_filter_mask: u8,
    activation_state: ActivationState,
    pub friction: f32,
    pub restitution: f32,
    pub user_index: UserInfoTypes,
    /// Id of the owning entity, for cars this is the car id
    pub user_pointer: u64,
    pub(crate) world_array_index: usize,
    /// Orientation is never integrated
    pub no_rot: bool,
}

impl CollisionObject {
    #[must_use]
    pub const fn new(collision_shape: CollisionShapes) -> Self {
        Self {
            world_transform: Affine3A::IDENTITY,
            collision_shape,
            collision_flags: 0,
            collision_filter_group: 0,
            collision_filter_mask: 0,
            activation_state: ActivationState::Active,
            friction: 0.5,
            restitution: 0.0,
            user_index: UserInfoTypes::None,
            user_pointer: 0,
            world_array_index: 0,
            no_rot: false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn get_world_transform(&self) -> &Affine3A {
        &self.world_transform
    }

    #[inline]
    pub const fn set_world_transform(&mut self, world_transform: Affine3A) {
        self.world_transform = world_transform;
    }

    #[inline]
    #[must_use]
    pub fn origin(&self) -> Vec3A {
        self.world_transform.translation
    }

    #[inline]
    #[must_use]
    pub const fn get_collision_shape(&self) -> &CollisionShapes {
        &self.collision_shape
    }

    #[inline]
    #[must_use]
    pub const fn get_world_array_index(&self) -> usize {
        self.world_array_index
    }

    #[inline]
    #[must_use]
    pub const fn is_static_object(&self) -> bool {
        self.collision_flags & CollisionFlags::StaticObject as u8 != 0
    }

    #[inline]
    #[must_use]
    pub const fn has_contact_response(&self) -> bool {
        self.collision_flags & CollisionFlags::NoContactResponse as u8 == 0
    }

    #[inline]
    #[must_use]
    pub const fn has_custom_material_callback(&self) -> bool {
        self.collision_flags & CollisionFlags::CustomMaterialCallback as u8 != 0
    }

    #[inline]
    #[must_use]
    pub const fn get_activation_state(&self) -> ActivationState {
        self.activation_state
    }

    #[inline]
    pub const fn set_activation_state(&mut self, new_state: ActivationState) {
        self.activation_state = new_state;
    }

    #[inline]
    #[must_use]
    pub fn is_simulated(&self) -> bool {
        self.activation_state != ActivationState::DisableSimulation
    }

    /// Whether the two objects' filter groups let them interact
    #[inline]
    #[must_use]
    pub const fn collides_with(&self, other: &Self) -> bool {
        self.collision_filter_group & other.collision_filter_mask != 0
            && other.collision_filter_group & self.collision_filter_mask != 0
    }
}
