//! Rigid-body engine seam.
//!
//! The simulation only talks to physics through [`PhysicsEngine`], so hosts can inject their own
//! engine. [`DiscreteDynamicsWorld`] is the built-in implementation.
//! All quantities are in Unreal Units.

mod collision_object;
mod collision_shape;
pub(crate) mod contact_solver;
mod discrete_dynamics_world;
mod manifold_point;
pub(crate) mod narrow_phase;
mod rigid_body;
pub(crate) mod transform_util;

pub use collision_object::*;
pub use collision_shape::*;
pub use contact_solver::{ContactSolverInfo, resolve_single_bilateral, resolve_single_collision};
pub use discrete_dynamics_world::*;
pub use manifold_point::*;
pub use rigid_body::*;

use glam::Vec3A;

pub enum CollisionFilterGroups {
    Default = 1,
    Static = 2,
    All = 0xFF,
}

#[derive(Clone, Copy, Debug)]
pub struct RayResult {
    pub body_idx: usize,
    pub is_static: bool,
    pub hit_point: Vec3A,
    pub hit_normal: Vec3A,
    pub hit_fraction: f32,
}

/// Invoked for every new contact point involving a body with
/// [`CollisionFlags::CustomMaterialCallback`], before the contact is solved.
/// Implementations may override the point's combined friction and restitution.
pub trait ContactAddedCallback {
    fn callback(
        &mut self,
        contact_point: &mut ManifoldPoint,
        body_a: &CollisionObject,
        body_b: &CollisionObject,
    );
}

pub trait PhysicsEngine {
    /// Register a body, returning a handle that stays valid until the body is removed.
    /// Handles are never reused.
    fn add_rigid_body(&mut self, body: RigidBody, group: u8, mask: u8) -> usize;

    fn remove_rigid_body(&mut self, idx: usize) -> Option<RigidBody>;

    /// # Panics
    ///
    /// If `idx` isn't a live handle
    fn body(&self, idx: usize) -> &RigidBody;

    /// # Panics
    ///
    /// If `idx` isn't a live handle
    fn body_mut(&mut self, idx: usize) -> &mut RigidBody;

    fn gravity(&self) -> Vec3A;

    fn set_gravity(&mut self, gravity: Vec3A);

    /// Closest hit along `from..to` against bodies in `filter_mask`,
    /// skipping `ignore` and bodies without contact response
    fn ray_test(&self, from: Vec3A, to: Vec3A, ignore: usize, filter_mask: u8) -> Option<RayResult>;

    /// Advance every simulated body by exactly one step of `time_step` seconds
    fn step_simulation(&mut self, time_step: f32, callback: &mut dyn ContactAddedCallback);
}
