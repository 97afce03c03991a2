use std::collections::BTreeMap;

use glam::Vec3A;

use crate::physics::{
    ContactAddedCallback, ContactSolverInfo, PhysicsEngine, RayResult, RigidBody,
    contact_solver::{SolverContact, combined_friction, combined_restitution},
    narrow_phase::{generate_contacts, ray_test_shape},
};

/// The built-in rigid-body engine: discrete collision detection against every body pair,
/// a sequential impulse solver with split-impulse penetration recovery, and no sleeping.
///
/// Nothing persists between steps besides the bodies themselves,
/// so a world rebuilt from body states steps identically to the original.
/// Pairs are visited in owner order (`user_index`, then `user_pointer`), never in handle order,
/// so the order bodies were added in does not matter.
#[derive(Clone, Debug, Default)]
pub struct DiscreteDynamicsWorld {
    bodies: BTreeMap<usize, RigidBody>,
    next_handle: usize,
    gravity: Vec3A,
    pub solver_info: ContactSolverInfo,
}

impl DiscreteDynamicsWorld {
    #[must_use]
    pub fn new(solver_info: ContactSolverInfo) -> Self {
        Self {
            bodies: BTreeMap::new(),
            next_handle: 0,
            gravity: Vec3A::ZERO,
            solver_info,
        }
    }

    #[must_use]
    pub fn num_bodies(&self) -> usize {
        self.bodies.len()
    }

    fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut RigidBody, &mut RigidBody)> {
        if a == b {
            return None;
        }

        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let mut range = self.bodies.range_mut(lo..=hi);
        let (lo_idx, lo_body) = range.next()?;
        let (hi_idx, hi_body) = range.next_back()?;
        if *lo_idx != lo || *hi_idx != hi {
            return None;
        }

        if a < b {
            Some((lo_body, hi_body))
        } else {
            Some((hi_body, lo_body))
        }
    }

    /// Bodies sorted by owner, with the handle breaking ties between bodies of the same owner
    fn ordered_bodies(&self) -> Vec<(usize, &RigidBody)> {
        let mut bodies: Vec<_> = self.bodies.iter().map(|(&idx, body)| (idx, body)).collect();
        bodies.sort_by_key(|(idx, body)| {
            let co = &body.collision_object;
            (co.user_index, co.user_pointer, *idx)
        });
        bodies
    }

    fn can_collide(body_a: &RigidBody, body_b: &RigidBody) -> bool {
        let co_a = &body_a.collision_object;
        let co_b = &body_b.collision_object;

        !(body_a.is_static_object() && body_b.is_static_object())
            && co_a.is_simulated()
            && co_b.is_simulated()
            && co_a.has_contact_response()
            && co_b.has_contact_response()
            && co_a.collides_with(co_b)
    }

    fn find_contacts(
        &self,
        callback: &mut dyn ContactAddedCallback,
        time_step: f32,
    ) -> Vec<SolverContact> {
        let margin = self.solver_info.contact_margin;
        let bodies: Vec<_> = self
            .ordered_bodies()
            .into_iter()
            .map(|(idx, body)| {
                let co = &body.collision_object;
                let aabb = co
                    .get_collision_shape()
                    .get_aabb(co.get_world_transform())
                    .map(|aabb| aabb.expanded(margin));
                (idx, body, aabb)
            })
            .collect();

        let mut contacts = Vec::new();
        let mut points = Vec::new();
        for (i, (idx_a, body_a, aabb_a)) in bodies.iter().enumerate() {
            for (idx_b, body_b, aabb_b) in &bodies[i + 1..] {
                if !Self::can_collide(body_a, body_b) {
                    continue;
                }

                if let (Some(aabb_a), Some(aabb_b)) = (aabb_a, aabb_b)
                    && !aabb_a.intersects(aabb_b)
                {
                    continue;
                }

                points.clear();
                generate_contacts(body_a, body_b, margin, &mut points);

                let wants_callback = body_a.collision_object.has_custom_material_callback()
                    || body_b.collision_object.has_custom_material_callback();
                for point in &mut points {
                    point.combined_friction = combined_friction(body_a, body_b);
                    point.combined_restitution = combined_restitution(body_a, body_b);

                    if wants_callback {
                        callback.callback(
                            point,
                            &body_a.collision_object,
                            &body_b.collision_object,
                        );
                    }

                    contacts.push(SolverContact::new(
                        *idx_a, body_a, *idx_b, body_b, point, time_step,
                    ));
                }
            }
        }

        contacts
    }

    fn solve_contacts(&mut self, contacts: &mut [SolverContact], time_step: f32) {
        for _ in 0..self.solver_info.num_iterations {
            for contact in contacts.iter_mut() {
                if let Some((body_a, body_b)) = self.pair_mut(contact.body_a, contact.body_b) {
                    contact.solve_penetration(body_a, body_b, time_step);
                }
            }
        }

        for _ in 0..self.solver_info.num_iterations {
            for contact in contacts.iter_mut() {
                if let Some((body_a, body_b)) = self.pair_mut(contact.body_a, contact.body_b) {
                    contact.solve(body_a, body_b);
                }
            }
        }
    }

    fn simulated_bodies_mut(&mut self) -> impl Iterator<Item = &mut RigidBody> {
        self.bodies
            .values_mut()
            .filter(|body| !body.is_static_object() && body.collision_object.is_simulated())
    }
}

impl PhysicsEngine for DiscreteDynamicsWorld {
    fn add_rigid_body(&mut self, mut body: RigidBody, group: u8, mask: u8) -> usize {
        let idx = self.next_handle;
        self.next_handle += 1;

        body.collision_object.world_array_index = idx;
        body.collision_object.collision_filter_group = group;
        body.collision_object.collision_filter_mask = mask;
        if !body.is_static_object() {
            body.set_gravity(self.gravity);
        }

        self.bodies.insert(idx, body);
        idx
    }

    fn remove_rigid_body(&mut self, idx: usize) -> Option<RigidBody> {
        self.bodies.remove(&idx)
    }

    fn body(&self, idx: usize) -> &RigidBody {
        match self.bodies.get(&idx) {
            Some(body) => body,
            None => panic!("rigid body {idx} does not exist"),
        }
    }

    fn body_mut(&mut self, idx: usize) -> &mut RigidBody {
        match self.bodies.get_mut(&idx) {
            Some(body) => body,
            None => panic!("rigid body {idx} does not exist"),
        }
    }

    fn gravity(&self) -> Vec3A {
        self.gravity
    }

    fn set_gravity(&mut self, gravity: Vec3A) {
        self.gravity = gravity;
        for body in self.bodies.values_mut() {
            body.set_gravity(gravity);
        }
    }

    fn ray_test(
        &self,
        from: Vec3A,
        to: Vec3A,
        ignore: usize,
        filter_mask: u8,
    ) -> Option<RayResult> {
        let mut closest: Option<RayResult> = None;
        for (idx, body) in self.ordered_bodies() {
            let co = &body.collision_object;
            if idx == ignore
                || !co.has_contact_response()
                || co.collision_filter_group & filter_mask == 0
            {
                continue;
            }

            let Some((fraction, normal)) =
                ray_test_shape(from, to, co.get_collision_shape(), co.get_world_transform())
            else {
                continue;
            };

            if closest.as_ref().is_none_or(|hit| fraction < hit.hit_fraction) {
                closest = Some(RayResult {
                    body_idx: idx,
                    is_static: body.is_static_object(),
                    hit_point: from.lerp(to, fraction),
                    hit_normal: normal.normalize(),
                    hit_fraction: fraction,
                });
            }
        }

        closest
    }

    fn step_simulation(&mut self, time_step: f32, callback: &mut dyn ContactAddedCallback) {
        for body in self.simulated_bodies_mut() {
            body.integrate_velocities(time_step);
            body.apply_damping(time_step);
        }

        let mut contacts = self.find_contacts(callback, time_step);
        self.solve_contacts(&mut contacts, time_step);

        for body in self.simulated_bodies_mut() {
            body.integrate_transform(time_step);
        }

        for body in self.bodies.values_mut() {
            body.clear_forces();
        }
    }
}
