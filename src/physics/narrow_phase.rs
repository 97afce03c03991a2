use arrayvec::ArrayVec;
use glam::{Affine3A, Vec3A};

use crate::{
    physics::{BoxShape, CollisionShapes, ManifoldPoint, RigidBody, SphereShape, StaticPlaneShape},
    shared::Aabb,
};

pub const MAX_CONTACTS_PER_PAIR: usize = 8;

/// Raw contact between two shapes, before local points are resolved
#[derive(Clone, Copy, Debug)]
struct ShapeContact {
    pos_on_b: Vec3A,
    normal_on_b: Vec3A,
    distance: f32,
}

impl ShapeContact {
    fn pos_on_a(&self) -> Vec3A {
        self.pos_on_b + self.normal_on_b * self.distance
    }

    fn flipped(self) -> Self {
        Self {
            pos_on_b: self.pos_on_a(),
            normal_on_b: -self.normal_on_b,
            distance: self.distance,
        }
    }
}

type ShapeContacts = ArrayVec<ShapeContact, MAX_CONTACTS_PER_PAIR>;

/// Closest point on the surface of an origin-centered box, the outward normal there,
/// and the signed distance to the surface (negative inside)
fn box_surface_query(point: Vec3A, half_extents: Vec3A) -> (Vec3A, Vec3A, f32) {
    let outside = point.abs().cmpgt(half_extents).any();
    if outside {
        let closest = point.clamp(-half_extents, half_extents);
        let delta = point - closest;
        let dist = delta.length();
        return (closest, delta / dist, dist);
    }

    let mut best_axis = 0;
    let mut best_sign = 1.0;
    let mut best_depth = f32::INFINITY;
    for axis in 0..3 {
        for sign in [1.0, -1.0] {
            let depth = half_extents[axis] - point[axis] * sign;
            if depth < best_depth {
                best_axis = axis;
                best_sign = sign;
                best_depth = depth;
            }
        }
    }

    let mut normal = Vec3A::ZERO;
    normal[best_axis] = best_sign;
    let mut closest = point;
    closest[best_axis] = half_extents[best_axis] * best_sign;
    (closest, normal, -best_depth)
}

fn push_deepest(out: &mut ShapeContacts, contact: ShapeContact) {
    if out.try_push(contact).is_err()
        && let Some(shallowest) = out
            .iter_mut()
            .max_by(|a, b| a.distance.total_cmp(&b.distance))
        && shallowest.distance > contact.distance
    {
        *shallowest = contact;
    }
}

fn sphere_plane(
    center: Vec3A,
    sphere: &SphereShape,
    plane: &StaticPlaneShape,
    margin: f32,
    out: &mut ShapeContacts,
) {
    let center_dist = plane.signed_distance(center);
    let distance = center_dist - sphere.radius;
    if distance < margin {
        push_deepest(
            out,
            ShapeContact {
                pos_on_b: center - plane.normal * center_dist,
                normal_on_b: plane.normal,
                distance,
            },
        );
    }
}

fn sphere_aabb(
    center: Vec3A,
    sphere: &SphereShape,
    aabb: &Aabb,
    margin: f32,
    out: &mut ShapeContacts,
) {
    let box_center = aabb.center();
    let (closest, normal, dist) = box_surface_query(center - box_center, aabb.half_extents());
    let distance = dist - sphere.radius;
    if distance < margin {
        push_deepest(
            out,
            ShapeContact {
                pos_on_b: closest + box_center,
                normal_on_b: normal,
                distance,
            },
        );
    }
}

fn sphere_obb(
    center: Vec3A,
    sphere: &SphereShape,
    obb: &BoxShape,
    obb_trans: &Affine3A,
    margin: f32,
    out: &mut ShapeContacts,
) {
    let local_center = obb_trans.inverse().transform_point3a(center) - obb.local_offset;
    let (closest, normal, dist) = box_surface_query(local_center, obb.half_extents);
    let distance = dist - sphere.radius;
    if distance < margin {
        push_deepest(
            out,
            ShapeContact {
                pos_on_b: obb_trans.transform_point3a(closest + obb.local_offset),
                normal_on_b: obb_trans.matrix3 * normal,
                distance,
            },
        );
    }
}

fn sphere_sphere(
    center_a: Vec3A,
    sphere_a: &SphereShape,
    center_b: Vec3A,
    sphere_b: &SphereShape,
    margin: f32,
    out: &mut ShapeContacts,
) {
    let delta = center_a - center_b;
    let len = delta.length();
    let distance = len - sphere_a.radius - sphere_b.radius;
    if distance < margin {
        let normal = if len > f32::EPSILON { delta / len } else { Vec3A::Z };
        push_deepest(
            out,
            ShapeContact {
                pos_on_b: center_b + normal * sphere_b.radius,
                normal_on_b: normal,
                distance,
            },
        );
    }
}

fn obb_plane(
    obb: &BoxShape,
    trans: &Affine3A,
    plane: &StaticPlaneShape,
    margin: f32,
    out: &mut ShapeContacts,
) {
    for corner in obb.world_corners(trans) {
        let distance = plane.signed_distance(corner);
        if distance < margin {
            push_deepest(
                out,
                ShapeContact {
                    pos_on_b: corner - plane.normal * distance,
                    normal_on_b: plane.normal,
                    distance,
                },
            );
        }
    }
}

fn obb_aabb(obb: &BoxShape, trans: &Affine3A, aabb: &Aabb, margin: f32, out: &mut ShapeContacts) {
    let box_center = aabb.center();
    let half_extents = aabb.half_extents();
    for corner in obb.world_corners(trans) {
        let (closest, normal, distance) = box_surface_query(corner - box_center, half_extents);
        if distance < margin {
            push_deepest(
                out,
                ShapeContact {
                    pos_on_b: closest + box_center,
                    normal_on_b: normal,
                    distance,
                },
            );
        }
    }

    // Edges of the static box poking into the oriented box
    let inv_trans = trans.inverse();
    for i in 0..8 {
        let sign = Vec3A::new(
            if i & 1 == 0 { -1.0 } else { 1.0 },
            if i & 2 == 0 { -1.0 } else { 1.0 },
            if i & 4 == 0 { -1.0 } else { 1.0 },
        );
        let corner = box_center + half_extents * sign;
        let local = inv_trans.transform_point3a(corner) - obb.local_offset;
        let (_, normal, distance) = box_surface_query(local, obb.half_extents);
        if distance < margin {
            push_deepest(
                out,
                ShapeContact {
                    pos_on_b: corner,
                    normal_on_b: -(trans.matrix3 * normal),
                    distance,
                },
            );
        }
    }
}

/// Corners of `obb_a` against the faces of `obb_b`
fn obb_corners_into_obb(
    obb_a: &BoxShape,
    trans_a: &Affine3A,
    obb_b: &BoxShape,
    trans_b: &Affine3A,
    margin: f32,
    out: &mut ShapeContacts,
) {
    let inv_trans_b = trans_b.inverse();
    for corner in obb_a.world_corners(trans_a) {
        let local = inv_trans_b.transform_point3a(corner) - obb_b.local_offset;
        let (closest, normal, distance) = box_surface_query(local, obb_b.half_extents);
        if distance < margin {
            push_deepest(
                out,
                ShapeContact {
                    pos_on_b: trans_b.transform_point3a(closest + obb_b.local_offset),
                    normal_on_b: trans_b.matrix3 * normal,
                    distance,
                },
            );
        }
    }
}

fn obb_obb(
    obb_a: &BoxShape,
    trans_a: &Affine3A,
    obb_b: &BoxShape,
    trans_b: &Affine3A,
    margin: f32,
    out: &mut ShapeContacts,
) {
    obb_corners_into_obb(obb_a, trans_a, obb_b, trans_b, margin, out);

    let mut reverse = ShapeContacts::new();
    obb_corners_into_obb(obb_b, trans_b, obb_a, trans_a, margin, &mut reverse);
    for contact in reverse {
        push_deepest(out, contact.flipped());
    }
}

/// Contacts with A as the first shape, or `None` if this pair order isn't handled directly
fn collide_ordered(
    shape_a: &CollisionShapes,
    trans_a: &Affine3A,
    shape_b: &CollisionShapes,
    trans_b: &Affine3A,
    margin: f32,
    out: &mut ShapeContacts,
) -> Option<()> {
    use CollisionShapes::{Box, Sphere, StaticBox, StaticPlane};

    match (shape_a, shape_b) {
        (Sphere(sphere), StaticPlane(plane)) => {
            sphere_plane(trans_a.translation, sphere, plane, margin, out);
        }
        (Sphere(sphere), StaticBox(aabb)) => {
            sphere_aabb(trans_a.translation, sphere, aabb, margin, out);
        }
        (Sphere(sphere), Box(obb)) => {
            sphere_obb(trans_a.translation, sphere, obb, trans_b, margin, out);
        }
        (Sphere(sphere_a), Sphere(sphere_b)) => {
            let (pos_a, pos_b) = (trans_a.translation, trans_b.translation);
            sphere_sphere(pos_a, sphere_a, pos_b, sphere_b, margin, out);
        }
        (Box(obb), StaticPlane(plane)) => obb_plane(obb, trans_a, plane, margin, out),
        (Box(obb), StaticBox(aabb)) => obb_aabb(obb, trans_a, aabb, margin, out),
        (Box(obb_a), Box(obb_b)) => obb_obb(obb_a, trans_a, obb_b, trans_b, margin, out),
        _ => return None,
    }

    Some(())
}

/// Generate every contact between two bodies closer than `margin`
pub fn generate_contacts(
    body_a: &RigidBody,
    body_b: &RigidBody,
    margin: f32,
    out: &mut Vec<ManifoldPoint>,
) {
    let co_a = &body_a.collision_object;
    let co_b = &body_b.collision_object;
    let trans_a = co_a.get_world_transform();
    let trans_b = co_b.get_world_transform();

    let mut contacts = ShapeContacts::new();
    let handled = collide_ordered(
        co_a.get_collision_shape(),
        trans_a,
        co_b.get_collision_shape(),
        trans_b,
        margin,
        &mut contacts,
    );

    if handled.is_none() {
        let mut reverse = ShapeContacts::new();
        if collide_ordered(
            co_b.get_collision_shape(),
            trans_b,
            co_a.get_collision_shape(),
            trans_a,
            margin,
            &mut reverse,
        )
        .is_none()
        {
            return;
        }

        contacts.extend(reverse.into_iter().map(ShapeContact::flipped));
    }

    let inv_rot_a = trans_a.matrix3.transpose();
    let inv_rot_b = trans_b.matrix3.transpose();
    out.extend(contacts.into_iter().map(|contact| {
        let pos_on_a = contact.pos_on_a();
        let mut point =
            ManifoldPoint::new(pos_on_a, contact.pos_on_b, contact.normal_on_b, contact.distance);
        point.local_point_a = inv_rot_a * (pos_on_a - trans_a.translation);
        point.local_point_b = inv_rot_b * (contact.pos_on_b - trans_b.translation);
        point
    }));
}

/// Entry fraction along `from + dir * t` into an origin-centered box, and the entry face normal
fn ray_box_local(from: Vec3A, dir: Vec3A, half_extents: Vec3A) -> Option<(f32, Vec3A)> {
    if from.abs().cmple(half_extents).all() {
        return None;
    }

    let mut t_enter = 0.0f32;
    let mut t_exit = 1.0f32;
    let mut enter_normal = Vec3A::ZERO;

    for axis in 0..3 {
        let d = dir[axis];
        let o = from[axis];
        let he = half_extents[axis];
        if d.abs() < f32::EPSILON {
            if o.abs() > he {
                return None;
            }
            continue;
        }

        let inv_d = 1.0 / d;
        let mut t0 = (-he - o) * inv_d;
        let mut t1 = (he - o) * inv_d;
        let mut sign = -1.0;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
            sign = 1.0;
        }

        if t0 > t_enter {
            t_enter = t0;
            enter_normal = Vec3A::ZERO;
            enter_normal[axis] = sign;
        }
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    (enter_normal != Vec3A::ZERO).then_some((t_enter, enter_normal))
}

/// Ray against a single shape, returning the hit fraction along `from..to` and the surface normal.
/// Rays starting inside a shape or hitting a plane from behind don't hit.
pub fn ray_test_shape(
    from: Vec3A,
    to: Vec3A,
    shape: &CollisionShapes,
    trans: &Affine3A,
) -> Option<(f32, Vec3A)> {
    let dir = to - from;
    match shape {
        CollisionShapes::StaticPlane(plane) => {
            let d0 = plane.signed_distance(from);
            let d1 = plane.signed_distance(to);
            (d0 >= 0.0 && d1 < 0.0).then(|| (d0 / (d0 - d1), plane.normal))
        }
        CollisionShapes::StaticBox(aabb) => {
            let center = aabb.center();
            ray_box_local(from - center, dir, aabb.half_extents())
        }
        CollisionShapes::Box(obb) => {
            let inv_trans = trans.inverse();
            let local_from = inv_trans.transform_point3a(from) - obb.local_offset;
            let local_dir = inv_trans.matrix3 * dir;
            ray_box_local(local_from, local_dir, obb.half_extents)
                .map(|(frac, normal)| (frac, trans.matrix3 * normal))
        }
        CollisionShapes::Sphere(sphere) => {
            let rel = from - trans.translation;
            let c = rel.length_squared() - sphere.radius * sphere.radius;
            if c <= 0.0 {
                return None;
            }

            let a = dir.length_squared();
            let b = rel.dot(dir);
            let disc = b * b - a * c;
            if a == 0.0 || disc < 0.0 {
                return None;
            }

            let frac = (-b - disc.sqrt()) / a;
            (0.0..=1.0).contains(&frac).then(|| {
                let hit = rel + dir * frac;
                (frac, hit / sphere.radius)
            })
        }
    }
}
