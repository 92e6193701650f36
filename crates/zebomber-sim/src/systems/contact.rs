//! Built-in contact detection.
//!
//! Stands in for a physics engine when the host does not report collisions
//! itself. Each munition is swept along the segment it travelled this tick
//! against every live unit's sphere, then against the ground plane. At most
//! one contact is raised per munition per tick, the earliest along the path.

use glam::Vec3;
use hecs::{Entity, World};
use log::trace;

use zebomber_core::components::{Actor, CollisionRadius, Velocity};
use zebomber_core::types::Pose;

use crate::components::Munition;
use crate::world_setup::entity_id;

/// A contact between a munition (or any entity) and another entity or the
/// terrain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub a: Entity,
    /// `None` = terrain.
    pub b: Option<Entity>,
    pub point: Vec3,
    /// Surface normal at the contact, pointing away from the surface hit.
    pub normal: Vec3,
}

struct Body {
    entity: Entity,
    center: Vec3,
    radius: f32,
}

pub fn run(world: &World, ground_height: f32, dt: f32, collisions: &mut Vec<Collision>) {
    let mut units: Vec<Body> = world
        .query::<(&Actor, &Pose, &CollisionRadius)>()
        .iter()
        .filter(|(_, (actor, _, _))| actor.alive && actor.kind.is_destructible_unit())
        .map(|(entity, (_, pose, radius))| Body {
            entity,
            center: pose.position,
            radius: radius.0,
        })
        .collect();
    units.sort_by_key(|body| entity_id(body.entity));

    let mut munitions: Vec<(Entity, Vec3, Vec3, f32)> = world
        .query::<(&Actor, &Pose, &Velocity, &CollisionRadius, &Munition)>()
        .iter()
        .filter(|(_, (actor, ..))| actor.alive)
        .map(|(entity, (_, pose, velocity, radius, _))| {
            (entity, pose.position - velocity.0 * dt, pose.position, radius.0)
        })
        .collect();
    munitions.sort_by_key(|(entity, ..)| entity_id(*entity));

    for (munition, start, end, radius) in munitions {
        if let Some(collision) = first_contact(munition, start, end, radius, &units, ground_height) {
            trace!(
                "contact: munition {} with {:?} at {:?}",
                entity_id(munition),
                collision.b.map(entity_id),
                collision.point
            );
            collisions.push(collision);
        }
    }
}

fn first_contact(
    munition: Entity,
    start: Vec3,
    end: Vec3,
    radius: f32,
    units: &[Body],
    ground_height: f32,
) -> Option<Collision> {
    let mut best: Option<(f32, Collision)> = None;

    for unit in units {
        let reach = radius + unit.radius;
        if let Some(t) = sweep_sphere(start, end, unit.center, reach) {
            if best.as_ref().map_or(true, |(best_t, _)| t < *best_t) {
                let at = start.lerp(end, t);
                let normal = (at - unit.center).try_normalize().unwrap_or(Vec3::Z);
                best = Some((
                    t,
                    Collision {
                        a: munition,
                        b: Some(unit.entity),
                        point: unit.center + normal * unit.radius,
                        normal,
                    },
                ));
            }
        }
    }

    // Terrain
    let floor = ground_height + radius;
    if end.z <= floor {
        let t = if start.z > end.z {
            ((start.z - floor) / (start.z - end.z)).clamp(0.0, 1.0)
        } else {
            0.0
        };
        if best.as_ref().map_or(true, |(best_t, _)| t < *best_t) {
            let at = start.lerp(end, t);
            best = Some((
                t,
                Collision {
                    a: munition,
                    b: None,
                    point: Vec3::new(at.x, at.y, ground_height),
                    normal: Vec3::Z,
                },
            ));
        }
    }

    best.map(|(_, collision)| collision)
}

/// Earliest fraction along `start..end` at which the point comes within
/// `reach` of `center`.
fn sweep_sphere(start: Vec3, end: Vec3, center: Vec3, reach: f32) -> Option<f32> {
    let offset = start - center;
    let c = offset.length_squared() - reach * reach;
    if c <= 0.0 {
        return Some(0.0);
    }
    let d = end - start;
    let a = d.length_squared();
    if a == 0.0 {
        return None;
    }
    let b = offset.dot(d);
    let discriminant = b * b - a * c;
    if b >= 0.0 || discriminant < 0.0 {
        return None;
    }
    let t = (-b - discriminant.sqrt()) / a;
    (t <= 1.0).then_some(t)
}
