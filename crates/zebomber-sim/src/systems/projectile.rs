//! Projectile resolver: applies the damage rules of each munition kind to
//! the tick's collision queue.
//!
//! Bombs destroy whatever unit they hit plus every ground or air unit in
//! their splash radius. Rockets only kill air units: a hit on an air unit
//! destroys it, splashes other air units and requests an explosion effect,
//! while a hit on a ground unit or anything else just ends the rocket.
//! Either way the munition destroys itself.

use glam::Vec3;
use hecs::{Entity, World};
use log::{debug, warn};

use zebomber_core::components::{Actor, ExplosionConfig};
use zebomber_core::enums::{EntityKind, MunitionKind};
use zebomber_core::error::SimError;
use zebomber_core::events::EffectRequest;
use zebomber_core::types::Pose;

use crate::components::Munition;
use crate::systems::cleanup::mark_destroyed;
use crate::systems::contact::Collision;
use crate::systems::explosion;
use crate::world_setup::{entity_id, live_kind};

/// Resolve and drain every queued collision.
pub fn run(world: &mut World, collisions: &mut Vec<Collision>, effects: &mut Vec<EffectRequest>) {
    for collision in collisions.drain(..) {
        match resolve(world, &collision, effects) {
            Ok(()) => {}
            Err(err @ SimError::StaleHandle(_)) => debug!("collision ignored: {err}"),
            Err(err) => warn!("collision resolved without effect: {err}"),
        }
    }
}

/// Resolve a single collision. Collisions not involving a munition are
/// ignored.
pub fn resolve(
    world: &mut World,
    collision: &Collision,
    effects: &mut Vec<EffectRequest>,
) -> Result<(), SimError> {
    let Some((entity, other)) = munition_side(world, collision) else {
        return Ok(());
    };
    let munition = *world
        .get::<&Munition>(entity)
        .map_err(|_| SimError::StaleHandle(entity_id(entity)))?;
    if live_kind(world, entity).is_none() {
        return Err(SimError::StaleHandle(entity_id(entity)));
    }
    if other.is_some() && other == munition.owner {
        return Ok(());
    }

    // A contact with an already-destroyed entity counts as a plain contact
    let hit = other.and_then(|e| live_kind(world, e).map(|kind| (e, kind)));

    let result = match munition.kind {
        MunitionKind::Bomb => {
            resolve_bomb(world, &munition, hit, collision.point);
            Ok(())
        }
        MunitionKind::Rocket => resolve_rocket(world, &munition, hit, collision, effects),
    };
    mark_destroyed(world, entity)?;
    result
}

fn resolve_bomb(
    world: &mut World,
    munition: &Munition,
    hit: Option<(Entity, EntityKind)>,
    point: Vec3,
) {
    if let Some((target, kind)) = hit {
        if kind.is_destructible_unit() {
            let _ = mark_destroyed(world, target);
        }
    }
    let swept = sweep(
        world,
        point,
        munition.explosion_radius,
        &[EntityKind::GroundUnit, EntityKind::AirUnit],
    );
    debug!(
        "bomb impact at {point:?}: direct {:?}, {swept} in radius",
        hit.map(|(e, _)| entity_id(e))
    );
}

fn resolve_rocket(
    world: &mut World,
    munition: &Munition,
    hit: Option<(Entity, EntityKind)>,
    collision: &Collision,
    effects: &mut Vec<EffectRequest>,
) -> Result<(), SimError> {
    let target = match hit {
        Some((target, EntityKind::AirUnit)) => target,
        Some((target, EntityKind::GroundUnit)) => {
            debug!("rocket hit ground unit {}: no damage", entity_id(target));
            return Ok(());
        }
        _ => return Ok(()),
    };

    let config = world
        .get::<&ExplosionConfig>(target)
        .ok()
        .map(|config| (*config).clone());
    let _ = mark_destroyed(world, target);
    let swept = sweep(
        world,
        collision.point,
        munition.explosion_radius,
        &[EntityKind::AirUnit],
    );
    debug!(
        "rocket destroyed air unit {}, {swept} more in radius",
        entity_id(target)
    );

    let config = config.ok_or_else(|| {
        SimError::MissingConfiguration(format!(
            "air unit {} has no explosion config",
            entity_id(target)
        ))
    })?;
    explosion::trigger(effects, collision.point, collision.normal, &config);
    Ok(())
}

/// Identify which side of a collision is a munition. Returns the munition
/// and the other party.
fn munition_side(world: &World, collision: &Collision) -> Option<(Entity, Option<Entity>)> {
    if world.get::<&Munition>(collision.a).is_ok() {
        return Some((collision.a, collision.b));
    }
    let b = collision.b?;
    world
        .get::<&Munition>(b)
        .is_ok()
        .then_some((b, Some(collision.a)))
}

/// Destroy every live entity of the given kinds within `radius` of `center`.
/// Returns how many were destroyed.
fn sweep(world: &mut World, center: Vec3, radius: f32, kinds: &[EntityKind]) -> usize {
    if radius <= 0.0 {
        return 0;
    }
    let radius_sq = radius * radius;
    let victims: Vec<Entity> = world
        .query::<(&Actor, &Pose)>()
        .iter()
        .filter(|(_, (actor, pose))| {
            actor.alive
                && kinds.contains(&actor.kind)
                && pose.position.distance_squared(center) <= radius_sq
        })
        .map(|(entity, _)| entity)
        .collect();

    victims
        .into_iter()
        .filter(|&entity| mark_destroyed(world, entity).is_ok())
        .count()
}
