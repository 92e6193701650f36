//! Cleanup system: despawns destroyed entities.
//!
//! `mark_destroyed` only flips the liveness flag, so destroying an entity
//! twice within a tick is harmless. The actual despawn, the timer
//! cancellation and the single `Destroyed` event all happen here.

use hecs::{Entity, World};
use log::trace;

use zebomber_core::components::Actor;
use zebomber_core::error::SimError;
use zebomber_core::events::SimEvent;

use crate::components::Munition;
use crate::timers::TimerQueue;
use crate::world_setup::entity_id;

/// Mark an entity destroyed. Fails with `StaleHandle` if it already was.
pub fn mark_destroyed(world: &mut World, entity: Entity) -> Result<(), SimError> {
    match world.get::<&mut Actor>(entity) {
        Ok(mut actor) if actor.alive => {
            actor.alive = false;
            Ok(())
        }
        _ => Err(SimError::StaleHandle(entity_id(entity))),
    }
}

/// Despawn every destroyed entity. The despawned handles are appended to
/// `destroyed` in id order for the wave spawners to drain.
pub fn run(
    world: &mut World,
    timers: &mut TimerQueue,
    destroyed: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
) {
    let mut dead: Vec<(Entity, Actor, Option<Munition>)> = world
        .query::<(&Actor, Option<&Munition>)>()
        .iter()
        .filter(|(_, (actor, _))| !actor.alive)
        .map(|(entity, (actor, munition))| (entity, *actor, munition.copied()))
        .collect();
    dead.sort_by_key(|(entity, _, _)| entity_id(*entity));

    for (entity, actor, munition) in dead {
        if let Some(timer) = munition.and_then(|m| m.lifespan) {
            timers.cancel(timer);
        }
        let _ = world.despawn(entity);
        trace!("despawned {:?} {}", actor.kind, entity_id(entity));
        events.push(SimEvent::Destroyed {
            entity_id: entity_id(entity),
            kind: actor.kind,
        });
        destroyed.push(entity);
    }
}
