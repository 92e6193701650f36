//! Snapshot system: queries the ECS world and builds a complete `SimSnapshot`.
//!
//! This system is read-only: it never modifies the world.

use hecs::World;

use zebomber_core::components::*;
use zebomber_core::enums::GamePhase;
use zebomber_core::events::{EffectRequest, SimEvent};
use zebomber_core::state::*;
use zebomber_core::types::{normalize_degrees, Pose, SimTime};
use zebomber_flight::steering::has_reached_target;

use crate::components::Munition;
use crate::systems::wave_spawner::WaveSpawner;
use crate::timers::TimerQueue;
use crate::world_setup::entity_id;

/// Build a complete snapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    spawners: &[WaveSpawner],
    timers: &TimerQueue,
    effects: Vec<EffectRequest>,
    events: Vec<SimEvent>,
) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        phase,
        player: build_player(world),
        units: build_units(world),
        projectiles: build_projectiles(world),
        landmarks: build_landmarks(world),
        waves: spawners
            .iter()
            .map(|spawner| spawner.view(timers, time.tick))
            .collect(),
        effects,
        events,
    }
}

fn build_player(world: &World) -> Option<PlayerView> {
    world
        .query::<(&Player, &Actor, &Pose, &FlightState, Option<&MeshOffset>)>()
        .iter()
        .find(|(_, (_, actor, ..))| actor.alive)
        .map(|(entity, (_, _, pose, state, offset))| PlayerView {
            entity_id: entity_id(entity),
            position: pose.position,
            rotation: pose.rotation,
            speed: state.speed,
            render_yaw: render_yaw(pose, offset),
        })
}

fn build_units(world: &World) -> Vec<UnitView> {
    let mut units: Vec<UnitView> = world
        .query::<(&Actor, &Pose, &MoveGoal, Option<&MeshOffset>)>()
        .iter()
        .filter(|(_, (actor, ..))| actor.alive)
        .map(|(entity, (actor, pose, goal, offset))| UnitView {
            entity_id: entity_id(entity),
            kind: actor.kind,
            position: pose.position,
            rotation: pose.rotation,
            render_yaw: render_yaw(pose, offset),
            speed: goal.speed,
            arrived: has_reached_target(pose.position, goal),
        })
        .collect();
    units.sort_by_key(|u| u.entity_id);
    units
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Actor, &Pose, &Velocity, &Munition)>()
        .iter()
        .filter(|(_, (actor, ..))| actor.alive)
        .map(|(entity, (actor, pose, velocity, _))| ProjectileView {
            entity_id: entity_id(entity),
            kind: actor.kind,
            position: pose.position,
            velocity: velocity.0,
        })
        .collect();
    projectiles.sort_by_key(|p| p.entity_id);
    projectiles
}

fn build_landmarks(world: &World) -> Vec<LandmarkView> {
    let mut landmarks: Vec<(u64, LandmarkView)> = world
        .query::<(&Landmark, &Pose)>()
        .iter()
        .map(|(entity, (landmark, pose))| {
            (
                entity_id(entity),
                LandmarkView {
                    name: landmark.name.clone(),
                    position: pose.position,
                },
            )
        })
        .collect();
    landmarks.sort_by_key(|(id, _)| *id);
    landmarks.into_iter().map(|(_, view)| view).collect()
}

fn render_yaw(pose: &Pose, offset: Option<&MeshOffset>) -> f32 {
    normalize_degrees(pose.rotation.yaw + offset.map_or(0.0, |o| o.yaw))
}
