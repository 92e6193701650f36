//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player's bomber, landmarks, enemy units and munitions with
//! their component bundles, and answers the lookups other systems need
//! (live entities of a kind, landmark by name).

use glam::Vec3;
use hecs::{Entity, EntityBuilder, World};

use zebomber_core::components::*;
use zebomber_core::config::{FlightConfig, GameConfig, GroundUnitPlacement, LandmarkPlacement};
use zebomber_core::enums::{EntityKind, MunitionKind, UnitKind};
use zebomber_core::types::{Pose, Rotation};
use zebomber_flight::flight::{initial_state, Launch};
use zebomber_flight::steering::heading_to;

use crate::components::Munition;

/// Stable numeric id of an entity, as reported in snapshots and events.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

/// Populate the level: landmarks, pre-placed ground units and the player.
/// Returns the player entity.
pub fn setup_match(world: &mut World, config: &GameConfig) -> Entity {
    for landmark in &config.landmarks {
        spawn_landmark(world, landmark);
    }
    for placement in &config.ground_units {
        spawn_ground_unit(world, placement);
    }
    spawn_player(world, &config.flight)
}

/// Spawn the player's bomber at its start point and cruise altitude.
pub fn spawn_player(world: &mut World, flight: &FlightConfig) -> Entity {
    let mut position = flight.start_position;
    position.z = flight.start_altitude;

    world.spawn((
        Player,
        Actor {
            kind: EntityKind::Aircraft,
            alive: true,
        },
        Pose::new(position, Rotation::from_yaw(flight.start_yaw)),
        initial_state(flight),
        MeshOffset {
            yaw: flight.mesh_yaw_offset,
        },
    ))
}

pub fn spawn_landmark(world: &mut World, placement: &LandmarkPlacement) -> Entity {
    world.spawn((
        Actor {
            kind: EntityKind::Landmark,
            alive: true,
        },
        Landmark {
            name: placement.name.clone(),
        },
        Pose::at(placement.position),
    ))
}

/// Spawn a pre-placed ground unit. Without an explicit target it drives
/// toward the world origin.
pub fn spawn_ground_unit(world: &mut World, placement: &GroundUnitPlacement) -> Entity {
    let goal = MoveGoal {
        target: placement.target.unwrap_or(Vec3::ZERO),
        speed: placement.speed,
        stopping_distance: placement.stopping_distance,
        rotation_speed: placement.rotation_speed,
        height: placement.position.z,
        target_set: true,
    };
    let pose = Pose::new(placement.position, Rotation::from_yaw(placement.yaw));
    spawn_unit(
        world,
        UnitKind::Ground,
        pose,
        goal,
        placement.mesh_yaw_offset,
        placement.collision_radius,
        None,
    )
}

/// Spawn a ground or air unit with an explicit goal.
pub fn spawn_unit(
    world: &mut World,
    kind: UnitKind,
    pose: Pose,
    goal: MoveGoal,
    mesh_yaw_offset: f32,
    collision_radius: f32,
    explosion: Option<ExplosionConfig>,
) -> Entity {
    let mut builder = EntityBuilder::new();
    builder
        .add(Actor {
            kind: kind.entity_kind(),
            alive: true,
        })
        .add(pose)
        .add(goal)
        .add(MeshOffset {
            yaw: mesh_yaw_offset,
        })
        .add(CollisionRadius(collision_radius));
    if let Some(explosion) = explosion {
        builder.add(explosion);
    }
    world.spawn(builder.build())
}

/// Spawn a unit at `position` facing `target`, already ordered to move there.
pub fn spawn_unit_toward(
    world: &mut World,
    kind: UnitKind,
    position: Vec3,
    target: Vec3,
    goal: MoveGoal,
    mesh_yaw_offset: f32,
    collision_radius: f32,
    explosion: Option<ExplosionConfig>,
) -> Entity {
    let pose = Pose::new(position, Rotation::from_yaw(heading_to(position, target)));
    let goal = MoveGoal {
        target,
        target_set: true,
        ..goal
    };
    spawn_unit(
        world,
        kind,
        pose,
        goal,
        mesh_yaw_offset,
        collision_radius,
        explosion,
    )
}

/// Spawn a munition from a launch solution. The lifespan timer is attached
/// afterwards by the caller, once the entity handle exists.
pub fn spawn_munition(
    world: &mut World,
    kind: MunitionKind,
    launch: &Launch,
    owner: Option<Entity>,
    collision_radius: f32,
    explosion_radius: f32,
    gravity_scale: f32,
) -> Entity {
    world.spawn((
        Actor {
            kind: kind.entity_kind(),
            alive: true,
        },
        Pose::new(launch.position, launch.rotation),
        Velocity(launch.velocity),
        Ballistic { gravity_scale },
        CollisionRadius(collision_radius),
        Munition {
            kind,
            owner,
            explosion_radius,
            lifespan: None,
        },
    ))
}

/// Live entities of one kind with their poses, in spawn order.
pub fn enumerate(world: &World, kind: EntityKind) -> Vec<(Entity, Pose)> {
    let mut found: Vec<(Entity, Pose)> = world
        .query::<(&Actor, &Pose)>()
        .iter()
        .filter(|(_, (actor, _))| actor.alive && actor.kind == kind)
        .map(|(entity, (_, pose))| (entity, *pose))
        .collect();
    found.sort_by_key(|(entity, _)| entity_id(*entity));
    found
}

/// Position of the first landmark whose name contains `tag`.
pub fn find_landmark(world: &World, tag: &str) -> Option<Vec3> {
    let mut matches: Vec<(u64, Vec3)> = world
        .query::<(&Landmark, &Pose)>()
        .iter()
        .filter(|(_, (landmark, _))| landmark.name.contains(tag))
        .map(|(entity, (_, pose))| (entity_id(entity), pose.position))
        .collect();
    matches.sort_by_key(|(id, _)| *id);
    matches.first().map(|(_, position)| *position)
}

/// Whether `entity` exists and has not been destroyed.
pub fn is_alive(world: &World, entity: Entity) -> bool {
    world
        .get::<&Actor>(entity)
        .map(|actor| actor.alive)
        .unwrap_or(false)
}

/// Kind of a live entity.
pub fn live_kind(world: &World, entity: Entity) -> Option<EntityKind> {
    world
        .get::<&Actor>(entity)
        .ok()
        .filter(|actor| actor.alive)
        .map(|actor| actor.kind)
}
