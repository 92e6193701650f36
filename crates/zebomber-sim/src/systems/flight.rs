//! Player flight system: input edges, the per-tick flight step and weapon
//! release.

use hecs::{Entity, World};
use log::{debug, trace};

use zebomber_core::components::{Actor, FlightState, Player};
use zebomber_core::config::{BombConfig, FlightConfig, RocketConfig};
use zebomber_core::enums::{InputAxis, MunitionKind};
use zebomber_core::error::SimError;
use zebomber_core::events::SimEvent;
use zebomber_core::types::{secs_to_ticks, Pose, SimTime};
use zebomber_flight::flight::{bomb_release, can_fire, rocket_launch, step, Launch};

use crate::components::Munition;
use crate::timers::{TimerEvent, TimerQueue};
use crate::world_setup::{entity_id, spawn_munition};

/// Advance the player's bomber.
pub fn run(world: &mut World, config: &FlightConfig, dt: f32) {
    for (_entity, (_player, actor, pose, state)) in
        world.query_mut::<(&Player, &Actor, &mut Pose, &mut FlightState)>()
    {
        if !actor.alive {
            continue;
        }
        let (next_pose, next_state) = step(pose, state, config, dt);
        *pose = next_pose;
        *state = next_state;
    }
}

/// Set a raw input axis on the player's bomber.
pub fn set_axis(world: &mut World, axis: InputAxis, value: f32) {
    for (_entity, (_player, state)) in world.query_mut::<(&Player, &mut FlightState)>() {
        match axis {
            InputAxis::Pitch => state.pitch_input = value,
            InputAxis::Yaw => state.yaw_input = value,
        }
    }
}

/// Release a bomb if one is configured and the cooldown has elapsed.
/// Returns the new munition, or `None` while cooling down.
pub fn drop_bomb(
    world: &mut World,
    config: Option<&BombConfig>,
    timers: &mut TimerQueue,
    time: &SimTime,
    events: &mut Vec<SimEvent>,
) -> Result<Option<Entity>, SimError> {
    let config = config
        .ok_or_else(|| SimError::MissingConfiguration("no bomb type configured".to_string()))?;
    let Some((player, pose, state)) = find_player(world) else {
        return Ok(None);
    };
    if !can_fire(state.last_bomb_secs, time.elapsed_secs, config.cooldown_secs) {
        trace!("bomb on cooldown");
        return Ok(None);
    }

    let launch = bomb_release(&pose, state.speed, config);
    set_last_fired(world, player, MunitionKind::Bomb, time.elapsed_secs);
    let munition = spawn_munition(
        world,
        MunitionKind::Bomb,
        &launch,
        Some(player),
        config.collision_radius,
        config.explosion_radius,
        config.gravity_scale,
    );
    arm_lifespan(world, timers, munition, time, config.lifespan_secs);
    released(events, MunitionKind::Bomb, munition, &launch);
    Ok(Some(munition))
}

/// Launch a rocket if one is configured and the cooldown has elapsed.
pub fn fire_rocket(
    world: &mut World,
    config: Option<&RocketConfig>,
    timers: &mut TimerQueue,
    time: &SimTime,
    events: &mut Vec<SimEvent>,
) -> Result<Option<Entity>, SimError> {
    let config = config
        .ok_or_else(|| SimError::MissingConfiguration("no rocket type configured".to_string()))?;
    let Some((player, pose, state)) = find_player(world) else {
        return Ok(None);
    };
    if !can_fire(state.last_rocket_secs, time.elapsed_secs, config.cooldown_secs) {
        trace!("rocket on cooldown");
        return Ok(None);
    }

    let launch = rocket_launch(&pose, config);
    set_last_fired(world, player, MunitionKind::Rocket, time.elapsed_secs);
    let munition = spawn_munition(
        world,
        MunitionKind::Rocket,
        &launch,
        Some(player),
        config.collision_radius,
        config.explosion_radius,
        0.0,
    );
    arm_lifespan(world, timers, munition, time, config.lifespan_secs);
    released(events, MunitionKind::Rocket, munition, &launch);
    Ok(Some(munition))
}

fn find_player(world: &World) -> Option<(Entity, Pose, FlightState)> {
    world
        .query::<(&Player, &Actor, &Pose, &FlightState)>()
        .iter()
        .find(|(_, (_, actor, _, _))| actor.alive)
        .map(|(entity, (_, _, pose, state))| (entity, *pose, *state))
}

fn set_last_fired(world: &mut World, player: Entity, kind: MunitionKind, now_secs: f64) {
    if let Ok(mut state) = world.get::<&mut FlightState>(player) {
        match kind {
            MunitionKind::Bomb => state.last_bomb_secs = Some(now_secs),
            MunitionKind::Rocket => state.last_rocket_secs = Some(now_secs),
        }
    }
}

fn arm_lifespan(
    world: &mut World,
    timers: &mut TimerQueue,
    munition: Entity,
    time: &SimTime,
    lifespan_secs: f32,
) {
    let due = time.tick + secs_to_ticks(lifespan_secs as f64);
    let timer = timers.arm(due, TimerEvent::Expire(munition));
    if let Ok(mut m) = world.get::<&mut Munition>(munition) {
        m.lifespan = Some(timer);
    }
}

fn released(events: &mut Vec<SimEvent>, kind: MunitionKind, munition: Entity, launch: &Launch) {
    debug!("{kind:?} {} released at {:?}", entity_id(munition), launch.position);
    events.push(SimEvent::MunitionReleased {
        kind,
        entity_id: entity_id(munition),
        position: launch.position,
    });
}
