//! Tests for the simulation engine, wave spawning and projectile resolution.

use approx::assert_relative_eq;
use glam::Vec3;
use hecs::Entity;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rstest::rstest;

use zebomber_core::commands::PlayerCommand;
use zebomber_core::components::{ExplosionConfig, MoveGoal};
use zebomber_core::config::{GameConfig, GroundUnitPlacement, LandmarkPlacement, SpawnerConfig};
use zebomber_core::enums::*;
use zebomber_core::error::SimError;
use zebomber_core::events::SimEvent;
use zebomber_core::state::SimSnapshot;
use zebomber_core::types::Pose;

use crate::engine::{SimConfig, SimulationEngine};
use crate::systems::wave_spawner::{angular_separation, sample_spawn_point, wave_unit_count};
use crate::timers::{TimerEvent, TimerQueue};
use crate::world_setup;

/// A level with no spawners and no built-in contacts, so tests control
/// every collision.
fn quiet_config() -> GameConfig {
    let mut game = GameConfig::default();
    game.spawners.clear();
    game.physics.builtin_contacts = false;
    game
}

fn started(game: GameConfig) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig { seed: 7, game });
    engine.queue_command(PlayerCommand::StartMatch);
    engine.tick();
    engine
}

fn parked_tank(x: f32) -> GroundUnitPlacement {
    GroundUnitPlacement {
        position: Vec3::new(x, 0.0, 0.0),
        speed: 0.0,
        ..Default::default()
    }
}

fn spawn_helicopter(engine: &mut SimulationEngine, position: Vec3, explosion: Option<ExplosionConfig>) -> Entity {
    let goal = MoveGoal {
        target: Vec3::ZERO,
        speed: 0.0,
        stopping_distance: 100.0,
        rotation_speed: 3.0,
        height: position.z,
        target_set: false,
    };
    world_setup::spawn_unit(
        engine.world_mut(),
        UnitKind::Air,
        Pose::at(position),
        goal,
        90.0,
        150.0,
        explosion,
    )
}

fn fire(engine: &mut SimulationEngine, command: PlayerCommand, kind: EntityKind) -> Entity {
    engine.queue_command(command);
    engine.tick();
    engine
        .enumerate(kind)
        .last()
        .map(|(entity, _)| *entity)
        .expect("munition released")
}

fn run_ticks(engine: &mut SimulationEngine, ticks: usize) -> Vec<SimSnapshot> {
    (0..ticks).map(|_| engine.tick()).collect()
}

fn wave_spawned(snapshots: &[SimSnapshot]) -> Vec<(u32, u32, u32)> {
    snapshots
        .iter()
        .flat_map(|s| s.events.iter())
        .filter_map(|e| match e {
            SimEvent::WaveSpawned {
                wave,
                requested,
                spawned,
                ..
            } => Some((*wave, *requested, *spawned)),
            _ => None,
        })
        .collect()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let script = |engine: &mut SimulationEngine, tick: usize| match tick {
        0 => engine.queue_command(PlayerCommand::StartMatch),
        30 => engine.queue_command(PlayerCommand::TurnLeft { pressed: true }),
        90 => engine.queue_command(PlayerCommand::TurnLeft { pressed: false }),
        t if t % 45 == 0 => engine.queue_command(PlayerCommand::DropBomb),
        t if t % 20 == 0 => engine.queue_command(PlayerCommand::FireRocket),
        _ => {}
    };

    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    for tick in 0..900 {
        script(&mut engine_a, tick);
        script(&mut engine_b, tick);
        let snap_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let snap_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(snap_a, snap_b, "diverged at tick {tick}");
    }
}

#[test]
fn test_different_seeds_place_waves_differently() {
    let positions = |seed: u64| {
        let mut engine = SimulationEngine::new(SimConfig {
            seed,
            ..Default::default()
        });
        engine.queue_command(PlayerCommand::StartMatch);
        run_ticks(&mut engine, 302);
        engine
            .enumerate(EntityKind::AirUnit)
            .into_iter()
            .map(|(_, pose)| pose.position)
            .collect::<Vec<_>>()
    };
    assert_ne!(positions(1), positions(2));
}

// ---- Match control ----

#[test]
fn test_start_match_populates_world() {
    let mut game = GameConfig::default();
    game.ground_units.push(parked_tank(1000.0));
    let engine = started(game);

    assert_eq!(engine.phase(), GamePhase::Active);
    assert!(engine.player().is_some());
    assert_eq!(engine.enumerate(EntityKind::Landmark).len(), 1);
    assert_eq!(engine.enumerate(EntityKind::GroundUnit).len(), 1);
    assert_eq!(engine.spawners()[0].state.phase, WavePhase::WaveScheduled);
}

#[test]
fn test_pause_freezes_time() {
    let mut engine = started(quiet_config());
    let before = engine.time();
    engine.queue_command(PlayerCommand::Pause);
    run_ticks(&mut engine, 10);
    assert_eq!(engine.time().tick, before.tick);

    engine.queue_command(PlayerCommand::Resume);
    run_ticks(&mut engine, 10);
    assert_eq!(engine.time().tick, before.tick + 10);
}

#[test]
fn test_player_flies_forward_at_cruise_altitude() {
    let mut engine = started(quiet_config());
    let snap = run_ticks(&mut engine, 60).pop().unwrap();
    let player = snap.player.unwrap();
    assert!(player.position.x > -6000.0 + 1000.0);
    assert_relative_eq!(player.position.z, 5000.0, epsilon = 1.0);
}

// ---- Wave spawning ----

#[test]
fn test_first_wave_after_delay() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartMatch);

    let snaps = run_ticks(&mut engine, 300);
    assert!(wave_spawned(&snaps).is_empty());
    assert_eq!(snaps.last().unwrap().waves[0].phase, WavePhase::WaveScheduled);

    let snaps = run_ticks(&mut engine, 2);
    assert_eq!(wave_spawned(&snaps), vec![(1, 3, 3)]);
    assert_eq!(engine.enumerate(EntityKind::AirUnit).len(), 3);
    assert_eq!(snaps.last().unwrap().waves[0].phase, WavePhase::WaveActive);
}

#[test]
fn test_cleared_wave_schedules_larger_wave() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartMatch);
    run_ticks(&mut engine, 302);

    let units = engine.enumerate(EntityKind::AirUnit);
    assert_eq!(units.len(), 3);
    for (entity, _) in &units {
        engine.destroy(*entity).unwrap();
    }

    let snap = engine.tick();
    let cleared = snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::WaveCleared { wave: 1, .. }));
    assert!(cleared);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::WaveScheduled { next_wave: 2, .. })));
    assert_eq!(snap.waves[0].phase, WavePhase::WaveScheduled);
    assert_eq!(snap.waves[0].active_units, 0);
    let eta = snap.waves[0].next_wave_in_secs.unwrap();
    assert!(eta > 4.9 && eta <= 5.0);

    let snaps = run_ticks(&mut engine, 301);
    assert_eq!(wave_spawned(&snaps), vec![(2, 4, 4)]);
    assert_eq!(engine.enumerate(EntityKind::AirUnit).len(), 4);
}

#[test]
fn test_double_destroy_decrements_once() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartMatch);
    run_ticks(&mut engine, 302);

    let (victim, _) = engine.enumerate(EntityKind::AirUnit)[0];
    assert!(engine.destroy(victim).is_ok());
    assert!(matches!(engine.destroy(victim), Err(SimError::StaleHandle(_))));

    let snap = engine.tick();
    assert_eq!(snap.waves[0].active_units, 2);
    let destroyed = snap
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::Destroyed { .. }))
        .count();
    assert_eq!(destroyed, 1);

    // Despawned handle stays stale
    assert!(engine.destroy(victim).is_err());
    assert_eq!(engine.tick().waves[0].active_units, 2);
}

#[test]
fn test_wave_units_head_for_landmark() {
    let mut game = GameConfig::default();
    game.landmarks = vec![LandmarkPlacement {
        name: "the_old_wooden_church_2".to_string(),
        position: Vec3::new(1000.0, -500.0, 0.0),
    }];
    let mut engine = SimulationEngine::new(SimConfig { seed: 3, game });
    engine.queue_command(PlayerCommand::StartMatch);
    run_ticks(&mut engine, 302);

    assert_eq!(engine.spawners()[0].landmark, Vec3::new(1000.0, -500.0, 0.0));
    for (entity, pose) in engine.enumerate(EntityKind::AirUnit) {
        let goal = *engine.world().get::<&MoveGoal>(entity).unwrap();
        assert!(goal.target_set);
        assert_eq!(goal.target, Vec3::new(1000.0, -500.0, 0.0));
        assert_relative_eq!(goal.stopping_distance, 500.0);
        assert_relative_eq!(pose.position.z, goal.height);
        assert!(goal.height >= 400.0 && goal.height <= 800.0);
        assert!(goal.speed >= 200.0 && goal.speed <= 500.0);
    }
}

#[test]
fn test_missing_landmark_falls_back_to_origin() {
    let mut game = GameConfig::default();
    game.landmarks.clear();
    let mut engine = SimulationEngine::new(SimConfig { seed: 3, game });
    engine.queue_command(PlayerCommand::StartMatch);
    run_ticks(&mut engine, 302);

    assert_eq!(engine.spawners()[0].landmark, Vec3::ZERO);
    for (entity, _) in engine.enumerate(EntityKind::AirUnit) {
        let goal = *engine.world().get::<&MoveGoal>(entity).unwrap();
        assert_eq!(goal.target, Vec3::ZERO);
    }
}

#[test]
fn test_ground_spawner_places_units_on_ground() {
    let mut game = GameConfig::default();
    game.spawners = vec![SpawnerConfig {
        name: "tanks".to_string(),
        unit_kind: UnitKind::Ground,
        ground_height: 25.0,
        ..Default::default()
    }];
    let mut engine = SimulationEngine::new(SimConfig { seed: 5, game });
    engine.queue_command(PlayerCommand::StartMatch);
    run_ticks(&mut engine, 302);

    let tanks = engine.enumerate(EntityKind::GroundUnit);
    assert_eq!(tanks.len(), 3);
    for (_, pose) in tanks {
        assert_relative_eq!(pose.position.z, 25.0);
    }
    assert!(engine.enumerate(EntityKind::AirUnit).is_empty());
}

#[test]
fn test_sampling_exhaustion_skips_units() {
    let mut game = GameConfig::default();
    game.spawners[0].spawn_radius = 100.0;
    game.spawners[0].min_spawn_separation = 1000.0;
    let mut engine = SimulationEngine::new(SimConfig { seed: 11, game });
    engine.queue_command(PlayerCommand::StartMatch);
    let snaps = run_ticks(&mut engine, 302);

    assert_eq!(wave_spawned(&snaps), vec![(1, 3, 1)]);
    assert_eq!(engine.enumerate(EntityKind::AirUnit).len(), 1);
    assert_eq!(snaps.last().unwrap().waves[0].active_units, 1);
}

#[test]
fn test_units_advance_toward_target() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartMatch);
    run_ticks(&mut engine, 302);
    let before = engine.enumerate(EntityKind::AirUnit);
    run_ticks(&mut engine, 60);
    let after = engine.enumerate(EntityKind::AirUnit);

    for ((_, a), (_, b)) in before.iter().zip(after.iter()) {
        let d_before = a.horizontal_distance_to(Vec3::ZERO);
        let d_after = b.horizontal_distance_to(Vec3::ZERO);
        assert!(d_after < d_before);
        assert_relative_eq!(a.position.z, b.position.z);
    }
}

#[rstest]
#[case(1, 3)]
#[case(2, 4)]
#[case(5, 7)]
fn test_wave_unit_count(#[case] wave: u32, #[case] expected: u32) {
    assert_eq!(wave_unit_count(&SpawnerConfig::default(), wave), expected);
}

#[test]
fn test_sampler_fails_after_ring_is_full() {
    let config = SpawnerConfig {
        spawn_radius: 100.0,
        min_spawn_separation: 1000.0,
        ..Default::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut used = Vec::new();
    let first = sample_spawn_point(&mut rng, &mut used, &config).unwrap();
    assert_relative_eq!(first.truncate().length(), 100.0, epsilon = 1e-3);
    assert_eq!(
        sample_spawn_point(&mut rng, &mut used, &config),
        Err(SimError::SamplingExhausted { attempts: 50 })
    );
}

proptest! {
    #[test]
    fn prop_sampled_angles_respect_separation(seed in any::<u64>(), count in 1usize..12) {
        let config = SpawnerConfig::default();
        let min_separation = config.min_spawn_separation / config.spawn_radius;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut used = Vec::new();
        for _ in 0..count {
            if let Ok(point) = sample_spawn_point(&mut rng, &mut used, &config) {
                prop_assert!((point.truncate().length() - config.spawn_radius).abs() < 0.5);
                prop_assert!(point.z >= config.min_spawn_height && point.z <= config.max_spawn_height);
            }
        }
        for (i, a) in used.iter().enumerate() {
            for b in &used[i + 1..] {
                prop_assert!(angular_separation(*a, *b) >= min_separation);
            }
        }
    }
}

// ---- Projectile resolution ----

#[test]
fn test_bomb_splash_radius() {
    let mut engine = started(quiet_config());
    let near = engine.spawn_ground_unit(&parked_tank(200.0));
    let far = engine.spawn_ground_unit(&parked_tank(600.0));
    let bomb = fire(&mut engine, PlayerCommand::DropBomb, EntityKind::AreaProjectile);

    engine.report_collision(bomb, None, Vec3::ZERO, Vec3::Z);
    let snap = engine.tick();

    let tanks: Vec<Entity> = engine
        .enumerate(EntityKind::GroundUnit)
        .into_iter()
        .map(|(e, _)| e)
        .collect();
    assert_eq!(tanks, vec![far]);
    assert!(!engine.world().contains(near));
    assert!(!engine.world().contains(bomb));
    assert!(snap.effects.is_empty());
}

#[test]
fn test_bomb_direct_hit_outside_radius() {
    let mut game = quiet_config();
    if let Some(bomb) = game.bomb.as_mut() {
        bomb.explosion_radius = 0.0;
    }
    let mut engine = started(game);
    let target = engine.spawn_ground_unit(&parked_tank(3000.0));
    let bystander = engine.spawn_ground_unit(&parked_tank(3100.0));
    let bomb = fire(&mut engine, PlayerCommand::DropBomb, EntityKind::AreaProjectile);

    engine.report_collision(bomb, Some(target), Vec3::new(3000.0, 0.0, 0.0), Vec3::X);
    engine.tick();
    assert!(!engine.world().contains(target));
    assert!(engine.world().contains(bystander));
}

#[test]
fn test_rocket_on_ground_unit_is_harmless() {
    let mut engine = started(quiet_config());
    let tank = engine.spawn_ground_unit(&parked_tank(0.0));
    let rocket = fire(&mut engine, PlayerCommand::FireRocket, EntityKind::DirectProjectile);

    engine.report_collision(rocket, Some(tank), Vec3::ZERO, Vec3::Z);
    let snap = engine.tick();

    assert!(engine.world().contains(tank));
    assert!(!engine.world().contains(rocket));
    assert!(snap.effects.is_empty());
}

#[test]
fn test_rocket_on_air_unit_explodes_and_splashes_air_only() {
    let mut engine = started(quiet_config());
    let effect = ExplosionConfig {
        particle_system: Some("P_Explosion".to_string()),
        ..Default::default()
    };
    let target = spawn_helicopter(&mut engine, Vec3::new(0.0, 0.0, 600.0), Some(effect.clone()));
    let wingman = spawn_helicopter(&mut engine, Vec3::new(150.0, 0.0, 600.0), None);
    let distant = spawn_helicopter(&mut engine, Vec3::new(900.0, 0.0, 600.0), None);
    let tank = engine.spawn_ground_unit(&parked_tank(0.0));
    let rocket = fire(&mut engine, PlayerCommand::FireRocket, EntityKind::DirectProjectile);

    let point = Vec3::new(0.0, 0.0, 600.0);
    engine.report_collision(rocket, Some(target), point, -Vec3::Z);
    let snap = engine.tick();

    assert!(!engine.world().contains(target));
    assert!(!engine.world().contains(wingman));
    assert!(engine.world().contains(distant));
    assert!(engine.world().contains(tank));
    assert!(!engine.world().contains(rocket));
    assert_eq!(snap.effects.len(), 1);
    assert_eq!(snap.effects[0].position, point);
    assert_eq!(snap.effects[0].normal, -Vec3::Z);
    assert_eq!(snap.effects[0].config, effect);
}

#[test]
fn test_rocket_hit_without_explosion_config_still_kills() {
    let mut engine = started(quiet_config());
    let target = spawn_helicopter(&mut engine, Vec3::new(0.0, 0.0, 600.0), None);
    let rocket = fire(&mut engine, PlayerCommand::FireRocket, EntityKind::DirectProjectile);

    engine.report_collision(target, Some(rocket), Vec3::new(0.0, 0.0, 600.0), Vec3::X);
    let snap = engine.tick();
    assert!(!engine.world().contains(target));
    assert!(!engine.world().contains(rocket));
    assert!(snap.effects.is_empty());
}

#[test]
fn test_rocket_into_terrain_is_silent() {
    let mut engine = started(quiet_config());
    let rocket = fire(&mut engine, PlayerCommand::FireRocket, EntityKind::DirectProjectile);
    engine.report_collision(rocket, None, Vec3::ZERO, Vec3::Z);
    let snap = engine.tick();
    assert!(!engine.world().contains(rocket));
    assert!(snap.effects.is_empty());
}

#[test]
fn test_owner_contact_ignored() {
    let mut engine = started(quiet_config());
    let rocket = fire(&mut engine, PlayerCommand::FireRocket, EntityKind::DirectProjectile);
    let player = engine.player().unwrap();
    engine.report_collision(rocket, Some(player), Vec3::ZERO, Vec3::Z);
    engine.tick();
    assert!(engine.world().contains(rocket));
}

#[test]
fn test_second_collision_of_same_munition_is_noop() {
    let mut engine = started(quiet_config());
    let first = engine.spawn_ground_unit(&parked_tank(3000.0));
    let second = engine.spawn_ground_unit(&parked_tank(-3000.0));
    let bomb = fire(&mut engine, PlayerCommand::DropBomb, EntityKind::AreaProjectile);

    engine.report_collision(bomb, Some(first), Vec3::new(3000.0, 0.0, 0.0), Vec3::Z);
    engine.report_collision(bomb, Some(second), Vec3::new(-3000.0, 0.0, 0.0), Vec3::Z);
    engine.tick();
    assert!(!engine.world().contains(first));
    assert!(engine.world().contains(second));
}

#[test]
fn test_bomb_cooldown_limits_release_rate() {
    let mut engine = started(quiet_config());
    engine.queue_command(PlayerCommand::DropBomb);
    engine.queue_command(PlayerCommand::DropBomb);
    engine.tick();
    assert_eq!(engine.enumerate(EntityKind::AreaProjectile).len(), 1);

    run_ticks(&mut engine, 29);
    engine.queue_command(PlayerCommand::DropBomb);
    engine.tick();
    assert_eq!(engine.enumerate(EntityKind::AreaProjectile).len(), 2);
}

#[test]
fn test_disabled_munition_logs_and_skips() {
    let mut game = quiet_config();
    game.rocket = None;
    let mut engine = started(game);
    engine.queue_command(PlayerCommand::FireRocket);
    let snap = engine.tick();
    assert!(snap.projectiles.is_empty());
}

#[test]
fn test_lifespan_expiry_despawns_munition() {
    let mut engine = started(quiet_config());
    let rocket = fire(&mut engine, PlayerCommand::FireRocket, EntityKind::DirectProjectile);
    assert_eq!(engine.timers().len(), 1);

    let snaps = run_ticks(&mut engine, 600);
    assert!(!engine.world().contains(rocket));
    assert!(engine.timers().is_empty());
    let expired = snaps.iter().flat_map(|s| s.events.iter()).any(|e| {
        matches!(
            e,
            SimEvent::Destroyed {
                kind: EntityKind::DirectProjectile,
                ..
            }
        )
    });
    assert!(expired);
}

#[test]
fn test_destroyed_munition_cancels_lifespan_timer() {
    let mut engine = started(quiet_config());
    let bomb = fire(&mut engine, PlayerCommand::DropBomb, EntityKind::AreaProjectile);
    engine.report_collision(bomb, None, Vec3::ZERO, Vec3::Z);
    engine.tick();
    assert!(engine.timers().is_empty());
}

#[test]
fn test_builtin_contacts_bomb_hits_ground_target() {
    let mut game = GameConfig::default();
    game.spawners.clear();
    let mut engine = started(game);
    let tank = engine.spawn_ground_unit(&parked_tank(-1300.0));
    engine.queue_command(PlayerCommand::DropBomb);

    let snaps = run_ticks(&mut engine, 300);
    assert!(!engine.world().contains(tank));
    assert!(engine.enumerate(EntityKind::AreaProjectile).is_empty());
    assert!(snaps.iter().flat_map(|s| s.events.iter()).any(|e| matches!(
        e,
        SimEvent::Destroyed {
            kind: EntityKind::GroundUnit,
            ..
        }
    )));
}

#[test]
fn test_builtin_contacts_rocket_hits_air_unit_ahead() {
    let mut game = GameConfig::default();
    game.spawners.clear();
    let mut engine = started(game);
    let player_pos = engine.enumerate(EntityKind::Aircraft)[0].1.position;
    let target = spawn_helicopter(
        &mut engine,
        player_pos + Vec3::new(4000.0, 0.0, -50.0),
        Some(ExplosionConfig::default()),
    );
    engine.queue_command(PlayerCommand::FireRocket);

    let snaps = run_ticks(&mut engine, 60);
    assert!(!engine.world().contains(target));
    assert_eq!(snaps.iter().map(|s| s.effects.len()).sum::<usize>(), 1);
}

// ---- Snapshot ----

#[test]
fn test_snapshot_reports_render_yaw_and_arrival() {
    let mut game = quiet_config();
    game.ground_units.push(GroundUnitPlacement {
        position: Vec3::new(50.0, 0.0, 0.0),
        mesh_yaw_offset: 90.0,
        ..Default::default()
    });
    let mut engine = started(game);
    let snap = engine.tick();

    let tank = &snap.units[0];
    assert_eq!(tank.kind, EntityKind::GroundUnit);
    assert!(tank.arrived);
    assert_relative_eq!(tank.render_yaw, 90.0);
    assert_eq!(snap.landmarks.len(), 1);
    assert!(snap.waves.is_empty());
}

// ---- Timers ----

#[test]
fn test_timer_queue_fires_in_order_and_cancels() {
    let mut timers = TimerQueue::new();
    let a = timers.arm(10, TimerEvent::SpawnWave { spawner: 0 });
    let b = timers.arm(5, TimerEvent::SpawnWave { spawner: 1 });
    let c = timers.arm(5, TimerEvent::SpawnWave { spawner: 2 });

    assert_eq!(timers.due_tick(a), Some(10));
    assert!(timers.drain_due(4).is_empty());
    assert!(timers.cancel(c));
    assert!(!timers.cancel(c));
    assert_eq!(
        timers.drain_due(7),
        vec![TimerEvent::SpawnWave { spawner: 1 }]
    );
    assert_eq!(timers.due_tick(b), None);
    assert_eq!(timers.len(), 1);
    assert_eq!(
        timers.drain_due(100),
        vec![TimerEvent::SpawnWave { spawner: 0 }]
    );
    assert!(timers.is_empty());
}
