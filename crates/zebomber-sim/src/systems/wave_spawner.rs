//! Wave spawning: escalating waves of enemy units around the world origin.
//!
//! Each spawner runs its own cycle:
//! `Idle -> WaveScheduled -> WaveSpawning -> WaveActive -> WaveScheduled`.
//! A wave is placed on a ring around the origin with a minimum angular
//! spacing between units, every unit heading for the landmark. When the
//! last unit of a wave is destroyed the next wave is scheduled.

use std::collections::HashSet;
use std::f32::consts::TAU;

use glam::Vec3;
use hecs::{Entity, World};
use log::{info, warn};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use zebomber_core::components::MoveGoal;
use zebomber_core::config::SpawnerConfig;
use zebomber_core::constants::{SPAWN_SAMPLE_ATTEMPTS, TICK_RATE};
use zebomber_core::enums::{UnitKind, WavePhase};
use zebomber_core::error::SimError;
use zebomber_core::events::SimEvent;
use zebomber_core::state::WaveView;
use zebomber_core::types::secs_to_ticks;

use crate::timers::{TimerEvent, TimerId, TimerQueue};
use crate::world_setup::{find_landmark, spawn_unit_toward};

/// Runtime bookkeeping of one spawner.
#[derive(Debug, Clone, Default)]
pub struct WaveState {
    pub phase: WavePhase,
    /// Number of the last wave spawned; 0 before the first.
    pub wave: u32,
    /// Pending wave timer.
    pub timer: Option<TimerId>,
    /// Ring angles (radians) taken by the current wave.
    pub used_angles: Vec<f32>,
    /// Units of the current wave still alive.
    pub live: HashSet<Entity>,
}

impl WaveState {
    pub fn active_units(&self) -> u32 {
        self.live.len() as u32
    }
}

#[derive(Debug, Clone)]
pub struct WaveSpawner {
    index: usize,
    pub config: SpawnerConfig,
    pub state: WaveState,
    /// Resolved when the spawner starts.
    pub landmark: Vec3,
}

/// Units in wave `wave` (1-based).
pub fn wave_unit_count(config: &SpawnerConfig, wave: u32) -> u32 {
    config
        .units_per_wave
        .saturating_add(wave.saturating_sub(1).saturating_mul(config.units_added_per_wave))
}

/// Shortest angular distance between two angles in radians.
pub fn angular_separation(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}

/// Pick a spawn point on the ring at least `min_spawn_separation` (as arc
/// length) away from every angle already used this wave. The accepted angle
/// is recorded in `used_angles`.
pub fn sample_spawn_point(
    rng: &mut ChaCha8Rng,
    used_angles: &mut Vec<f32>,
    config: &SpawnerConfig,
) -> Result<Vec3, SimError> {
    let min_separation = config.min_spawn_separation / config.spawn_radius;

    for _ in 0..SPAWN_SAMPLE_ATTEMPTS {
        let angle = rng.gen_range(0.0f32..360.0).to_radians();
        if used_angles
            .iter()
            .all(|&used| angular_separation(angle, used) >= min_separation)
        {
            used_angles.push(angle);
            let height = rng.gen_range(config.min_spawn_height..=config.max_spawn_height);
            return Ok(Vec3::new(
                angle.cos() * config.spawn_radius,
                angle.sin() * config.spawn_radius,
                height,
            ));
        }
    }
    Err(SimError::SamplingExhausted {
        attempts: SPAWN_SAMPLE_ATTEMPTS,
    })
}

impl WaveSpawner {
    pub fn new(index: usize, config: SpawnerConfig) -> Self {
        Self {
            index,
            config,
            state: WaveState::default(),
            landmark: Vec3::ZERO,
        }
    }

    /// Resolve the landmark and schedule the first wave.
    pub fn start(
        &mut self,
        world: &World,
        timers: &mut TimerQueue,
        now_tick: u64,
        events: &mut Vec<SimEvent>,
    ) {
        self.landmark = match find_landmark(world, &self.config.landmark_tag) {
            Some(position) => position,
            None => {
                warn!(
                    "{}: {}, targeting the world origin",
                    self.config.name,
                    SimError::MissingConfiguration(format!(
                        "no landmark named like `{}`",
                        self.config.landmark_tag
                    ))
                );
                Vec3::ZERO
            }
        };
        self.schedule_next(timers, now_tick, events);
    }

    /// Spawn the next wave. Called when the wave timer fires.
    pub fn spawn_wave(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        timers: &mut TimerQueue,
        now_tick: u64,
        events: &mut Vec<SimEvent>,
    ) {
        self.state.timer = None;
        self.state.phase = WavePhase::WaveSpawning;
        self.state.wave += 1;
        self.state.used_angles.clear();

        let requested = wave_unit_count(&self.config, self.state.wave);
        for _ in 0..requested {
            match sample_spawn_point(rng, &mut self.state.used_angles, &self.config) {
                Ok(position) => {
                    let unit = self.spawn_unit(world, rng, position);
                    self.state.live.insert(unit);
                }
                Err(err) => warn!(
                    "{} wave {}: {err}, skipping unit",
                    self.config.name, self.state.wave
                ),
            }
        }

        let spawned = self.state.active_units();
        info!(
            "{} wave {}: spawned {spawned}/{requested} units",
            self.config.name, self.state.wave
        );
        events.push(SimEvent::WaveSpawned {
            spawner: self.config.name.clone(),
            wave: self.state.wave,
            requested,
            spawned,
        });

        if self.state.live.is_empty() {
            warn!(
                "{} wave {} is empty, scheduling the next one",
                self.config.name, self.state.wave
            );
            self.schedule_next(timers, now_tick, events);
        } else {
            self.state.phase = WavePhase::WaveActive;
        }
    }

    /// Account for a destroyed entity. Returns true if it belonged to this
    /// spawner's current wave.
    pub fn on_destroyed(
        &mut self,
        entity: Entity,
        timers: &mut TimerQueue,
        now_tick: u64,
        events: &mut Vec<SimEvent>,
    ) -> bool {
        if !self.state.live.remove(&entity) {
            return false;
        }
        if self.state.live.is_empty() && self.state.phase == WavePhase::WaveActive {
            info!("{} wave {} cleared", self.config.name, self.state.wave);
            events.push(SimEvent::WaveCleared {
                spawner: self.config.name.clone(),
                wave: self.state.wave,
            });
            self.schedule_next(timers, now_tick, events);
        }
        true
    }

    pub fn view(&self, timers: &TimerQueue, now_tick: u64) -> WaveView {
        WaveView {
            spawner: self.config.name.clone(),
            phase: self.state.phase,
            wave: self.state.wave,
            active_units: self.state.active_units(),
            next_wave_in_secs: self
                .state
                .timer
                .and_then(|timer| timers.due_tick(timer))
                .map(|due| due.saturating_sub(now_tick) as f64 / TICK_RATE as f64),
        }
    }

    fn schedule_next(&mut self, timers: &mut TimerQueue, now_tick: u64, events: &mut Vec<SimEvent>) {
        let due = now_tick + secs_to_ticks(self.config.wave_delay_secs as f64);
        self.state.timer = Some(timers.arm(
            due,
            TimerEvent::SpawnWave {
                spawner: self.index,
            },
        ));
        self.state.phase = WavePhase::WaveScheduled;
        events.push(SimEvent::WaveScheduled {
            spawner: self.config.name.clone(),
            next_wave: self.state.wave + 1,
            delay_secs: self.config.wave_delay_secs,
        });
    }

    fn spawn_unit(&self, world: &mut World, rng: &mut ChaCha8Rng, position: Vec3) -> Entity {
        let speed = rng.gen_range(self.config.min_speed..=self.config.max_speed);
        let height = match self.config.unit_kind {
            UnitKind::Air => position.z,
            UnitKind::Ground => self.config.ground_height,
        };
        let goal = MoveGoal {
            target: self.landmark,
            speed,
            stopping_distance: self.config.line_of_fire_distance,
            rotation_speed: self.config.rotation_speed,
            height,
            target_set: true,
        };
        spawn_unit_toward(
            world,
            self.config.unit_kind,
            Vec3::new(position.x, position.y, height),
            self.landmark,
            goal,
            self.config.mesh_yaw_offset,
            self.config.collision_radius,
            self.config.explosion.clone(),
        )
    }
}
