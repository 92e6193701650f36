//! Headless combat simulation for ZeBomber.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `SimSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::{Entity, World};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use zebomber_core::commands::PlayerCommand;
use zebomber_core::config::{GameConfig, GroundUnitPlacement};
use zebomber_core::constants::DT;
use zebomber_core::enums::{EntityKind, GamePhase, InputAxis};
use zebomber_core::error::SimError;
use zebomber_core::events::{EffectRequest, SimEvent};
use zebomber_core::state::SimSnapshot;
use zebomber_core::types::{Pose, SimTime};

use crate::systems;
use crate::systems::contact::Collision;
use crate::systems::wave_spawner::WaveSpawner;
use crate::timers::{TimerEvent, TimerQueue};
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    config: GameConfig,
    player: Option<Entity>,
    command_queue: VecDeque<PlayerCommand>,
    timers: TimerQueue,
    spawners: Vec<WaveSpawner>,
    collisions: Vec<Collision>,
    destroyed: Vec<Entity>,
    effects: Vec<EffectRequest>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let game = config.game.normalized();
        let spawners = game
            .spawners
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, spawner)| WaveSpawner::new(index, spawner))
            .collect();
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config: game,
            player: None,
            command_queue: VecDeque::new(),
            timers: TimerQueue::new(),
            spawners,
            collisions: Vec::new(),
            destroyed: Vec::new(),
            effects: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.spawners,
            &self.timers,
            std::mem::take(&mut self.effects),
            std::mem::take(&mut self.events),
        )
    }

    /// Report a contact from an external physics host. `b = None` is the
    /// terrain. Resolved during the next tick.
    pub fn report_collision(&mut self, a: Entity, b: Option<Entity>, point: Vec3, normal: Vec3) {
        self.collisions.push(Collision { a, b, point, normal });
    }

    /// Mark an entity destroyed. It is despawned, and reported, at the end
    /// of the next tick. Destroying it again is a `StaleHandle` no-op.
    pub fn destroy(&mut self, entity: Entity) -> Result<(), SimError> {
        let result = systems::cleanup::mark_destroyed(&mut self.world, entity);
        if let Err(err) = &result {
            debug!("destroy ignored: {err}");
        }
        result
    }

    /// Place an extra ground unit in the level.
    pub fn spawn_ground_unit(&mut self, placement: &GroundUnitPlacement) -> Entity {
        world_setup::spawn_ground_unit(&mut self.world, placement)
    }

    /// Live entities of a kind with their poses.
    pub fn enumerate(&self, kind: EntityKind) -> Vec<(Entity, Pose)> {
        world_setup::enumerate(&self.world, kind)
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// The normalized configuration the engine runs with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The player's bomber, once the match has started.
    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn spawners(&self) -> &[WaveSpawner] {
        &self.spawners
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartMatch => {
                if self.phase == GamePhase::Setup {
                    self.start_match();
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::PitchDown { pressed } => self.set_axis(InputAxis::Pitch, -1.0, pressed),
            PlayerCommand::PitchUp { pressed } => self.set_axis(InputAxis::Pitch, 1.0, pressed),
            PlayerCommand::TurnLeft { pressed } => self.set_axis(InputAxis::Yaw, -1.0, pressed),
            PlayerCommand::TurnRight { pressed } => self.set_axis(InputAxis::Yaw, 1.0, pressed),
            PlayerCommand::DropBomb => {
                if self.phase == GamePhase::Active {
                    let result = systems::flight::drop_bomb(
                        &mut self.world,
                        self.config.bomb.as_ref(),
                        &mut self.timers,
                        &self.time,
                        &mut self.events,
                    );
                    if let Err(err) = result {
                        warn!("drop bomb: {err}");
                    }
                }
            }
            PlayerCommand::FireRocket => {
                if self.phase == GamePhase::Active {
                    let result = systems::flight::fire_rocket(
                        &mut self.world,
                        self.config.rocket.as_ref(),
                        &mut self.timers,
                        &self.time,
                        &mut self.events,
                    );
                    if let Err(err) = result {
                        warn!("fire rocket: {err}");
                    }
                }
            }
        }
    }

    fn set_axis(&mut self, axis: InputAxis, value: f32, pressed: bool) {
        let value = if pressed { value } else { 0.0 };
        systems::flight::set_axis(&mut self.world, axis, value);
    }

    fn start_match(&mut self) {
        self.player = Some(world_setup::setup_match(&mut self.world, &self.config));
        for spawner in &mut self.spawners {
            spawner.start(&self.world, &mut self.timers, self.time.tick, &mut self.events);
        }
        info!("match started with {} spawner(s)", self.spawners.len());
        self.phase = GamePhase::Active;
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now = self.time.tick;

        // 1. Due timers (wave spawns, munition lifespans)
        for event in self.timers.drain_due(now) {
            match event {
                TimerEvent::SpawnWave { spawner } => match self.spawners.get_mut(spawner) {
                    Some(spawner) => spawner.spawn_wave(
                        &mut self.world,
                        &mut self.rng,
                        &mut self.timers,
                        now,
                        &mut self.events,
                    ),
                    None => warn!("wave timer for unknown spawner {spawner}"),
                },
                TimerEvent::Expire(entity) => {
                    if let Err(err) = systems::cleanup::mark_destroyed(&mut self.world, entity) {
                        debug!("lifespan expiry ignored: {err}");
                    }
                }
            }
        }
        // 2. Player flight
        systems::flight::run(&mut self.world, &self.config.flight, DT);
        // 3. Unit steering
        systems::steering::run(&mut self.world, DT);
        // 4. Munition ballistics
        systems::ballistics::run(&mut self.world, self.config.physics.gravity, DT);
        // 5. Built-in contact detection
        if self.config.physics.builtin_contacts {
            systems::contact::run(
                &self.world,
                self.config.physics.ground_height,
                DT,
                &mut self.collisions,
            );
        }
        // 6. Projectile resolution
        systems::projectile::run(&mut self.world, &mut self.collisions, &mut self.effects);
        // 7. Cleanup
        systems::cleanup::run(
            &mut self.world,
            &mut self.timers,
            &mut self.destroyed,
            &mut self.events,
        );
        // 8. Wave accounting
        for entity in self.destroyed.drain(..) {
            for spawner in &mut self.spawners {
                if spawner.on_destroyed(entity, &mut self.timers, now, &mut self.events) {
                    break;
                }
            }
        }
    }
}
