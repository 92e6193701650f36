//! Match loop: feeds autopilot commands into the engine tick by tick and
//! tallies what happened.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use log::{debug, info};
use serde::Serialize;

use zebomber_core::commands::PlayerCommand;
use zebomber_core::constants::TICK_RATE;
use zebomber_core::enums::{EntityKind, GamePhase, MunitionKind};
use zebomber_core::events::SimEvent;
use zebomber_core::state::SimSnapshot;
use zebomber_sim::engine::SimulationEngine;

use crate::autopilot::Autopilot;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub ticks: u64,
    /// Sleep between ticks to run at wall-clock speed.
    pub realtime: bool,
    /// Let the autopilot fly; otherwise the bomber flies straight.
    pub autopilot: bool,
}

/// Totals over a whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchSummary {
    pub ticks: u64,
    pub elapsed_secs: f64,
    pub ground_units_destroyed: u32,
    pub air_units_destroyed: u32,
    pub bombs_released: u32,
    pub rockets_released: u32,
    pub effects_requested: u32,
    /// Highest wave spawned, per spawner.
    pub waves: BTreeMap<String, u32>,
}

impl MatchSummary {
    /// Fold one tick's snapshot into the totals.
    pub fn record(&mut self, snapshot: &SimSnapshot) {
        self.ticks = snapshot.time.tick;
        self.elapsed_secs = snapshot.time.elapsed_secs;
        self.effects_requested += snapshot.effects.len() as u32;

        for event in &snapshot.events {
            match event {
                SimEvent::Destroyed { kind, .. } => match kind {
                    EntityKind::GroundUnit => self.ground_units_destroyed += 1,
                    EntityKind::AirUnit => self.air_units_destroyed += 1,
                    _ => {}
                },
                SimEvent::MunitionReleased { kind, .. } => match kind {
                    MunitionKind::Bomb => self.bombs_released += 1,
                    MunitionKind::Rocket => self.rockets_released += 1,
                },
                SimEvent::WaveSpawned { spawner, wave, .. } => {
                    let highest = self.waves.entry(spawner.clone()).or_default();
                    *highest = (*highest).max(*wave);
                }
                SimEvent::WaveScheduled { .. } | SimEvent::WaveCleared { .. } => {}
            }
        }
    }
}

/// Start a match and run it for `options.ticks` ticks.
/// Returns the totals and the final snapshot.
pub fn run(engine: &mut SimulationEngine, options: RunOptions) -> (MatchSummary, SimSnapshot) {
    let mut autopilot = Autopilot::new(engine.config().physics.gravity);
    let mut summary = MatchSummary::default();

    engine.queue_command(PlayerCommand::StartMatch);
    let mut snapshot = engine.tick();
    summary.record(&snapshot);

    let mut next_tick_time = Instant::now() + TICK_DURATION;
    while snapshot.phase == GamePhase::Active && snapshot.time.tick < options.ticks {
        if options.autopilot {
            engine.queue_commands(autopilot.commands(&snapshot));
        }
        snapshot = engine.tick();
        summary.record(&snapshot);

        if snapshot.time.tick % TICK_RATE as u64 == 0 {
            debug!(
                "t={:.0}s units={} projectiles={}",
                snapshot.time.elapsed_secs,
                snapshot.units.len(),
                snapshot.projectiles.len()
            );
        }

        if options.realtime {
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            }
            next_tick_time += TICK_DURATION;
        }
    }

    info!(
        "match over after {:.1}s: {} air and {} ground units destroyed",
        summary.elapsed_secs, summary.air_units_destroyed, summary.ground_units_destroyed
    );
    (summary, snapshot)
}
