//! Simulation snapshot: the complete visible state after each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{EffectRequest, SimEvent};
use crate::types::{Rotation, SimTime};

/// Everything a renderer needs to draw the current tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: Option<PlayerView>,
    pub units: Vec<UnitView>,
    pub projectiles: Vec<ProjectileView>,
    pub landmarks: Vec<LandmarkView>,
    pub waves: Vec<WaveView>,
    /// Explosion effects requested during this tick.
    pub effects: Vec<EffectRequest>,
    pub events: Vec<SimEvent>,
}

/// The player's bomber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub entity_id: u64,
    pub position: Vec3,
    pub rotation: Rotation,
    pub speed: f32,
    /// Mesh yaw including the cosmetic offset.
    pub render_yaw: f32,
}

/// A ground or air unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitView {
    pub entity_id: u64,
    pub kind: EntityKind,
    pub position: Vec3,
    pub rotation: Rotation,
    pub render_yaw: f32,
    pub speed: f32,
    pub arrived: bool,
}

/// A bomb or rocket in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub entity_id: u64,
    pub kind: EntityKind,
    pub position: Vec3,
    pub velocity: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkView {
    pub name: String,
    pub position: Vec3,
}

/// Status of one wave spawner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveView {
    pub spawner: String,
    pub phase: WavePhase,
    pub wave: u32,
    pub active_units: u32,
    /// Seconds until the scheduled wave spawns, if one is scheduled.
    pub next_wave_in_secs: Option<f64>,
}
