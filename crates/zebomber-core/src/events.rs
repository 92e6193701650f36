//! Events emitted by the simulation for the presentation layer.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::components::ExplosionConfig;
use crate::enums::{EntityKind, MunitionKind};

/// Request for the effects host to play an explosion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectRequest {
    pub position: Vec3,
    /// Surface normal at the impact point.
    pub normal: Vec3,
    pub config: ExplosionConfig,
}

/// Gameplay notifications, collected per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// The next wave's timer was armed.
    WaveScheduled {
        spawner: String,
        next_wave: u32,
        delay_secs: f32,
    },
    /// A wave was placed in the world.
    WaveSpawned {
        spawner: String,
        wave: u32,
        requested: u32,
        spawned: u32,
    },
    /// Every unit of a wave has been destroyed.
    WaveCleared { spawner: String, wave: u32 },
    /// An entity left the world.
    Destroyed { entity_id: u64, kind: EntityKind },
    /// The player released a munition.
    MunitionReleased {
        kind: MunitionKind,
        entity_id: u64,
        position: Vec3,
    },
}
