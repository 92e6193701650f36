//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Movement math lives in `zebomber-flight`, world rules in the sim systems.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;

/// Identity and liveness of a simulated entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Actor {
    pub kind: EntityKind,
    /// Cleared by `destroy`; the entity is despawned at the end of the tick.
    pub alive: bool,
}

/// Steering state for a ground or air unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveGoal {
    /// Point the unit steers toward. Only x/y matter.
    pub target: Vec3,
    /// Units per second.
    pub speed: f32,
    /// Horizontal arrival tolerance.
    pub stopping_distance: f32,
    /// Yaw interpolation rate.
    pub rotation_speed: f32,
    /// Cruise height (air) or ground contact height (ground).
    pub height: f32,
    /// False while an air unit idles without orders.
    pub target_set: bool,
}

/// Cosmetic yaw applied to the rendered mesh only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshOffset {
    pub yaw: f32,
}

/// Player aircraft control state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    /// Raw pitch input in [-1, 1]; +1 raises the nose.
    pub pitch_input: f32,
    /// Raw yaw input in [-1, 1]; +1 turns right.
    pub yaw_input: f32,
    pub smoothed_pitch: f32,
    pub smoothed_yaw: f32,
    /// Forward speed, units per second.
    pub speed: f32,
    /// Sim time of the last bomb release.
    pub last_bomb_secs: Option<f64>,
    /// Sim time of the last rocket launch.
    pub last_rocket_secs: Option<f64>,
}

/// Opaque explosion effect description forwarded to the effects host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
    pub particle_system: Option<String>,
    pub niagara_system: Option<String>,
    pub scale: f32,
    pub lifespan_secs: f32,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            particle_system: None,
            niagara_system: None,
            scale: crate::constants::DEFAULT_EXPLOSION_SCALE,
            lifespan_secs: crate::constants::DEFAULT_EXPLOSION_LIFESPAN,
        }
    }
}

/// Linear velocity, units per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec3);

/// Marks a body driven by the ballistics integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ballistic {
    /// Multiplier on world gravity; 0 flies straight.
    pub gravity_scale: f32,
}

/// Sphere used by the built-in contact detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionRadius(pub f32);

/// Named static actor that wave units may path toward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
}

/// Marks the player's bomber.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;
