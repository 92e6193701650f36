//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Kind tag carried by every simulated entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Tank-like unit that crawls along the ground.
    GroundUnit,
    /// Helicopter-like unit flying level at a fixed height.
    AirUnit,
    /// Free-falling bomb with splash damage.
    AreaProjectile,
    /// Straight-flying rocket.
    DirectProjectile,
    /// The player's bomber.
    Aircraft,
    /// Static defended landmark (the base).
    Landmark,
}

impl EntityKind {
    /// Whether munitions may destroy entities of this kind.
    pub fn is_destructible_unit(self) -> bool {
        matches!(self, EntityKind::GroundUnit | EntityKind::AirUnit)
    }

    pub fn is_projectile(self) -> bool {
        matches!(self, EntityKind::AreaProjectile | EntityKind::DirectProjectile)
    }
}

/// Enemy unit kinds a wave spawner can produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitKind {
    Ground,
    #[default]
    Air,
}

impl UnitKind {
    pub fn entity_kind(self) -> EntityKind {
        match self {
            UnitKind::Ground => EntityKind::GroundUnit,
            UnitKind::Air => EntityKind::AirUnit,
        }
    }
}

/// Munition kinds the player can release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MunitionKind {
    /// Area munition: gravity-driven, splashes ground and air units.
    Bomb,
    /// Direct-fire munition: velocity-driven, lethal only to air units.
    Rocket,
}

impl MunitionKind {
    pub fn entity_kind(self) -> EntityKind {
        match self {
            MunitionKind::Bomb => EntityKind::AreaProjectile,
            MunitionKind::Rocket => EntityKind::DirectProjectile,
        }
    }
}

/// Overall match phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Engine constructed, match not started.
    #[default]
    Setup,
    Active,
    Paused,
}

/// Lifecycle of a single wave spawner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Not started yet.
    #[default]
    Idle,
    /// Timer armed for the next wave.
    WaveScheduled,
    /// Placing and spawning the wave's units (transient, within one tick).
    WaveSpawning,
    /// Wave units alive; waiting for the population to reach zero.
    WaveActive,
}

/// Player input axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputAxis {
    Pitch,
    Yaw,
}
