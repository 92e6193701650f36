//! Static tuning parameters, read once when the engine is built.
//!
//! Every field has a default taken from the shipped level tuning, so a
//! configuration file only needs to list what it changes. Numeric fields
//! can also be overridden one at a time through dotted keys
//! (`flight.pitch_rate`, `spawners.0.units_per_wave`, ...).

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::components::ExplosionConfig;
use crate::constants::*;
use crate::enums::UnitKind;
use crate::error::ConfigError;

/// Complete configuration of a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub flight: FlightConfig,
    /// Area munition. `None` leaves the bomber without bombs.
    pub bomb: Option<BombConfig>,
    /// Direct-fire munition. `None` leaves the bomber without rockets.
    pub rocket: Option<RocketConfig>,
    pub spawners: Vec<SpawnerConfig>,
    /// Ground units placed in the level before the first wave.
    pub ground_units: Vec<GroundUnitPlacement>,
    pub landmarks: Vec<LandmarkPlacement>,
    pub physics: PhysicsConfig,
}

/// Player bomber flight model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    pub min_speed: f32,
    pub max_speed: f32,
    pub default_speed: f32,
    /// Speed gained at full dive / lost at full climb.
    pub speed_change_rate: f32,
    /// Degrees per second at full pitch input.
    pub pitch_rate: f32,
    /// 0 = instant response, 0.99 = very heavy.
    pub pitch_inertia: f32,
    /// Degrees per second at full yaw input.
    pub yaw_rate: f32,
    pub yaw_inertia: f32,
    pub roll_rate: f32,
    pub max_roll_angle: f32,
    pub max_pitch_angle: f32,
    /// Auto-level interpolation rate when pitch input is released.
    pub leveling_speed: f32,
    pub min_altitude: f32,
    pub start_altitude: f32,
    /// Spawn point of the bomber; z is replaced by `start_altitude`.
    pub start_position: Vec3,
    pub start_yaw: f32,
    pub mesh_yaw_offset: f32,
}

/// Area munition tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BombConfig {
    pub cooldown_secs: f32,
    /// Extra speed added on top of the bomber's forward speed.
    pub drop_speed: f32,
    /// Release point in the bomber's local frame.
    pub spawn_offset: Vec3,
    pub lifespan_secs: f32,
    /// Splash radius; 0 limits the bomb to direct hits.
    pub explosion_radius: f32,
    pub collision_radius: f32,
    pub gravity_scale: f32,
}

/// Direct-fire munition tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RocketConfig {
    pub speed: f32,
    pub cooldown_secs: f32,
    pub spawn_offset: Vec3,
    pub lifespan_secs: f32,
    /// Splash radius against air units; 0 limits the rocket to direct hits.
    pub explosion_radius: f32,
    pub collision_radius: f32,
}

/// One wave spawner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub name: String,
    pub unit_kind: UnitKind,
    /// Distance from the world origin of the spawn ring.
    pub spawn_radius: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Units in the first wave.
    pub units_per_wave: u32,
    /// Units added for each later wave.
    pub units_added_per_wave: u32,
    pub wave_delay_secs: f32,
    /// Minimum ground distance between units of one wave, on the ring.
    pub min_spawn_separation: f32,
    pub min_spawn_height: f32,
    pub max_spawn_height: f32,
    /// Height ground units are placed at.
    pub ground_height: f32,
    pub mesh_yaw_offset: f32,
    /// Distance from the landmark where units stop.
    pub line_of_fire_distance: f32,
    pub rotation_speed: f32,
    /// Name fragment of the landmark actor units path toward.
    pub landmark_tag: String,
    pub collision_radius: f32,
    /// Death effect carried by spawned units.
    pub explosion: Option<ExplosionConfig>,
}

/// A pre-placed ground unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundUnitPlacement {
    pub position: Vec3,
    pub yaw: f32,
    pub speed: f32,
    pub stopping_distance: f32,
    pub rotation_speed: f32,
    pub mesh_yaw_offset: f32,
    /// Defaults to the world origin.
    pub target: Option<Vec3>,
    pub collision_radius: f32,
}

/// A named static actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandmarkPlacement {
    pub name: String,
    pub position: Vec3,
}

/// Parameters of the built-in physics stand-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    /// Terrain plane height used for ground contacts.
    pub ground_height: f32,
    /// Raise collision events from sphere overlaps and ground contact.
    /// Disable when the host reports collisions itself.
    pub builtin_contacts: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            flight: FlightConfig::default(),
            bomb: Some(BombConfig::default()),
            rocket: Some(RocketConfig::default()),
            spawners: vec![SpawnerConfig::default()],
            ground_units: Vec::new(),
            landmarks: vec![LandmarkPlacement::default()],
            physics: PhysicsConfig::default(),
        }
    }
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            min_speed: DEFAULT_MIN_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
            default_speed: DEFAULT_CRUISE_SPEED,
            speed_change_rate: DEFAULT_SPEED_CHANGE_RATE,
            pitch_rate: DEFAULT_PITCH_RATE,
            pitch_inertia: DEFAULT_PITCH_INERTIA,
            yaw_rate: DEFAULT_YAW_RATE,
            yaw_inertia: DEFAULT_YAW_INERTIA,
            roll_rate: DEFAULT_ROLL_RATE,
            max_roll_angle: DEFAULT_MAX_ROLL,
            max_pitch_angle: DEFAULT_MAX_PITCH,
            leveling_speed: DEFAULT_LEVELING_SPEED,
            min_altitude: DEFAULT_MIN_ALTITUDE,
            start_altitude: DEFAULT_START_ALTITUDE,
            start_position: Vec3::new(-6000.0, 0.0, 0.0),
            start_yaw: 0.0,
            mesh_yaw_offset: 0.0,
        }
    }
}

impl Default for BombConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: DEFAULT_BOMB_COOLDOWN,
            drop_speed: DEFAULT_BOMB_DROP_SPEED,
            spawn_offset: Vec3::from_array(DEFAULT_BOMB_SPAWN_OFFSET),
            lifespan_secs: DEFAULT_BOMB_LIFESPAN,
            explosion_radius: DEFAULT_BOMB_EXPLOSION_RADIUS,
            collision_radius: DEFAULT_BOMB_RADIUS,
            gravity_scale: 1.0,
        }
    }
}

impl Default for RocketConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_ROCKET_SPEED,
            cooldown_secs: DEFAULT_ROCKET_COOLDOWN,
            spawn_offset: Vec3::from_array(DEFAULT_ROCKET_SPAWN_OFFSET),
            lifespan_secs: DEFAULT_ROCKET_LIFESPAN,
            explosion_radius: DEFAULT_ROCKET_EXPLOSION_RADIUS,
            collision_radius: DEFAULT_ROCKET_RADIUS,
        }
    }
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            name: "helicopters".to_string(),
            unit_kind: UnitKind::Air,
            spawn_radius: DEFAULT_SPAWN_RADIUS,
            min_speed: DEFAULT_MIN_UNIT_SPEED,
            max_speed: DEFAULT_MAX_UNIT_SPEED,
            units_per_wave: DEFAULT_UNITS_PER_WAVE,
            units_added_per_wave: DEFAULT_UNITS_ADDED_PER_WAVE,
            wave_delay_secs: DEFAULT_WAVE_DELAY,
            min_spawn_separation: DEFAULT_MIN_SPAWN_SEPARATION,
            min_spawn_height: DEFAULT_MIN_SPAWN_HEIGHT,
            max_spawn_height: DEFAULT_MAX_SPAWN_HEIGHT,
            ground_height: DEFAULT_GROUND_HEIGHT,
            mesh_yaw_offset: DEFAULT_MESH_YAW_OFFSET,
            line_of_fire_distance: DEFAULT_LINE_OF_FIRE_DISTANCE,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            landmark_tag: DEFAULT_LANDMARK_TAG.to_string(),
            collision_radius: DEFAULT_UNIT_COLLISION_RADIUS,
            explosion: Some(ExplosionConfig::default()),
        }
    }
}

impl Default for GroundUnitPlacement {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            speed: DEFAULT_TANK_SPEED,
            stopping_distance: DEFAULT_STOPPING_DISTANCE,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            mesh_yaw_offset: 0.0,
            target: None,
            collision_radius: DEFAULT_UNIT_COLLISION_RADIUS,
        }
    }
}

impl Default for LandmarkPlacement {
    fn default() -> Self {
        Self {
            name: DEFAULT_LANDMARK_TAG.to_string(),
            position: Vec3::ZERO,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            ground_height: DEFAULT_GROUND_HEIGHT,
            builtin_contacts: true,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    /// Clamp every parameter into its legal range and order min/max pairs.
    pub fn normalized(mut self) -> Self {
        self.flight.normalize();
        if let Some(bomb) = &mut self.bomb {
            bomb.normalize();
        }
        if let Some(rocket) = &mut self.rocket {
            rocket.normalize();
        }
        for spawner in &mut self.spawners {
            spawner.normalize();
        }
        for unit in &mut self.ground_units {
            unit.speed = unit.speed.max(0.0);
            unit.stopping_distance = unit.stopping_distance.max(0.0);
            unit.rotation_speed = unit.rotation_speed.max(0.0);
            unit.collision_radius = unit.collision_radius.max(0.0);
        }
        self
    }

    /// Override a single parameter by dotted key, e.g. `flight.pitch_rate`.
    ///
    /// The result is normalized again, so out-of-range values are clamped
    /// rather than rejected.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let parts: Vec<&str> = key.split('.').collect();
        match parts.as_slice() {
            ["flight", field] => self.flight.set(key, field, value)?,
            ["bomb", "enabled"] => {
                if parse_bool(key, value)? {
                    self.bomb.get_or_insert_with(BombConfig::default);
                } else {
                    self.bomb = None;
                }
            }
            ["bomb", field] => self
                .bomb
                .get_or_insert_with(BombConfig::default)
                .set(key, field, value)?,
            ["rocket", "enabled"] => {
                if parse_bool(key, value)? {
                    self.rocket.get_or_insert_with(RocketConfig::default);
                } else {
                    self.rocket = None;
                }
            }
            ["rocket", field] => self
                .rocket
                .get_or_insert_with(RocketConfig::default)
                .set(key, field, value)?,
            ["physics", field] => self.physics.set(key, field, value)?,
            ["spawners", index, field] => {
                let index: usize = index
                    .parse()
                    .map_err(|_| ConfigError::UnknownKey(key.to_string()))?;
                let spawner = self
                    .spawners
                    .get_mut(index)
                    .ok_or_else(|| ConfigError::NoSuchSpawner(key.to_string()))?;
                spawner.set(key, field, value)?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        *self = std::mem::take(self).normalized();
        Ok(())
    }
}

impl FlightConfig {
    fn normalize(&mut self) {
        self.min_speed = self.min_speed.max(0.0);
        self.max_speed = self.max_speed.max(0.0);
        order(&mut self.min_speed, &mut self.max_speed);
        self.default_speed = self.default_speed.clamp(self.min_speed, self.max_speed);
        self.speed_change_rate = self.speed_change_rate.max(0.0);
        self.pitch_rate = self.pitch_rate.max(0.0);
        self.pitch_inertia = self.pitch_inertia.clamp(0.0, MAX_INERTIA);
        self.yaw_rate = self.yaw_rate.max(0.0);
        self.yaw_inertia = self.yaw_inertia.clamp(0.0, MAX_INERTIA);
        self.roll_rate = self.roll_rate.max(0.0);
        self.max_roll_angle = self.max_roll_angle.max(0.0);
        self.max_pitch_angle = self.max_pitch_angle.clamp(0.0, 89.0);
        self.leveling_speed = self.leveling_speed.max(0.0);
        self.start_altitude = self.start_altitude.max(self.min_altitude);
    }

    fn set(&mut self, key: &str, field: &str, value: &str) -> Result<(), ConfigError> {
        let slot = match field {
            "min_speed" => &mut self.min_speed,
            "max_speed" => &mut self.max_speed,
            "default_speed" => &mut self.default_speed,
            "speed_change_rate" => &mut self.speed_change_rate,
            "pitch_rate" => &mut self.pitch_rate,
            "pitch_inertia" => &mut self.pitch_inertia,
            "yaw_rate" => &mut self.yaw_rate,
            "yaw_inertia" => &mut self.yaw_inertia,
            "roll_rate" => &mut self.roll_rate,
            "max_roll_angle" => &mut self.max_roll_angle,
            "max_pitch_angle" => &mut self.max_pitch_angle,
            "leveling_speed" => &mut self.leveling_speed,
            "min_altitude" => &mut self.min_altitude,
            "start_altitude" => &mut self.start_altitude,
            "start_yaw" => &mut self.start_yaw,
            "mesh_yaw_offset" => &mut self.mesh_yaw_offset,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        *slot = parse_f32(key, value)?;
        Ok(())
    }
}

impl BombConfig {
    fn normalize(&mut self) {
        self.cooldown_secs = self.cooldown_secs.max(0.0);
        self.drop_speed = self.drop_speed.max(0.0);
        self.lifespan_secs = self.lifespan_secs.max(MIN_MUNITION_LIFESPAN);
        self.explosion_radius = self.explosion_radius.max(0.0);
        self.collision_radius = self.collision_radius.max(0.0);
    }

    fn set(&mut self, key: &str, field: &str, value: &str) -> Result<(), ConfigError> {
        let slot = match field {
            "cooldown_secs" => &mut self.cooldown_secs,
            "drop_speed" => &mut self.drop_speed,
            "lifespan_secs" => &mut self.lifespan_secs,
            "explosion_radius" => &mut self.explosion_radius,
            "collision_radius" => &mut self.collision_radius,
            "gravity_scale" => &mut self.gravity_scale,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        *slot = parse_f32(key, value)?;
        Ok(())
    }
}

impl RocketConfig {
    fn normalize(&mut self) {
        self.speed = self.speed.max(0.0);
        self.cooldown_secs = self.cooldown_secs.max(0.0);
        self.lifespan_secs = self.lifespan_secs.max(MIN_MUNITION_LIFESPAN);
        self.explosion_radius = self.explosion_radius.max(0.0);
        self.collision_radius = self.collision_radius.max(0.0);
    }

    fn set(&mut self, key: &str, field: &str, value: &str) -> Result<(), ConfigError> {
        let slot = match field {
            "speed" => &mut self.speed,
            "cooldown_secs" => &mut self.cooldown_secs,
            "lifespan_secs" => &mut self.lifespan_secs,
            "explosion_radius" => &mut self.explosion_radius,
            "collision_radius" => &mut self.collision_radius,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        *slot = parse_f32(key, value)?;
        Ok(())
    }
}

impl SpawnerConfig {
    fn normalize(&mut self) {
        self.spawn_radius = self.spawn_radius.max(MIN_SPAWN_RADIUS);
        self.min_speed = self.min_speed.max(0.0);
        self.max_speed = self.max_speed.max(0.0);
        order(&mut self.min_speed, &mut self.max_speed);
        self.units_per_wave = self.units_per_wave.max(1);
        self.wave_delay_secs = self.wave_delay_secs.max(0.0);
        self.min_spawn_separation = self.min_spawn_separation.max(MIN_SPAWN_SEPARATION_FLOOR);
        self.min_spawn_height = self.min_spawn_height.max(0.0);
        self.max_spawn_height = self.max_spawn_height.max(0.0);
        order(&mut self.min_spawn_height, &mut self.max_spawn_height);
        self.line_of_fire_distance = self.line_of_fire_distance.max(0.0);
        self.rotation_speed = self.rotation_speed.max(0.0);
        self.collision_radius = self.collision_radius.max(0.0);
    }

    fn set(&mut self, key: &str, field: &str, value: &str) -> Result<(), ConfigError> {
        match field {
            "name" => self.name = value.to_string(),
            "landmark_tag" => self.landmark_tag = value.to_string(),
            "unit_kind" => {
                self.unit_kind = match value.to_ascii_lowercase().as_str() {
                    "ground" => UnitKind::Ground,
                    "air" => UnitKind::Air,
                    _ => return Err(invalid(key, value)),
                }
            }
            "units_per_wave" => self.units_per_wave = parse_u32(key, value)?,
            "units_added_per_wave" => self.units_added_per_wave = parse_u32(key, value)?,
            _ => {
                let slot = match field {
                    "spawn_radius" => &mut self.spawn_radius,
                    "min_speed" => &mut self.min_speed,
                    "max_speed" => &mut self.max_speed,
                    "wave_delay_secs" => &mut self.wave_delay_secs,
                    "min_spawn_separation" => &mut self.min_spawn_separation,
                    "min_spawn_height" => &mut self.min_spawn_height,
                    "max_spawn_height" => &mut self.max_spawn_height,
                    "ground_height" => &mut self.ground_height,
                    "mesh_yaw_offset" => &mut self.mesh_yaw_offset,
                    "line_of_fire_distance" => &mut self.line_of_fire_distance,
                    "rotation_speed" => &mut self.rotation_speed,
                    "collision_radius" => &mut self.collision_radius,
                    _ => return Err(ConfigError::UnknownKey(key.to_string())),
                };
                *slot = parse_f32(key, value)?;
            }
        }
        Ok(())
    }
}

impl PhysicsConfig {
    fn set(&mut self, key: &str, field: &str, value: &str) -> Result<(), ConfigError> {
        match field {
            "gravity" => self.gravity = parse_f32(key, value)?,
            "ground_height" => self.ground_height = parse_f32(key, value)?,
            "builtin_contacts" => self.builtin_contacts = parse_bool(key, value)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn order(min: &mut f32, max: &mut f32) {
    if *min > *max {
        std::mem::swap(min, max);
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_f32(key: &str, value: &str) -> Result<f32, ConfigError> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(key, value))
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.trim().parse().map_err(|_| invalid(key, value))
}
