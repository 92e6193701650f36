//! Simulation constants and default tuning parameters.
//!
//! Distances are in world units (centimetres), speeds in units per second,
//! angles in degrees unless stated otherwise.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Interpolation ---

/// Squared distance below which interpolation snaps to its target.
pub const INTERP_SNAP_EPSILON: f32 = 1.0e-8;

/// Rate at which the bomber's speed chases its pitch-derived target.
pub const SPEED_INTERP_RATE: f32 = 2.0;

// --- Flight controller ---

/// Smoothed input magnitude below which an axis counts as released.
pub const INPUT_DEADZONE: f32 = 0.01;

/// Pitch magnitude (degrees) below which auto-leveling stops.
pub const LEVEL_PITCH_TOLERANCE: f32 = 0.5;

/// Pitch (degrees) below which hitting the altitude floor forces a level-out.
pub const FLOOR_DIVE_PITCH: f32 = -5.0;

/// Roll interpolation rate multiplier: rate = roll_rate / max_roll * this.
pub const ROLL_INTERP_SCALE: f32 = 5.0;

pub const DEFAULT_MIN_SPEED: f32 = 800.0;
pub const DEFAULT_MAX_SPEED: f32 = 3000.0;
pub const DEFAULT_CRUISE_SPEED: f32 = 1500.0;
pub const DEFAULT_SPEED_CHANGE_RATE: f32 = 400.0;
pub const DEFAULT_PITCH_RATE: f32 = 12.0;
pub const DEFAULT_PITCH_INERTIA: f32 = 0.92;
pub const DEFAULT_YAW_RATE: f32 = 15.0;
pub const DEFAULT_YAW_INERTIA: f32 = 0.90;
pub const DEFAULT_ROLL_RATE: f32 = 20.0;
pub const DEFAULT_MAX_ROLL: f32 = 30.0;
pub const DEFAULT_MAX_PITCH: f32 = 45.0;
pub const DEFAULT_LEVELING_SPEED: f32 = 15.0;
pub const DEFAULT_MIN_ALTITUDE: f32 = 500.0;
pub const DEFAULT_START_ALTITUDE: f32 = 5000.0;

/// Upper bound on inertia; 1.0 would freeze the input forever.
pub const MAX_INERTIA: f32 = 0.99;

// --- Munitions ---

pub const DEFAULT_BOMB_COOLDOWN: f32 = 0.5;
pub const DEFAULT_BOMB_DROP_SPEED: f32 = 0.0;
pub const DEFAULT_BOMB_SPAWN_OFFSET: [f32; 3] = [0.0, 0.0, -100.0];
pub const DEFAULT_BOMB_RADIUS: f32 = 50.0;
pub const DEFAULT_BOMB_LIFESPAN: f32 = 10.0;
pub const DEFAULT_BOMB_EXPLOSION_RADIUS: f32 = 500.0;

pub const DEFAULT_ROCKET_SPEED: f32 = 8000.0;
pub const DEFAULT_ROCKET_COOLDOWN: f32 = 0.25;
pub const DEFAULT_ROCKET_SPAWN_OFFSET: [f32; 3] = [150.0, 0.0, -50.0];
pub const DEFAULT_ROCKET_RADIUS: f32 = 20.0;
pub const DEFAULT_ROCKET_LIFESPAN: f32 = 10.0;
pub const DEFAULT_ROCKET_EXPLOSION_RADIUS: f32 = 200.0;

/// Lower bound on a munition lifespan (seconds).
pub const MIN_MUNITION_LIFESPAN: f32 = 1.0;

// --- Physics stand-in ---

/// Gravity acceleration (units/s²) applied to gravity-enabled bodies.
pub const DEFAULT_GRAVITY: f32 = 980.0;
pub const DEFAULT_GROUND_HEIGHT: f32 = 0.0;
pub const DEFAULT_UNIT_COLLISION_RADIUS: f32 = 150.0;

// --- Steering ---

pub const DEFAULT_STOPPING_DISTANCE: f32 = 100.0;
pub const DEFAULT_ROTATION_SPEED: f32 = 3.0;
pub const DEFAULT_TANK_SPEED: f32 = 200.0;

// --- Wave spawning ---

/// Placement attempts per unit before the sampler gives up.
pub const SPAWN_SAMPLE_ATTEMPTS: u32 = 50;

pub const DEFAULT_SPAWN_RADIUS: f32 = 2000.0;
pub const MIN_SPAWN_RADIUS: f32 = 100.0;
pub const DEFAULT_MIN_UNIT_SPEED: f32 = 200.0;
pub const DEFAULT_MAX_UNIT_SPEED: f32 = 500.0;
pub const DEFAULT_UNITS_PER_WAVE: u32 = 3;
pub const DEFAULT_UNITS_ADDED_PER_WAVE: u32 = 1;
pub const DEFAULT_WAVE_DELAY: f32 = 5.0;
pub const DEFAULT_MIN_SPAWN_SEPARATION: f32 = 100.0;
pub const MIN_SPAWN_SEPARATION_FLOOR: f32 = 10.0;
pub const DEFAULT_MIN_SPAWN_HEIGHT: f32 = 400.0;
pub const DEFAULT_MAX_SPAWN_HEIGHT: f32 = 800.0;
pub const DEFAULT_MESH_YAW_OFFSET: f32 = 90.0;
pub const DEFAULT_LINE_OF_FIRE_DISTANCE: f32 = 500.0;

/// Name fragment identifying the defended base among world actors.
pub const DEFAULT_LANDMARK_TAG: &str = "old_wooden_church";

// --- Explosion effects ---

pub const DEFAULT_EXPLOSION_SCALE: f32 = 1.0;
pub const DEFAULT_EXPLOSION_LIFESPAN: f32 = 5.0;
