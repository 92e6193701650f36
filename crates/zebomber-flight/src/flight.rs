//! Player bomber flight controller.
//!
//! Raw pitch/yaw axes are smoothed with per-axis inertia, then integrated
//! into attitude. Speed follows pitch (diving speeds up, climbing slows
//! down) and the aircraft never sinks below its minimum altitude.

use glam::Vec3;

use zebomber_core::components::FlightState;
use zebomber_core::config::{BombConfig, FlightConfig, RocketConfig};
use zebomber_core::constants::*;
use zebomber_core::types::{normalize_degrees, Pose, Rotation};

use crate::interp::{interp_to, lerp};

/// Slack on cooldown checks so accumulated tick time does not delay a shot
/// by a whole tick.
const COOLDOWN_EPSILON: f64 = 1.0e-9;

/// Initial state of a freshly spawned bomber: level, no input, cruise speed.
pub fn initial_state(config: &FlightConfig) -> FlightState {
    FlightState {
        speed: config.default_speed,
        ..FlightState::default()
    }
}

/// Advance the bomber by `dt` seconds.
pub fn step(
    pose: &Pose,
    state: &FlightState,
    config: &FlightConfig,
    dt: f32,
) -> (Pose, FlightState) {
    let mut state = *state;
    let mut rotation = pose.rotation;

    state.smoothed_pitch = lerp(
        state.smoothed_pitch,
        state.pitch_input,
        1.0 - config.pitch_inertia,
    );
    state.smoothed_yaw = lerp(state.smoothed_yaw, state.yaw_input, 1.0 - config.yaw_inertia);

    // Pitch: integrate while held, auto-level once released
    if state.smoothed_pitch.abs() > INPUT_DEADZONE {
        rotation.pitch = (rotation.pitch + state.smoothed_pitch * config.pitch_rate * dt)
            .clamp(-config.max_pitch_angle, config.max_pitch_angle);
    } else if rotation.pitch.abs() > LEVEL_PITCH_TOLERANCE {
        rotation.pitch = interp_to(rotation.pitch, 0.0, dt, config.leveling_speed);
    }

    if state.smoothed_yaw.abs() > INPUT_DEADZONE {
        rotation.yaw = normalize_degrees(rotation.yaw + state.smoothed_yaw * config.yaw_rate * dt);
    }

    // Bank follows the raw yaw input, not the smoothed one
    let roll_rate = if config.max_roll_angle > 0.0 {
        config.roll_rate / config.max_roll_angle * ROLL_INTERP_SCALE
    } else {
        0.0
    };
    rotation.roll = interp_to(
        rotation.roll,
        state.yaw_input * config.max_roll_angle,
        dt,
        roll_rate,
    );

    state.speed = interp_to(state.speed, target_speed(rotation.pitch, config), dt, SPEED_INTERP_RATE)
        .clamp(config.min_speed, config.max_speed);

    let mut position = pose.position + rotation.forward() * state.speed * dt;

    // Altitude floor
    if position.z < config.min_altitude {
        position.z = config.min_altitude;
        if rotation.pitch < FLOOR_DIVE_PITCH {
            rotation.pitch = interp_to(rotation.pitch, 0.0, dt, config.leveling_speed * 2.0);
        }
    }

    (Pose::new(position, rotation), state)
}

/// Speed the bomber settles at for a given pitch.
pub fn target_speed(pitch: f32, config: &FlightConfig) -> f32 {
    let pitch_factor = if config.max_pitch_angle > 0.0 {
        -pitch / config.max_pitch_angle
    } else {
        0.0
    };
    (config.default_speed + pitch_factor * config.speed_change_rate)
        .clamp(config.min_speed, config.max_speed)
}

/// Whether a weapon last fired at `last_secs` is ready again at `now_secs`.
pub fn can_fire(last_secs: Option<f64>, now_secs: f64, cooldown_secs: f32) -> bool {
    match last_secs {
        None => true,
        Some(last) => now_secs - last + COOLDOWN_EPSILON >= cooldown_secs as f64,
    }
}

/// Initial transform and velocity of a released munition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub position: Vec3,
    pub rotation: Rotation,
    pub velocity: Vec3,
}

/// Bomb release: inherits the bomber's attitude and forward speed.
pub fn bomb_release(pose: &Pose, speed: f32, config: &BombConfig) -> Launch {
    Launch {
        position: pose.position + pose.rotation.transform_vector(config.spawn_offset),
        rotation: pose.rotation,
        velocity: pose.rotation.forward() * (speed + config.drop_speed),
    }
}

/// Rocket launch: flies straight along the bomber's nose at a fixed speed.
pub fn rocket_launch(pose: &Pose, config: &RocketConfig) -> Launch {
    let forward = pose.rotation.forward();
    Launch {
        position: pose.position + pose.rotation.transform_vector(config.spawn_offset),
        rotation: Rotation::from_direction(forward),
        velocity: forward * config.speed,
    }
}
