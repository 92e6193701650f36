//! Fundamental geometric and simulation types.
//!
//! World units follow the level layout: x = forward/East, y = right/North,
//! z = up (altitude). Angles on `Rotation` are in degrees.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Orientation as pitch/yaw/roll in degrees.
///
/// Yaw turns about +Z (0 = +X), pitch raises the nose toward +Z,
/// roll banks about the forward axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

/// World transform of an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Rotation,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Rotation {
    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Yaw-only rotation.
    pub fn from_yaw(yaw: f32) -> Self {
        Self {
            pitch: 0.0,
            yaw,
            roll: 0.0,
        }
    }

    /// Rotation whose forward axis points along `direction`. Roll is zero.
    /// A zero direction yields the identity rotation.
    pub fn from_direction(direction: Vec3) -> Self {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return Self::default();
        }
        let horizontal = Vec2::new(dir.x, dir.y).length();
        Self {
            pitch: dir.z.atan2(horizontal).to_degrees(),
            yaw: dir.y.atan2(dir.x).to_degrees(),
            roll: 0.0,
        }
    }

    /// Unit forward vector.
    pub fn forward(&self) -> Vec3 {
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        Vec3::new(cp * cy, cp * sy, sp)
    }

    /// Unit right vector (includes roll).
    pub fn right(&self) -> Vec3 {
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        let (sr, cr) = self.roll.to_radians().sin_cos();
        Vec3::new(sr * sp * cy - cr * sy, sr * sp * sy + cr * cy, -sr * cp)
    }

    /// Unit up vector (includes roll).
    pub fn up(&self) -> Vec3 {
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        let (sr, cr) = self.roll.to_radians().sin_cos();
        Vec3::new(-(cr * sp * cy + sr * sy), cy * sr - cr * sp * sy, cr * cp)
    }

    /// Rotate a local-space vector (x forward, y right, z up) into world space.
    pub fn transform_vector(&self, local: Vec3) -> Vec3 {
        self.forward() * local.x + self.right() * local.y + self.up() * local.z
    }
}

impl Pose {
    pub fn new(position: Vec3, rotation: Rotation) -> Self {
        Self { position, rotation }
    }

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Rotation::default(),
        }
    }

    /// Horizontal distance to a point (ignoring altitude).
    pub fn horizontal_distance_to(&self, point: Vec3) -> f32 {
        horizontal_distance(self.position, point)
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Distance between two points projected onto the ground plane.
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(b.x - a.x, b.y - a.y).length()
}

/// Wrap an angle in degrees into (-180, 180].
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Convert a duration in seconds to a whole number of ticks, rounding up so
/// a timer never fires early.
pub fn secs_to_ticks(secs: f64) -> u64 {
    if secs <= 0.0 {
        return 0;
    }
    (secs * crate::constants::TICK_RATE as f64).ceil() as u64
}
