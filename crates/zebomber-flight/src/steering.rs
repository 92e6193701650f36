//! Target-seeking movement for ground and air units.
//!
//! Units steer on the ground plane only: they turn toward their target,
//! drive forward at a constant speed, and hold a fixed height. Pitch and
//! roll stay level.

use glam::{Vec2, Vec3};

use zebomber_core::components::MoveGoal;
use zebomber_core::types::{horizontal_distance, Pose, Rotation};

use crate::interp::interp_yaw_to;

/// Horizontal distance under which the direction to the target is undefined.
const MIN_STEER_DISTANCE: f32 = 1.0e-3;

/// Whether a unit at `position` has arrived at its goal.
///
/// Always false while no target is assigned.
pub fn has_reached_target(position: Vec3, goal: &MoveGoal) -> bool {
    goal.target_set && horizontal_distance(position, goal.target) <= goal.stopping_distance
}

/// Yaw in degrees of the horizontal direction from `from` to `to`.
pub fn heading_to(from: Vec3, to: Vec3) -> f32 {
    let d = Vec2::new(to.x - from.x, to.y - from.y);
    if d.length_squared() == 0.0 {
        return 0.0;
    }
    d.y.atan2(d.x).to_degrees()
}

/// Advance a unit one step toward its goal.
///
/// Idle and arrived units do not move. The step never carries the unit past
/// its target, and the returned height is always `goal.height`.
pub fn advance(pose: &Pose, goal: &MoveGoal, dt: f32) -> Pose {
    let mut next = *pose;
    next.position.z = goal.height;

    if !goal.target_set || has_reached_target(pose.position, goal) {
        return next;
    }

    let to_target = Vec2::new(
        goal.target.x - pose.position.x,
        goal.target.y - pose.position.y,
    );
    let distance = to_target.length();
    if distance < MIN_STEER_DISTANCE {
        return next;
    }

    let direction = to_target / distance;
    let step = (goal.speed * dt).clamp(0.0, distance);
    next.position.x += direction.x * step;
    next.position.y += direction.y * step;

    let heading = direction.y.atan2(direction.x).to_degrees();
    let yaw = interp_yaw_to(pose.rotation.yaw, heading, dt, goal.rotation_speed);
    next.rotation = Rotation::from_yaw(yaw);
    next
}
