//! Ballistics: integrates munition flight.
//!
//! Semi-implicit Euler. Gravity pulls along -Z scaled per body, and the
//! body's nose follows its velocity.

use hecs::World;

use zebomber_core::components::{Actor, Ballistic, Velocity};
use zebomber_core::types::{Pose, Rotation};

pub fn run(world: &mut World, gravity: f32, dt: f32) {
    for (_entity, (actor, pose, velocity, ballistic)) in
        world.query_mut::<(&Actor, &mut Pose, &mut Velocity, &Ballistic)>()
    {
        if !actor.alive {
            continue;
        }
        velocity.0.z -= gravity * ballistic.gravity_scale * dt;
        pose.position += velocity.0 * dt;
        if velocity.0.length_squared() > 0.0 {
            pose.rotation = Rotation::from_direction(velocity.0);
        }
    }
}
