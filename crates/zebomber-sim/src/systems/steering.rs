//! Steering system: advances every live ground and air unit toward its goal.

use hecs::World;

use zebomber_core::components::{Actor, MoveGoal};
use zebomber_core::types::Pose;
use zebomber_flight::steering::advance;

pub fn run(world: &mut World, dt: f32) {
    for (_entity, (actor, pose, goal)) in world.query_mut::<(&Actor, &mut Pose, &MoveGoal)>() {
        if actor.alive {
            *pose = advance(pose, goal, dt);
        }
    }
}
