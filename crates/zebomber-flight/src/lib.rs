//! Movement models for ZeBomber.
//!
//! Steering for ground and air units, the player bomber's flight
//! controller, and the interpolation helpers both build on.
//! No ECS dependency: every function operates on plain data.

pub mod flight;
pub mod interp;
pub mod steering;

pub use zebomber_core as core;
