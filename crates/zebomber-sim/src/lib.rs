//! Simulation engine for ZeBomber.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces `SimSnapshot`s for the presentation layer.

pub mod components;
pub mod engine;
pub mod systems;
pub mod timers;
pub mod world_setup;

pub use zebomber_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
