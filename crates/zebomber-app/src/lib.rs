//! Headless runner for ZeBomber.
//!
//! Drives the simulation engine with a scripted autopilot, either as fast
//! as possible or paced at the tick rate, and summarizes the match.

pub mod autopilot;
pub mod logging;
pub mod runner;

#[cfg(test)]
mod tests;
