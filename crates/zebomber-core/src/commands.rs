//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Axis
//! commands mirror key press/release edges: a press sets the axis to ±1,
//! a release sets it back to 0.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Match control ---
    /// Populate the world and start the wave spawners.
    StartMatch,
    Pause,
    Resume,

    // --- Flight input edges ---
    /// Nose down (W).
    PitchDown { pressed: bool },
    /// Nose up (S).
    PitchUp { pressed: bool },
    /// Turn left (A).
    TurnLeft { pressed: bool },
    /// Turn right (D).
    TurnRight { pressed: bool },

    // --- Weapons ---
    DropBomb,
    FireRocket,
}
