//! Scripted pilot used by the headless runner.
//!
//! Each tick it picks the nearest enemy unit, turns and pitches toward it
//! with press/release edges like a keyboard player would, and fires when
//! lined up: rockets at helicopters, bombs over tanks.

use zebomber_core::commands::PlayerCommand;
use zebomber_core::constants::DEFAULT_GRAVITY;
use zebomber_core::enums::EntityKind;
use zebomber_core::state::{PlayerView, SimSnapshot, UnitView};
use zebomber_core::types::{horizontal_distance, normalize_degrees, Rotation};

/// Heading error (degrees) inside which the pilot stops turning.
const TURN_TOLERANCE: f32 = 4.0;
/// Pitch error (degrees) inside which the pilot stops pitching.
const PITCH_TOLERANCE: f32 = 2.0;
/// Aim error (degrees) inside which a rocket is fired.
const ROCKET_AIM_TOLERANCE: f32 = 3.0;
/// Horizontal miss (units) accepted when releasing a bomb.
const BOMB_RELEASE_WINDOW: f32 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Held {
    Negative,
    Neutral,
    Positive,
}

#[derive(Debug)]
pub struct Autopilot {
    turn: Held,
    pitch: Held,
    gravity: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY)
    }
}

impl Autopilot {
    pub fn new(gravity: f32) -> Self {
        Self {
            turn: Held::Neutral,
            pitch: Held::Neutral,
            gravity,
        }
    }

    /// Commands to queue before the next tick.
    pub fn commands(&mut self, snapshot: &SimSnapshot) -> Vec<PlayerCommand> {
        let mut commands = Vec::new();
        let Some(player) = &snapshot.player else {
            return commands;
        };
        let Some(target) = nearest_unit(player, &snapshot.units) else {
            self.set_turn(Held::Neutral, &mut commands);
            self.set_pitch(Held::Neutral, &mut commands);
            return commands;
        };

        let aim = Rotation::from_direction(target.position - player.position);
        let yaw_error = normalize_degrees(aim.yaw - player.rotation.yaw);
        self.set_turn(hold_for(yaw_error, TURN_TOLERANCE), &mut commands);

        match target.kind {
            EntityKind::AirUnit => {
                let pitch_error = aim.pitch - player.rotation.pitch;
                self.set_pitch(hold_for(pitch_error, PITCH_TOLERANCE), &mut commands);
                if yaw_error.abs() < ROCKET_AIM_TOLERANCE && pitch_error.abs() < ROCKET_AIM_TOLERANCE {
                    commands.push(PlayerCommand::FireRocket);
                }
            }
            _ => {
                self.set_pitch(hold_for(-player.rotation.pitch, PITCH_TOLERANCE), &mut commands);
                let distance = horizontal_distance(player.position, target.position);
                if yaw_error.abs() < TURN_TOLERANCE
                    && (distance - self.bomb_throw(player)).abs() < BOMB_RELEASE_WINDOW
                {
                    commands.push(PlayerCommand::DropBomb);
                }
            }
        }
        commands
    }

    /// Horizontal distance a bomb released now travels before impact.
    fn bomb_throw(&self, player: &PlayerView) -> f32 {
        if self.gravity <= 0.0 {
            return f32::INFINITY;
        }
        let fall_secs = (2.0 * player.position.z.max(0.0) / self.gravity).sqrt();
        player.speed * fall_secs
    }

    fn set_turn(&mut self, want: Held, commands: &mut Vec<PlayerCommand>) {
        if want == self.turn {
            return;
        }
        match self.turn {
            Held::Negative => commands.push(PlayerCommand::TurnLeft { pressed: false }),
            Held::Positive => commands.push(PlayerCommand::TurnRight { pressed: false }),
            Held::Neutral => {}
        }
        match want {
            Held::Negative => commands.push(PlayerCommand::TurnLeft { pressed: true }),
            Held::Positive => commands.push(PlayerCommand::TurnRight { pressed: true }),
            Held::Neutral => {}
        }
        self.turn = want;
    }

    fn set_pitch(&mut self, want: Held, commands: &mut Vec<PlayerCommand>) {
        if want == self.pitch {
            return;
        }
        match self.pitch {
            Held::Negative => commands.push(PlayerCommand::PitchDown { pressed: false }),
            Held::Positive => commands.push(PlayerCommand::PitchUp { pressed: false }),
            Held::Neutral => {}
        }
        match want {
            Held::Negative => commands.push(PlayerCommand::PitchDown { pressed: true }),
            Held::Positive => commands.push(PlayerCommand::PitchUp { pressed: true }),
            Held::Neutral => {}
        }
        self.pitch = want;
    }
}

fn hold_for(error: f32, tolerance: f32) -> Held {
    if error > tolerance {
        Held::Positive
    } else if error < -tolerance {
        Held::Negative
    } else {
        Held::Neutral
    }
}

fn nearest_unit<'a>(player: &PlayerView, units: &'a [UnitView]) -> Option<&'a UnitView> {
    let distance = |unit: &UnitView| player.position.distance_squared(unit.position);
    units
        .iter()
        .min_by(|a, b| distance(a).total_cmp(&distance(b)))
}
