//! Components that hold hecs handles and therefore cannot live in core.

use hecs::Entity;

use zebomber_core::enums::MunitionKind;

use crate::timers::TimerId;

/// A bomb or rocket released by the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Munition {
    pub kind: MunitionKind,
    /// Launcher; contacts with it are ignored.
    pub owner: Option<Entity>,
    /// Splash radius around the impact point. 0 = direct hits only.
    pub explosion_radius: f32,
    /// Self-destruct timer, cancelled when the munition is destroyed first.
    pub lifespan: Option<TimerId>,
}
