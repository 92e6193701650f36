//! Explosion trigger: turns a qualifying hit into an effect request.

use glam::Vec3;

use zebomber_core::components::ExplosionConfig;
use zebomber_core::events::EffectRequest;

/// Queue an explosion effect for the presentation layer.
pub fn trigger(effects: &mut Vec<EffectRequest>, position: Vec3, normal: Vec3, config: &ExplosionConfig) {
    effects.push(EffectRequest {
        position,
        normal,
        config: config.clone(),
    });
}
