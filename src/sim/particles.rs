//! Cosmetic particle effects
//!
//! Spawned by gameplay events, read only by rendering. Nothing here feeds
//! back into scoring or collision.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Particle, ParticleKind};
use crate::consts::MAX_PARTICLES;

/// Spawn a burst of `count` particles radiating from `pos`. The burst is
/// truncated at the global particle cap.
pub fn burst(state: &mut GameState, pos: Vec2, kind: ParticleKind, count: usize) {
    for _ in 0..count {
        if state.particles.len() >= MAX_PARTICLES {
            return;
        }
        let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
        let speed = state.rng.random_range(40.0..160.0);
        let life = state.rng.random_range(0.3..0.8);
        state.particles.push(Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life,
            max_life: life,
            kind,
        });
    }
}

/// Integrate particle motion and expire dead particles
pub fn update(state: &mut GameState, dt: f32) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.vel *= 0.96; // drag
        particle.life -= dt;
    }
    state.particles.retain(|p| p.life > 0.0);
}
