//! Time- and score-gated entity spawning
//!
//! Obstacles and collectibles spawn probabilistically from the mode's
//! per-second rates; power-ups spawn on a fixed interval so a run is never
//! starved of them. All randomness comes from the state's seeded RNG.

use glam::Vec2;
use rand::Rng;

use super::state::{Entity, EntityKind, GameState, PowerUpKind, Rarity};
use crate::aabb_overlap;
use crate::consts::*;

/// Rarity weights for collectibles: common majority, rare/epic tail.
/// Independent of level.
const RARE_THRESHOLD: f32 = 0.80;
const EPIC_THRESHOLD: f32 = 0.95;

/// Obstacle spawn probability gain per level above 1
const OBSTACLE_RATE_PER_LEVEL: f32 = 0.15;

/// Run the spawner for one tick
pub fn spawn_entities(state: &mut GameState) {
    let level = state.progress.level;

    // Obstacles: per-tick probability from the mode rate, scaled linearly
    // with level
    let obstacle_p = (state.mode.obstacle_rate / TICK_RATE as f32)
        * (1.0 + OBSTACLE_RATE_PER_LEVEL * (level - 1) as f32);
    if state.rng.random::<f32>() < obstacle_p {
        spawn_obstacle(state);
    }

    // Collectibles: flat per-tick probability
    let collectible_p = state.mode.collectible_rate / TICK_RATE as f32;
    if state.rng.random::<f32>() < collectible_p {
        spawn_collectible(state);
    }

    // Power-ups: fixed interval, never probabilistic
    state.spawn.ticks_since_powerup += 1;
    if state.spawn.ticks_since_powerup >= state.mode.powerup_interval_ticks() {
        state.spawn.ticks_since_powerup = 0;
        spawn_powerup(state);
    }
}

fn spawn_obstacle(state: &mut GameState) {
    let level = state.progress.level;
    // Bigger and faster at higher levels
    let side = state.rng.random_range(24.0..40.0) + (level - 1) as f32 * 1.5;
    let size = Vec2::splat(side.min(56.0));
    let speed = (OBSTACLE_BASE_SPEED + OBSTACLE_SPEED_PER_LEVEL * (level - 1) as f32)
        * state.mode.speed_scale;

    if let Some(pos) = trailing_edge_position(state, size) {
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            pos,
            vel: Vec2::new(-speed, 0.0),
            size,
            kind: EntityKind::Obstacle,
        });
    }
}

fn spawn_collectible(state: &mut GameState) {
    let roll = state.rng.random::<f32>();
    let rarity = if roll < RARE_THRESHOLD {
        Rarity::Common
    } else if roll < EPIC_THRESHOLD {
        Rarity::Rare
    } else {
        Rarity::Epic
    };

    let size = Vec2::splat(18.0);
    let speed = COLLECTIBLE_SPEED * state.mode.speed_scale;
    if let Some(pos) = trailing_edge_position(state, size) {
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            pos,
            vel: Vec2::new(-speed, 0.0),
            size,
            kind: EntityKind::Collectible { rarity },
        });
        log::debug!("spawned {:?} collectible at y {:.0}", rarity, pos.y);
    }
}

fn spawn_powerup(state: &mut GameState) {
    let idx = state.rng.random_range(0..PowerUpKind::ALL.len());
    let kind = PowerUpKind::ALL[idx];

    let size = Vec2::splat(22.0);
    let speed = POWERUP_SPEED * state.mode.speed_scale;
    if let Some(pos) = trailing_edge_position(state, size) {
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            pos,
            vel: Vec2::new(-speed, 0.0),
            size,
            kind: EntityKind::PowerUp { kind },
        });
        log::debug!("spawned {:?} power-up at y {:.0}", kind, pos.y);
    }
}

/// Pick a spawn position at the trailing (right) field edge with uniform
/// random y. Positions overlapping the player's bounding box are re-rolled
/// once, then the spawn is skipped for this tick.
fn trailing_edge_position(state: &mut GameState, size: Vec2) -> Option<Vec2> {
    let x = FIELD_WIDTH + size.x / 2.0;
    let half_y = size.y / 2.0;

    for _ in 0..2 {
        let y = state.rng.random_range(half_y..FIELD_HEIGHT - half_y);
        let pos = Vec2::new(x, y);
        if !aabb_overlap(pos, size, state.player.pos, state.player.size()) {
            return Some(pos);
        }
    }
    None
}
