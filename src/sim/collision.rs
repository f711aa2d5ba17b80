//! Collision detection and resolution
//!
//! Each tick, after movement, the player's bounding box is tested against
//! every active entity with an axis-aligned overlap check. Entities are
//! processed in creation order, so simultaneous overlaps resolve
//! first-created-first-tested; a life-ending hit stops processing for the
//! rest of the tick.

use super::particles;
use super::state::{EntityKind, GameState, ParticleKind, PowerUpKind, Rarity};
use crate::aabb_overlap;
use crate::consts::*;

/// Particle burst sizes, scaled to event importance
fn pickup_burst_size(rarity: Rarity) -> usize {
    match rarity {
        Rarity::Common => 6,
        Rarity::Rare => 12,
        Rarity::Epic => 20,
    }
}

const POWERUP_BURST_SIZE: usize = 14;
const DAMAGE_BURST_SIZE: usize = 24;

/// Test the player against all active entities and apply damage, reward,
/// and power-up activation effects. Consumed entities are removed.
pub fn resolve(state: &mut GameState) {
    let player_size = state.player.size();
    let mut consumed: Vec<u32> = Vec::new();

    for i in 0..state.entities.len() {
        let entity = state.entities[i];
        if !aabb_overlap(state.player.pos, player_size, entity.pos, entity.size) {
            continue;
        }

        match entity.kind {
            EntityKind::Obstacle => {
                consumed.push(entity.id);
                if resolve_obstacle_hit(state) {
                    // Last life gone: no further entities this tick
                    break;
                }
            }
            EntityKind::Collectible { rarity } => {
                consumed.push(entity.id);
                resolve_pickup(state, rarity);
                particles::burst(
                    state,
                    entity.pos,
                    ParticleKind::Sparkle,
                    pickup_burst_size(rarity),
                );
            }
            EntityKind::PowerUp { kind } => {
                consumed.push(entity.id);
                let multiplier =
                    (kind == PowerUpKind::Multiplier).then_some(super::powerup::MULTIPLIER_VALUE);
                state
                    .powerups
                    .activate(kind, kind.pickup_duration_ticks(), multiplier);
                particles::burst(state, entity.pos, ParticleKind::PowerUpGlow, POWERUP_BURST_SIZE);
            }
        }
    }

    state.entities.retain(|e| !consumed.contains(&e.id));
}

/// Apply an obstacle collision. Returns true when it ended the session.
fn resolve_obstacle_hit(state: &mut GameState) -> bool {
    let protected = state.player.is_invulnerable()
        || state.powerups.is_active(PowerUpKind::Invincibility);

    if protected {
        // Obstacle destroyed harmlessly; nothing consumed
        return false;
    }

    if state.powerups.is_active(PowerUpKind::Shield) {
        // A shield absorbs exactly one hit, then deactivates. A second
        // overlap in the same tick hits an already-consumed shield.
        state.powerups.consume_shield();
        log::debug!("shield absorbed a hit");
        return false;
    }

    state.progress.drain_energy(HIT_ENERGY_COST);
    state.progress.combo = 0;
    state.progress.combo_timer_ticks = 0;
    state.player.invuln_ticks = INVULN_TICKS;
    let pos = state.player.pos;
    particles::burst(state, pos, ParticleKind::Damage, DAMAGE_BURST_SIZE);

    if state.progress.lose_life() {
        state.end_session();
        return true;
    }
    log::debug!("hit: {} lives left", state.progress.lives);
    false
}

/// Award a collectible: combo-boosted points through the active
/// multiplier, combo/streak bookkeeping, and energy restoration.
fn resolve_pickup(state: &mut GameState, rarity: Rarity) {
    let combo = state.progress.combo as u64;
    let points =
        (rarity.base_points() + combo * rarity.combo_bonus()) * state.powerups.score_multiplier();

    let events = &mut state.events;
    state.progress.add_score(points, events);
    state.progress.combo += 1;
    state.progress.streak += 1;
    state.progress.combo_timer_ticks = rarity.combo_window_ticks();
    state.progress.restore_energy(rarity.energy_restore());
}
