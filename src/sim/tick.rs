//! Fixed timestep simulation tick
//!
//! The per-tick orchestrator. Advances exactly one discrete step per call,
//! in a fixed order: cosmetic offsets, player input and movement, spawning,
//! entity movement, collision resolution, timers, particles, progression
//! checks. All effects are synchronous; the caller takes a snapshot
//! strictly after the tick returns.

use glam::Vec2;

use super::collision;
use super::particles;
use super::powerup::Ability;
use super::spawn;
use super::state::{EntityKind, GamePhase, GameState, PowerUpKind};
use crate::consts::*;

/// Input intent for a single tick, produced by the input collaborator
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal movement axis (-1.0 .. 1.0)
    pub move_x: f32,
    /// Vertical movement axis (-1.0 .. 1.0)
    pub move_y: f32,
    /// Trigger the dash ability
    pub dash: bool,
    /// Trigger the time-freeze ability
    pub time_freeze: bool,
    /// Trigger the mega-collect ability
    pub mega_collect: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start a session from `Idle`
    pub start: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::Idle => {
            if input.start {
                state.start_session();
            }
            return;
        }
        GamePhase::Ended => return,
        GamePhase::Running | GamePhase::Paused => {}
    }

    // Pause toggle; while paused nothing advances and positions are kept
    if input.pause {
        state.phase = match state.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            other => other,
        };
        if state.phase == GamePhase::Paused {
            return;
        }
    } else if state.phase == GamePhase::Paused {
        return;
    }

    state.time_ticks += 1;

    // Cosmetic background scroll
    state.bg_offset += OBSTACLE_BASE_SPEED * state.mode.speed_scale * dt;

    // Player input -> velocity -> position, clamped to the field
    apply_player_input(state, input, dt);

    // Ability triggers; on-cooldown triggers are silent no-ops
    apply_abilities(state, input);

    // Insert new entities at the trailing edge
    spawn::spawn_entities(state);

    // Advance entities and drop the ones that left the field
    move_entities(state, dt);
    state.entities.retain(|e| !e.off_screen());

    // Resolve player-vs-entity overlaps (may end the session)
    collision::resolve(state);
    if state.phase == GamePhase::Ended {
        return;
    }

    // Countdown timers
    state.powerups.tick();
    state.abilities.tick();
    state.player.invuln_ticks = state.player.invuln_ticks.saturating_sub(1);
    state.progress.tick_combo();

    // Cosmetic particles
    particles::update(state, dt);

    // Milestone checks (level events are emitted by score changes)
    let events = &mut state.events;
    state.progress.check_achievements(events);

    // Mode-specific time limit
    if let Some(limit) = state.mode.time_limit_ticks {
        if state.phase == GamePhase::Running && state.time_ticks >= limit {
            log::info!("time limit reached at tick {}", state.time_ticks);
            state.end_session();
        }
    }
}

fn apply_player_input(state: &mut GameState, input: &TickInput, dt: f32) {
    let axis = Vec2::new(input.move_x, input.move_y).clamp_length_max(1.0);
    let mut speed = PLAYER_SPEED;
    if state.powerups.is_active(PowerUpKind::Speed) {
        speed *= SPEED_BOOST;
    }
    state.player.vel = axis * speed;
    state.player.pos += state.player.vel * dt;

    let half = state.player.size() / 2.0;
    state.player.pos.x = state.player.pos.x.clamp(half.x, FIELD_WIDTH - half.x);
    state.player.pos.y = state.player.pos.y.clamp(half.y, FIELD_HEIGHT - half.y);
}

fn apply_abilities(state: &mut GameState, input: &TickInput) {
    if input.dash && state.abilities.try_use(Ability::Dash) {
        // Instantaneous forward jump
        let half = state.player.size().x / 2.0;
        state.player.pos.x = (state.player.pos.x + DASH_DISTANCE).min(FIELD_WIDTH - half);
    }
    if input.time_freeze && state.abilities.try_use(Ability::TimeFreeze) {
        // Rides the slow-motion power-up slot; movement honors it below
        state.powerups.activate(
            PowerUpKind::SlowMotion,
            PowerUpKind::SlowMotion.pickup_duration_ticks(),
            None,
        );
    }
    if input.mega_collect && state.abilities.try_use(Ability::MegaCollect) {
        state.powerups.activate(
            PowerUpKind::Magnet,
            PowerUpKind::Magnet.pickup_duration_ticks(),
            None,
        );
    }
}

/// Advance entity positions. Slow-motion scales obstacle drift; an active
/// magnet pulls nearby collectibles toward the player instead of letting
/// them drift.
fn move_entities(state: &mut GameState, dt: f32) {
    let slow = state.powerups.is_active(PowerUpKind::SlowMotion);
    let magnet = state.powerups.is_active(PowerUpKind::Magnet);
    let player_pos = state.player.pos;

    for entity in state.entities.iter_mut() {
        match entity.kind {
            EntityKind::Obstacle => {
                let factor = if slow { SLOW_MOTION_FACTOR } else { 1.0 };
                entity.pos += entity.vel * factor * dt;
            }
            EntityKind::Collectible { .. } => {
                let to_player = player_pos - entity.pos;
                if magnet && to_player.length() < MAGNET_RADIUS {
                    entity.pos += to_player.normalize_or_zero() * MAGNET_PULL_SPEED * dt;
                } else {
                    entity.pos += entity.vel * dt;
                }
            }
            EntityKind::PowerUp { .. } => {
                entity.pos += entity.vel * dt;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{GameMode, ModeConfig};
    use crate::sim::state::{Entity, GameEvent, Rarity};

    fn started(seed: u64, mode: ModeConfig) -> GameState {
        let mut state = GameState::new(seed, mode);
        state.start_session();
        state
    }

    fn push_entity(state: &mut GameState, pos: Vec2, vel: Vec2, kind: EntityKind) -> u32 {
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            pos,
            vel,
            size: Vec2::splat(20.0),
            kind,
        });
        id
    }

    #[test]
    fn test_idle_until_started() {
        let mut state = GameState::new(1, GameMode::Classic.config());
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.time_ticks, 0);

        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start, SIM_DT);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_pause_suspends_everything() {
        let mut state = started(1, GameMode::Classic.config());
        push_entity(
            &mut state,
            Vec2::new(600.0, 200.0),
            Vec2::new(-100.0, 0.0),
            EntityKind::Obstacle,
        );
        state.powerups.activate(PowerUpKind::Shield, 100, None);

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        let ticks_before = state.time_ticks;
        let entity_x = state.entities[0].pos.x;
        tick(&mut state, &TickInput::default(), SIM_DT);
        tick(&mut state, &TickInput::default(), SIM_DT);

        // Entity positions retained, no timers advanced
        assert_eq!(state.time_ticks, ticks_before);
        assert_eq!(state.entities[0].pos.x, entity_x);
        assert_eq!(state.powerups.remaining_ticks(PowerUpKind::Shield), 100);

        // Resume loses no time
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_player_clamped_to_field() {
        let mut state = started(1, GameMode::Classic.config());
        let input = TickInput {
            move_y: -1.0,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &input, SIM_DT);
        }
        let half = PLAYER_SIZE / 2.0;
        assert_eq!(state.player.pos.y, half);
    }

    #[test]
    fn test_dash_jumps_forward_and_cools_down() {
        // Scenario: dash off cooldown succeeds, second immediate use fails
        let mut state = started(1, GameMode::Classic.config());
        let x_before = state.player.pos.x;

        let input = TickInput {
            dash: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert!(state.player.pos.x >= x_before + DASH_DISTANCE - 1.0);
        // tick() already decremented the fresh cooldown once
        assert_eq!(state.abilities.cooldown_ticks(Ability::Dash), 299);

        let x_after = state.player.pos.x;
        tick(&mut state, &input, SIM_DT);
        assert!(state.player.pos.x < x_after + DASH_DISTANCE / 2.0);
    }

    #[test]
    fn test_time_freeze_slows_obstacles() {
        let mut state = started(1, GameMode::Classic.config());
        let id = push_entity(
            &mut state,
            Vec2::new(600.0, 50.0),
            Vec2::new(-100.0, 0.0),
            EntityKind::Obstacle,
        );

        let input = TickInput {
            time_freeze: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);

        assert!(state.powerups.is_active(PowerUpKind::SlowMotion));
        let entity = state.entities.iter().find(|e| e.id == id).unwrap();
        let moved = 600.0 - entity.pos.x;
        let expected = 100.0 * SLOW_MOTION_FACTOR * SIM_DT;
        assert!((moved - expected).abs() < 0.01, "moved {moved}");
    }

    #[test]
    fn test_magnet_pulls_collectibles() {
        let mut state = started(1, GameMode::Classic.config());
        let near_pos = state.player.pos + Vec2::new(100.0, 0.0);
        let near = push_entity(
            &mut state,
            near_pos,
            Vec2::new(-50.0, 0.0),
            EntityKind::Collectible {
                rarity: Rarity::Common,
            },
        );
        let far = push_entity(
            &mut state,
            Vec2::new(700.0, 400.0),
            Vec2::new(-50.0, 0.0),
            EntityKind::Collectible {
                rarity: Rarity::Common,
            },
        );
        state.powerups.activate(PowerUpKind::Magnet, 600, None);

        let near_dist = (state.entities[0].pos - state.player.pos).length();
        tick(&mut state, &TickInput::default(), SIM_DT);

        let near_entity = state.entities.iter().find(|e| e.id == near).unwrap();
        let far_entity = state.entities.iter().find(|e| e.id == far).unwrap();
        // In range: pulled straight toward the player, faster than drift
        let pulled = near_dist - (near_entity.pos - state.player.pos).length();
        assert!((pulled - MAGNET_PULL_SPEED * SIM_DT).abs() < 0.01);
        // Out of range: plain drift
        assert!((far_entity.pos.x - (700.0 - 50.0 * SIM_DT)).abs() < 0.01);
    }

    #[test]
    fn test_offscreen_entities_despawn() {
        let mut state = started(1, GameMode::Classic.config());
        push_entity(
            &mut state,
            Vec2::new(5.0, 300.0),
            Vec2::new(-4000.0, 0.0),
            EntityKind::Obstacle,
        );
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.entities.iter().all(|e| !e.off_screen()));
    }

    #[test]
    fn test_lives_monotonic_until_ended() {
        let mut state = started(77, GameMode::Hardcore.config());
        let mut last_lives = state.progress.lives;

        for i in 0..20_000 {
            let input = TickInput {
                // Wander vertically so the run eventually takes hits
                move_y: if (i / 120) % 2 == 0 { 1.0 } else { -1.0 },
                ..Default::default()
            };
            tick(&mut state, &input, SIM_DT);
            assert!(state.progress.lives <= last_lives);
            last_lives = state.progress.lives;
            if state.phase == GamePhase::Ended {
                break;
            }
        }
    }

    #[test]
    fn test_game_end_reports_once_with_achievements() {
        // Scenario: lives reach 0 -> one GameEnded with score + milestones
        let mut state = started(1, GameMode::Classic.config());
        state.progress.score = 1500;
        state.progress.level = 3;
        let mut events = Vec::new();
        state.progress.check_achievements(&mut events);
        state.progress.lives = 1;

        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            pos: state.player.pos,
            vel: Vec2::ZERO,
            size: Vec2::splat(20.0),
            kind: EntityKind::Obstacle,
        });

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Ended);

        let events = state.drain_events();
        let ended: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::GameEnded {
                    final_score,
                    achievements,
                } => Some((*final_score, achievements.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(ended.len(), 1);
        assert_eq!(ended[0].0, 1500);
        assert!(!ended[0].1.is_empty());

        // Terminal: further ticks mutate nothing
        let snapshot_ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, snapshot_ticks);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_time_limit_ends_session() {
        let mut config = GameMode::Classic.config();
        config.time_limit_ticks = Some(10);
        let mut state = started(1, config);

        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Ended);
        assert!(state
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::GameEnded { .. })));
    }

    #[test]
    fn test_invulnerability_window_counts_down() {
        let mut state = started(1, GameMode::Classic.config());
        state.player.invuln_ticks = 2;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.invuln_ticks, 1);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!state.player.is_invulnerable());
    }

    #[test]
    fn test_determinism() {
        // Two states with the same seed and input script stay identical
        let mut state1 = started(424242, GameMode::Classic.config());
        let mut state2 = started(424242, GameMode::Classic.config());

        for i in 0..1200u32 {
            let input = TickInput {
                move_y: ((i as f32) * 0.05).sin(),
                dash: i == 100,
                time_freeze: i == 300,
                ..Default::default()
            };
            tick(&mut state1, &input, SIM_DT);
            tick(&mut state2, &input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.progress.score, state2.progress.score);
        assert_eq!(state1.entities.len(), state2.entities.len());
        assert_eq!(state1.player.pos, state2.player.pos);
        for (a, b) in state1.entities.iter().zip(&state2.entities) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.pos, b.pos);
        }
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = started(1, GameMode::Classic.config());
        state.powerups.activate(PowerUpKind::Shield, 100, None);
        tick(&mut state, &TickInput::default(), SIM_DT);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.lives, 3);
        assert_eq!(snapshot.level, 1);
        assert!(snapshot.active_powerups[PowerUpKind::Shield as usize]);
        assert_eq!(snapshot.phase, GamePhase::Running);
    }
}
