//! Nebula Dash entry point
//!
//! A headless demo driver standing in for the platform scheduler: it runs
//! the simulation at a fixed timestep with a simple autopilot and logs the
//! lifecycle events a real session/reward collaborator would consume.

use std::time::{SystemTime, UNIX_EPOCH};

use nebula_dash::consts::*;
use nebula_dash::mode::GameMode;
use nebula_dash::sim::{EntityKind, GameEvent, GamePhase, GameState, TickInput, tick};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0x5eed)
        });
    let mode = args
        .next()
        .and_then(|s| GameMode::from_str(&s))
        .unwrap_or(GameMode::Classic);

    let config = mode.config();
    if let Err(err) = config.validate() {
        eprintln!("invalid mode configuration: {err}");
        std::process::exit(1);
    }

    log::info!("demo run: seed {seed}, mode {mode:?}");
    let mut state = GameState::new(seed, config);
    state.start_session();

    // Cap the demo at five minutes of simulated time
    let max_ticks = 5 * 60 * TICK_RATE as u64;

    while state.phase != GamePhase::Ended && state.time_ticks < max_ticks {
        let input = autopilot(&state);
        tick(&mut state, &input, SIM_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::ScoreChanged(score) => log::debug!("score: {score}"),
                GameEvent::LevelComplete(level) => println!("level {level} complete"),
                GameEvent::AchievementUnlocked(a) => println!("achievement: {}", a.as_str()),
                GameEvent::GameEnded {
                    final_score,
                    achievements,
                } => {
                    println!("game over: final score {final_score}");
                    for a in achievements {
                        println!("  earned {}", a.as_str());
                    }
                }
            }
        }
    }

    let snapshot = state.snapshot();
    println!(
        "final: score {} level {} lives {} after {} ticks",
        snapshot.score, snapshot.level, snapshot.lives, state.time_ticks
    );
}

/// Minimal autopilot: chase the nearest collectible, sidestep obstacles
/// closing in on the player's row, and fire abilities when available.
fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;
    let mut input = TickInput::default();

    // Nearest threatening obstacle ahead of the player
    let threat = state
        .entities
        .iter()
        .filter(|e| {
            e.kind == EntityKind::Obstacle
                && e.pos.x > player.pos.x
                && e.pos.x - player.pos.x < 180.0
                && (e.pos.y - player.pos.y).abs() < e.size.y / 2.0 + PLAYER_SIZE
        })
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    if let Some(obstacle) = threat {
        // Dodge away from the obstacle's row
        input.move_y = if obstacle.pos.y >= player.pos.y { -1.0 } else { 1.0 };
        input.time_freeze = true;
        return input;
    }

    // Otherwise drift toward the nearest collectible or power-up
    let target = state
        .entities
        .iter()
        .filter(|e| !matches!(e.kind, EntityKind::Obstacle))
        .min_by(|a, b| {
            (a.pos - player.pos)
                .length()
                .total_cmp(&(b.pos - player.pos).length())
        });

    if let Some(target) = target {
        let delta = target.pos.y - player.pos.y;
        if delta.abs() > 4.0 {
            input.move_y = delta.signum();
        }
        input.mega_collect = true;
    }

    input
}
