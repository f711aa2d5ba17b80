//! Game state and core simulation types
//!
//! All state for one session lives in [`GameState`], owned by the caller
//! and passed `&mut` through [`super::tick::tick`]. There is no ambient
//! global state; multiple sessions can run side by side.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::powerup::{Abilities, PowerUps};
use super::progress::Progress;
use crate::consts::*;
use crate::mode::ModeConfig;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Configured but not started
    Idle,
    /// Active gameplay
    Running,
    /// Suspended; no timers advance
    Paused,
    /// Session over, terminal
    Ended,
}

/// Collectible rarity tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
}

impl Rarity {
    /// Points before combo bonus and multiplier
    pub fn base_points(self) -> u64 {
        match self {
            Rarity::Common => 10,
            Rarity::Rare => 25,
            Rarity::Epic => 50,
        }
    }

    /// Per-combo-step bonus points
    pub fn combo_bonus(self) -> u64 {
        match self {
            Rarity::Common => 2,
            Rarity::Rare => 5,
            Rarity::Epic => 10,
        }
    }

    /// Combo window granted on pickup; rarer finds keep the chain alive longer
    pub fn combo_window_ticks(self) -> u32 {
        match self {
            Rarity::Common => 180,
            Rarity::Rare => 240,
            Rarity::Epic => 300,
        }
    }

    /// Energy restored on pickup
    pub fn energy_restore(self) -> u32 {
        match self {
            Rarity::Common => 0,
            Rarity::Rare => 10,
            Rarity::Epic => 25,
        }
    }
}

/// Timed power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    Speed,
    Magnet,
    Multiplier,
    Invincibility,
    SlowMotion,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Shield,
        PowerUpKind::Speed,
        PowerUpKind::Magnet,
        PowerUpKind::Multiplier,
        PowerUpKind::Invincibility,
        PowerUpKind::SlowMotion,
    ];

    /// Duration granted by picking up the matching entity
    pub fn pickup_duration_ticks(self) -> u32 {
        match self {
            PowerUpKind::Shield => 600,
            PowerUpKind::Speed => 480,
            PowerUpKind::Magnet => 480,
            PowerUpKind::Multiplier => 600,
            PowerUpKind::Invincibility => 300,
            PowerUpKind::SlowMotion => 360,
        }
    }
}

/// What an entity is, with its type-specific payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Obstacle,
    Collectible { rarity: Rarity },
    PowerUp { kind: PowerUpKind },
}

/// A field entity: obstacle, collectible, or power-up pickup.
///
/// Entities are stored in creation order and always iterated front to
/// back, so collision resolution is first-created-first-tested.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub kind: EntityKind,
}

impl Entity {
    /// Fully past the leading (left) field edge
    pub fn off_screen(&self) -> bool {
        self.pos.x + self.size.x / 2.0 < 0.0
    }
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Post-hit grace window; invulnerable while nonzero
    pub invuln_ticks: u32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, FIELD_HEIGHT / 2.0),
            vel: Vec2::ZERO,
            invuln_ticks: 0,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::splat(PLAYER_SIZE)
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_ticks > 0
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Visual flavor of a particle burst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Sparkle,
    Damage,
    PowerUpGlow,
}

/// A particle for visual effects. Never inspected by gameplay logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32, // counts down to 0
    pub max_life: f32,
    pub kind: ParticleKind,
}

/// Milestones reported to the reward-recording collaborator at session end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Achievement {
    Score1000,
    Score5000,
    Score10000,
    Combo10,
}

impl Achievement {
    pub fn as_str(self) -> &'static str {
        match self {
            Achievement::Score1000 => "score_1000",
            Achievement::Score5000 => "score_5000",
            Achievement::Score10000 => "score_10000",
            Achievement::Combo10 => "combo_10",
        }
    }
}

/// Lifecycle events for external collaborators, drained by the driver
/// after each tick.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ScoreChanged(u64),
    LevelComplete(u32),
    AchievementUnlocked(Achievement),
    GameEnded {
        final_score: u64,
        achievements: Vec<Achievement>,
    },
}

/// Per-kind spawn bookkeeping
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnTimers {
    /// Ticks since the last power-up spawn (power-ups use a fixed interval)
    pub ticks_since_powerup: u64,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Injected RNG; the only randomness source in the simulation
    pub rng: Pcg32,
    /// Immutable session configuration
    pub mode: ModeConfig,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Cosmetic background scroll offset
    pub bg_offset: f32,
    /// Player avatar
    pub player: Player,
    /// Field entities in creation order
    pub entities: Vec<Entity>,
    /// Spawn bookkeeping
    pub spawn: SpawnTimers,
    /// Timed power-up slots
    pub powerups: PowerUps,
    /// Cooldown-gated special abilities
    pub abilities: Abilities,
    /// Score, lives, combo, level, achievements
    pub progress: Progress,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Pending lifecycle events
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an idle session with the given seed and validated config.
    /// Call sites validate the config first; see [`ModeConfig::validate`].
    pub fn new(seed: u64, mode: ModeConfig) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            progress: Progress::new(mode.starting_lives),
            mode,
            phase: GamePhase::Idle,
            time_ticks: 0,
            bg_offset: 0.0,
            player: Player::new(),
            entities: Vec::new(),
            spawn: SpawnTimers::default(),
            powerups: PowerUps::default(),
            abilities: Abilities::default(),
            particles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset all sub-component state and enter `Running`
    pub fn start_session(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.phase = GamePhase::Running;
        self.time_ticks = 0;
        self.bg_offset = 0.0;
        self.player = Player::new();
        self.entities.clear();
        self.spawn = SpawnTimers::default();
        self.powerups = PowerUps::default();
        self.abilities = Abilities::default();
        self.progress = Progress::new(self.mode.starting_lives);
        self.particles.clear();
        self.events.clear();
        self.next_id = 1;
        log::info!("session started (seed {})", self.seed);
    }

    /// Transition to `Ended` and report the final result exactly once.
    /// Safe to call repeatedly; only the first call has any effect.
    pub fn end_session(&mut self) {
        if self.phase == GamePhase::Ended {
            return;
        }
        self.phase = GamePhase::Ended;
        // Milestones crossed on the final tick still make the report
        self.progress.check_achievements(&mut self.events);
        let final_score = self.progress.score;
        let achievements = self.progress.achievements.clone();
        log::info!(
            "session ended: score {} level {} achievements {}",
            final_score,
            self.progress.level,
            achievements.len()
        );
        self.events.push(GameEvent::GameEnded {
            final_score,
            achievements,
        });
    }

    /// Take all pending lifecycle events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view handed to the rendering collaborator after a tick
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            player_pos: self.player.pos,
            entities: &self.entities,
            particles: &self.particles,
            score: self.progress.score,
            lives: self.progress.lives,
            energy: self.progress.energy,
            level: self.progress.level,
            combo: self.progress.combo,
            active_powerups: PowerUpKind::ALL.map(|k| self.powerups.is_active(k)),
            ability_cooldowns: self.abilities.cooldowns(),
            phase: self.phase,
        }
    }
}

/// Per-tick render snapshot. Borrowed from the state: take it strictly
/// between ticks, never concurrently with one.
#[derive(Debug)]
pub struct Snapshot<'a> {
    pub player_pos: Vec2,
    pub entities: &'a [Entity],
    pub particles: &'a [Particle],
    pub score: u64,
    pub lives: u32,
    pub energy: u32,
    pub level: u32,
    pub combo: u32,
    /// Indexed by [`PowerUpKind::ALL`] order
    pub active_powerups: [bool; 6],
    /// Indexed by [`super::powerup::Ability::ALL`] order
    pub ability_cooldowns: [u32; 3],
    pub phase: GamePhase,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::GameMode;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(7, GameMode::Classic.config());
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.progress.lives, 3);
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_start_resets_state() {
        let mut state = GameState::new(7, GameMode::Classic.config());
        state.start_session();
        state.progress.score = 999;
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: Vec2::splat(10.0),
            kind: EntityKind::Obstacle,
        });

        state.start_session();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.progress.score, 0);
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_end_session_fires_once() {
        let mut state = GameState::new(7, GameMode::Classic.config());
        state.start_session();
        state.progress.score = 42;

        state.end_session();
        state.end_session();

        let events = state.drain_events();
        let ended: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameEnded { .. }))
            .collect();
        assert_eq!(ended.len(), 1);
        assert_eq!(
            events[0],
            GameEvent::GameEnded {
                final_score: 42,
                achievements: vec![]
            }
        );
    }

    #[test]
    fn test_state_serde_round_trip() {
        let mut state = GameState::new(11, GameMode::Hardcore.config());
        state.start_session();
        state.progress.score = 321;
        let id = state.next_entity_id();
        state.entities.push(Entity {
            id,
            pos: Vec2::new(500.0, 80.0),
            vel: Vec2::new(-120.0, 0.0),
            size: Vec2::splat(24.0),
            kind: EntityKind::Collectible {
                rarity: Rarity::Rare,
            },
        });

        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.seed, state.seed);
        assert_eq!(restored.phase, GamePhase::Running);
        assert_eq!(restored.progress.score, 321);
        assert_eq!(restored.entities.len(), 1);
        assert_eq!(restored.entities[0].kind, state.entities[0].kind);
        // RNG state survives, so a restored run stays deterministic
        assert_eq!(restored.rng, state.rng);
    }

    #[test]
    fn test_entity_off_screen() {
        let entity = Entity {
            id: 1,
            pos: Vec2::new(-20.0, 100.0),
            vel: Vec2::ZERO,
            size: Vec2::splat(30.0),
            kind: EntityKind::Obstacle,
        };
        assert!(entity.off_screen());

        let entity = Entity {
            pos: Vec2::new(10.0, 100.0),
            ..entity
        };
        assert!(!entity.off_screen());
    }
}
