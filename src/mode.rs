//! Session configuration profiles
//!
//! A session is configured once at start with an immutable [`ModeConfig`].
//! Presets live in [`GameMode`]; custom configs are validated before use so
//! a malformed profile cannot produce a degenerate or un-terminating run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::TICK_RATE;

/// Configuration rejected at session start
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("spawn rate for {0} must be positive (got {1})")]
    NonPositiveRate(&'static str, f32),
    #[error("starting lives must be at least 1")]
    ZeroLives,
    #[error("speed scale must be positive (got {0})")]
    NonPositiveSpeedScale(f32),
    #[error("time limit must be at least one tick when set")]
    ZeroTimeLimit,
}

/// Visual theme, passed through to the rendering collaborator untouched.
/// Has no gameplay effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Neon,
    Sunset,
    Mono,
}

/// Preset game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Standard run: 3 lives, no time limit
    Classic,
    /// Fixed-length run against the clock
    TimeAttack,
    /// One life, faster field
    Hardcore,
}

impl GameMode {
    pub fn config(self) -> ModeConfig {
        match self {
            GameMode::Classic => ModeConfig {
                obstacle_rate: 1.2,
                collectible_rate: 1.5,
                powerup_rate: 0.1,
                starting_lives: 3,
                speed_scale: 1.0,
                time_limit_ticks: None,
                theme: Theme::Neon,
            },
            GameMode::TimeAttack => ModeConfig {
                obstacle_rate: 1.5,
                collectible_rate: 2.2,
                powerup_rate: 0.15,
                starting_lives: 3,
                speed_scale: 1.1,
                time_limit_ticks: Some(120 * TICK_RATE as u64),
                theme: Theme::Sunset,
            },
            GameMode::Hardcore => ModeConfig {
                obstacle_rate: 2.0,
                collectible_rate: 1.5,
                powerup_rate: 0.08,
                starting_lives: 1,
                speed_scale: 1.4,
                time_limit_ticks: None,
                theme: Theme::Mono,
            },
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "timeattack" | "time-attack" => Some(GameMode::TimeAttack),
            "hardcore" => Some(GameMode::Hardcore),
            _ => None,
        }
    }
}

/// Immutable per-session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeConfig {
    /// Average obstacle spawns per second (scaled up by level)
    pub obstacle_rate: f32,
    /// Average collectible spawns per second
    pub collectible_rate: f32,
    /// Average power-up spawns per second; converted to a fixed interval
    pub powerup_rate: f32,
    /// Lives at session start
    pub starting_lives: u32,
    /// Global multiplier on entity drift speed
    pub speed_scale: f32,
    /// Session length cap in ticks (None = endless)
    pub time_limit_ticks: Option<u64>,
    /// Rendering-only theme selection
    pub theme: Theme,
}

impl ModeConfig {
    /// Reject configurations that would produce a degenerate session
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.obstacle_rate <= 0.0 {
            return Err(ConfigError::NonPositiveRate("obstacles", self.obstacle_rate));
        }
        if self.collectible_rate <= 0.0 {
            return Err(ConfigError::NonPositiveRate(
                "collectibles",
                self.collectible_rate,
            ));
        }
        if self.powerup_rate <= 0.0 {
            return Err(ConfigError::NonPositiveRate("power-ups", self.powerup_rate));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::ZeroLives);
        }
        if self.speed_scale <= 0.0 {
            return Err(ConfigError::NonPositiveSpeedScale(self.speed_scale));
        }
        if self.time_limit_ticks == Some(0) {
            return Err(ConfigError::ZeroTimeLimit);
        }
        Ok(())
    }

    /// Power-ups spawn on a fixed interval rather than probabilistically,
    /// guaranteeing availability over a run.
    pub fn powerup_interval_ticks(&self) -> u64 {
        (TICK_RATE as f32 / self.powerup_rate).ceil().max(1.0) as u64
    }
}

impl Default for ModeConfig {
    fn default() -> Self {
        GameMode::Classic.config()
    }
}
