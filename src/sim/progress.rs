//! Score, combo, lives, and level progression
//!
//! Level is a pure function of score over a fixed ascending threshold
//! table; crossing a threshold emits one `LevelComplete` event per level,
//! even when a single score gain jumps several thresholds at once.

use serde::{Deserialize, Serialize};

use super::state::{Achievement, GameEvent};
use crate::consts::MAX_ENERGY;

/// Cumulative score required for each level (index + 1 = level)
pub const LEVEL_THRESHOLDS: [u64; 10] =
    [0, 500, 1500, 3000, 5000, 8000, 12000, 18000, 25000, 35000];

/// Score milestones that unlock achievements
const SCORE_MILESTONES: [(u64, Achievement); 3] = [
    (1000, Achievement::Score1000),
    (5000, Achievement::Score5000),
    (10000, Achievement::Score10000),
];

/// Combo size that unlocks the combo achievement
const COMBO_MILESTONE: u32 = 10;

/// Map a cumulative score to its level
pub fn derive_level(score: u64) -> u32 {
    let mut level = 1;
    for (i, &threshold) in LEVEL_THRESHOLDS.iter().enumerate() {
        if score >= threshold {
            level = i as u32 + 1;
        }
    }
    level
}

/// Session progression state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progress {
    pub score: u64,
    pub lives: u32,
    /// 0..=100 gauge, drained by hits and refilled by rare pickups
    pub energy: u32,
    /// Consecutive pickups within the rolling combo window
    pub combo: u32,
    /// Ticks left before the combo chain breaks
    pub combo_timer_ticks: u32,
    /// Total pickups this session
    pub streak: u32,
    /// Derived from score; never decreases
    pub level: u32,
    /// Milestones unlocked this session, in unlock order
    pub achievements: Vec<Achievement>,
}

impl Progress {
    pub fn new(starting_lives: u32) -> Self {
        Self {
            score: 0,
            lives: starting_lives,
            energy: MAX_ENERGY,
            combo: 0,
            combo_timer_ticks: 0,
            streak: 0,
            level: 1,
            achievements: Vec::new(),
        }
    }

    /// Add points, re-derive the level, and emit `ScoreChanged` plus one
    /// `LevelComplete` per threshold crossed, in ascending order.
    pub fn add_score(&mut self, points: u64, events: &mut Vec<GameEvent>) {
        if points == 0 {
            return;
        }
        self.score += points;
        events.push(GameEvent::ScoreChanged(self.score));

        let new_level = derive_level(self.score);
        while self.level < new_level {
            self.level += 1;
            log::info!("level up: {} (score {})", self.level, self.score);
            events.push(GameEvent::LevelComplete(self.level));
        }
    }

    /// Restore energy, clamped to the gauge ceiling
    pub fn restore_energy(&mut self, amount: u32) {
        self.energy = (self.energy + amount).min(MAX_ENERGY);
    }

    /// Drain energy, clamped at zero
    pub fn drain_energy(&mut self, amount: u32) {
        self.energy = self.energy.saturating_sub(amount);
    }

    /// Lose a life; returns true when this was the last one
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    /// Advance the combo window; the chain breaks to exactly 0 on expiry
    pub fn tick_combo(&mut self) {
        if self.combo_timer_ticks > 0 {
            self.combo_timer_ticks -= 1;
            if self.combo_timer_ticks == 0 {
                self.combo = 0;
            }
        }
    }

    /// Check score/combo milestones; each fires at most once per session
    pub fn check_achievements(&mut self, events: &mut Vec<GameEvent>) {
        for (threshold, achievement) in SCORE_MILESTONES {
            if self.score >= threshold && !self.achievements.contains(&achievement) {
                self.achievements.push(achievement);
                log::info!("achievement unlocked: {}", achievement.as_str());
                events.push(GameEvent::AchievementUnlocked(achievement));
            }
        }
        if self.combo >= COMBO_MILESTONE && !self.achievements.contains(&Achievement::Combo10) {
            self.achievements.push(Achievement::Combo10);
            log::info!("achievement unlocked: {}", Achievement::Combo10.as_str());
            events.push(GameEvent::AchievementUnlocked(Achievement::Combo10));
        }
    }
}
