//! Nebula Dash - endless-runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, game state)
//! - `mode`: Session configuration profiles and validation
//!
//! The crate has no rendering or platform dependency of its own: an
//! external scheduler calls [`sim::tick`] once per frame and reads back a
//! [`sim::Snapshot`] for drawing.

pub mod mode;
pub mod sim;

pub use mode::{ConfigError, GameMode, ModeConfig, Theme};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field dimensions (entities spawn at the trailing x edge)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 450.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 28.0;
    pub const PLAYER_START_X: f32 = 120.0;
    /// Base player speed (pixels/sec), before the Speed power-up
    pub const PLAYER_SPEED: f32 = 260.0;
    /// Speed power-up multiplier on player movement
    pub const SPEED_BOOST: f32 = 1.6;

    /// Invulnerability window after taking a hit (ticks)
    pub const INVULN_TICKS: u32 = 120;
    /// Energy lost per obstacle hit
    pub const HIT_ENERGY_COST: u32 = 25;
    /// Energy gauge ceiling
    pub const MAX_ENERGY: u32 = 100;

    /// Base horizontal drift speeds (pixels/sec, scaled by mode/level)
    pub const OBSTACLE_BASE_SPEED: f32 = 180.0;
    pub const COLLECTIBLE_SPEED: f32 = 140.0;
    pub const POWERUP_SPEED: f32 = 120.0;
    /// Extra obstacle speed per level (pixels/sec)
    pub const OBSTACLE_SPEED_PER_LEVEL: f32 = 20.0;
    /// Obstacle speed factor while slow-motion is active
    pub const SLOW_MOTION_FACTOR: f32 = 0.3;

    /// Magnet pull: radius and attraction speed
    pub const MAGNET_RADIUS: f32 = 160.0;
    pub const MAGNET_PULL_SPEED: f32 = 420.0;

    /// Dash: instantaneous forward jump distance
    pub const DASH_DISTANCE: f32 = 120.0;

    /// Particle cap (cosmetic only)
    pub const MAX_PARTICLES: usize = 256;
}

/// Axis-aligned overlap test for two center/size boxes
#[inline]
pub fn aabb_overlap(pos_a: Vec2, size_a: Vec2, pos_b: Vec2, size_b: Vec2) -> bool {
    let delta = (pos_a - pos_b).abs() * 2.0;
    delta.x < size_a.x + size_b.x && delta.y < size_a.y + size_b.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap() {
        let size = Vec2::splat(20.0);

        // Clear overlap
        assert!(aabb_overlap(Vec2::ZERO, size, Vec2::new(10.0, 0.0), size));
        // Touching edges do not overlap
        assert!(!aabb_overlap(Vec2::ZERO, size, Vec2::new(20.0, 0.0), size));
        // Separated on y only
        assert!(!aabb_overlap(Vec2::ZERO, size, Vec2::new(0.0, 25.0), size));
    }
}
