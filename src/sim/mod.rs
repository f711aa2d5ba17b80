//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (entities in creation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod particles;
pub mod powerup;
pub mod progress;
pub mod spawn;
pub mod state;
pub mod tick;

pub use powerup::{Abilities, Ability, PowerUps};
pub use progress::{LEVEL_THRESHOLDS, Progress, derive_level};
pub use state::{
    Achievement, Entity, EntityKind, GameEvent, GamePhase, GameState, Particle, ParticleKind,
    Player, PowerUpKind, Rarity, Snapshot,
};
pub use tick::{TickInput, tick};
