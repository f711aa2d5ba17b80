//! Timed power-up slots and cooldown-gated special abilities
//!
//! Six independent countdown timers (one per [`PowerUpKind`]) and three
//! ability cooldowns. Both are plain counters decremented once per tick by
//! the frame driver; activation happens on pickup (collision engine) or on
//! player input (tick driver applies the gameplay effect).

use serde::{Deserialize, Serialize};

use super::state::PowerUpKind;

/// Score multiplier granted by the Multiplier power-up
pub const MULTIPLIER_VALUE: u32 = 2;

/// Active timed effects, one slot per power-up kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerUps {
    /// Remaining ticks per kind, indexed by [`PowerUpKind::ALL`] order.
    /// A slot is active iff its counter is nonzero.
    remaining: [u32; 6],
    /// Multiplier value while the Multiplier slot is active
    multiplier: u32,
}

impl PowerUps {
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.remaining[kind as usize] > 0
    }

    pub fn remaining_ticks(&self, kind: PowerUpKind) -> u32 {
        self.remaining[kind as usize]
    }

    /// Activate a slot, or refresh its duration if already active.
    /// Durations never stack.
    pub fn activate(&mut self, kind: PowerUpKind, duration_ticks: u32, multiplier: Option<u32>) {
        self.remaining[kind as usize] = duration_ticks;
        if kind == PowerUpKind::Multiplier {
            self.multiplier = multiplier.unwrap_or(MULTIPLIER_VALUE);
        }
        log::debug!("power-up {:?} active for {} ticks", kind, duration_ticks);
    }

    /// Consume the shield after it absorbs a hit
    pub fn consume_shield(&mut self) {
        self.remaining[PowerUpKind::Shield as usize] = 0;
    }

    /// Current score multiplier (1 when the Multiplier slot is inactive)
    pub fn score_multiplier(&self) -> u64 {
        if self.is_active(PowerUpKind::Multiplier) {
            self.multiplier.max(1) as u64
        } else {
            1
        }
    }

    /// Decrement all active timers, deactivating at zero
    pub fn tick(&mut self) {
        for slot in &mut self.remaining {
            *slot = slot.saturating_sub(1);
        }
    }
}

/// Player-triggered special abilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ability {
    Dash,
    TimeFreeze,
    MegaCollect,
}

impl Ability {
    pub const ALL: [Ability; 3] = [Ability::Dash, Ability::TimeFreeze, Ability::MegaCollect];

    /// Cooldown reset value (ticks at the nominal 60 Hz rate)
    pub fn max_cooldown_ticks(self) -> u32 {
        match self {
            Ability::Dash => 300,
            Ability::TimeFreeze => 600,
            Ability::MegaCollect => 900,
        }
    }
}

/// Cooldown state for the three special abilities
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Abilities {
    /// Remaining cooldown per ability, indexed by [`Ability::ALL`] order
    cooldown: [u32; 3],
}

impl Abilities {
    /// Attempt to use an ability. Succeeds only off cooldown, immediately
    /// re-arming the full cooldown. On-cooldown use is a silent no-op.
    /// The caller applies the ability's gameplay effect on success.
    pub fn try_use(&mut self, ability: Ability) -> bool {
        let slot = &mut self.cooldown[ability as usize];
        if *slot > 0 {
            return false;
        }
        *slot = ability.max_cooldown_ticks();
        log::debug!("ability {:?} used", ability);
        true
    }

    pub fn cooldown_ticks(&self, ability: Ability) -> u32 {
        self.cooldown[ability as usize]
    }

    pub fn cooldowns(&self) -> [u32; 3] {
        self.cooldown
    }

    /// Decrement all cooldowns
    pub fn tick(&mut self) {
        for slot in &mut self.cooldown {
            *slot = slot.saturating_sub(1);
        }
    }
}
