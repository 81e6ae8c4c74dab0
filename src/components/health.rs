//! Hit points and damage application.
//!
//! HP only goes down, floored at zero. The single exception is the fury buff,
//! which scales current HP once through [`Health::scale`]. A zero-damage hit
//! and any hit after HP reached zero are ignored.
use bevy_ecs::prelude::Component;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already depleted, or zero damage.
    Ignored,
    Damaged { hp: u32 },
    /// This hit brought HP to zero.
    Killed,
}

#[derive(Component, Debug, Clone)]
pub struct Health {
    pub hp: u32,
    pub max_hp: u32,
    /// Length of the invulnerability window opened by a contact hit.
    pub grace_ms: u32,
    pub grace_left_ms: u32,
}

impl Health {
    pub fn new(max_hp: u32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            grace_ms: 0,
            grace_left_ms: 0,
        }
    }

    pub fn with_grace(mut self, grace_ms: u32) -> Self {
        self.grace_ms = grace_ms;
        self
    }

    pub fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.hp == 0 || amount == 0 {
            return DamageOutcome::Ignored;
        }
        self.hp = self.hp.saturating_sub(amount);
        if self.hp == 0 {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Damaged { hp: self.hp }
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.hp == 0
    }

    /// Fury adjustment: multiply current HP, truncating. May exceed `max_hp`.
    pub fn scale(&mut self, factor: f32) {
        if self.hp > 0 {
            self.hp = ((self.hp as f32 * factor) as u32).max(1);
        }
    }

    /// HP over max HP, clamped to 1.0 for bars.
    pub fn fraction(&self) -> f32 {
        if self.max_hp == 0 {
            return 0.0;
        }
        (self.hp as f32 / self.max_hp as f32).min(1.0)
    }

    /// Number of hearts to draw, rounding partial hearts up.
    pub fn hearts(&self, hp_per_heart: u32) -> u32 {
        if hp_per_heart == 0 {
            return 0;
        }
        self.hp.div_ceil(hp_per_heart)
    }

    pub fn start_grace(&mut self) {
        self.grace_left_ms = self.grace_ms;
    }

    pub fn in_grace(&self) -> bool {
        self.grace_left_ms > 0
    }

    pub fn tick_grace(&mut self, delta_ms: u32) {
        self.grace_left_ms = self.grace_left_ms.saturating_sub(delta_ms);
    }
}
