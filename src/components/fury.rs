//! First-strike fury rule.
//!
//! A boss with [`Fury`] watches who acts first. If the player attacks while
//! the boss's own attack timer is still inside `window_ms`, the boss becomes
//! furious: current HP and damage are multiplied once. Either resolution is
//! final for the lifetime of the boss.
use bevy_ecs::prelude::Component;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FirstStrike {
    #[default]
    Undecided,
    PlayerFirst,
    BossFirst,
}

#[derive(Component, Debug, Clone)]
pub struct Fury {
    pub first_strike: FirstStrike,
    pub multiplier: f32,
    pub window_ms: u32,
}

impl Fury {
    pub fn new(multiplier: f32, window_ms: u32) -> Self {
        Self {
            first_strike: FirstStrike::Undecided,
            multiplier,
            window_ms,
        }
    }

    pub fn is_furious(&self) -> bool {
        self.first_strike == FirstStrike::PlayerFirst
    }

    pub fn is_resolved(&self) -> bool {
        self.first_strike != FirstStrike::Undecided
    }

    /// Player issued an attack while this boss is present.
    ///
    /// Returns the multiplier to apply exactly once, on the call that
    /// resolves to `PlayerFirst`. Every other call returns `None`.
    pub fn notify_player_attack(&mut self, boss_attack_timer_ms: u32) -> Option<f32> {
        if self.is_resolved() {
            return None;
        }
        if boss_attack_timer_ms < self.window_ms {
            self.first_strike = FirstStrike::PlayerFirst;
            Some(self.multiplier)
        } else {
            self.first_strike = FirstStrike::BossFirst;
            None
        }
    }

    /// The boss started an attack before the player did.
    pub fn notify_boss_acted(&mut self) {
        if !self.is_resolved() {
            self.first_strike = FirstStrike::BossFirst;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_first_inside_window() {
        let mut fury = Fury::new(1.5, 17);
        assert_eq!(fury.notify_player_attack(5), Some(1.5));
        assert!(fury.is_furious());
    }

    #[test]
    fn test_repeated_notifications_are_noops() {
        let mut fury = Fury::new(1.4, 17);
        assert_eq!(fury.notify_player_attack(0), Some(1.4));
        for _ in 0..5 {
            assert_eq!(fury.notify_player_attack(0), None);
        }
        assert_eq!(fury.first_strike, FirstStrike::PlayerFirst);
    }

    #[test]
    fn test_late_attack_resolves_boss_first() {
        let mut fury = Fury::new(1.5, 17);
        assert_eq!(fury.notify_player_attack(400), None);
        assert_eq!(fury.first_strike, FirstStrike::BossFirst);
        assert_eq!(fury.notify_player_attack(0), None);
        assert!(!fury.is_furious());
    }

    #[test]
    fn test_boss_acting_first_blocks_fury() {
        let mut fury = Fury::new(1.5, 17);
        fury.notify_boss_acted();
        assert_eq!(fury.notify_player_attack(0), None);
        assert_eq!(fury.first_strike, FirstStrike::BossFirst);
    }

    #[test]
    fn test_boss_acted_after_player_first_keeps_fury() {
        let mut fury = Fury::new(1.5, 17);
        fury.notify_player_attack(0);
        fury.notify_boss_acted();
        assert!(fury.is_furious());
    }
}
