//! Player avatar controller.
use bevy_ecs::prelude::Component;

/// Marker for the single player-controlled entity.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Movement and attack tuning for the avatar.
///
/// Speeds are in pixels per reference tick.
#[derive(Component, Debug, Clone)]
pub struct PlayerController {
    pub move_speed: f32,
    pub jump_power: f32,
    pub max_jumps: u8,
    pub jumps_left: u8,
    /// Horizontal reach of a melee swing, center to center.
    pub attack_range: f32,
    pub hp_per_heart: u32,
    /// Set when an attack was accepted this tick; the collision step
    /// resolves it once and clears it.
    pub pending_strike: bool,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self {
            move_speed: 4.0,
            jump_power: 20.0,
            max_jumps: 2,
            jumps_left: 2,
            attack_range: 120.0,
            hp_per_heart: 20,
            pending_strike: false,
        }
    }
}

impl PlayerController {
    /// Spend one jump if any is left.
    pub fn try_jump(&mut self) -> bool {
        if self.jumps_left == 0 {
            return false;
        }
        self.jumps_left -= 1;
        true
    }

    pub fn restore_jumps(&mut self) {
        self.jumps_left = self.max_jumps;
    }
}
