//! Per-tick player commands.
//!
//! The core never polls devices. The caller translates whatever input it has
//! into [`InputCommands`] before running the schedule. Movement flags are
//! level-triggered (held), `jump` and `attack` are edge-triggered and are
//! consumed by [`player_control`](crate::systems::player::player_control).
use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputCommands {
    pub move_left: bool,
    pub move_right: bool,
    pub stop: bool,
    pub jump: bool,
    pub attack: bool,
}

impl InputCommands {
    /// Horizontal intent: -1, 0 or 1. Both directions held means stop.
    pub fn horizontal(&self) -> i8 {
        if self.stop {
            return 0;
        }
        match (self.move_left, self.move_right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }

    /// Drop the edge-triggered commands once they have been handled.
    pub fn consume_edges(&mut self) {
        self.jump = false;
        self.attack = false;
    }
}
