use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Horizontal orientation of an actor.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing implied by a horizontal delta; a zero delta keeps `self`.
    pub fn toward(self, dx: f32) -> Facing {
        if dx < 0.0 {
            Facing::Left
        } else if dx > 0.0 {
            Facing::Right
        } else {
            self
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Whether frames authored facing `authored` must be mirrored.
    pub fn flips(self, authored: Facing) -> bool {
        self != authored
    }
}
