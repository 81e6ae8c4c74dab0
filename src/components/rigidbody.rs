//! Kinematic body for actors.
//!
//! Velocities are in pixels per reference tick and gravity in pixels per
//! tick squared; [`movement`](crate::systems::movement::movement) scales both
//! by the tick fraction of the current delta.
//!
//! The `frozen` flag stops all integration. A hurt player is frozen so it
//! neither walks nor falls mid-animation.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    pub velocity: Vector2,
    /// Downward acceleration. Bosses float at their spawn height with zero.
    pub gravity: f32,
    /// When true, movement skips this body entirely.
    pub frozen: bool,
    /// Stop at the playfield floor instead of falling through it.
    pub lands_on_floor: bool,
    /// Set by movement when the body rests on the floor.
    pub grounded: bool,
    /// Keep the body horizontally inside the playfield.
    pub confined: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    pub fn new() -> Self {
        Self {
            velocity: Vector2::zero(),
            gravity: 0.0,
            frozen: false,
            lands_on_floor: false,
            grounded: false,
            confined: false,
        }
    }

    /// Body that falls with `gravity` and stands on the floor.
    pub fn grounded_walker(gravity: f32) -> Self {
        Self {
            gravity,
            lands_on_floor: true,
            grounded: true,
            ..Self::new()
        }
    }

    pub fn total_acceleration(&self) -> Vector2 {
        Vector2::new(0.0, self.gravity)
    }

    /// Zero both velocity components (hit-stop).
    pub fn halt(&mut self) {
        self.velocity = Vector2::zero();
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}
