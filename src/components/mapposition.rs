use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// World-space anchor of an actor: the bottom-center of its body.
///
/// Frame sizes vary between states; anchoring at the feet keeps the actor
/// standing on the same line whatever frame is shown.
#[derive(Component, Clone, Copy, Debug)]
pub struct MapPosition {
    pub pos: Vector2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }
}
