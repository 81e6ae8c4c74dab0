use bevy_ecs::prelude::Component;
use raylib::prelude::{Color, Vector2};

use crate::resources::framestore::ImageHandle;

/// What the renderer draws for an actor this tick.
///
/// `image` is `None` when no frame resolved; the renderer then fills the
/// bounding box with `placeholder`. The box is anchored bottom-center at
/// the actor's [`MapPosition`](crate::components::mapposition::MapPosition).
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub image: Option<ImageHandle>,
    pub size: Vector2,
    pub flip_h: bool,
    /// Degrees clockwise around the box center. Actors stay upright at 0.
    pub rotation: f32,
    pub placeholder: Color,
}

impl Sprite {
    pub fn placeholder(size: Vector2, color: Color) -> Self {
        Self {
            image: None,
            size,
            flip_h: false,
            rotation: 0.0,
            placeholder: color,
        }
    }
}
