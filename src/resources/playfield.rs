use bevy_ecs::prelude::Resource;

/// Dimensions of the arena, supplied by the caller and updated when the
/// window changes.
///
/// `ground_y` is the bottom edge of the play area; actors stand on
/// `ground_y - floor_margin`.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub ground_y: f32,
    pub floor_margin: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: 1280.0,
            ground_y: 720.0,
            floor_margin: 10.0,
        }
    }
}

impl Playfield {
    pub fn new(width: f32, ground_y: f32, floor_margin: f32) -> Self {
        Self {
            width,
            ground_y,
            floor_margin,
        }
    }

    /// Y coordinate feet rest on.
    pub fn floor_y(&self) -> f32 {
        self.ground_y - self.floor_margin
    }

    /// Clamp a horizontal center so a body of `half_width` stays inside.
    pub fn clamp_x(&self, x: f32, half_width: f32) -> f32 {
        let min = half_width;
        let max = (self.width - half_width).max(min);
        x.clamp(min, max)
    }
}
