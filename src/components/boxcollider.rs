//! Body box and rectangle helpers.
//!
//! Every actor carries a [`BoxCollider`] whose size follows the frame being
//! shown (kept current by
//! [`sprite_sync`](crate::systems::render::sprite_sync)). Rectangles are built
//! from the bottom-center anchor in [`MapPosition`](super::mapposition::MapPosition).
use bevy_ecs::prelude::Component;
use raylib::prelude::{Rectangle, Vector2};

/// Height of the strip at the bottom of a body that ground hazards test against.
pub const FEET_HEIGHT: f32 = 12.0;
/// Minimum width of the feet strip.
pub const FEET_MIN_WIDTH: f32 = 24.0;
/// Share of the body width covered by the feet strip.
pub const FEET_WIDTH_RATIO: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vector2,
}

impl BoxCollider {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vector2::new(width, height),
        }
    }

    /// Body rectangle for a bottom-center anchor.
    pub fn body_rect(&self, anchor: Vector2) -> Rectangle {
        Rectangle {
            x: anchor.x - self.size.x * 0.5,
            y: anchor.y - self.size.y,
            width: self.size.x,
            height: self.size.y,
        }
    }

    /// Strip at the bottom of the body used against ground hazards.
    pub fn feet_rect(&self, anchor: Vector2) -> Rectangle {
        let width = FEET_MIN_WIDTH.max(self.size.x * FEET_WIDTH_RATIO);
        Rectangle {
            x: anchor.x - width * 0.5,
            y: anchor.y - FEET_HEIGHT,
            width,
            height: FEET_HEIGHT,
        }
    }

    pub fn center(&self, anchor: Vector2) -> Vector2 {
        Vector2 {
            x: anchor.x,
            y: anchor.y - self.size.y * 0.5,
        }
    }
}

/// Strict AABB overlap; touching edges do not count.
pub fn rects_overlap(a: &Rectangle, b: &Rectangle) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

pub fn rect_center(r: &Rectangle) -> Vector2 {
    Vector2 {
        x: r.x + r.width * 0.5,
        y: r.y + r.height * 0.5,
    }
}

/// Rectangle of `size` centered on `center`.
pub fn rect_around(center: Vector2, size: Vector2) -> Rectangle {
    Rectangle {
        x: center.x - size.x * 0.5,
        y: center.y - size.y * 0.5,
        width: size.x,
        height: size.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_body_rect_is_bottom_center_anchored() {
        let col = BoxCollider::new(40.0, 60.0);
        let r = col.body_rect(Vector2::new(100.0, 500.0));
        assert!(approx_eq(r.x, 80.0));
        assert!(approx_eq(r.y, 440.0));
        assert!(approx_eq(r.width, 40.0));
        assert!(approx_eq(r.height, 60.0));
    }

    #[test]
    fn test_feet_rect_minimum_width() {
        let col = BoxCollider::new(40.0, 60.0);
        let r = col.feet_rect(Vector2::new(100.0, 500.0));
        assert!(approx_eq(r.width, 24.0));
        assert!(approx_eq(r.x, 88.0));
        assert!(approx_eq(r.y, 488.0));
        assert!(approx_eq(r.height, FEET_HEIGHT));
    }

    #[test]
    fn test_feet_rect_scales_with_wide_body() {
        let col = BoxCollider::new(200.0, 60.0);
        let r = col.feet_rect(Vector2::new(0.0, 0.0));
        assert!(approx_eq(r.width, 60.0));
    }

    #[test]
    fn test_rects_overlap_strict() {
        let a = Rectangle {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let touching = Rectangle {
            x: 10.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let inside = Rectangle {
            x: 5.0,
            y: 5.0,
            width: 10.0,
            height: 10.0,
        };
        assert!(!rects_overlap(&a, &touching));
        assert!(rects_overlap(&a, &inside));
        assert!(rects_overlap(&inside, &a));
    }

    #[test]
    fn test_rect_around_and_center() {
        let r = rect_around(Vector2::new(50.0, 50.0), Vector2::new(16.0, 8.0));
        assert!(approx_eq(r.x, 42.0));
        assert!(approx_eq(r.y, 46.0));
        let c = rect_center(&r);
        assert!(approx_eq(c.x, 50.0));
        assert!(approx_eq(c.y, 50.0));
    }
}
