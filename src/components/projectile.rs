//! Moving projectiles owned by the boss that fired them.
//!
//! Positions are projectile centers. Each tick a projectile integrates its
//! velocity (plus optional gravity), spins, and loses lifetime. Lifetime and
//! bounds culling happen before collision, so a projectile removed for those
//! reasons never deals damage on that tick.
use bevy_ecs::prelude::Component;
use raylib::prelude::{Rectangle, Vector2};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::components::boxcollider::{rect_around, rects_overlap};
use crate::resources::playfield::Playfield;

#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub pos: Vector2,
    pub size: Vector2,
    /// Pixels per reference tick.
    pub velocity: Vector2,
    /// Added to `velocity.y` every reference tick.
    pub gravity: f32,
    /// Degrees.
    pub angle: f32,
    /// Degrees per reference tick.
    pub spin: f32,
    pub life_ms: u32,
    pub damage: u32,
}

impl Projectile {
    /// Projectile flying from `origin` toward `target` at `speed`.
    ///
    /// A target on top of the origin still yields a finite velocity.
    pub fn aimed(origin: Vector2, target: Vector2, shot: &AimedShot, damage: u32) -> Self {
        let dx = target.x - origin.x;
        let dy = target.y - origin.y;
        let dist = (dx * dx + dy * dy).sqrt().max(1.0);
        Self {
            pos: origin,
            size: Vector2::new(shot.size, shot.size),
            velocity: Vector2::new(shot.speed * dx / dist, shot.speed * dy / dist),
            gravity: 0.0,
            angle: 0.0,
            spin: 0.0,
            life_ms: shot.life_ms,
            damage,
        }
    }

    /// Parabolic throw in `direction` (-1 or 1).
    pub fn thrown(origin: Vector2, direction: f32, shot: &ThrownShot, damage: u32) -> Self {
        Self {
            pos: origin,
            size: Vector2::new(shot.size, shot.size),
            velocity: Vector2::new(shot.launch_x * direction, shot.launch_y),
            gravity: shot.gravity,
            angle: 0.0,
            spin: shot.spin * direction,
            life_ms: shot.life_ms,
            damage,
        }
    }

    /// Advance by `ticks` reference ticks covering `delta_ms`.
    pub fn step(&mut self, ticks: f32, delta_ms: u32) {
        self.velocity.y += self.gravity * ticks;
        self.pos += self.velocity.scale_by(ticks);
        self.angle = (self.angle + self.spin * ticks) % 360.0;
        self.life_ms = self.life_ms.saturating_sub(delta_ms);
    }

    pub fn rect(&self) -> Rectangle {
        rect_around(self.pos, self.size)
    }

    pub fn expired(&self) -> bool {
        self.life_ms == 0
    }

    /// Entirely off the left or right edge of the playfield.
    pub fn out_of_bounds(&self, playfield: &Playfield) -> bool {
        let r = self.rect();
        r.x + r.width < 0.0 || r.x > playfield.width
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimedShot {
    pub speed: f32,
    pub size: f32,
    pub life_ms: u32,
    /// Share of the boss's damage carried by each shot.
    pub damage_factor: f32,
}

impl Default for AimedShot {
    fn default() -> Self {
        Self {
            speed: 5.0,
            size: 16.0,
            life_ms: 4000,
            damage_factor: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrownShot {
    pub launch_x: f32,
    /// Negative is upward.
    pub launch_y: f32,
    pub gravity: f32,
    pub spin: f32,
    pub size: f32,
    pub life_ms: u32,
    pub damage_factor: f32,
}

impl Default for ThrownShot {
    fn default() -> Self {
        Self {
            launch_x: 6.0,
            launch_y: -12.0,
            gravity: 0.5,
            spin: 12.0,
            size: 28.0,
            life_ms: 3000,
            damage_factor: 1.0,
        }
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct ProjectileVolley {
    pub projectiles: Vec<Projectile>,
}

impl ProjectileVolley {
    pub fn push(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    /// Move every projectile, then drop expired and out-of-bounds ones.
    pub fn advance(&mut self, ticks: f32, delta_ms: u32, playfield: &Playfield) {
        for p in self.projectiles.iter_mut() {
            p.step(ticks, delta_ms);
        }
        self.projectiles
            .retain(|p| !p.expired() && !p.out_of_bounds(playfield));
    }

    /// Remove every projectile overlapping `target` and return their damage.
    pub fn strike(&mut self, target: &Rectangle) -> SmallVec<[u32; 4]> {
        let mut hits = SmallVec::new();
        self.projectiles.retain(|p| {
            if rects_overlap(&p.rect(), target) {
                hits.push(p.damage);
                false
            } else {
                true
            }
        });
        hits
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn field() -> Playfield {
        Playfield::new(800.0, 600.0, 10.0)
    }

    #[test]
    fn test_aimed_velocity_has_speed() {
        let p = Projectile::aimed(
            Vector2::new(0.0, 0.0),
            Vector2::new(30.0, 40.0),
            &AimedShot::default(),
            5,
        );
        assert!(approx_eq(p.velocity.x, 3.0));
        assert!(approx_eq(p.velocity.y, 4.0));
    }

    #[test]
    fn test_aimed_at_origin_is_finite() {
        let origin = Vector2::new(10.0, 10.0);
        let p = Projectile::aimed(origin, origin, &AimedShot::default(), 5);
        assert!(p.velocity.x.is_finite());
        assert!(approx_eq(p.velocity.x, 0.0));
    }

    #[test]
    fn test_step_integrates_and_counts_down() {
        let mut p =
            Projectile::thrown(Vector2::new(100.0, 100.0), -1.0, &ThrownShot::default(), 16);
        p.step(1.0, 17);
        assert!(approx_eq(p.velocity.y, -11.5));
        assert!(approx_eq(p.pos.x, 94.0));
        assert!(approx_eq(p.pos.y, 88.5));
        assert!(approx_eq(p.angle, -12.0));
        assert_eq!(p.life_ms, 2983);
    }

    #[test]
    fn test_advance_culls_expired_and_out_of_bounds() {
        let shot = AimedShot {
            life_ms: 20,
            ..AimedShot::default()
        };
        let mut volley = ProjectileVolley::default();
        volley.push(Projectile::aimed(
            Vector2::new(400.0, 300.0),
            Vector2::new(500.0, 300.0),
            &shot,
            5,
        ));
        let mut runaway = Projectile::aimed(
            Vector2::new(795.0, 300.0),
            Vector2::new(900.0, 300.0),
            &AimedShot::default(),
            5,
        );
        runaway.velocity.x = 50.0;
        volley.push(runaway);

        volley.advance(1.0, 16, &field());
        assert_eq!(volley.len(), 1);
        volley.advance(1.0, 16, &field());
        assert!(volley.is_empty());
    }

    #[test]
    fn test_strike_removes_on_hit() {
        let mut volley = ProjectileVolley::default();
        volley.push(Projectile::aimed(
            Vector2::new(100.0, 100.0),
            Vector2::new(200.0, 100.0),
            &AimedShot::default(),
            5,
        ));
        volley.push(Projectile::aimed(
            Vector2::new(500.0, 100.0),
            Vector2::new(600.0, 100.0),
            &AimedShot::default(),
            5,
        ));
        let target = Rectangle {
            x: 90.0,
            y: 80.0,
            width: 30.0,
            height: 60.0,
        };
        let hits = volley.strike(&target);
        assert_eq!(hits.as_slice(), &[5]);
        assert_eq!(volley.len(), 1);
        assert!(volley.strike(&target).is_empty());
    }
}
