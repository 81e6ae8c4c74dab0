//! Telegraphed ground hazards.
//!
//! A [`Hazard`] goes Warning → Active → Expired, driven purely by two
//! absolute deadlines compared against the simulation clock. It only damages
//! while Active, and a successful hit expires it on the spot so the same
//! instance can never land twice.
//!
//! Each boss owns its hazards in a [`HazardField`]; the collision step
//! borrows the field for one tick and never keeps it.
use bevy_ecs::prelude::Component;
use raylib::prelude::Rectangle;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::components::boxcollider::rects_overlap;
use crate::resources::playfield::Playfield;

/// Blink period of the warning telegraph.
pub const BLINK_PERIOD_MS: u64 = 120;
const ACTIVE_ALPHA: u8 = 200;
const MIN_HIT_SIZE: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardPhase {
    Warning,
    Active,
    Expired,
}

#[derive(Debug, Clone)]
pub struct Hazard {
    /// Area drawn for the telegraph.
    pub visual: Rectangle,
    /// Area that deals damage, possibly inset from `visual`.
    pub hit: Rectangle,
    pub damage: u32,
    pub warn_until: u64,
    pub active_until: u64,
}

impl Hazard {
    pub fn new(visual: Rectangle, damage: u32, now: u64, warn_ms: u32, active_ms: u32) -> Self {
        let warn_until = now + warn_ms as u64;
        Self {
            visual,
            hit: visual,
            damage,
            warn_until,
            active_until: warn_until + active_ms as u64,
        }
    }

    /// Shrink the hit box by `pad_x`/`pad_y` on each side, never below 4×4.
    pub fn with_padding(mut self, pad_x: f32, pad_y: f32) -> Self {
        self.hit = Rectangle {
            x: self.visual.x + pad_x,
            y: self.visual.y + pad_y,
            width: (self.visual.width - 2.0 * pad_x).max(MIN_HIT_SIZE),
            height: (self.visual.height - 2.0 * pad_y).max(MIN_HIT_SIZE),
        };
        self
    }

    pub fn phase(&self, now: u64) -> HazardPhase {
        if now < self.warn_until {
            HazardPhase::Warning
        } else if now < self.active_until {
            HazardPhase::Active
        } else {
            HazardPhase::Expired
        }
    }

    /// Force immediate expiry after a hit.
    pub fn expire(&mut self, now: u64) {
        self.active_until = now.saturating_sub(1);
    }

    /// Whether the telegraph is drawn this tick. Warning blinks, Active is solid.
    pub fn visible(&self, now: u64) -> bool {
        match self.phase(now) {
            HazardPhase::Warning => (now / BLINK_PERIOD_MS) % 2 == 0,
            HazardPhase::Active => true,
            HazardPhase::Expired => false,
        }
    }

    /// Draw alpha: ramps 140→220 inside each warning blink, 200 while active.
    pub fn alpha(&self, now: u64) -> u8 {
        match self.phase(now) {
            HazardPhase::Warning => (140 + 80 * (now % BLINK_PERIOD_MS) / BLINK_PERIOD_MS) as u8,
            HazardPhase::Active => ACTIVE_ALPHA,
            HazardPhase::Expired => 0,
        }
    }
}

/// Shape and timing of one ground-hazard volley.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardLayout {
    pub count: u32,
    pub width: f32,
    pub height: f32,
    pub warn_ms: u32,
    pub active_ms: u32,
    /// Hit box inset per side.
    pub pad_x: f32,
    pub pad_y: f32,
    /// Distance kept from both playfield edges when placing.
    pub edge_margin: f32,
}

impl Default for HazardLayout {
    fn default() -> Self {
        Self {
            count: 4,
            width: 80.0,
            height: 18.0,
            warn_ms: 500,
            active_ms: 700,
            pad_x: 0.0,
            pad_y: 0.0,
            edge_margin: 100.0,
        }
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct HazardField {
    pub hazards: Vec<Hazard>,
}

impl HazardField {
    /// Place `layout.count` hazards at random x on the floor line.
    ///
    /// X is drawn from `[edge_margin, width - edge_margin - w]`; when the
    /// field is too narrow every hazard sits at `edge_margin`. New hazards are
    /// appended to any still pending.
    pub fn spawn_volley(
        &mut self,
        rng: &mut fastrand::Rng,
        now: u64,
        playfield: &Playfield,
        layout: &HazardLayout,
        damage: u32,
    ) {
        let min_x = layout.edge_margin.max(0.0) as u32;
        let max_x = (playfield.width - layout.edge_margin - layout.width).max(min_x as f32) as u32;
        let y = playfield.floor_y() - layout.height;
        for _ in 0..layout.count {
            let x = rng.u32(min_x..=max_x) as f32;
            let visual = Rectangle {
                x,
                y,
                width: layout.width,
                height: layout.height,
            };
            self.hazards.push(
                Hazard::new(visual, damage, now, layout.warn_ms, layout.active_ms)
                    .with_padding(layout.pad_x, layout.pad_y),
            );
        }
    }

    /// Resolve hits against `target` at `now`.
    ///
    /// Every Active hazard overlapping the target yields its damage once and
    /// is expired immediately.
    pub fn strike(&mut self, now: u64, target: &Rectangle) -> SmallVec<[u32; 4]> {
        let mut hits = SmallVec::new();
        for hazard in self.hazards.iter_mut() {
            if hazard.phase(now) == HazardPhase::Active && rects_overlap(&hazard.hit, target) {
                hits.push(hazard.damage);
                hazard.expire(now);
            }
        }
        hits
    }

    /// Drop every hazard whose active window has closed.
    pub fn cleanup(&mut self, now: u64) {
        self.hazards.retain(|h| h.active_until > now);
    }

    pub fn clear(&mut self) {
        self.hazards.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
    }
}
