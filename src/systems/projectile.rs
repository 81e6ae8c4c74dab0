use bevy_ecs::prelude::*;

use crate::components::projectile::ProjectileVolley;
use crate::resources::playfield::Playfield;
use crate::resources::worldtime::WorldTime;
use crate::systems::time::tick_fraction;

/// Move every live projectile and cull the expired and out-of-bounds ones
/// before collision gets to see them.
pub fn advance_projectiles(
    mut volleys: Query<&mut ProjectileVolley>,
    time: Res<WorldTime>,
    playfield: Res<Playfield>,
) {
    let ticks = tick_fraction(time.delta_ms);
    for mut volley in volleys.iter_mut() {
        if !volley.is_empty() {
            volley.advance(ticks, time.delta_ms, &playfield);
        }
    }
}
