//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per tick, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Reference tick length used to express speeds in pixels per tick.
pub const TICK_MS: f32 = 1000.0 / 60.0;

/// Advance `elapsed_ms` and set `delta_ms` on the `WorldTime` resource.
///
/// `dt_ms` is the unscaled frame delta in milliseconds. The current
/// `time_scale` is applied before both fields are written.
pub fn update_world_time(world: &mut World, dt_ms: u32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled = (dt_ms as f32 * wt.time_scale).round().max(0.0) as u32;
    wt.elapsed_ms += scaled as u64;
    wt.delta_ms = scaled;
    wt.frame_count += 1;
}

/// Number of reference ticks covered by `delta_ms`.
pub fn tick_fraction(delta_ms: u32) -> f32 {
    delta_ms as f32 / TICK_MS
}
