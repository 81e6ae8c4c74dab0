use bevy_ecs::prelude::Resource;

/// Simulation clock in milliseconds.
///
/// Advanced explicitly by the caller through
/// [`update_world_time`](crate::systems::time::update_world_time); nothing in
/// the core reads a wall clock.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Accumulated scaled time since the world was built.
    pub elapsed_ms: u64,
    /// Scaled time of the current tick.
    pub delta_ms: u32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed_ms: 0,
            delta_ms: 0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Current simulation timestamp.
    pub fn now(&self) -> u64 {
        self.elapsed_ms
    }
}
