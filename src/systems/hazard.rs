use bevy_ecs::prelude::*;

use crate::components::hazard::HazardField;
use crate::resources::worldtime::WorldTime;

/// Reap hazards whose active window closed or that already struck.
pub fn cleanup_hazards(mut fields: Query<&mut HazardField>, time: Res<WorldTime>) {
    let now = time.now();
    for mut field in fields.iter_mut() {
        if !field.is_empty() {
            field.cleanup(now);
        }
    }
}
