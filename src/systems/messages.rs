//! Message buffer rotation.
//!
//! Messages are double-buffered: each run drops the older buffer, so a
//! message written in tick N is readable until the end of tick N + 1.
use bevy_ecs::prelude::*;

use crate::events::audio::SoundCue;
use crate::events::combat::{CombatEvent, DamageApplied, EntityDied};

pub fn update_combat_messages(
    mut combat: ResMut<Messages<CombatEvent>>,
    mut applied: ResMut<Messages<DamageApplied>>,
    mut died: ResMut<Messages<EntityDied>>,
    mut cues: ResMut<Messages<SoundCue>>,
) {
    combat.update();
    applied.update();
    died.update();
    cues.update();
}

/// Register every message type the schedule reads or writes.
pub fn init_messages(world: &mut World) {
    world.init_resource::<Messages<CombatEvent>>();
    world.init_resource::<Messages<DamageApplied>>();
    world.init_resource::<Messages<EntityDied>>();
    world.init_resource::<Messages<SoundCue>>();
}
