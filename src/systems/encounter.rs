//! Encounter progression.
//!
//! - [`track_outcome`] turns [`EntityDied`] messages into defeats and the
//!   final outcome.
//! - [`advance_room`] spawns the next room's boss when the player reaches
//!   the exit, and moves the player back to the room entry.
//! - [`reap_dead_bosses`] despawns bosses whose death sequence completed.
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::boss::BossBrain;
use crate::components::boxcollider::BoxCollider;
use crate::components::combatant::{Combatant, Faction};
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::events::combat::EntityDied;
use crate::game::spawn_boss_in_world;
use crate::resources::encounter::Encounter;
use crate::resources::playfield::Playfield;

pub fn track_outcome(
    mut died: MessageReader<EntityDied>,
    mut encounter: ResMut<Encounter>,
    bosses: Query<&BossBrain>,
) {
    for message in died.read() {
        match message.faction {
            Faction::Player => {
                encounter.record_player_death();
                info!("{} fell, encounter lost", message.name);
            }
            Faction::Boss => {
                if let Ok(brain) = bosses.get(message.entity) {
                    encounter.record_defeat(brain.kind);
                    info!(
                        "{} defeated ({} of {})",
                        message.name,
                        encounter.defeated.len(),
                        encounter.rooms.len()
                    );
                }
            }
        }
    }
}

/// Exclusive: spawning a boss needs the frame store, roster and config.
pub fn advance_room(world: &mut World) {
    let Some(encounter) = world.get_resource::<Encounter>() else {
        return;
    };
    if encounter.is_over() || !encounter.has_next_room() {
        return;
    }
    let entry_x = encounter.entry_x;
    let playfield = *world.resource::<Playfield>();

    let mut players = world
        .query_filtered::<(Entity, &MapPosition, &BoxCollider, &Combatant), With<Player>>();
    let Some((player, center_x)) = players
        .iter(world)
        .find(|(.., fighter)| fighter.alive)
        .map(|(entity, pos, collider, _)| (entity, collider.center(pos.pos).x))
    else {
        return;
    };
    if !world.resource::<Encounter>().at_exit(center_x, playfield.width) {
        return;
    }

    let Some(kind) = world.resource_mut::<Encounter>().advance_room() else {
        return;
    };
    match spawn_boss_in_world(world, kind) {
        Ok(boss) => {
            world.resource_mut::<Encounter>().current_boss = Some(boss);
            info!("Entered room with {}", kind.display_name());
        }
        Err(e) => warn!("Could not spawn {:?}: {}", kind, e),
    }

    if let Some(mut pos) = world.get_mut::<MapPosition>(player) {
        pos.pos.x = entry_x;
        pos.pos.y = playfield.floor_y();
    }
    if let Some(mut body) = world.get_mut::<RigidBody>(player) {
        body.halt();
        body.grounded = true;
    }
}

pub fn reap_dead_bosses(
    mut commands: Commands,
    bosses: Query<(Entity, &Combatant), With<BossBrain>>,
    mut encounter: ResMut<Encounter>,
) {
    for (entity, combatant) in bosses.iter() {
        if combatant.alive {
            continue;
        }
        commands.entity(entity).despawn();
        if encounter.current_boss == Some(entity) {
            encounter.current_boss = None;
        }
    }
}
