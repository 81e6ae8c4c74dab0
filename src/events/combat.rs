//! Combat messages.
//!
//! The collision step writes [`CombatEvent`]s; damage resolution reads them
//! in the same tick and answers with [`DamageApplied`]. [`EntityDied`] is
//! written once per actor when its death sequence completes. Messages live
//! for two schedule runs and are never persisted.
use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;

use crate::components::combatant::Faction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageCause {
    Melee,
    Contact,
    Hazard,
    Projectile,
}

/// One damage application, not yet resolved against HP.
#[derive(Message, Debug, Clone, Copy)]
pub struct CombatEvent {
    pub source: Entity,
    pub target: Entity,
    pub amount: u32,
    pub cause: DamageCause,
}

/// Damage that actually changed HP.
#[derive(Message, Debug, Clone, Copy)]
pub struct DamageApplied {
    pub source: Entity,
    pub target: Entity,
    pub amount: u32,
    pub cause: DamageCause,
    pub remaining_hp: u32,
}

/// An actor finished its death sequence.
#[derive(Message, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub faction: Faction,
    pub name: String,
}
