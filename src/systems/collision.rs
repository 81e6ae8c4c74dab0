//! Collision step.
//!
//! Translates overlaps into [`CombatEvent`]s, once per tick and after every
//! actor has moved and animated:
//!
//! - active hazards against the player's feet box
//! - boss projectiles against the player's body box
//! - contact damage from bosses that have it, skipped while the player is
//!   hurt or inside a grace window
//! - the player's pending melee strike against every living boss in range
//!
//! Hazards and projectiles that land are expired or removed on the spot, so
//! none of them can hit twice. The hazard and projectile collections are only
//! borrowed for the duration of this system.
use bevy_ecs::prelude::*;

use crate::components::animation::{AnimState, Animator};
use crate::components::boxcollider::{BoxCollider, rects_overlap};
use crate::components::combatant::Combatant;
use crate::components::hazard::HazardField;
use crate::components::health::Health;
use crate::components::mapposition::MapPosition;
use crate::components::player::{Player, PlayerController};
use crate::components::projectile::ProjectileVolley;
use crate::events::combat::{CombatEvent, DamageCause};
use crate::resources::worldtime::WorldTime;

type PlayerQueryData = (
    Entity,
    &'static MapPosition,
    &'static BoxCollider,
    &'static mut PlayerController,
    &'static Combatant,
    &'static Animator,
    &'static Health,
);

type BossQueryData = (
    Entity,
    &'static MapPosition,
    &'static BoxCollider,
    &'static Combatant,
    &'static Animator,
    &'static mut HazardField,
    &'static mut ProjectileVolley,
);

pub fn collision(
    time: Res<WorldTime>,
    mut players: Query<PlayerQueryData, With<Player>>,
    mut bosses: Query<BossQueryData, Without<Player>>,
    mut events: MessageWriter<CombatEvent>,
) {
    let now = time.now();
    for (player, pos, collider, mut ctrl, fighter, anim, health) in players.iter_mut() {
        let vulnerable = !anim.is_dying_or_dead();
        let feet = collider.feet_rect(pos.pos);
        let body = collider.body_rect(pos.pos);
        let player_x = collider.center(pos.pos).x;

        for (boss, boss_pos, boss_collider, boss_fighter, boss_anim, mut hazards, mut volley) in
            bosses.iter_mut()
        {
            if vulnerable {
                if !hazards.is_empty() {
                    for amount in hazards.strike(now, &feet) {
                        events.write(CombatEvent {
                            source: boss,
                            target: player,
                            amount,
                            cause: DamageCause::Hazard,
                        });
                    }
                }
                if !volley.is_empty() {
                    for amount in volley.strike(&body) {
                        events.write(CombatEvent {
                            source: boss,
                            target: player,
                            amount,
                            cause: DamageCause::Projectile,
                        });
                    }
                }
                if boss_fighter.capabilities.contact_damage
                    && !boss_anim.is_dying_or_dead()
                    && anim.state != AnimState::Hurt
                    && !health.in_grace()
                    && rects_overlap(&body, &boss_collider.body_rect(boss_pos.pos))
                {
                    events.write(CombatEvent {
                        source: boss,
                        target: player,
                        amount: boss_fighter.damage,
                        cause: DamageCause::Contact,
                    });
                }
            }

            if ctrl.pending_strike
                && boss_fighter.alive
                && !boss_anim.is_dying_or_dead()
                && fighter.faction.opposes(boss_fighter.faction)
                && (boss_collider.center(boss_pos.pos).x - player_x).abs() <= ctrl.attack_range
            {
                events.write(CombatEvent {
                    source: player,
                    target: boss,
                    amount: fighter.damage,
                    cause: DamageCause::Melee,
                });
            }
        }
        ctrl.pending_strike = false;
    }
}
