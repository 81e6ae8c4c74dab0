//! Damage resolution.
//!
//! [`resolve_damage`] reads the [`CombatEvent`]s written by collision this
//! tick and applies them to [`Health`], then moves the target's animator
//! according to its [`Capabilities`](crate::components::combatant::Capabilities):
//!
//! - lethal hit: `Hurt` first when the actor plays hurt before death and has
//!   hurt frames, otherwise straight to `Dying`
//! - non-lethal hit: `Hurt` with hurt-lock, or the attack sequence for actors
//!   that react to hits
//!
//! Targets already dying or dead ignore further damage.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::{AnimState, Animator};
use crate::components::animationset::AnimationSet;
use crate::components::combatant::Combatant;
use crate::components::health::{DamageOutcome, Health};
use crate::components::rigidbody::RigidBody;
use crate::components::soundcues::SoundCues;
use crate::events::audio::SoundCue;
use crate::events::combat::{CombatEvent, DamageApplied};
use crate::resources::worldtime::WorldTime;

type TargetQueryData = (
    &'static mut Health,
    &'static mut Animator,
    &'static AnimationSet,
    &'static Combatant,
    Option<&'static mut RigidBody>,
    Option<&'static SoundCues>,
);

/// Count down every active invulnerability window.
pub fn tick_grace_windows(mut query: Query<&mut Health>, time: Res<WorldTime>) {
    for mut health in query.iter_mut() {
        if health.in_grace() {
            health.tick_grace(time.delta_ms);
        }
    }
}

pub fn resolve_damage(
    mut events: MessageReader<CombatEvent>,
    mut targets: Query<TargetQueryData>,
    mut applied: MessageWriter<DamageApplied>,
    mut cues: MessageWriter<SoundCue>,
) {
    for event in events.read() {
        let Ok((mut health, mut anim, set, combatant, body, sounds)) =
            targets.get_mut(event.target)
        else {
            continue;
        };
        if anim.is_dying_or_dead() {
            continue;
        }

        let caps = combatant.capabilities;
        let cue = match health.apply_damage(event.amount) {
            DamageOutcome::Ignored => continue,
            DamageOutcome::Killed => {
                debug!("{} took a lethal hit ({:?})", combatant.name, event.cause);
                if caps.hurt_before_death && set.has_own(AnimState::Hurt) {
                    anim.set_state(AnimState::Hurt);
                    sounds.and_then(|s| s.hurt.clone())
                } else {
                    anim.set_state(AnimState::Dying);
                    sounds.and_then(|s| s.death.clone())
                }
            }
            DamageOutcome::Damaged { .. } => {
                if caps.hurt_lock {
                    if anim.state == AnimState::Hurt {
                        anim.clock.reset();
                    } else {
                        anim.request(AnimState::Hurt);
                    }
                } else if caps.reacts_to_hit && set.has_own(AnimState::Attack) {
                    anim.request(AnimState::Attack);
                }
                sounds.and_then(|s| s.hurt.clone())
            }
        };

        if caps.hit_stop
            && let Some(mut body) = body
        {
            body.halt();
        }
        health.start_grace();

        if let Some(handle) = cue {
            cues.write(SoundCue {
                entity: event.target,
                handle,
            });
        }
        applied.write(DamageApplied {
            source: event.source,
            target: event.target,
            amount: event.amount,
            cause: event.cause,
            remaining_hp: health.hp,
        });
    }
}
