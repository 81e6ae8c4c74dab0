//! Player avatar control.
//!
//! Turns [`InputCommands`] into velocity, facing, jumps and attacks. An
//! accepted attack is recorded as a pending strike that the collision step
//! resolves later in the same tick, after every boss present has been told
//! about it (first-strike fury).
use bevy_ecs::prelude::*;
use log::info;

use crate::components::animation::{AnimState, Animator};
use crate::components::animationset::AnimationSet;
use crate::components::boss::BossBrain;
use crate::components::combatant::Combatant;
use crate::components::facing::Facing;
use crate::components::fury::Fury;
use crate::components::health::Health;
use crate::components::player::{Player, PlayerController};
use crate::components::rigidbody::RigidBody;
use crate::components::soundcues::SoundCues;
use crate::components::tint::Tint;
use crate::events::audio::SoundCue;
use crate::resources::input::InputCommands;

type PlayerQueryData = (
    Entity,
    &'static mut PlayerController,
    &'static mut RigidBody,
    &'static mut Animator,
    &'static mut Facing,
    &'static AnimationSet,
    Option<&'static SoundCues>,
);

type BossQueryData = (
    &'static BossBrain,
    Option<&'static mut Fury>,
    &'static mut Health,
    &'static mut Combatant,
    &'static mut Animator,
    &'static AnimationSet,
    &'static mut Tint,
);

pub fn player_control(
    mut input: ResMut<InputCommands>,
    mut players: Query<PlayerQueryData, With<Player>>,
    mut bosses: Query<BossQueryData, Without<Player>>,
    mut cues: MessageWriter<SoundCue>,
) {
    for (entity, mut ctrl, mut body, mut anim, mut facing, set, sounds) in players.iter_mut() {
        if anim.is_locked() {
            body.freeze();
            continue;
        }
        body.unfreeze();

        let dir = input.horizontal();
        body.velocity.x = dir as f32 * ctrl.move_speed;
        if dir != 0 {
            *facing = facing.toward(dir as f32);
        }

        if body.grounded {
            ctrl.restore_jumps();
        }
        if input.jump && ctrl.try_jump() {
            body.velocity.y = -ctrl.jump_power;
            body.grounded = false;
        }

        if input.attack {
            if set.has_own(AnimState::Attack) {
                if anim.state == AnimState::Attack {
                    anim.clock.reset();
                } else {
                    anim.request(AnimState::Attack);
                }
            }
            ctrl.pending_strike = true;
            if let Some(handle) = sounds.and_then(|s| s.attack.clone()) {
                cues.write(SoundCue { entity, handle });
            }
            notify_bosses(&mut bosses);
        }

        anim.locomote(dir != 0);
    }
    input.consume_edges();
}

fn notify_bosses(bosses: &mut Query<BossQueryData, Without<Player>>) {
    for (brain, fury, mut health, mut combatant, mut anim, set, mut tint) in bosses.iter_mut() {
        if anim.is_dying_or_dead() {
            continue;
        }
        if let Some(mut fury) = fury
            && let Some(multiplier) = fury.notify_player_attack(brain.attack_timer_ms)
        {
            health.scale(multiplier);
            combatant.scale_damage(multiplier);
            *tint = Tint::fury();
            info!(
                "{} is furious: hp {} damage {}",
                combatant.name, health.hp, combatant.damage
            );
        }
        if combatant.capabilities.reacts_to_attack && set.has_own(AnimState::Attack) {
            anim.request(AnimState::Attack);
        }
    }
}
