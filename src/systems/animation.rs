//! Animation system.
//!
//! Advances each actor's [`FrameClock`](crate::components::animation::FrameClock)
//! with the delay and frame count of its current state, and handles one-shot
//! completion:
//!
//! - `Attack` returns to `Idle`; locomotion picks `Walk` again next tick
//! - `Hurt` goes to `Dying` when HP is gone, otherwise back to `Idle`
//! - `Dying` freezes on its last frame as `Dead`, clears the alive flag and
//!   writes [`EntityDied`]
//!
//! # Related
//!
//! - [`crate::components::animation::Animator`] – per-actor state machine
//! - [`crate::components::animationset::AnimationSet`] – frames and delays per state
use bevy_ecs::prelude::*;
use log::info;

use crate::components::animation::{AnimState, Animator, Playback};
use crate::components::animationset::AnimationSet;
use crate::components::combatant::Combatant;
use crate::components::health::Health;
use crate::components::soundcues::SoundCues;
use crate::events::audio::SoundCue;
use crate::events::combat::EntityDied;
use crate::resources::worldtime::WorldTime;

type AnimatedQueryData = (
    Entity,
    &'static mut Animator,
    &'static AnimationSet,
    &'static Health,
    &'static mut Combatant,
    Option<&'static SoundCues>,
);

pub fn animation(
    time: Res<WorldTime>,
    mut query: Query<AnimatedQueryData>,
    mut died: MessageWriter<EntityDied>,
    mut cues: MessageWriter<SoundCue>,
) {
    for (entity, mut anim, set, health, mut combatant, sounds) in query.iter_mut() {
        let state = anim.state;
        if state == AnimState::Dead {
            continue;
        }
        let (count, delay) = set.timing(state);
        let step = anim
            .clock
            .advance(time.delta_ms, delay, count, state.playback());
        if state.playback() != Playback::Once || !step.wrapped {
            continue;
        }

        match state {
            AnimState::Attack => {
                anim.set_state(AnimState::Idle);
            }
            AnimState::Hurt => {
                if health.is_depleted() {
                    anim.set_state(AnimState::Dying);
                    if let Some(handle) = sounds.and_then(|s| s.death.clone()) {
                        cues.write(SoundCue { entity, handle });
                    }
                } else {
                    anim.set_state(AnimState::Idle);
                }
            }
            AnimState::Dying => {
                anim.finish_dying(count.saturating_sub(1));
                combatant.alive = false;
                info!("{} died", combatant.name);
                died.write(EntityDied {
                    entity,
                    faction: combatant.faction,
                    name: combatant.name.clone(),
                });
            }
            AnimState::Idle | AnimState::Walk | AnimState::Dead => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::combatant::Faction;
    use crate::components::facing::Facing;
    use crate::resources::framestore::Frame;
    use raylib::prelude::{Color, Vector2};

    fn frames(n: usize) -> Vec<Frame> {
        (0..n).map(|i| Frame::new(&format!("f{i}"), 10.0, 10.0)).collect()
    }

    fn world_with_actor(state: AnimState, hp: u32) -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            delta_ms: 100,
            ..WorldTime::default()
        });
        world.init_resource::<Messages<EntityDied>>();
        world.init_resource::<Messages<SoundCue>>();
        let set = AnimationSet::new(Facing::Right, Vector2::new(10.0, 10.0), Color::GRAY)
            .with_delays(crate::components::animationset::FrameDelays::uniform(100))
            .with_track(AnimState::Idle, frames(2))
            .with_track(AnimState::Attack, frames(2))
            .with_track(AnimState::Dying, frames(3));
        let mut health = Health::new(50);
        health.hp = hp;
        let e = world
            .spawn((
                Animator::new(state),
                set,
                health,
                Combatant::new("actor", Faction::Boss, 1),
            ))
            .id();
        (world, e)
    }

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(animation);
        schedule.run(world);
    }

    #[test]
    fn test_attack_returns_to_idle() {
        let (mut world, e) = world_with_actor(AnimState::Attack, 50);
        run(&mut world);
        assert_eq!(world.get::<Animator>(e).unwrap().state, AnimState::Attack);
        run(&mut world);
        let anim = world.get::<Animator>(e).unwrap();
        assert_eq!(anim.state, AnimState::Idle);
        assert_eq!(anim.clock.frame_index, 0);
    }

    #[test]
    fn test_hurt_with_no_hp_goes_dying() {
        let (mut world, e) = world_with_actor(AnimState::Hurt, 0);
        run(&mut world);
        run(&mut world);
        assert_eq!(world.get::<Animator>(e).unwrap().state, AnimState::Dying);
    }

    #[test]
    fn test_dying_completes_once_and_reports() {
        let (mut world, e) = world_with_actor(AnimState::Dying, 0);
        for _ in 0..6 {
            run(&mut world);
        }
        let anim = world.get::<Animator>(e).unwrap();
        assert_eq!(anim.state, AnimState::Dead);
        assert_eq!(anim.clock.frame_index, 2);
        assert!(!world.get::<Combatant>(e).unwrap().alive);
        let died: Vec<_> = world.resource_mut::<Messages<EntityDied>>().drain().collect();
        assert_eq!(died.len(), 1);
        assert_eq!(died[0].entity, e);
    }
}
