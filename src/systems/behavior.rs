//! Boss behaviour system.
//!
//! Runs every boss brain against the living player and applies the returned
//! intent: velocity, facing, the attack animation and whatever pattern fired.
//! A boss that starts dying drops every hazard and projectile it owns.
use bevy_ecs::prelude::*;
use log::debug;
use raylib::prelude::Vector2;

use crate::components::animation::{AnimState, Animator};
use crate::components::boss::{AttackPattern, BossBrain, BossContext};
use crate::components::boxcollider::BoxCollider;
use crate::components::combatant::Combatant;
use crate::components::facing::Facing;
use crate::components::fury::Fury;
use crate::components::hazard::HazardField;
use crate::components::health::Health;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::projectile::{Projectile, ProjectileVolley};
use crate::components::rigidbody::RigidBody;
use crate::components::soundcues::SoundCues;
use crate::events::audio::SoundCue;
use crate::resources::playfield::Playfield;
use crate::resources::rng::GameRng;
use crate::resources::worldtime::WorldTime;

type TargetQueryData = (
    &'static MapPosition,
    &'static BoxCollider,
    &'static Combatant,
    &'static Animator,
);

type BossQueryData = (
    Entity,
    &'static mut BossBrain,
    &'static MapPosition,
    &'static BoxCollider,
    &'static mut RigidBody,
    &'static mut Facing,
    &'static mut Animator,
    &'static Health,
    &'static Combatant,
    Option<&'static mut Fury>,
    (&'static mut HazardField, &'static mut ProjectileVolley),
    Option<&'static SoundCues>,
);

pub fn boss_behavior(
    time: Res<WorldTime>,
    playfield: Res<Playfield>,
    mut rng: ResMut<GameRng>,
    players: Query<TargetQueryData, With<Player>>,
    mut bosses: Query<BossQueryData, Without<Player>>,
    mut cues: MessageWriter<SoundCue>,
) {
    let target = players
        .iter()
        .find(|(_, _, combatant, anim)| combatant.alive && !anim.is_dying_or_dead())
        .map(|(pos, collider, _, _)| collider.center(pos.pos));

    for (
        entity,
        mut brain,
        pos,
        collider,
        mut body,
        mut facing,
        mut anim,
        health,
        combatant,
        fury,
        (mut hazards, mut volley),
        sounds,
    ) in bosses.iter_mut()
    {
        let was_dying = brain.is_dying();
        let ctx = BossContext {
            now_ms: time.now(),
            delta_ms: time.delta_ms,
            position: pos.pos,
            target,
            playfield: *playfield,
            depleted: health.is_depleted(),
        };
        let intent = brain.step(&ctx, &mut rng.0);

        if brain.is_dying() {
            body.halt();
            if !was_dying {
                hazards.clear();
                volley.clear();
                debug!("{} stops attacking", combatant.name);
            }
            continue;
        }

        body.velocity = if anim.is_locked() {
            Vector2::zero()
        } else {
            intent.velocity
        };
        if let Some(f) = intent.facing {
            *facing = f;
        }

        if intent.started_windup {
            if let Some(mut fury) = fury {
                fury.notify_boss_acted();
            }
            if anim.request(AnimState::Attack)
                && let Some(handle) = sounds.and_then(|s| s.attack.clone())
            {
                cues.write(SoundCue { entity, handle });
            }
        }

        if intent.fire.is_some() && anim.is_locked() {
            debug!("{} is hurt and loses its attack", combatant.name);
        } else if let Some(pattern) = intent.fire {
            let now = time.now();
            match pattern {
                AttackPattern::GroundHazards(layout) => {
                    hazards.spawn_volley(&mut rng.0, now, &playfield, &layout, combatant.damage);
                    debug!("{} raises {} hazards", combatant.name, layout.count);
                }
                AttackPattern::AimedShot(shot) => match target {
                    Some(aim) => {
                        let origin = leading_edge(pos.pos, collider, *facing);
                        let damage = scaled_damage(combatant.damage, shot.damage_factor);
                        volley.push(Projectile::aimed(origin, aim, &shot, damage));
                    }
                    None => debug!("{} has no target, shot skipped", combatant.name),
                },
                AttackPattern::Thrown(shot) => match target {
                    Some(_) => {
                        let origin = leading_edge(pos.pos, collider, *facing);
                        let damage = scaled_damage(combatant.damage, shot.damage_factor);
                        volley.push(Projectile::thrown(origin, facing.sign(), &shot, damage));
                    }
                    None => debug!("{} has no target, throw skipped", combatant.name),
                },
            }
        }

        anim.locomote(body.velocity.x != 0.0);
    }
}

/// Point on the front edge of the body, halfway up.
fn leading_edge(anchor: Vector2, collider: &BoxCollider, facing: Facing) -> Vector2 {
    let center = collider.center(anchor);
    Vector2::new(center.x + facing.sign() * collider.size.x * 0.5, center.y)
}

fn scaled_damage(damage: u32, factor: f32) -> u32 {
    ((damage as f32 * factor) as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::boss::{BossBehavior, BossKind, Movement};
    use crate::components::combatant::Faction;
    use crate::components::hazard::HazardLayout;
    use crate::components::projectile::{AimedShot, ThrownShot};

    const FLOOR_Y: f32 = 710.0;

    fn make_world() -> World {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            delta_ms: 16,
            ..WorldTime::default()
        });
        world.insert_resource(Playfield::new(1280.0, 720.0, 10.0));
        world.insert_resource(GameRng::seeded(7));
        world.init_resource::<Messages<SoundCue>>();
        world
    }

    /// Boss that fires `pattern` on its first tick.
    fn spawn_boss(world: &mut World, pattern: AttackPattern) -> Entity {
        let brain =
            BossBrain::new(BossKind::Gula, Movement::Stationary, 10).with_patterns([pattern]);
        world
            .spawn((
                brain,
                MapPosition::new(900.0, FLOOR_Y),
                BoxCollider::new(120.0, 160.0),
                RigidBody::new(),
                Facing::Left,
                Animator::default(),
                Health::new(100),
                Combatant::new("GULA", Faction::Boss, 20),
                (HazardField::default(), ProjectileVolley::default()),
            ))
            .id()
    }

    fn spawn_player(world: &mut World) {
        world.spawn((
            Player,
            MapPosition::new(300.0, FLOOR_Y),
            BoxCollider::new(64.0, 110.0),
            Combatant::new("Dante", Faction::Player, 10),
            Animator::default(),
        ));
    }

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(boss_behavior);
        schedule.run(world);
    }

    fn fired(pattern: AttackPattern, with_player: bool) -> (usize, usize) {
        let mut world = make_world();
        if with_player {
            spawn_player(&mut world);
        }
        let boss = spawn_boss(&mut world, pattern);
        run(&mut world);
        assert!(matches!(
            world.get::<BossBrain>(boss).unwrap().behavior,
            BossBehavior::Recovery { .. }
        ));
        let hazards = world.get::<HazardField>(boss).unwrap().hazards.len();
        let shots = world.get::<ProjectileVolley>(boss).unwrap().len();
        (hazards, shots)
    }

    #[test]
    fn test_ranged_patterns_skip_without_player() {
        let aimed = AttackPattern::AimedShot(AimedShot::default());
        let thrown = AttackPattern::Thrown(ThrownShot::default());
        assert_eq!(fired(aimed, false), (0, 0));
        assert_eq!(fired(thrown, false), (0, 0));
        assert_eq!(fired(aimed, true), (0, 1));
        assert_eq!(fired(thrown, true), (0, 1));
    }

    #[test]
    fn test_ground_hazards_spawn_without_player() {
        let layout = HazardLayout::default();
        let (hazards, shots) = fired(AttackPattern::GroundHazards(layout), false);
        assert_eq!(hazards, layout.count as usize);
        assert_eq!(shots, 0);
    }

    #[test]
    fn test_hurt_boss_loses_its_attack() {
        let mut world = make_world();
        spawn_player(&mut world);
        let boss = spawn_boss(&mut world, AttackPattern::GroundHazards(HazardLayout::default()));
        world.get_mut::<Animator>(boss).unwrap().set_state(AnimState::Hurt);
        run(&mut world);
        assert!(world.get::<HazardField>(boss).unwrap().is_empty());
        assert_eq!(world.get::<Animator>(boss).unwrap().state, AnimState::Hurt);
        assert_eq!(world.get::<RigidBody>(boss).unwrap().velocity, Vector2::zero());
    }

    #[test]
    fn test_leading_edge_follows_facing() {
        let collider = BoxCollider::new(100.0, 80.0);
        let anchor = Vector2::new(500.0, 700.0);
        let right = leading_edge(anchor, &collider, Facing::Right);
        assert_eq!(right.x, 550.0);
        assert_eq!(right.y, 660.0);
        assert_eq!(leading_edge(anchor, &collider, Facing::Left).x, 450.0);
    }

    #[test]
    fn test_scaled_damage_never_zero() {
        assert_eq!(scaled_damage(10, 0.5), 5);
        assert_eq!(scaled_damage(1, 0.5), 1);
    }
}
