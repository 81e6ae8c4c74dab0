//! World construction and the per-tick schedule.
//!
//! The caller owns the loop: build a world with [`new_world`] (or insert a
//! [`FrameStore`] and call [`build_world`]), build the schedule once with
//! [`build_schedule`], then call [`tick`] with the measured frame time.
//! Everything the caller needs to draw comes out of
//! [`render_snapshot`](crate::systems::render::render_snapshot).
use bevy_ecs::prelude::*;
use log::info;
use raylib::prelude::{Color, Vector2};

use crate::components::animation::{AnimState, Animator};
use crate::components::animationset::{AnimationSet, FrameDelays};
use crate::components::boss::{BossBrain, BossKind};
use crate::components::boxcollider::BoxCollider;
use crate::components::combatant::{Capabilities, Combatant, Faction};
use crate::components::facing::Facing;
use crate::components::fury::Fury;
use crate::components::hazard::HazardField;
use crate::components::health::Health;
use crate::components::mapposition::MapPosition;
use crate::components::player::{Player, PlayerController};
use crate::components::projectile::ProjectileVolley;
use crate::components::rigidbody::RigidBody;
use crate::components::soundcues::SoundCues;
use crate::components::sprite::Sprite;
use crate::components::tint::Tint;
use crate::error::{CoreError, Result};
use crate::resources::bosstuning::BossRoster;
use crate::resources::encounter::Encounter;
use crate::resources::framestore::FrameStore;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputCommands;
use crate::resources::playfield::Playfield;
use crate::resources::rng::GameRng;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation;
use crate::systems::behavior::boss_behavior;
use crate::systems::collision::collision;
use crate::systems::encounter::{advance_room, reap_dead_bosses, track_outcome};
use crate::systems::hazard::cleanup_hazards;
use crate::systems::health::{resolve_damage, tick_grace_windows};
use crate::systems::messages::{init_messages, update_combat_messages};
use crate::systems::movement::movement;
use crate::systems::player::player_control;
use crate::systems::projectile::advance_projectiles;
use crate::systems::render::sprite_sync;
use crate::systems::time::update_world_time;

/// Frame store prefix of the player's sequences and sounds.
pub const PLAYER_PREFIX: &str = "dante";
pub const PLAYER_NAME: &str = "Dante";
const PLAYER_SIZE: Vector2 = Vector2 { x: 64.0, y: 110.0 };
const PLAYER_COLOR: Color = Color {
    r: 70,
    g: 110,
    b: 220,
    a: 255,
};
/// Walk frame reused as the idle pose when no idle frames are supplied.
const IDLE_FROM_WALK_FRAME: usize = 5;

pub fn player_frame_delays() -> FrameDelays {
    FrameDelays {
        idle: 200,
        walk: 200,
        attack: 30,
        hurt: 120,
        die: 200,
    }
}

/// Player animation set, borrowing a walk frame for idle when needed.
pub fn player_animation_set(store: &FrameStore) -> AnimationSet {
    let mut set = AnimationSet::from_store(
        store,
        PLAYER_PREFIX,
        &player_frame_delays(),
        Facing::Right,
        PLAYER_SIZE,
        PLAYER_COLOR,
    );
    if !set.has_own(AnimState::Idle) {
        let walk = store.sequence(&format!("{PLAYER_PREFIX}/walk"));
        if let Some(last) = walk.len().checked_sub(1) {
            set.insert(AnimState::Idle, vec![walk[IDLE_FROM_WALK_FRAME.min(last)].clone()]);
        }
    }
    set
}

pub fn spawn_player(world: &mut World) -> Entity {
    let config = world.get_resource::<GameConfig>().cloned().unwrap_or_default();
    let playfield = world.get_resource::<Playfield>().copied().unwrap_or_default();
    let set = world
        .get_resource::<FrameStore>()
        .map(player_animation_set)
        .unwrap_or_else(|| {
            AnimationSet::new(Facing::Right, PLAYER_SIZE, PLAYER_COLOR)
                .with_delays(player_frame_delays())
        });
    let sounds = world
        .get_resource::<FrameStore>()
        .map(|store| SoundCues::from_store(store, PLAYER_PREFIX))
        .unwrap_or_default();
    let size = set.frame_size(AnimState::Idle, 0);

    let controller = PlayerController {
        move_speed: config.move_speed,
        jump_power: config.jump_power,
        max_jumps: config.max_jumps,
        jumps_left: config.max_jumps,
        attack_range: config.attack_range,
        hp_per_heart: config.hp_per_heart,
        pending_strike: false,
    };
    let mut body = RigidBody::grounded_walker(config.gravity);
    body.confined = true;
    let capabilities = Capabilities {
        hit_stop: true,
        hurt_lock: true,
        hurt_before_death: true,
        ..Capabilities::default()
    };

    let entity = world
        .spawn((
            Player,
            controller,
            MapPosition::new(playfield.width * 0.5, playfield.floor_y()),
            Facing::Right,
            body,
            BoxCollider::new(size.x, size.y),
            Animator::default(),
            set,
            Health::new(config.player_max_hp).with_grace(config.grace_ms),
            Combatant::new(PLAYER_NAME, Faction::Player, config.attack_damage)
                .with_capabilities(capabilities),
            Tint::default(),
            Sprite::placeholder(size, PLAYER_COLOR),
            sounds,
        ))
        .id();
    info!("Spawned {} ({} hp)", PLAYER_NAME, config.player_max_hp);
    entity
}

/// Spawn the boss of `kind` using its roster tuning.
///
/// Needs a [`FrameStore`]; the roster falls back to the canonical set.
pub fn spawn_boss_in_world(world: &mut World, kind: BossKind) -> Result<Entity> {
    let tuning = world
        .get_resource::<BossRoster>()
        .cloned()
        .unwrap_or_default()
        .require(kind)?
        .clone();
    let store = world
        .get_resource::<FrameStore>()
        .ok_or(CoreError::MissingFrameStore)?;
    let [width, height] = tuning.size;
    let [r, g, b, a] = tuning.color;
    let color = Color::new(r, g, b, a);
    let size = Vector2::new(width, height);
    let prefix = kind.asset_prefix();
    let set = AnimationSet::from_store(
        store,
        prefix,
        &tuning.frame_delays,
        tuning.authored_facing,
        size,
        color,
    );
    let sounds = SoundCues::from_store(store, prefix);
    let frame_size = set.frame_size(AnimState::Idle, 0);

    let playfield = world.get_resource::<Playfield>().copied().unwrap_or_default();
    let window_ms = world
        .get_resource::<GameConfig>()
        .map_or(GameConfig::new().first_strike_window_ms, |c| {
            c.first_strike_window_ms
        });

    let brain = BossBrain::new(kind, tuning.movement, tuning.attack_interval_ms)
        .with_patterns(tuning.patterns.iter().copied())
        .with_timing(tuning.windup_ms, tuning.recovery_ms)
        .with_attack_range(tuning.attack_range);
    let body = RigidBody {
        lands_on_floor: true,
        grounded: tuning.spawn_height <= 0.0,
        confined: true,
        ..RigidBody::new()
    };
    let spawn_x = playfield.width * 0.5 + tuning.spawn_offset_x;

    let mut entity = world.spawn((
        brain,
        MapPosition::new(spawn_x, playfield.floor_y() - tuning.spawn_height),
        Facing::Left,
        body,
        BoxCollider::new(frame_size.x, frame_size.y),
        Animator::default(),
        set,
        Health::new(tuning.max_hp),
        Combatant::new(kind.display_name(), Faction::Boss, tuning.damage)
            .with_capabilities(tuning.capabilities),
        HazardField::default(),
        ProjectileVolley::default(),
        Tint::default(),
        Sprite::placeholder(frame_size, color),
        sounds,
    ));
    if let Some(multiplier) = tuning.fury_multiplier {
        entity.insert(Fury::new(multiplier, window_ms));
    }
    let id = entity.id();
    info!(
        "Spawned {} ({} hp, {} damage)",
        kind.display_name(),
        tuning.max_hp,
        tuning.damage
    );
    Ok(id)
}

/// Insert default resources, spawn the player and the first room's boss.
///
/// A [`FrameStore`] must already be present. Resources the caller inserted
/// beforehand are kept.
pub fn build_world(world: &mut World) -> Result<()> {
    if !world.contains_resource::<FrameStore>() {
        return Err(CoreError::MissingFrameStore);
    }
    if !world.contains_resource::<GameConfig>() {
        world.insert_resource(GameConfig::new());
    }
    let config = world.resource::<GameConfig>().clone();
    world.init_resource::<BossRoster>();
    if !world.contains_resource::<Playfield>() {
        world.insert_resource(Playfield::new(
            config.window_width as f32,
            config.window_height as f32,
            config.floor_margin,
        ));
    }
    if !world.contains_resource::<WorldTime>() {
        world.insert_resource(WorldTime::default().with_time_scale(1.0));
    }
    if !world.contains_resource::<GameRng>() {
        world.insert_resource(GameRng::from_optional_seed(config.seed));
    }
    if !world.contains_resource::<Encounter>() {
        world.insert_resource(
            Encounter::default().with_exits(config.exit_margin, config.entry_x),
        );
    }
    world.init_resource::<InputCommands>();
    init_messages(world);

    let rooms = world.resource::<Encounter>().rooms.clone();
    let first = *rooms.first().ok_or(CoreError::EmptyEncounter)?;
    {
        let roster = world.resource::<BossRoster>();
        for kind in &rooms {
            roster.require(*kind)?;
        }
    }

    spawn_player(world);
    let boss = spawn_boss_in_world(world, first)?;
    world.resource_mut::<Encounter>().current_boss = Some(boss);
    info!("World ready: {} rooms", rooms.len());
    Ok(())
}

/// Fresh world from a config, a roster and decoded assets.
pub fn new_world(config: GameConfig, roster: BossRoster, store: FrameStore) -> Result<World> {
    let mut world = World::new();
    world.insert_resource(config);
    world.insert_resource(roster);
    world.insert_resource(store);
    build_world(&mut world)?;
    Ok(world)
}

/// The per-tick system chain.
///
/// Movement and animation run before collision; damage is resolved before
/// sprites are synced, so each tick's output reflects that tick's damage.
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            update_combat_messages,
            player_control,
            boss_behavior,
            movement,
            advance_projectiles,
            cleanup_hazards,
            tick_grace_windows,
            animation,
            collision,
            resolve_damage,
            sprite_sync,
            track_outcome,
            advance_room,
            reap_dead_bosses,
        )
            .chain(),
    );
    schedule
}

/// Advance simulation time by `dt_ms` and run one tick.
pub fn tick(world: &mut World, schedule: &mut Schedule, dt_ms: u32) {
    update_world_time(world, dt_ms);
    schedule.run(world);
    world.clear_trackers();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_world_requires_frame_store() {
        let mut world = World::new();
        assert!(matches!(build_world(&mut world), Err(CoreError::MissingFrameStore)));
    }

    #[test]
    fn test_empty_encounter_is_error() {
        let mut world = World::new();
        world.insert_resource(FrameStore::new());
        world.insert_resource(Encounter::new(Vec::new()));
        assert!(matches!(build_world(&mut world), Err(CoreError::EmptyEncounter)));
    }

    #[test]
    fn test_roster_missing_room_kind_is_error() {
        let roster = BossRoster {
            bosses: vec![crate::resources::bosstuning::BossTuning::ira()],
        };
        let result = new_world(GameConfig::new(), roster, FrameStore::new());
        assert!(matches!(result, Err(CoreError::UnknownBoss(BossKind::Gula))));
    }

    #[test]
    fn test_idle_borrows_walk_frame() {
        let store =
            FrameStore::new().with_placeholder_frames(PLAYER_PREFIX, &[("walk", 8)], 60.0, 100.0);
        let set = player_animation_set(&store);
        assert!(set.has_own(AnimState::Idle));
        let idle = set.frame(AnimState::Idle, 0).unwrap();
        assert_eq!(idle.image.key(), "dante/walk/5");

        let short =
            FrameStore::new().with_placeholder_frames(PLAYER_PREFIX, &[("walk", 3)], 60.0, 100.0);
        let set = player_animation_set(&short);
        assert_eq!(set.frame(AnimState::Idle, 0).unwrap().image.key(), "dante/walk/2");
    }

    #[test]
    fn test_new_world_spawns_player_and_first_boss() {
        let mut world =
            new_world(GameConfig::new(), BossRoster::default(), FrameStore::new()).unwrap();
        let mut players = world.query_filtered::<&Health, With<Player>>();
        assert_eq!(players.iter(&world).count(), 1);
        let mut bosses = world.query::<(&BossBrain, Has<Fury>)>();
        let found: Vec<_> = bosses.iter(&world).map(|(b, f)| (b.kind, f)).collect();
        assert_eq!(found, vec![(BossKind::Gula, true)]);
        assert!(world.resource::<Encounter>().current_boss.is_some());
    }
}
