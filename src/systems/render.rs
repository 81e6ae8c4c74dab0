//! Render output.
//!
//! [`sprite_sync`] runs last in the tick and writes each actor's visible
//! frame into its [`Sprite`], resizing the collider to match so the body box
//! always follows the frame on screen. [`render_snapshot`] then collects
//! everything a caller needs to draw one frame: actor sprites, hazard
//! telegraphs, projectiles and the two health bars. [`draw_snapshot`] is the
//! raylib rendition used by the demo binary, drawing placeholder boxes in
//! place of decoded images.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::animation::Animator;
use crate::components::animationset::AnimationSet;
use crate::components::boss::BossBrain;
use crate::components::boxcollider::BoxCollider;
use crate::components::combatant::Combatant;
use crate::components::facing::Facing;
use crate::components::hazard::{HazardField, HazardPhase};
use crate::components::health::Health;
use crate::components::mapposition::MapPosition;
use crate::components::player::{Player, PlayerController};
use crate::components::projectile::ProjectileVolley;
use crate::components::sprite::Sprite;
use crate::components::tint::Tint;
use crate::resources::encounter::Encounter;
use crate::resources::framestore::ImageHandle;
use crate::resources::worldtime::WorldTime;

const HAZARD_WARNING_COLOR: (u8, u8, u8) = (255, 180, 40);
const HAZARD_ACTIVE_COLOR: (u8, u8, u8) = (255, 160, 40);
const PROJECTILE_COLOR: Color = Color::GOLD;
const BOSS_BAR_WIDTH: f32 = 420.0;
const BOSS_BAR_HEIGHT: f32 = 18.0;

/// Copy the current frame of every actor into its [`Sprite`] and collider.
pub fn sprite_sync(
    mut query: Query<(
        &Animator,
        &AnimationSet,
        &Facing,
        &mut BoxCollider,
        &mut Sprite,
    )>,
) {
    for (anim, set, facing, mut collider, mut sprite) in query.iter_mut() {
        let index = anim.clock.frame_index;
        let size = set.frame_size(anim.state, index);
        if collider.size != size {
            collider.size = size;
        }
        sprite.image = set.frame(anim.state, index).map(|f| f.image.clone());
        sprite.size = size;
        sprite.flip_h = facing.flips(set.authored_facing);
        sprite.placeholder = set.placeholder_color;
    }
}

#[derive(Debug, Clone)]
pub struct SpriteView {
    pub entity: Entity,
    pub image: Option<ImageHandle>,
    pub placeholder: Color,
    /// Bottom-center anchored bounding box.
    pub rect: Rectangle,
    pub flip_h: bool,
    pub rotation: f32,
    pub tint: Color,
}

#[derive(Debug, Clone)]
pub struct HazardView {
    pub owner: Entity,
    pub rect: Rectangle,
    pub phase: HazardPhase,
    pub visible: bool,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct ProjectileView {
    pub owner: Entity,
    pub rect: Rectangle,
    pub rotation: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BossBar {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub fraction: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerBar {
    pub hp: u32,
    pub max_hp: u32,
    pub hearts: u32,
    pub alive: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RenderSnapshot {
    pub sprites: Vec<SpriteView>,
    pub hazards: Vec<HazardView>,
    pub projectiles: Vec<ProjectileView>,
    pub boss_bar: Option<BossBar>,
    pub player_bar: Option<PlayerBar>,
}

/// Gather everything visible after the last tick.
pub fn render_snapshot(world: &mut World) -> RenderSnapshot {
    let now = world.resource::<WorldTime>().now();
    let mut snapshot = RenderSnapshot::default();

    let mut player_index = None;
    let mut sprites =
        world.query::<(Entity, &Sprite, &MapPosition, Option<&Tint>, Has<Player>)>();
    for (entity, sprite, pos, tint, is_player) in sprites.iter(world) {
        if is_player {
            player_index = Some(snapshot.sprites.len());
        }
        let collider = BoxCollider { size: sprite.size };
        snapshot.sprites.push(SpriteView {
            entity,
            image: sprite.image.clone(),
            placeholder: sprite.placeholder,
            rect: collider.body_rect(pos.pos),
            flip_h: sprite.flip_h,
            rotation: sprite.rotation,
            tint: tint.map_or(Color::WHITE, |t| t.color),
        });
    }
    // Player on top.
    if let Some(idx) = player_index {
        let player = snapshot.sprites.remove(idx);
        snapshot.sprites.push(player);
    }

    let mut fields = world.query::<(Entity, &HazardField)>();
    for (owner, field) in fields.iter(world) {
        for hazard in &field.hazards {
            let phase = hazard.phase(now);
            if phase == HazardPhase::Expired {
                continue;
            }
            let (r, g, b) = match phase {
                HazardPhase::Warning => HAZARD_WARNING_COLOR,
                _ => HAZARD_ACTIVE_COLOR,
            };
            snapshot.hazards.push(HazardView {
                owner,
                rect: hazard.visual,
                phase,
                visible: hazard.visible(now),
                color: Color::new(r, g, b, hazard.alpha(now)),
            });
        }
    }

    let mut volleys = world.query::<(Entity, &ProjectileVolley)>();
    for (owner, volley) in volleys.iter(world) {
        for p in &volley.projectiles {
            snapshot.projectiles.push(ProjectileView {
                owner,
                rect: p.rect(),
                rotation: p.angle,
            });
        }
    }

    snapshot.boss_bar = boss_bar(world);

    let mut players =
        world.query_filtered::<(&Health, &PlayerController, &Combatant), With<Player>>();
    snapshot.player_bar = players
        .iter(world)
        .next()
        .map(|(health, ctrl, fighter)| PlayerBar {
            hp: health.hp,
            max_hp: health.max_hp,
            hearts: health.hearts(ctrl.hp_per_heart),
            alive: fighter.alive,
        });

    snapshot
}

/// Bar for the boss of the most recently entered room while it lives,
/// falling back to any living boss.
fn boss_bar(world: &mut World) -> Option<BossBar> {
    let current = world
        .get_resource::<Encounter>()
        .and_then(|e| e.current_boss);
    let mut bosses = world.query_filtered::<(Entity, &Health, &Combatant), With<BossBrain>>();
    let living: Vec<_> = bosses
        .iter(world)
        .filter(|(_, _, fighter)| fighter.alive)
        .map(|(entity, health, fighter)| {
            (
                entity,
                BossBar {
                    name: fighter.name.clone(),
                    hp: health.hp,
                    max_hp: health.max_hp,
                    fraction: health.fraction(),
                },
            )
        })
        .collect();
    living
        .iter()
        .find(|(entity, _)| Some(*entity) == current)
        .or_else(|| living.first())
        .map(|(_, bar)| bar.clone())
}

/// Fill `rect` turned `rotation` degrees around its center.
fn draw_rotated<D: RaylibDraw>(d: &mut D, rect: Rectangle, rotation: f32, color: Color) {
    if rotation == 0.0 {
        d.draw_rectangle_rec(rect, color);
        return;
    }
    let origin = Vector2::new(rect.width * 0.5, rect.height * 0.5);
    let centered = Rectangle {
        x: rect.x + origin.x,
        y: rect.y + origin.y,
        ..rect
    };
    d.draw_rectangle_pro(centered, origin, rotation, color);
}

/// Draw a snapshot with solid rectangles standing in for images.
pub fn draw_snapshot<D: RaylibDraw>(d: &mut D, snapshot: &RenderSnapshot, screen_width: f32) {
    for hazard in snapshot.hazards.iter().filter(|h| h.visible) {
        d.draw_rectangle_rec(hazard.rect, hazard.color);
    }

    for sprite in &snapshot.sprites {
        let color = Tint { color: sprite.tint }.multiply(sprite.placeholder);
        draw_rotated(d, sprite.rect, sprite.rotation, color);
    }

    for p in &snapshot.projectiles {
        draw_rotated(d, p.rect, p.rotation, PROJECTILE_COLOR);
    }

    if let Some(bar) = &snapshot.boss_bar {
        let x = (screen_width - BOSS_BAR_WIDTH) * 0.5;
        let y = 26.0;
        d.draw_rectangle_rec(
            Rectangle {
                x: x - 4.0,
                y: 2.0,
                width: BOSS_BAR_WIDTH + 8.0,
                height: BOSS_BAR_HEIGHT + 28.0,
            },
            Color::new(10, 10, 10, 180),
        );
        d.draw_text(&bar.name, x as i32, 5, 20, Color::new(230, 230, 230, 255));
        let full = Rectangle {
            x,
            y,
            width: BOSS_BAR_WIDTH,
            height: BOSS_BAR_HEIGHT,
        };
        d.draw_rectangle_rec(full, Color::new(60, 60, 60, 255));
        d.draw_rectangle_rec(
            Rectangle {
                width: BOSS_BAR_WIDTH * bar.fraction,
                ..full
            },
            Color::new(200, 40, 40, 255),
        );
        d.draw_rectangle_lines_ex(full, 2.0, Color::new(20, 20, 20, 255));
    }

    if let Some(bar) = snapshot.player_bar {
        for i in 0..bar.hearts {
            d.draw_rectangle(10 + i as i32 * 28, 12, 22, 20, Color::new(220, 20, 60, 255));
        }
    }
}
