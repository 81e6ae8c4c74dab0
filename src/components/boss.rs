//! Boss behaviour controller.
//!
//! Every boss runs the same behaviour loop:
//!
//! ```text
//! Approach ──(attack timer ≥ interval)──▶ Windup ──▶ Recovery ──▶ Approach
//!     any state ──(HP = 0)──▶ Dying
//! ```
//!
//! What differs between bosses is data: the [`Movement`] used while
//! approaching, the [`AttackPattern`]s fired at the end of a windup, and
//! whether the attack timer only runs while the target is in range.
//!
//! [`BossBrain::step`] is pure apart from the random source: it reads a
//! [`BossContext`] and returns a [`BossIntent`] that
//! [`boss_behavior`](crate::systems::behavior::boss_behavior) applies.
use arrayvec::ArrayVec;
use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;
use serde::{Deserialize, Serialize};

use crate::components::facing::Facing;
use crate::components::hazard::HazardLayout;
use crate::components::projectile::{AimedShot, ThrownShot};
use crate::resources::playfield::Playfield;

/// Most patterns a single boss cycles through.
pub const MAX_PATTERNS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossKind {
    /// Wrath: stationary, rains ground hazards.
    Ira,
    /// Gluttony: patrols, hurts on contact, alternates hazards and throws.
    Gula,
    /// Greed: keeps its distance and shoots coins.
    Ganancia,
}

impl BossKind {
    pub fn display_name(self) -> &'static str {
        match self {
            BossKind::Ira => "IRA",
            BossKind::Gula => "GULA",
            BossKind::Ganancia => "GANANCIA",
        }
    }

    /// Prefix of this boss's sequences in the frame store.
    pub fn asset_prefix(self) -> &'static str {
        match self {
            BossKind::Ira => "ira",
            BossKind::Gula => "gula",
            BossKind::Ganancia => "ganancia",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Movement {
    Stationary,
    /// Walk back and forth between `edge_margin` and `width - edge_margin`.
    Patrol { speed: f32, edge_margin: f32 },
    /// Walk toward the target until within `stop_distance`.
    Chase { speed: f32, stop_distance: f32 },
    /// Close in until the target is within `range`, then hold.
    KeepRange { speed: f32, range: f32 },
    /// Fly between random points inside the given band above the floor.
    Wander {
        speed: f32,
        edge_margin: f32,
        min_height: f32,
        max_height: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttackPattern {
    GroundHazards(HazardLayout),
    AimedShot(AimedShot),
    Thrown(ThrownShot),
}

impl AttackPattern {
    /// Patterns that need a target to aim at.
    pub fn needs_target(&self) -> bool {
        matches!(self, AttackPattern::AimedShot(_) | AttackPattern::Thrown(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BossBehavior {
    Approach,
    Windup { until_ms: u64 },
    Recovery { until_ms: u64 },
    Dying,
}

/// What the brain sees this tick.
#[derive(Debug, Clone, Copy)]
pub struct BossContext {
    pub now_ms: u64,
    pub delta_ms: u32,
    /// Bottom-center anchor of the boss.
    pub position: Vector2,
    /// Center of the tracked target, if any.
    pub target: Option<Vector2>,
    pub playfield: Playfield,
    pub depleted: bool,
}

/// What the brain wants applied this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossIntent {
    pub velocity: Vector2,
    pub facing: Option<Facing>,
    /// The boss committed to an attack this tick.
    pub started_windup: bool,
    pub fire: Option<AttackPattern>,
}

impl BossIntent {
    fn idle() -> Self {
        Self {
            velocity: Vector2::zero(),
            facing: None,
            started_windup: false,
            fire: None,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct BossBrain {
    pub kind: BossKind,
    pub behavior: BossBehavior,
    pub movement: Movement,
    pub patterns: ArrayVec<AttackPattern, MAX_PATTERNS>,
    pub next_pattern: usize,
    pub attack_interval_ms: u32,
    /// Time accumulated toward the next attack.
    pub attack_timer_ms: u32,
    pub windup_ms: u32,
    pub recovery_ms: u32,
    /// When set, the attack timer only runs while the target is this close
    /// horizontally, and resets when it leaves.
    pub attack_range: Option<f32>,
    patrol_dir: f32,
    wander_goal: Option<Vector2>,
}

impl BossBrain {
    pub fn new(kind: BossKind, movement: Movement, attack_interval_ms: u32) -> Self {
        Self {
            kind,
            behavior: BossBehavior::Approach,
            movement,
            patterns: ArrayVec::new(),
            next_pattern: 0,
            attack_interval_ms,
            attack_timer_ms: 0,
            windup_ms: 0,
            recovery_ms: 0,
            attack_range: None,
            patrol_dir: 1.0,
            wander_goal: None,
        }
    }

    /// Extra patterns beyond [`MAX_PATTERNS`] are dropped.
    pub fn with_patterns(mut self, patterns: impl IntoIterator<Item = AttackPattern>) -> Self {
        self.patterns = patterns.into_iter().take(MAX_PATTERNS).collect();
        self
    }

    pub fn with_timing(mut self, windup_ms: u32, recovery_ms: u32) -> Self {
        self.windup_ms = windup_ms;
        self.recovery_ms = recovery_ms;
        self
    }

    pub fn with_attack_range(mut self, range: Option<f32>) -> Self {
        self.attack_range = range;
        self
    }

    pub fn is_dying(&self) -> bool {
        self.behavior == BossBehavior::Dying
    }

    /// Run one tick of the behaviour loop.
    pub fn step(&mut self, ctx: &BossContext, rng: &mut fastrand::Rng) -> BossIntent {
        let mut intent = BossIntent::idle();
        if ctx.depleted || self.is_dying() {
            self.behavior = BossBehavior::Dying;
            return intent;
        }

        if self.behavior == BossBehavior::Approach {
            let (velocity, facing) = self.approach(ctx, rng);
            intent.velocity = velocity;
            intent.facing = facing;

            if self.tick_attack_timer(ctx) {
                self.attack_timer_ms = 0;
                self.behavior = BossBehavior::Windup {
                    until_ms: ctx.now_ms + self.windup_ms as u64,
                };
                intent.started_windup = true;
                intent.velocity = Vector2::zero();
            }
        } else if let Some(target) = ctx.target {
            intent.facing = Some(Facing::Right.toward(target.x - ctx.position.x));
        }

        if let BossBehavior::Windup { until_ms } = self.behavior
            && ctx.now_ms >= until_ms
        {
            intent.fire = self.take_pattern();
            self.behavior = BossBehavior::Recovery {
                until_ms: ctx.now_ms + self.recovery_ms as u64,
            };
        }

        if let BossBehavior::Recovery { until_ms } = self.behavior
            && ctx.now_ms >= until_ms
            && !intent.started_windup
            && intent.fire.is_none()
        {
            self.behavior = BossBehavior::Approach;
        }

        if intent.facing.is_none()
            && let Movement::Patrol { .. } = self.movement
        {
            intent.facing = Some(Facing::Right.toward(self.patrol_dir));
        }
        intent
    }

    /// Advance the attack timer. Returns true when the interval elapsed.
    fn tick_attack_timer(&mut self, ctx: &BossContext) -> bool {
        if let Some(range) = self.attack_range {
            let in_range = ctx
                .target
                .is_some_and(|t| (t.x - ctx.position.x).abs() <= range);
            if !in_range {
                self.attack_timer_ms = 0;
                return false;
            }
        }
        self.attack_timer_ms = self.attack_timer_ms.saturating_add(ctx.delta_ms);
        self.attack_timer_ms >= self.attack_interval_ms
    }

    fn take_pattern(&mut self) -> Option<AttackPattern> {
        if self.patterns.is_empty() {
            return None;
        }
        let pattern = self.patterns[self.next_pattern % self.patterns.len()];
        self.next_pattern = (self.next_pattern + 1) % self.patterns.len();
        Some(pattern)
    }

    fn approach(
        &mut self,
        ctx: &BossContext,
        rng: &mut fastrand::Rng,
    ) -> (Vector2, Option<Facing>) {
        let target_facing = ctx
            .target
            .map(|t| Facing::Right.toward(t.x - ctx.position.x));
        match self.movement {
            Movement::Stationary => (Vector2::zero(), target_facing),
            Movement::Patrol { speed, edge_margin } => {
                let min_x = edge_margin;
                let max_x = (ctx.playfield.width - edge_margin).max(min_x);
                if ctx.position.x <= min_x {
                    self.patrol_dir = 1.0;
                } else if ctx.position.x >= max_x {
                    self.patrol_dir = -1.0;
                }
                (
                    Vector2::new(speed * self.patrol_dir, 0.0),
                    Some(Facing::Right.toward(self.patrol_dir)),
                )
            }
            Movement::Chase {
                speed,
                stop_distance,
            } => match ctx.target {
                Some(t) => {
                    let dx = t.x - ctx.position.x;
                    let vx = if dx.abs() > stop_distance {
                        speed * dx.signum()
                    } else {
                        0.0
                    };
                    (Vector2::new(vx, 0.0), target_facing)
                }
                None => (Vector2::zero(), None),
            },
            Movement::KeepRange { speed, range } => match ctx.target {
                Some(t) => {
                    let dx = t.x - ctx.position.x;
                    let vx = if dx.abs() > range {
                        speed * dx.signum()
                    } else {
                        0.0
                    };
                    (Vector2::new(vx, 0.0), target_facing)
                }
                None => (Vector2::zero(), None),
            },
            Movement::Wander {
                speed,
                edge_margin,
                min_height,
                max_height,
            } => {
                let goal = match self.wander_goal {
                    Some(goal) => goal,
                    None => {
                        let goal = pick_wander_goal(
                            rng,
                            &ctx.playfield,
                            edge_margin,
                            min_height,
                            max_height,
                        );
                        self.wander_goal = Some(goal);
                        goal
                    }
                };
                let dx = goal.x - ctx.position.x;
                let dy = goal.y - ctx.position.y;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist < speed.max(f32::EPSILON) {
                    self.wander_goal = None;
                    (Vector2::zero(), target_facing)
                } else {
                    let v = Vector2::new(speed * dx / dist, speed * dy / dist);
                    (v, Some(Facing::Right.toward(v.x)))
                }
            }
        }
    }
}

fn pick_wander_goal(
    rng: &mut fastrand::Rng,
    playfield: &Playfield,
    edge_margin: f32,
    min_height: f32,
    max_height: f32,
) -> Vector2 {
    let min_x = edge_margin.max(0.0) as u32;
    let max_x = (playfield.width - edge_margin).max(min_x as f32) as u32;
    let low = min_height.min(max_height).max(0.0) as u32;
    let high = max_height.max(min_height).max(0.0) as u32;
    let x = rng.u32(min_x..=max_x) as f32;
    let height = rng.u32(low..=high) as f32;
    Vector2::new(x, playfield.floor_y() - height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(now: u64, delta: u32, x: f32, target: Option<f32>) -> BossContext {
        BossContext {
            now_ms: now,
            delta_ms: delta,
            position: Vector2::new(x, 710.0),
            target: target.map(|tx| Vector2::new(tx, 680.0)),
            playfield: Playfield::new(1280.0, 720.0, 10.0),
            depleted: false,
        }
    }

    fn hazards() -> AttackPattern {
        AttackPattern::GroundHazards(HazardLayout::default())
    }

    #[test]
    fn test_interval_triggers_windup_then_fire() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut brain = BossBrain::new(BossKind::Ira, Movement::Stationary, 100)
            .with_patterns([hazards()])
            .with_timing(50, 50);
        let i = brain.step(&ctx(60, 60, 700.0, Some(200.0)), &mut rng);
        assert!(!i.started_windup);
        let i = brain.step(&ctx(120, 60, 700.0, Some(200.0)), &mut rng);
        assert!(i.started_windup);
        assert!(i.fire.is_none());
        assert_eq!(brain.behavior, BossBehavior::Windup { until_ms: 170 });
        let i = brain.step(&ctx(180, 60, 700.0, Some(200.0)), &mut rng);
        assert_eq!(i.fire, Some(hazards()));
        assert_eq!(brain.behavior, BossBehavior::Recovery { until_ms: 230 });
        brain.step(&ctx(240, 60, 700.0, Some(200.0)), &mut rng);
        assert_eq!(brain.behavior, BossBehavior::Approach);
        assert_eq!(brain.attack_timer_ms, 0);
    }

    #[test]
    fn test_zero_windup_fires_same_tick() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut brain = BossBrain::new(BossKind::Ira, Movement::Stationary, 100)
            .with_patterns([hazards()]);
        let i = brain.step(&ctx(100, 100, 700.0, None), &mut rng);
        assert!(i.started_windup);
        assert_eq!(i.fire, Some(hazards()));
        assert!(matches!(brain.behavior, BossBehavior::Recovery { .. }));
        brain.step(&ctx(116, 16, 700.0, None), &mut rng);
        assert_eq!(brain.behavior, BossBehavior::Approach);
    }

    #[test]
    fn test_patterns_alternate() {
        let mut rng = fastrand::Rng::with_seed(3);
        let thrown = AttackPattern::Thrown(ThrownShot::default());
        let mut brain = BossBrain::new(BossKind::Gula, Movement::Stationary, 10)
            .with_patterns([hazards(), thrown]);
        let mut fired = Vec::new();
        let mut now = 0;
        for _ in 0..12 {
            now += 10;
            if let Some(p) = brain.step(&ctx(now, 10, 500.0, Some(300.0)), &mut rng).fire {
                fired.push(p);
            }
        }
        assert!(fired.len() >= 3);
        assert_eq!(fired[0], hazards());
        assert_eq!(fired[1], thrown);
        assert_eq!(fired[2], hazards());
    }

    #[test]
    fn test_range_gated_timer_resets_when_target_leaves() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut brain = BossBrain::new(
            BossKind::Ganancia,
            Movement::KeepRange {
                speed: 2.0,
                range: 420.0,
            },
            2500,
        )
        .with_attack_range(Some(420.0));
        brain.step(&ctx(1000, 1000, 600.0, Some(400.0)), &mut rng);
        assert_eq!(brain.attack_timer_ms, 1000);
        brain.step(&ctx(2000, 1000, 600.0, Some(1200.0)), &mut rng);
        assert_eq!(brain.attack_timer_ms, 0);
        brain.step(&ctx(3000, 1000, 600.0, None), &mut rng);
        assert_eq!(brain.attack_timer_ms, 0);
    }

    #[test]
    fn test_keep_range_closes_then_holds() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut brain = BossBrain::new(
            BossKind::Ganancia,
            Movement::KeepRange {
                speed: 2.0,
                range: 420.0,
            },
            2500,
        );
        let far = brain.step(&ctx(16, 16, 1000.0, Some(100.0)), &mut rng);
        assert_eq!(far.velocity.x, -2.0);
        assert_eq!(far.facing, Some(Facing::Left));
        let near = brain.step(&ctx(32, 16, 400.0, Some(100.0)), &mut rng);
        assert_eq!(near.velocity.x, 0.0);
        assert_eq!(near.facing, Some(Facing::Left));
    }

    #[test]
    fn test_patrol_turns_at_bounds() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut brain = BossBrain::new(
            BossKind::Gula,
            Movement::Patrol {
                speed: 2.0,
                edge_margin: 120.0,
            },
            100_000,
        );
        let right = brain.step(&ctx(16, 16, 600.0, Some(100.0)), &mut rng);
        assert_eq!(right.velocity.x, 2.0);
        assert_eq!(right.facing, Some(Facing::Right));
        let turned = brain.step(&ctx(32, 16, 1160.0, Some(100.0)), &mut rng);
        assert_eq!(turned.velocity.x, -2.0);
        assert_eq!(turned.facing, Some(Facing::Left));
        let back = brain.step(&ctx(48, 16, 120.0, None), &mut rng);
        assert_eq!(back.velocity.x, 2.0);
    }

    #[test]
    fn test_chase_without_target_stands_still() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut brain = BossBrain::new(
            BossKind::Gula,
            Movement::Chase {
                speed: 3.0,
                stop_distance: 40.0,
            },
            100_000,
        );
        let i = brain.step(&ctx(16, 16, 600.0, None), &mut rng);
        assert_eq!(i.velocity.x, 0.0);
        assert!(i.facing.is_none());
        let i = brain.step(&ctx(32, 16, 600.0, Some(900.0)), &mut rng);
        assert_eq!(i.velocity.x, 3.0);
    }

    #[test]
    fn test_wander_moves_toward_goal_inside_band() {
        let mut rng = fastrand::Rng::with_seed(11);
        let mut brain = BossBrain::new(
            BossKind::Ganancia,
            Movement::Wander {
                speed: 2.0,
                edge_margin: 100.0,
                min_height: 150.0,
                max_height: 300.0,
            },
            100_000,
        );
        let i = brain.step(&ctx(16, 16, 640.0, None), &mut rng);
        let speed = (i.velocity.x * i.velocity.x + i.velocity.y * i.velocity.y).sqrt();
        assert!(speed <= 2.0 + 1e-4);
        let goal = brain.wander_goal.unwrap();
        assert!(goal.x >= 100.0 && goal.x <= 1180.0);
        assert!(goal.y >= 710.0 - 300.0 && goal.y <= 710.0 - 150.0);
    }

    #[test]
    fn test_depleted_enters_dying() {
        let mut rng = fastrand::Rng::with_seed(3);
        let mut brain = BossBrain::new(BossKind::Ira, Movement::Stationary, 10)
            .with_patterns([hazards()]);
        let mut c = ctx(100, 100, 700.0, Some(200.0));
        c.depleted = true;
        let i = brain.step(&c, &mut rng);
        assert!(brain.is_dying());
        assert!(i.fire.is_none());
        assert!(!i.started_windup);
    }

    #[test]
    fn test_with_patterns_caps_length() {
        let brain = BossBrain::new(BossKind::Ira, Movement::Stationary, 10)
            .with_patterns(std::iter::repeat_n(hazards(), 9));
        assert_eq!(brain.patterns.len(), MAX_PATTERNS);
    }
}
