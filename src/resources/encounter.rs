//! Room progression and outcome.
//!
//! Rooms are visited in order, one boss per room. The player walks off the
//! right edge to enter the next room; earlier bosses stay in the world until
//! their own death sequence completes.
use bevy_ecs::prelude::{Entity, Resource};

use crate::components::boss::BossKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    InProgress,
    Victory,
    Defeat,
}

#[derive(Resource, Debug, Clone)]
pub struct Encounter {
    pub rooms: Vec<BossKind>,
    /// Index of the room the player is in.
    pub current_room: usize,
    /// Boss spawned for the current room.
    pub current_boss: Option<Entity>,
    pub defeated: Vec<BossKind>,
    pub outcome: Outcome,
    /// Player center x that triggers the next room, measured from the right edge.
    pub exit_margin: f32,
    /// Player x after entering a new room.
    pub entry_x: f32,
}

impl Default for Encounter {
    fn default() -> Self {
        Self::new(vec![BossKind::Gula, BossKind::Ira, BossKind::Ganancia])
    }
}

impl Encounter {
    pub fn new(rooms: Vec<BossKind>) -> Self {
        Self {
            rooms,
            current_room: 0,
            current_boss: None,
            defeated: Vec::new(),
            outcome: Outcome::InProgress,
            exit_margin: 120.0,
            entry_x: 140.0,
        }
    }

    pub fn with_exits(mut self, exit_margin: f32, entry_x: f32) -> Self {
        self.exit_margin = exit_margin;
        self.entry_x = entry_x;
        self
    }

    pub fn current_kind(&self) -> Option<BossKind> {
        self.rooms.get(self.current_room).copied()
    }

    pub fn has_next_room(&self) -> bool {
        self.current_room + 1 < self.rooms.len()
    }

    /// Move to the next room and return its boss kind.
    pub fn advance_room(&mut self) -> Option<BossKind> {
        if !self.has_next_room() {
            return None;
        }
        self.current_room += 1;
        self.current_boss = None;
        self.current_kind()
    }

    /// Whether a player center at `x` has reached the exit.
    pub fn at_exit(&self, x: f32, width: f32) -> bool {
        x >= width - self.exit_margin
    }

    pub fn record_defeat(&mut self, kind: BossKind) {
        if !self.defeated.contains(&kind) {
            self.defeated.push(kind);
        }
        if self.outcome == Outcome::InProgress
            && self.rooms.iter().all(|k| self.defeated.contains(k))
        {
            self.outcome = Outcome::Victory;
        }
    }

    pub fn record_player_death(&mut self) {
        if self.outcome == Outcome::InProgress {
            self.outcome = Outcome::Defeat;
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::InProgress
    }
}
