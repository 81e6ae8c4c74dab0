//! Frame clock and the per-entity animation state machine.
//!
//! [`FrameClock`] turns elapsed milliseconds into frame advances for one
//! sequence. [`Animator`] holds the logical [`AnimState`] and enforces the
//! transition priority between states:
//!
//! 1. `Hurt` blocks movement, input and attack transitions until it finishes.
//! 2. `Dying` pre-empts everything and ends in the terminal `Dead`.
//! 3. `Attack` cannot be interrupted by `Walk`/`Idle`.
//! 4. `Walk`/`Idle` are free to swap.
//!
//! # Related
//!
//! - [`crate::components::animationset::AnimationSet`] – frames per state
//! - [`crate::systems::animation::animation`] – advances clocks and handles completion
use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Logical animation state of an actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimState {
    #[default]
    Idle,
    Walk,
    Attack,
    Hurt,
    Dying,
    Dead,
}

impl AnimState {
    pub const ALL: [AnimState; 6] = [
        AnimState::Idle,
        AnimState::Walk,
        AnimState::Attack,
        AnimState::Hurt,
        AnimState::Dying,
        AnimState::Dead,
    ];

    pub fn playback(self) -> Playback {
        match self {
            AnimState::Idle | AnimState::Walk => Playback::Loop,
            AnimState::Attack | AnimState::Hurt | AnimState::Dying | AnimState::Dead => {
                Playback::Once
            }
        }
    }

    /// Symbolic name used to look up frame sequences.
    pub fn key(self) -> &'static str {
        match self {
            AnimState::Idle => "idle",
            AnimState::Walk => "walk",
            AnimState::Attack => "attack",
            AnimState::Hurt => "hurt",
            AnimState::Dying => "die",
            AnimState::Dead => "dead",
        }
    }

    fn rank(self) -> u8 {
        match self {
            AnimState::Idle | AnimState::Walk => 0,
            AnimState::Attack => 1,
            AnimState::Hurt => 2,
            AnimState::Dying => 3,
            AnimState::Dead => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Loop,
    Once,
}

/// Result of one [`FrameClock::advance`] call.
///
/// For looping playback `wrapped` is set when the index returns to 0. For
/// one-shot playback it is set exactly once, on the tick the sequence
/// completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameAdvance {
    pub frame_index: usize,
    pub wrapped: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameClock {
    pub frame_index: usize,
    pub elapsed_ms: u32,
    pub finished: bool,
}

impl FrameClock {
    pub fn reset(&mut self) {
        *self = FrameClock::default();
    }

    /// Accumulate `elapsed_ms` and step at most one frame.
    ///
    /// The delay is subtracted from the accumulator rather than clearing it,
    /// so timing does not drift.
    pub fn advance(
        &mut self,
        elapsed_ms: u32,
        delay_ms: u32,
        frame_count: usize,
        playback: Playback,
    ) -> FrameAdvance {
        match playback {
            Playback::Loop if frame_count <= 1 => {
                self.frame_index = 0;
                self.elapsed_ms = 0;
                return self.at(false);
            }
            Playback::Once if frame_count == 0 => {
                self.frame_index = 0;
                self.elapsed_ms = 0;
                let completed = !self.finished;
                self.finished = true;
                return self.at(completed);
            }
            _ => {}
        }
        if self.finished {
            return self.at(false);
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        if self.elapsed_ms < delay_ms {
            return self.at(false);
        }
        self.elapsed_ms -= delay_ms;

        match playback {
            Playback::Loop => {
                self.frame_index = (self.frame_index + 1) % frame_count;
                self.at(self.frame_index == 0)
            }
            Playback::Once => {
                if self.frame_index + 1 >= frame_count {
                    self.frame_index = frame_count - 1;
                    self.elapsed_ms = 0;
                    self.finished = true;
                    self.at(true)
                } else {
                    self.frame_index += 1;
                    self.at(false)
                }
            }
        }
    }

    fn at(&self, wrapped: bool) -> FrameAdvance {
        FrameAdvance {
            frame_index: self.frame_index,
            wrapped,
        }
    }
}

/// Animation state machine attached to every actor.
#[derive(Component, Debug, Clone, Default)]
pub struct Animator {
    pub state: AnimState,
    pub clock: FrameClock,
}

impl Animator {
    pub fn new(state: AnimState) -> Self {
        Self {
            state,
            clock: FrameClock::default(),
        }
    }

    /// Switch to `next`, resetting the frame index and timer.
    ///
    /// Returns false and leaves timing untouched when `next` equals the
    /// current state. No priority rule is applied; see [`Animator::request`].
    pub fn set_state(&mut self, next: AnimState) -> bool {
        if self.state == next {
            return false;
        }
        self.state = next;
        self.clock.reset();
        true
    }

    /// Priority-checked transition. Returns true when the state changed.
    pub fn request(&mut self, next: AnimState) -> bool {
        if !self.can_enter(next) {
            return false;
        }
        self.set_state(next)
    }

    pub fn can_enter(&self, next: AnimState) -> bool {
        match (self.state, next) {
            (AnimState::Dead, _) => false,
            // Dead is only reached through `finish_dying`.
            (_, AnimState::Dead) => false,
            (AnimState::Dying, _) => false,
            (current, next) if current.playback() == Playback::Once && !self.clock.finished => {
                next.rank() > current.rank()
            }
            _ => true,
        }
    }

    /// Freeze on the last frame of the death sequence.
    pub fn finish_dying(&mut self, last_frame: usize) {
        self.state = AnimState::Dead;
        self.clock = FrameClock {
            frame_index: last_frame,
            elapsed_ms: 0,
            finished: true,
        };
    }

    /// Hurt, dying or dead: no motion or input-driven transitions.
    pub fn is_locked(&self) -> bool {
        matches!(
            self.state,
            AnimState::Hurt | AnimState::Dying | AnimState::Dead
        )
    }

    pub fn is_dying_or_dead(&self) -> bool {
        matches!(self.state, AnimState::Dying | AnimState::Dead)
    }

    /// Swap between `Walk` and `Idle` from a horizontal speed, if free to do so.
    pub fn locomote(&mut self, moving: bool) -> bool {
        if !matches!(self.state, AnimState::Idle | AnimState::Walk) {
            return false;
        }
        self.set_state(if moving {
            AnimState::Walk
        } else {
            AnimState::Idle
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_advances_and_wraps() {
        let mut clock = FrameClock::default();
        let a = clock.advance(100, 100, 3, Playback::Loop);
        assert_eq!(a.frame_index, 1);
        assert!(!a.wrapped);
        clock.advance(100, 100, 3, Playback::Loop);
        let c = clock.advance(100, 100, 3, Playback::Loop);
        assert_eq!(c.frame_index, 0);
        assert!(c.wrapped);
    }

    #[test]
    fn test_accumulator_keeps_remainder() {
        let mut clock = FrameClock::default();
        clock.advance(130, 100, 4, Playback::Loop);
        assert_eq!(clock.frame_index, 1);
        assert_eq!(clock.elapsed_ms, 30);
        clock.advance(70, 100, 4, Playback::Loop);
        assert_eq!(clock.frame_index, 2);
        assert_eq!(clock.elapsed_ms, 0);
    }

    #[test]
    fn test_below_delay_does_not_advance() {
        let mut clock = FrameClock::default();
        let a = clock.advance(99, 100, 4, Playback::Loop);
        assert_eq!(a.frame_index, 0);
        assert_eq!(clock.elapsed_ms, 99);
    }

    #[test]
    fn test_single_frame_loop_resets_accumulator() {
        let mut clock = FrameClock {
            frame_index: 3,
            elapsed_ms: 50,
            finished: false,
        };
        let a = clock.advance(500, 100, 1, Playback::Loop);
        assert_eq!(a.frame_index, 0);
        assert!(!a.wrapped);
        assert_eq!(clock.elapsed_ms, 0);
    }

    #[test]
    fn test_one_shot_clamps_and_signals_once() {
        let mut clock = FrameClock::default();
        let mut completions = 0;
        for _ in 0..10 {
            let a = clock.advance(100, 100, 3, Playback::Once);
            assert!(a.frame_index <= 2);
            if a.wrapped {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(clock.frame_index, 2);
        assert!(clock.finished);
    }

    #[test]
    fn test_one_shot_completes_after_last_frame_delay() {
        let mut clock = FrameClock::default();
        assert!(!clock.advance(100, 100, 2, Playback::Once).wrapped);
        assert_eq!(clock.frame_index, 1);
        assert!(clock.advance(100, 100, 2, Playback::Once).wrapped);
    }

    #[test]
    fn test_one_shot_single_frame_completes_after_one_delay() {
        let mut clock = FrameClock::default();
        assert!(!clock.advance(50, 100, 1, Playback::Once).wrapped);
        assert!(clock.advance(50, 100, 1, Playback::Once).wrapped);
        assert_eq!(clock.frame_index, 0);
    }

    #[test]
    fn test_one_shot_without_frames_completes_immediately() {
        let mut clock = FrameClock::default();
        assert!(clock.advance(0, 100, 0, Playback::Once).wrapped);
        assert!(!clock.advance(16, 100, 0, Playback::Once).wrapped);
    }

    #[test]
    fn test_set_state_same_is_noop() {
        let mut anim = Animator::new(AnimState::Walk);
        anim.clock.frame_index = 3;
        anim.clock.elapsed_ms = 40;
        assert!(!anim.set_state(AnimState::Walk));
        assert_eq!(anim.clock.frame_index, 3);
        assert_eq!(anim.clock.elapsed_ms, 40);
    }

    #[test]
    fn test_set_state_different_resets() {
        let mut anim = Animator::new(AnimState::Walk);
        anim.clock.frame_index = 3;
        anim.clock.elapsed_ms = 40;
        assert!(anim.set_state(AnimState::Idle));
        assert_eq!(anim.clock, FrameClock::default());
    }

    #[test]
    fn test_hurt_blocks_attack_and_walk() {
        let mut anim = Animator::new(AnimState::Idle);
        assert!(anim.request(AnimState::Hurt));
        assert!(!anim.request(AnimState::Attack));
        assert!(!anim.request(AnimState::Walk));
        assert!(anim.request(AnimState::Dying));
    }

    #[test]
    fn test_attack_not_interrupted_by_walk() {
        let mut anim = Animator::new(AnimState::Idle);
        assert!(anim.request(AnimState::Attack));
        assert!(!anim.locomote(true));
        assert!(anim.request(AnimState::Hurt));
    }

    #[test]
    fn test_finished_one_shot_accepts_anything() {
        let mut anim = Animator::new(AnimState::Hurt);
        anim.clock.finished = true;
        assert!(anim.request(AnimState::Idle));
    }

    #[test]
    fn test_dying_is_terminal_except_finish() {
        let mut anim = Animator::new(AnimState::Dying);
        assert!(!anim.request(AnimState::Hurt));
        assert!(!anim.request(AnimState::Dead));
        anim.finish_dying(4);
        assert_eq!(anim.state, AnimState::Dead);
        assert_eq!(anim.clock.frame_index, 4);
        assert!(!anim.request(AnimState::Idle));
    }
}
