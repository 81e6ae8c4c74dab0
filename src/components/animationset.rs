//! Frame sequences per animation state.
//!
//! An [`AnimationSet`] is built once per actor from the
//! [`FrameStore`](crate::resources::framestore::FrameStore). States with no
//! frames fall back along a fixed chain (for example `Hurt` shows idle
//! frames). When nothing at all resolves, the actor is drawn as a solid
//! placeholder rectangle of `placeholder_size`.
use bevy_ecs::prelude::Component;
use raylib::prelude::{Color, Vector2};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::animation::AnimState;
use crate::components::facing::Facing;
use crate::resources::framestore::{Frame, FrameStore};

/// Per-state frame delays in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameDelays {
    pub idle: u32,
    pub walk: u32,
    pub attack: u32,
    pub hurt: u32,
    pub die: u32,
}

impl Default for FrameDelays {
    fn default() -> Self {
        Self::uniform(200)
    }
}

impl FrameDelays {
    pub fn uniform(delay_ms: u32) -> Self {
        Self {
            idle: delay_ms,
            walk: delay_ms,
            attack: delay_ms,
            hurt: delay_ms,
            die: delay_ms,
        }
    }

    pub fn for_state(&self, state: AnimState) -> u32 {
        match state {
            AnimState::Idle => self.idle,
            AnimState::Walk => self.walk,
            AnimState::Attack => self.attack,
            AnimState::Hurt => self.hurt,
            AnimState::Dying | AnimState::Dead => self.die,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTrack {
    pub frames: Vec<Frame>,
}

impl AnimationTrack {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at `index`, clamped to the last one.
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        let last = self.frames.len().checked_sub(1)?;
        self.frames.get(index.min(last))
    }
}

fn fallback_chain(state: AnimState) -> &'static [AnimState] {
    match state {
        AnimState::Idle => &[AnimState::Idle, AnimState::Walk],
        AnimState::Walk => &[AnimState::Walk, AnimState::Idle],
        AnimState::Attack => &[AnimState::Attack, AnimState::Idle, AnimState::Walk],
        AnimState::Hurt => &[AnimState::Hurt, AnimState::Idle, AnimState::Walk],
        AnimState::Dying => &[
            AnimState::Dying,
            AnimState::Hurt,
            AnimState::Idle,
            AnimState::Walk,
        ],
        AnimState::Dead => &[
            AnimState::Dying,
            AnimState::Hurt,
            AnimState::Idle,
            AnimState::Walk,
        ],
    }
}

#[derive(Component, Debug, Clone)]
pub struct AnimationSet {
    tracks: FxHashMap<AnimState, AnimationTrack>,
    pub delays: FrameDelays,
    /// Direction the source frames face.
    pub authored_facing: Facing,
    pub placeholder_size: Vector2,
    pub placeholder_color: Color,
}

impl AnimationSet {
    pub fn new(
        authored_facing: Facing,
        placeholder_size: Vector2,
        placeholder_color: Color,
    ) -> Self {
        Self {
            tracks: FxHashMap::default(),
            delays: FrameDelays::default(),
            authored_facing,
            placeholder_size,
            placeholder_color,
        }
    }

    pub fn with_delays(mut self, delays: FrameDelays) -> Self {
        self.delays = delays;
        self
    }

    /// Add a sequence for `state`. Empty sequences are not stored.
    pub fn insert(&mut self, state: AnimState, frames: Vec<Frame>) {
        if frames.is_empty() {
            self.tracks.remove(&state);
            return;
        }
        self.tracks.insert(state, AnimationTrack { frames });
    }

    pub fn with_track(mut self, state: AnimState, frames: Vec<Frame>) -> Self {
        self.insert(state, frames);
        self
    }

    /// Build from `<prefix>/<state>` sequences in the store.
    pub fn from_store(
        store: &FrameStore,
        prefix: &str,
        delays: &FrameDelays,
        authored_facing: Facing,
        placeholder_size: Vector2,
        placeholder_color: Color,
    ) -> Self {
        let mut set =
            Self::new(authored_facing, placeholder_size, placeholder_color).with_delays(*delays);
        for state in AnimState::ALL {
            if state == AnimState::Dead {
                continue;
            }
            let frames = store.sequence(&format!("{prefix}/{}", state.key())).to_vec();
            if frames.is_empty() {
                log::debug!("no '{}' frames for '{}', falling back", state.key(), prefix);
            }
            set.insert(state, frames);
        }
        set
    }

    /// Whether `state` has its own non-empty sequence.
    pub fn has_own(&self, state: AnimState) -> bool {
        self.tracks.contains_key(&state)
    }

    /// Track shown for `state`, following the fallback chain.
    pub fn resolve(&self, state: AnimState) -> Option<&AnimationTrack> {
        fallback_chain(state)
            .iter()
            .find_map(|s| self.tracks.get(s))
    }

    /// Frame count and delay used to drive the clock for `state`.
    ///
    /// A fallback track is timed with the requested state's delay.
    pub fn timing(&self, state: AnimState) -> (usize, u32) {
        let count = self.resolve(state).map_or(0, AnimationTrack::len);
        (count, self.delays.for_state(state))
    }

    pub fn frame(&self, state: AnimState, index: usize) -> Option<&Frame> {
        self.resolve(state)?.frame(index)
    }

    /// Size of the frame currently shown, or the placeholder size.
    pub fn frame_size(&self, state: AnimState, index: usize) -> Vector2 {
        match self.frame(state, index) {
            Some(frame) => Vector2::new(frame.width, frame.height),
            None => self.placeholder_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(prefix: &str, n: usize) -> Vec<Frame> {
        (0..n)
            .map(|i| Frame::new(&format!("{prefix}{i}"), 10.0 + i as f32, 20.0))
            .collect()
    }

    fn empty_set() -> AnimationSet {
        AnimationSet::new(Facing::Right, Vector2::new(40.0, 60.0), Color::GRAY)
    }

    #[test]
    fn test_hurt_falls_back_to_idle() {
        let set = empty_set().with_track(AnimState::Idle, frames("idle", 2));
        let track = set.resolve(AnimState::Hurt).unwrap();
        assert_eq!(track.len(), 2);
        assert!(!set.has_own(AnimState::Hurt));
    }

    #[test]
    fn test_dead_shows_dying_frames() {
        let set = empty_set()
            .with_track(AnimState::Idle, frames("idle", 1))
            .with_track(AnimState::Dying, frames("die", 4));
        let track = set.resolve(AnimState::Dead).unwrap();
        assert_eq!(track.len(), 4);
    }

    #[test]
    fn test_empty_sequence_is_absent() {
        let set = empty_set()
            .with_track(AnimState::Walk, frames("walk", 3))
            .with_track(AnimState::Attack, Vec::new());
        assert!(!set.has_own(AnimState::Attack));
        assert_eq!(set.resolve(AnimState::Attack).unwrap().len(), 3);
    }

    #[test]
    fn test_nothing_resolves_uses_placeholder() {
        let set = empty_set();
        assert!(set.resolve(AnimState::Idle).is_none());
        assert_eq!(set.timing(AnimState::Dying).0, 0);
        let size = set.frame_size(AnimState::Walk, 3);
        assert_eq!(size.x, 40.0);
        assert_eq!(size.y, 60.0);
    }

    #[test]
    fn test_frame_index_clamped() {
        let set = empty_set().with_track(AnimState::Walk, frames("walk", 3));
        let f = set.frame(AnimState::Walk, 10).unwrap();
        assert_eq!(f.image.key(), "walk2");
    }

    #[test]
    fn test_timing_uses_requested_state_delay() {
        let delays = FrameDelays {
            attack: 30,
            ..FrameDelays::default()
        };
        let set = empty_set()
            .with_delays(delays)
            .with_track(AnimState::Idle, frames("idle", 2));
        assert_eq!(set.timing(AnimState::Attack), (2, 30));
        assert_eq!(set.timing(AnimState::Idle), (2, 200));
    }

    #[test]
    fn test_from_store_reads_prefixed_sequences() {
        let store = FrameStore::new().with_placeholder_frames(
            "gula",
            &[("walk", 6), ("attack", 3), ("die", 5)],
            90.0,
            120.0,
        );
        let set = AnimationSet::from_store(
            &store,
            "gula",
            &FrameDelays::uniform(100),
            Facing::Right,
            Vector2::new(90.0, 120.0),
            Color::GRAY,
        );
        assert!(set.has_own(AnimState::Walk));
        assert!(!set.has_own(AnimState::Idle));
        assert_eq!(set.resolve(AnimState::Idle).unwrap().len(), 6);
        assert_eq!(set.resolve(AnimState::Dying).unwrap().len(), 5);
    }
}
