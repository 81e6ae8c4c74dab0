//! Decoded frame sequences and sound handles keyed by symbolic name.
//!
//! The asset collaborator fills this store once (decoding files, building
//! textures) and the core only ever reads handles out of it. Keys are
//! `"<actor>/<sequence>"`, e.g. `"gula/walk"` or `"dante/hurt"`, and
//! `"<actor>/<cue>"` for sounds, e.g. `"dante/attack"`.
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

/// Opaque reference to an image owned by the caller's texture store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub Arc<str>);

impl ImageHandle {
    pub fn new(key: &str) -> Self {
        ImageHandle(Arc::from(key))
    }

    pub fn key(&self) -> &str {
        &self.0
    }
}

/// Opaque reference to a sound owned by the caller's audio layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub Arc<str>);

impl SoundHandle {
    pub fn new(key: &str) -> Self {
        SoundHandle(Arc::from(key))
    }

    pub fn key(&self) -> &str {
        &self.0
    }
}

/// One decoded frame: the image plus its pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub image: ImageHandle,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn new(key: &str, width: f32, height: f32) -> Self {
        Self {
            image: ImageHandle::new(key),
            width,
            height,
        }
    }
}

#[derive(Resource, Debug, Default, Clone)]
pub struct FrameStore {
    pub sequences: FxHashMap<String, Vec<Frame>>,
    pub sounds: FxHashMap<String, SoundHandle>,
}

impl FrameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_sequence(&mut self, key: impl Into<String>, frames: Vec<Frame>) {
        self.sequences.insert(key.into(), frames);
    }

    pub fn insert_sound(&mut self, key: impl Into<String>, handle: SoundHandle) {
        self.sounds.insert(key.into(), handle);
    }

    /// Frames for `key`, or an empty slice when nothing was loaded.
    pub fn sequence(&self, key: &str) -> &[Frame] {
        self.sequences.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn sound(&self, key: &str) -> Option<SoundHandle> {
        self.sounds.get(key).cloned()
    }

    /// Fill `<prefix>/<name>` with `count` solid placeholder frames for each name.
    ///
    /// Used by headless runs and tests that have no decoded images.
    pub fn with_placeholder_frames(
        mut self,
        prefix: &str,
        names: &[(&str, usize)],
        width: f32,
        height: f32,
    ) -> Self {
        for (name, count) in names {
            let key = format!("{prefix}/{name}");
            let frames = (0..*count)
                .map(|i| Frame::new(&format!("{key}/{i}"), width, height))
                .collect();
            self.sequences.insert(key, frames);
        }
        self
    }
}
