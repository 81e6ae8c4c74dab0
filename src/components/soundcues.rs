use bevy_ecs::prelude::Component;

use crate::resources::framestore::{FrameStore, SoundHandle};

/// Sounds an actor asks the caller to play on combat beats.
#[derive(Component, Debug, Clone, Default)]
pub struct SoundCues {
    pub attack: Option<SoundHandle>,
    pub hurt: Option<SoundHandle>,
    pub death: Option<SoundHandle>,
}

impl SoundCues {
    /// Look up `<prefix>/attack`, `<prefix>/hurt` and `<prefix>/death`.
    pub fn from_store(store: &FrameStore, prefix: &str) -> Self {
        Self {
            attack: store.sound(&format!("{prefix}/attack")),
            hurt: store.sound(&format!("{prefix}/hurt")),
            death: store.sound(&format!("{prefix}/death")),
        }
    }
}
