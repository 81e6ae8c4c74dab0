use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;

use crate::resources::framestore::SoundHandle;

/// Request for the caller's audio layer to play a sound.
#[derive(Message, Debug, Clone)]
pub struct SoundCue {
    pub entity: Entity,
    pub handle: SoundHandle,
}
