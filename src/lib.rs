//! Inferno core library.
//!
//! Boss-arena combat simulation built on a `bevy_ecs` world: actor
//! components, the resources the tick reads, the systems of the per-tick
//! schedule and the messages they exchange. [`game`] assembles them.

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
