//! Tick systems.
//!
//! Submodules overview
//! - [`animation`] – advance frame clocks and finish one-shot states
//! - [`behavior`] – run boss brains and fire their patterns
//! - [`collision`] – turn overlaps and melee strikes into combat events
//! - [`encounter`] – track the outcome, advance rooms, despawn dead bosses
//! - [`hazard`] – drop expired hazards
//! - [`health`] – grace windows and damage resolution
//! - [`input`] – read the keyboard into [`crate::resources::input::InputCommands`]
//! - [`messages`] – message queue registration and rotation
//! - [`movement`] – integrate velocities with floor and wall rules
//! - [`player`] – translate commands into player motion and attacks
//! - [`projectile`] – move projectiles and drop spent ones
//! - [`render`] – sprite sync, render snapshot and raylib drawing
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod behavior;
pub mod collision;
pub mod encounter;
pub mod hazard;
pub mod health;
pub mod input;
pub mod messages;
pub mod movement;
pub mod player;
pub mod projectile;
pub mod render;
pub mod time;
