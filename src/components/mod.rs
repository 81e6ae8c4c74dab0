//! ECS components for actors.
//!
//! Submodules overview:
//! - [`animation`] – per-actor animation state machine and frame clock
//! - [`animationset`] – frame sequences and delays per state, with fallbacks
//! - [`boss`] – boss kinds, movement styles, attack patterns and the brain
//! - [`boxcollider`] – bottom-center anchored body and feet boxes
//! - [`combatant`] – faction, damage and capability flags
//! - [`facing`] – horizontal facing and sprite flipping
//! - [`fury`] – first-strike enrage
//! - [`hazard`] – telegraphed ground hazards
//! - [`health`] – hit points and grace windows
//! - [`mapposition`] – world-space anchor point
//! - [`player`] – player marker and controller parameters
//! - [`projectile`] – aimed and thrown projectiles
//! - [`rigidbody`] – velocity, accelerations and floor/wall rules
//! - [`soundcues`] – per-actor sound handles
//! - [`sprite`] – current visible frame
//! - [`tint`] – color multiplier applied when drawing

pub mod animation;
pub mod animationset;
pub mod boss;
pub mod boxcollider;
pub mod combatant;
pub mod facing;
pub mod fury;
pub mod hazard;
pub mod health;
pub mod mapposition;
pub mod player;
pub mod projectile;
pub mod rigidbody;
pub mod soundcues;
pub mod sprite;
pub mod tint;
