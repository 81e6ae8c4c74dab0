//! ECS resources read by the tick.
//!
//! Overview
//! - `bosstuning` – per-boss tuning and the JSON roster
//! - `encounter` – room sequence, defeats and the outcome
//! - `framestore` – decoded frame sequences and sounds keyed by name
//! - `gameconfig` – INI-backed configuration
//! - `input` – per-tick player commands
//! - `playfield` – arena width and floor line
//! - `rng` – seedable random source
//! - `worldtime` – simulation time and delta
pub mod bosstuning;
pub mod encounter;
pub mod framestore;
pub mod gameconfig;
pub mod input;
pub mod playfield;
pub mod rng;
pub mod worldtime;
