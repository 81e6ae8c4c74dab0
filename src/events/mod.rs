//! Messages exchanged between systems and with the caller.
//!
//! - [`combat`] – damage requests, applied damage and deaths
//! - [`audio`] – sound cues the caller should play
pub mod audio;
pub mod combat;
