//! Construction-time error type.
//!
//! Nothing that happens inside a tick produces a [`CoreError`]: missing frames
//! fall back, missing targets skip, repeated hits are prevented structurally.
//! These errors come from building the world and from config/roster files.

use std::path::PathBuf;

use thiserror::Error;

use crate::components::boss::BossKind;

/// Errors surfaced while building the world or loading its data files.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no frame store resource was inserted before building the world")]
    MissingFrameStore,

    #[error("boss kind {0:?} has no entry in the roster")]
    UnknownBoss(BossKind),

    #[error("encounter has no rooms")]
    EmptyEncounter,

    #[error("config file {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("roster file {path:?}: {source}")]
    RosterIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("roster JSON error: {0}")]
    RosterParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
