//! services/player/src/error.rs
//!
//! Defines the primary error type for the player service.

use crate::config::ConfigError;
use crate::session::command::CommandError;
use course_player_core::{NoteError, PortError};

/// The primary error type for the `player` service.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core ports.
    #[error("Port error: {0}")]
    Port(#[from] PortError),

    /// A note the user tried to add was rejected.
    #[error("{0}")]
    Note(#[from] NoteError),

    /// The user typed something that is not a command.
    #[error("{0}")]
    Command(#[from] CommandError),

    /// Represents a standard Input/Output error (e.g., reading stdin).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}
