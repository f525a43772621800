//! crates/course_player_core/src/ports.rs
//!
//! Defines the service contracts (traits) the core talks to.
//! These traits form the boundary of the hexagonal architecture, keeping the core
//! independent of where snapshots are stored and of how media is actually played.

use crate::domain::Lesson;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., file system).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// A key-value store holding one serialized snapshot per key.
///
/// Stores read their snapshot once at construction and write it back after every
/// change. A missing key is `Ok(None)`, never an error.
pub trait SnapshotStore: Send + Sync {
    fn read(&self, key: &str) -> PortResult<Option<String>>;

    fn write(&self, key: &str, snapshot: &str) -> PortResult<()>;
}

/// The media transport. The core only issues commands; time and end-of-media
/// come back as [`SurfaceEvent`]s.
pub trait PlaybackSurface {
    /// Replaces the current media with the lesson's locator.
    fn load(&mut self, lesson: &Lesson);

    fn play(&mut self);

    fn pause(&mut self);

    /// Requests a move to `seconds`. The surface echoes the new position with a
    /// later `TimeUpdate`.
    fn seek(&mut self, seconds: f64);

    fn set_volume(&mut self, volume: f64);

    fn set_muted(&mut self, muted: bool);

    fn set_playback_rate(&mut self, rate: f64);

    fn request_fullscreen(&mut self);

    fn exit_fullscreen(&mut self);
}

/// Inbound notifications from the playback surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    TimeUpdate(f64),
    LoadedDuration(f64),
    Ended,
}
