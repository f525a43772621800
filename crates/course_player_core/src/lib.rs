pub mod catalog;
pub mod controls;
pub mod domain;
pub mod highlight;
pub mod navigation;
pub mod notes;
pub mod ports;
pub mod progress;
pub mod seed;

pub use catalog::{current_lesson, CatalogError, CatalogState, CatalogStore, CATALOG_KEY};
pub use controls::{ControlOutcome, Controls, Key, KeyAction};
pub use domain::{Chapter, Course, Cursor, Lesson, Note, Resource, ResourceKind, TranscriptCue};
pub use highlight::{active_chapter_index, active_cue};
pub use navigation::{Navigator, Rejection, Transition, COMPLETION_THRESHOLD};
pub use notes::{NoteError, NoteStore, NOTES_KEY};
pub use ports::{PlaybackSurface, PortError, PortResult, SnapshotStore, SurfaceEvent};
pub use progress::{calculate_progress, format_duration, format_time};
