//! crates/course_player_core/src/notes.rs
//!
//! The note store: timestamped annotations, persisted independently of the catalog.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::Note;
use crate::ports::SnapshotStore;

/// Key the note snapshot is stored under.
pub const NOTES_KEY: &str = "notes";

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("Note text cannot be empty")]
    EmptyText,
    #[error("Note timestamp must be a non-negative number of seconds, got {0}")]
    InvalidTimestamp(f64),
    #[error("Malformed note snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Owns every note. Notes are kept in insertion order; views sort by timestamp.
pub struct NoteStore {
    notes: Arc<Vec<Note>>,
    store: Arc<dyn SnapshotStore>,
}

impl NoteStore {
    /// Loads stored notes. A missing or malformed snapshot yields an empty store.
    pub fn initialize(store: Arc<dyn SnapshotStore>) -> Self {
        let notes = match store.read(NOTES_KEY) {
            Ok(Some(snapshot)) => match decode(&snapshot) {
                Ok(notes) => {
                    info!("Loaded {} stored notes.", notes.len());
                    notes
                }
                Err(e) => {
                    warn!("Ignoring stored notes: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read stored notes: {}", e);
                Vec::new()
            }
        };

        Self {
            notes: Arc::new(notes),
            store,
        }
    }

    /// Creates a note at `timestamp` seconds into the given lesson.
    pub fn add(
        &mut self,
        timestamp: f64,
        text: &str,
        lesson_id: &str,
        course_id: &str,
    ) -> Result<Note, NoteError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(NoteError::EmptyText);
        }
        if !timestamp.is_finite() || timestamp < 0.0 {
            return Err(NoteError::InvalidTimestamp(timestamp));
        }

        let note = Note {
            id: Uuid::new_v4(),
            timestamp,
            text: text.to_string(),
            created_at: Utc::now(),
            lesson_id: lesson_id.to_string(),
            course_id: course_id.to_string(),
        };
        Arc::make_mut(&mut self.notes).push(note.clone());
        info!("Added note {} to lesson {}.", note.id, note.lesson_id);
        self.persist();
        Ok(note)
    }

    /// Removes the note with `note_id`. Returns whether a note was removed.
    pub fn remove(&mut self, note_id: Uuid) -> bool {
        if !self.notes.iter().any(|note| note.id == note_id) {
            debug!("No note {} to remove.", note_id);
            return false;
        }
        Arc::make_mut(&mut self.notes).retain(|note| note.id != note_id);
        info!("Removed note {}.", note_id);
        self.persist();
        true
    }

    /// Every note in insertion order.
    pub fn all(&self) -> &[Note] {
        &self.notes
    }

    /// A shared handle to the current notes. Later changes never show through it.
    pub fn snapshot(&self) -> Arc<Vec<Note>> {
        Arc::clone(&self.notes)
    }

    /// Notes attached to one lesson of one course, earliest timestamp first.
    /// Lesson ids are only unique inside their course, so both ids must match.
    pub fn for_lesson(&self, course_id: &str, lesson_id: &str) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self
            .notes
            .iter()
            .filter(|note| note.course_id == course_id && note.lesson_id == lesson_id)
            .collect();
        notes.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    fn persist(&self) {
        match encode(&self.notes) {
            Ok(snapshot) => {
                if let Err(e) = self.store.write(NOTES_KEY, &snapshot) {
                    warn!("Failed to persist notes: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize notes: {}", e),
        }
    }
}

/// Serializes notes for storage. `createdAt` is written as RFC 3339.
pub fn encode(notes: &[Note]) -> Result<String, NoteError> {
    Ok(serde_json::to_string(notes)?)
}

/// Parses stored notes, turning `createdAt` back into a timestamp.
pub fn decode(snapshot: &str) -> Result<Vec<Note>, NoteError> {
    Ok(serde_json::from_str(snapshot)?)
}
