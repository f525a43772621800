//! crates/course_player_core/src/domain.rs
//!
//! Defines the core data structures for the course player.
//! Field names serialize in camelCase so persisted snapshots keep the same shape
//! the catalog and note stores have always written.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A course in the catalog: an ordered run of lessons plus its side material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub lessons: Vec<Lesson>,
    #[serde(default)]
    pub chapters_by_lesson_id: HashMap<String, Vec<Chapter>>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breadcrumb: Option<Vec<String>>,
}

impl Course {
    /// Chapters registered for `lesson_id`, or an empty slice when it has none.
    pub fn chapters_for(&self, lesson_id: &str) -> &[Chapter] {
        self.chapters_by_lesson_id
            .get(lesson_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// A single playable video inside a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub duration_sec: u32,
    /// Media locator handed to the playback surface.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Vec<TranscriptCue>>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub completed: bool,
}

impl Lesson {
    pub fn cues(&self) -> &[TranscriptCue] {
        self.transcript.as_deref().unwrap_or(&[])
    }
}

/// A timed transcript fragment. Both ends of the interval are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptCue {
    pub id: String,
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
}

/// A named seek point within a lesson's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub label: String,
    pub at_sec: f64,
}

/// A downloadable attachment shown next to a course. Display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// Icon family a resource is displayed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Pdf,
    Archive,
    Document,
    Other,
}

impl Resource {
    pub fn classify(&self) -> ResourceKind {
        match self.kind.to_ascii_lowercase().as_str() {
            "pdf" => ResourceKind::Pdf,
            "zip" | "rar" => ResourceKind::Archive,
            "doc" | "docx" => ResourceKind::Document,
            _ => ResourceKind::Other,
        }
    }
}

/// A timestamped annotation a learner attached to a lesson.
///
/// `lesson_id` and `course_id` are copies of catalog ids. The catalog decides
/// whether they still resolve; removing a note never touches the catalog and
/// nothing here removes notes when a lesson goes away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub timestamp: f64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub lesson_id: String,
    pub course_id: String,
}

/// Position of the active lesson inside the catalog.
///
/// Only the navigator builds cursors, and it only builds ones it has checked
/// against the catalog, so a cursor at rest always resolves to a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor {
    pub(crate) course_index: usize,
    pub(crate) lesson_index: usize,
}

impl Cursor {
    pub(crate) fn new(course_index: usize, lesson_index: usize) -> Self {
        Self {
            course_index,
            lesson_index,
        }
    }

    pub fn course_index(&self) -> usize {
        self.course_index
    }

    pub fn lesson_index(&self) -> usize {
        self.lesson_index
    }
}
