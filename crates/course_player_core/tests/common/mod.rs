#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use course_player_core::{
    CatalogState, Chapter, Course, Lesson, PlaybackSurface, PortError, PortResult, SnapshotStore,
    TranscriptCue,
};

/// Snapshot store backed by a map, with a write log for assertions.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn with(key: &str, snapshot: &str) -> Self {
        let store = Self::default();
        store
            .entries
            .lock()
            .unwrap()
            .insert(key.to_string(), snapshot.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> PortResult<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, snapshot: &str) -> PortResult<()> {
        self.writes.lock().unwrap().push(key.to_string());
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), snapshot.to_string());
        Ok(())
    }
}

/// A store whose every call fails.
pub struct BrokenStore;

impl SnapshotStore for BrokenStore {
    fn read(&self, _key: &str) -> PortResult<Option<String>> {
        Err(PortError::Unexpected("disk on fire".to_string()))
    }

    fn write(&self, _key: &str, _snapshot: &str) -> PortResult<()> {
        Err(PortError::Unexpected("disk on fire".to_string()))
    }
}

/// Surface that remembers the last seek.
#[derive(Default)]
pub struct NullSurface {
    pub last_seek: Option<f64>,
}

impl PlaybackSurface for NullSurface {
    fn load(&mut self, _lesson: &Lesson) {}
    fn play(&mut self) {}
    fn pause(&mut self) {}
    fn seek(&mut self, seconds: f64) {
        self.last_seek = Some(seconds);
    }
    fn set_volume(&mut self, _volume: f64) {}
    fn set_muted(&mut self, _muted: bool) {}
    fn set_playback_rate(&mut self, _rate: f64) {}
    fn request_fullscreen(&mut self) {}
    fn exit_fullscreen(&mut self) {}
}

pub fn lesson(id: &str, duration_sec: u32, locked: bool) -> Lesson {
    Lesson {
        id: id.to_string(),
        title: format!("Lesson {id}"),
        description: String::new(),
        instructor: "Instructor".to_string(),
        duration_sec,
        url: format!("/media/{id}.mp4"),
        transcript: Some(vec![
            TranscriptCue {
                id: format!("{id}-cue-1"),
                start_time: 0.0,
                end_time: 15.0,
                text: "opening".to_string(),
            },
            TranscriptCue {
                id: format!("{id}-cue-2"),
                start_time: 15.0,
                end_time: 35.0,
                text: "middle".to_string(),
            },
        ]),
        locked,
        completed: false,
    }
}

pub fn course(id: &str, lessons: Vec<Lesson>) -> Course {
    let chapters_by_lesson_id = lessons
        .iter()
        .map(|lesson| {
            (
                lesson.id.clone(),
                vec![
                    Chapter {
                        label: "later".to_string(),
                        at_sec: 120.0,
                    },
                    Chapter {
                        label: "start".to_string(),
                        at_sec: 0.0,
                    },
                ],
            )
        })
        .collect::<HashMap<_, _>>();

    Course {
        id: id.to_string(),
        title: format!("Course {id}"),
        description: String::new(),
        instructor: "Instructor".to_string(),
        lessons,
        chapters_by_lesson_id,
        resources: Vec::new(),
        breadcrumb: None,
    }
}

/// Two open lessons, then a course whose first lesson is locked.
pub fn gated_catalog() -> Vec<Course> {
    vec![
        course("a", vec![lesson("a1", 100, false), lesson("a2", 200, false)]),
        course("b", vec![lesson("b1", 100, true), lesson("b2", 100, false)]),
    ]
}

/// Three courses that can all be walked front to back.
pub fn open_catalog() -> Vec<Course> {
    vec![
        course("a", vec![lesson("a1", 100, false), lesson("a2", 200, false)]),
        course("b", vec![lesson("b1", 100, false)]),
        course(
            "c",
            vec![
                lesson("c1", 100, false),
                lesson("c2", 100, true),
                lesson("c3", 100, false),
            ],
        ),
    ]
}

pub fn store_with(courses: Vec<Course>) -> Arc<MemoryStore> {
    let snapshot = CatalogState::new(courses)
        .and_then(|state| state.to_snapshot())
        .unwrap();
    Arc::new(MemoryStore::with(course_player_core::CATALOG_KEY, &snapshot))
}
