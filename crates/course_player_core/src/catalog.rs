//! crates/course_player_core/src/catalog.rs
//!
//! The catalog store: the ordered course list and the one mutation it supports,
//! marking a lesson completed.
//!
//! State is copy-on-write. Every course sits behind its own `Arc`, so marking a
//! lesson rebuilds only the course that owns it and every other course keeps its
//! identity for cheap change detection.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{Course, Cursor, Lesson};
use crate::ports::SnapshotStore;
use crate::seed::seed_courses;

/// Key the catalog snapshot is stored under.
pub const CATALOG_KEY: &str = "courses";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("No lesson at course index {course_index}, lesson index {lesson_index}")]
    IndexOutOfRange {
        course_index: usize,
        lesson_index: usize,
    },
    #[error("The catalog has no first lesson to start from")]
    Empty,
    #[error("The first lesson of the catalog is locked")]
    LockedStart,
    #[error("Malformed catalog snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

//=========================================================================================
// CatalogState (Immutable Snapshot)
//=========================================================================================

/// An immutable view of every course. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct CatalogState {
    courses: Arc<Vec<Arc<Course>>>,
}

impl CatalogState {
    /// Wraps a course list. The first course must start with an unlocked lesson
    /// so a session always has somewhere to start.
    pub fn new(courses: Vec<Course>) -> Result<Self, CatalogError> {
        match courses.first().and_then(|course| course.lessons.first()) {
            None => return Err(CatalogError::Empty),
            Some(lesson) if lesson.locked => return Err(CatalogError::LockedStart),
            Some(_) => {}
        }
        Ok(Self {
            courses: Arc::new(courses.into_iter().map(Arc::new).collect()),
        })
    }

    /// The built-in catalog with every lesson marked not completed.
    pub fn seed() -> Self {
        let courses = seed_courses()
            .into_iter()
            .map(|mut course| {
                for lesson in &mut course.lessons {
                    lesson.completed = false;
                }
                Arc::new(course)
            })
            .collect();
        Self {
            courses: Arc::new(courses),
        }
    }

    /// Decodes a persisted snapshot. Anything that does not decode, or decodes to
    /// a catalog with no starting lesson, is rejected.
    pub fn from_snapshot(snapshot: &str) -> Result<Self, CatalogError> {
        let courses: Vec<Course> = serde_json::from_str(snapshot)?;
        Self::new(courses)
    }

    pub fn to_snapshot(&self) -> Result<String, CatalogError> {
        let courses: Vec<&Course> = self.courses.iter().map(Arc::as_ref).collect();
        Ok(serde_json::to_string(&courses)?)
    }

    pub fn courses(&self) -> &[Arc<Course>] {
        &self.courses
    }

    pub fn course(&self, course_index: usize) -> Option<&Course> {
        self.courses.get(course_index).map(Arc::as_ref)
    }

    pub fn lesson(&self, course_index: usize, lesson_index: usize) -> Option<&Lesson> {
        self.course(course_index)?.lessons.get(lesson_index)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Returns a new state where exactly one lesson is completed. Courses other
    /// than the affected one are shared with `self`.
    pub fn with_lesson_completed(
        &self,
        course_index: usize,
        lesson_index: usize,
    ) -> Result<Self, CatalogError> {
        let lesson = self
            .lesson(course_index, lesson_index)
            .ok_or(CatalogError::IndexOutOfRange {
                course_index,
                lesson_index,
            })?;
        if lesson.completed {
            return Ok(self.clone());
        }

        let mut course = Course::clone(&self.courses[course_index]);
        course.lessons[lesson_index].completed = true;

        let mut courses = Vec::clone(&self.courses);
        courses[course_index] = Arc::new(course);
        Ok(Self {
            courses: Arc::new(courses),
        })
    }
}

/// Resolves the lesson a cursor points at.
pub fn current_lesson(catalog: &CatalogState, cursor: Cursor) -> Option<&Lesson> {
    catalog.lesson(cursor.course_index(), cursor.lesson_index())
}

//=========================================================================================
// CatalogStore (Owner of the Live State)
//=========================================================================================

type Subscriber = Box<dyn FnMut(&CatalogState) + Send>;

/// Owns the live catalog and pushes every change to the snapshot store and to
/// any registered subscribers.
pub struct CatalogStore {
    state: CatalogState,
    store: Arc<dyn SnapshotStore>,
    subscribers: Vec<Subscriber>,
}

impl CatalogStore {
    /// Loads the stored catalog, falling back to the seed when nothing usable is
    /// stored. A malformed snapshot is treated the same as a missing one.
    pub fn initialize(store: Arc<dyn SnapshotStore>) -> Self {
        let state = match store.read(CATALOG_KEY) {
            Ok(Some(snapshot)) => match CatalogState::from_snapshot(&snapshot) {
                Ok(state) => {
                    info!("Loaded stored catalog with {} courses.", state.len());
                    state
                }
                Err(e) => {
                    warn!("Ignoring stored catalog: {}", e);
                    CatalogState::seed()
                }
            },
            Ok(None) => {
                info!("No stored catalog found. Starting from the seed catalog.");
                CatalogState::seed()
            }
            Err(e) => {
                warn!("Failed to read stored catalog: {}", e);
                CatalogState::seed()
            }
        };

        Self {
            state,
            store,
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Registers a callback that receives the full state after every change.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&CatalogState) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn mark_lesson_completed(
        &mut self,
        course_index: usize,
        lesson_index: usize,
    ) -> Result<&CatalogState, CatalogError> {
        let next = self.state.with_lesson_completed(course_index, lesson_index)?;
        if Arc::ptr_eq(&next.courses, &self.state.courses) {
            debug!(
                "Lesson {}/{} was already completed.",
                course_index, lesson_index
            );
            return Ok(&self.state);
        }

        self.state = next;
        info!(
            "Marked lesson {}/{} completed.",
            course_index, lesson_index
        );
        self.publish();
        Ok(&self.state)
    }

    fn publish(&mut self) {
        // A failed write keeps the in-memory change; the next change retries.
        match self.state.to_snapshot() {
            Ok(snapshot) => {
                if let Err(e) = self.store.write(CATALOG_KEY, &snapshot) {
                    warn!("Failed to persist catalog: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize catalog: {}", e),
        }

        for subscriber in &mut self.subscribers {
            subscriber(&self.state);
        }
    }
}
