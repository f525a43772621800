//! crates/course_player_core/src/navigation.rs
//!
//! The navigation state machine. It owns the cursor and the playback clock, gates
//! lesson changes on the `locked` flag, and decides when a lesson counts as
//! completed.
//!
//! Guards never fail loudly: a move that cannot happen leaves the state alone and
//! comes back as [`Transition::Rejected`] so callers can tell it was refused.

use tracing::{debug, info, warn};

use crate::catalog::{current_lesson, CatalogState, CatalogStore};
use crate::domain::{Chapter, Cursor, Lesson, TranscriptCue};
use crate::highlight::{active_chapter_index, active_cue};
use crate::ports::PlaybackSurface;

/// Share of the media duration after which a lesson counts as completed.
pub const COMPLETION_THRESHOLD: f64 = 0.9;

/// Why a navigation request left the cursor where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Locked {
        course_index: usize,
        lesson_index: usize,
    },
    OutOfRange {
        course_index: usize,
        lesson_index: usize,
    },
    NoNextLesson,
    NoPreviousLesson,
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: Cursor, to: Cursor },
    Rejected(Rejection),
}

impl Transition {
    pub fn is_moved(&self) -> bool {
        matches!(self, Transition::Moved { .. })
    }

    /// True when the move landed on a different lesson, starting a new activation.
    pub fn changed_lesson(&self) -> bool {
        matches!(self, Transition::Moved { from, to } if from != to)
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Transition::Rejected(reason) => Some(*reason),
            Transition::Moved { .. } => None,
        }
    }
}

//=========================================================================================
// Navigator
//=========================================================================================

#[derive(Debug, Clone, Default)]
pub struct Navigator {
    cursor: Cursor,
    current_time: f64,
    /// Duration reported by the playback surface for the active media, if any.
    media_duration: Option<f64>,
    /// Set once completion fired during the current activation.
    completion_reported: bool,
}

impl Navigator {
    /// Starts on the first lesson of the first course. A [`CatalogState`] always
    /// has that lesson and never has it locked.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn active_lesson<'a>(&self, catalog: &'a CatalogState) -> Option<&'a Lesson> {
        current_lesson(catalog, self.cursor)
    }

    /// Chapters of the active lesson, as stored.
    pub fn active_chapters<'a>(&self, catalog: &'a CatalogState) -> &'a [Chapter] {
        match (catalog.course(self.cursor.course_index), self.active_lesson(catalog)) {
            (Some(course), Some(lesson)) => course.chapters_for(&lesson.id),
            _ => &[],
        }
    }

    pub fn active_cue<'a>(&self, catalog: &'a CatalogState) -> Option<&'a TranscriptCue> {
        let lesson = self.active_lesson(catalog)?;
        active_cue(lesson.cues(), self.current_time)
    }

    pub fn active_chapter_index(&self, catalog: &CatalogState) -> Option<usize> {
        active_chapter_index(self.active_chapters(catalog), self.current_time)
    }

    /// Duration used for the completion check: the surface's figure once it is
    /// known, the catalog's until then.
    pub fn duration(&self, catalog: &CatalogState) -> f64 {
        self.media_duration.unwrap_or_else(|| {
            self.active_lesson(catalog)
                .map(|lesson| f64::from(lesson.duration_sec))
                .unwrap_or(0.0)
        })
    }

    pub fn has_prev(&self) -> bool {
        self.cursor.lesson_index > 0 || self.cursor.course_index > 0
    }

    pub fn has_next(&self, catalog: &CatalogState) -> bool {
        self.next_target(catalog).is_ok()
    }

    //-------------------------------------------------------------------------------------
    // Transitions
    //-------------------------------------------------------------------------------------

    pub fn select_lesson(
        &mut self,
        catalog: &CatalogState,
        course_index: usize,
        lesson_index: usize,
    ) -> Transition {
        let Some(lesson) = catalog.lesson(course_index, lesson_index) else {
            return self.reject(Rejection::OutOfRange {
                course_index,
                lesson_index,
            });
        };
        if lesson.locked {
            return self.reject(Rejection::Locked {
                course_index,
                lesson_index,
            });
        }
        self.move_to(Cursor::new(course_index, lesson_index))
    }

    pub fn next(&mut self, catalog: &CatalogState) -> Transition {
        match self.next_target(catalog) {
            Ok(target) => self.move_to(target),
            Err(reason) => self.reject(reason),
        }
    }

    /// Steps back one lesson, crossing into the previous course's last lesson.
    /// Going backwards never checks `locked`.
    pub fn previous(&mut self, catalog: &CatalogState) -> Transition {
        match self.previous_target(catalog) {
            Ok(target) => self.move_to(target),
            Err(reason) => self.reject(reason),
        }
    }

    /// End of media only navigates. Completion is left to the time threshold.
    pub fn on_ended(&mut self, catalog: &CatalogState) -> Transition {
        debug!("Media ended. Advancing.");
        self.next(catalog)
    }

    pub fn on_loaded_duration(&mut self, duration: f64) {
        if duration.is_finite() && duration > 0.0 {
            self.media_duration = Some(duration);
        } else {
            debug!("Ignoring unusable media duration {}.", duration);
        }
    }

    /// Records the surface's playback position and marks the active lesson
    /// completed once it crosses the threshold. Returns whether completion fired.
    ///
    /// Completion fires at most once per activation, so scrubbing back below the
    /// threshold and forward again does not fire it twice. Leaving the lesson and
    /// coming back starts a new activation.
    pub fn report_time(&mut self, catalog: &mut CatalogStore, time: f64) -> bool {
        if !time.is_finite() {
            warn!("Ignoring non-finite playback time.");
            return false;
        }
        let time = time.max(0.0);
        if time < self.current_time {
            debug!(
                "Playback time went from {:.2} back to {:.2}.",
                self.current_time, time
            );
        }
        self.current_time = time;

        if self.completion_reported {
            return false;
        }
        let duration = self.duration(catalog.state());
        if duration <= 0.0 || time / duration < COMPLETION_THRESHOLD {
            return false;
        }

        self.completion_reported = true;
        let Cursor {
            course_index,
            lesson_index,
        } = self.cursor;
        match catalog.mark_lesson_completed(course_index, lesson_index) {
            Ok(_) => true,
            Err(e) => {
                warn!("Could not mark lesson completed: {}", e);
                false
            }
        }
    }

    /// Asks the surface to move to `time`. The clock is updated right away and
    /// corrected by the next time report.
    pub fn seek(&mut self, surface: &mut dyn PlaybackSurface, time: f64) {
        if !time.is_finite() {
            debug!("Ignoring seek to a non-finite time.");
            return;
        }
        let time = time.max(0.0);
        self.current_time = time;
        surface.seek(time);
    }

    /// Seeks relative to the current position, staying inside the media.
    pub fn skip(
        &mut self,
        catalog: &CatalogState,
        surface: &mut dyn PlaybackSurface,
        delta: f64,
    ) {
        let duration = self.duration(catalog);
        let mut target = (self.current_time + delta).max(0.0);
        if duration > 0.0 {
            target = target.min(duration);
        }
        self.seek(surface, target);
    }

    //-------------------------------------------------------------------------------------
    // Internals
    //-------------------------------------------------------------------------------------

    fn next_target(&self, catalog: &CatalogState) -> Result<Cursor, Rejection> {
        let Cursor {
            course_index,
            lesson_index,
        } = self.cursor;
        let course = catalog.course(course_index).ok_or(Rejection::OutOfRange {
            course_index,
            lesson_index,
        })?;

        let next_lesson = lesson_index + 1;
        if let Some(lesson) = course.lessons.get(next_lesson) {
            return if lesson.locked {
                Err(Rejection::Locked {
                    course_index,
                    lesson_index: next_lesson,
                })
            } else {
                Ok(Cursor::new(course_index, next_lesson))
            };
        }

        let next_course = course_index + 1;
        match catalog
            .course(next_course)
            .and_then(|course| course.lessons.first())
        {
            Some(lesson) if lesson.locked => Err(Rejection::Locked {
                course_index: next_course,
                lesson_index: 0,
            }),
            Some(_) => Ok(Cursor::new(next_course, 0)),
            None => Err(Rejection::NoNextLesson),
        }
    }

    fn previous_target(&self, catalog: &CatalogState) -> Result<Cursor, Rejection> {
        let Cursor {
            course_index,
            lesson_index,
        } = self.cursor;
        if lesson_index > 0 {
            return Ok(Cursor::new(course_index, lesson_index - 1));
        }
        if course_index == 0 {
            return Err(Rejection::NoPreviousLesson);
        }

        let previous_course = course_index - 1;
        catalog
            .course(previous_course)
            .and_then(|course| course.lessons.len().checked_sub(1))
            .map(|last| Cursor::new(previous_course, last))
            .ok_or(Rejection::NoPreviousLesson)
    }

    fn move_to(&mut self, target: Cursor) -> Transition {
        let from = self.cursor;
        if target != from {
            self.completion_reported = false;
            self.media_duration = None;
        }
        self.cursor = target;
        self.current_time = 0.0;
        info!(
            "Moved to course {}, lesson {}.",
            target.course_index, target.lesson_index
        );
        Transition::Moved { from, to: target }
    }

    fn reject(&self, reason: Rejection) -> Transition {
        debug!("Navigation refused: {:?}", reason);
        Transition::Rejected(reason)
    }
}
